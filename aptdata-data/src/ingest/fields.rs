//! Typed access to the columns of one CSV row.

use std::str::FromStr;

use csv::StringRecord;
use log::debug;

use super::{ParseMode, RowParseError};

/// Column reader handed to [`super::SourceLoader::parse_row`].
///
/// Callers must have checked the row width; indices past the end read as
/// empty. Empty numeric and boolean fields read as zero or `false` in every
/// mode. Non-empty values that fail to parse fall back to zero or `false`
/// under [`ParseMode::Lenient`] and are rejected under [`ParseMode::Strict`].
#[derive(Debug)]
pub struct Fields<'r> {
    record: &'r StringRecord,
    mode: ParseMode,
    line: u64,
    defaulted: u64,
}

impl<'r> Fields<'r> {
    pub(crate) const fn new(record: &'r StringRecord, mode: ParseMode, line: u64) -> Self {
        Self {
            record,
            mode,
            line,
            defaulted: 0,
        }
    }

    /// Parsing mode applied to this row.
    #[must_use]
    pub const fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Raw text of a column.
    #[must_use]
    pub fn text(&self, index: usize) -> String {
        self.raw(index).to_owned()
    }

    /// Raw text of a key column, which must not be empty.
    pub fn key(&self, index: usize, column: &'static str) -> Result<String, RowParseError> {
        let value = self.raw(index);
        if value.is_empty() {
            return Err(RowParseError::MissingKey { column });
        }
        Ok(value.to_owned())
    }

    /// Signed integer column.
    pub fn integer(&mut self, index: usize, column: &'static str) -> Result<i64, RowParseError> {
        self.number(index, column)
    }

    /// Floating-point column.
    pub fn float(&mut self, index: usize, column: &'static str) -> Result<f64, RowParseError> {
        self.number(index, column)
    }

    /// Boolean column encoded as `"1"` for true.
    ///
    /// Lenient parsing treats every other value as `false`. Strict parsing
    /// accepts only `"1"`, `"0"` and the empty string.
    pub fn flag(&mut self, index: usize, column: &'static str) -> Result<bool, RowParseError> {
        match self.raw(index) {
            "1" => Ok(true),
            "0" | "" => Ok(false),
            other => self.fallback(index, column, other).map(|()| false),
        }
    }

    pub(crate) const fn defaulted(&self) -> u64 {
        self.defaulted
    }

    fn raw(&self, index: usize) -> &'r str {
        self.record.get(index).unwrap_or_default()
    }

    fn number<T>(&mut self, index: usize, column: &'static str) -> Result<T, RowParseError>
    where
        T: FromStr + Default,
    {
        let value = self.raw(index);
        if value.is_empty() {
            return Ok(T::default());
        }
        match value.parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => self.fallback(index, column, value).map(|()| T::default()),
        }
    }

    fn fallback(
        &mut self,
        index: usize,
        column: &'static str,
        value: &str,
    ) -> Result<(), RowParseError> {
        match self.mode {
            ParseMode::Strict => Err(RowParseError::InvalidField {
                column,
                index,
                value: value.to_owned(),
            }),
            ParseMode::Lenient => {
                debug!(
                    "line {}: defaulting unparseable {column} value {value:?}",
                    self.line
                );
                self.defaulted += 1;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(values: &[&str]) -> StringRecord {
        StringRecord::from(values.to_vec())
    }

    #[rstest]
    #[case("", ParseMode::Lenient, Some(0), 0)]
    #[case("", ParseMode::Strict, Some(0), 0)]
    #[case("433", ParseMode::Strict, Some(433), 0)]
    #[case("-12", ParseMode::Lenient, Some(-12), 0)]
    #[case("abc", ParseMode::Lenient, Some(0), 1)]
    #[case("abc", ParseMode::Strict, None, 0)]
    #[case("12.5", ParseMode::Lenient, Some(0), 1)]
    fn integer_parsing_follows_mode(
        #[case] raw: &str,
        #[case] mode: ParseMode,
        #[case] expected: Option<i64>,
        #[case] defaulted: u64,
    ) {
        let record = row(&["x", raw]);
        let mut fields = Fields::new(&record, mode, 2);
        let parsed = fields.integer(1, "elevation_ft").ok();
        assert_eq!(parsed, expected);
        assert_eq!(fields.defaulted(), defaulted);
    }

    #[rstest]
    #[case("47.449", Some(47.449))]
    #[case("-122.309", Some(-122.309))]
    #[case("", Some(0.0))]
    #[case("north", None)]
    fn strict_float_parsing(#[case] raw: &str, #[case] expected: Option<f64>) {
        let record = row(&[raw]);
        let mut fields = Fields::new(&record, ParseMode::Strict, 2);
        assert_eq!(fields.float(0, "latitude_deg").ok(), expected);
    }

    #[rstest]
    #[case("1", ParseMode::Lenient, Some(true))]
    #[case("0", ParseMode::Lenient, Some(false))]
    #[case("yes", ParseMode::Lenient, Some(false))]
    #[case("1", ParseMode::Strict, Some(true))]
    #[case("", ParseMode::Strict, Some(false))]
    #[case("yes", ParseMode::Strict, None)]
    fn flag_parsing_follows_mode(
        #[case] raw: &str,
        #[case] mode: ParseMode,
        #[case] expected: Option<bool>,
    ) {
        let record = row(&[raw]);
        let mut fields = Fields::new(&record, mode, 2);
        assert_eq!(fields.flag(0, "lighted").ok(), expected);
    }

    #[rstest]
    fn invalid_field_names_column_and_value() {
        let record = row(&["", "abc"]);
        let mut fields = Fields::new(&record, ParseMode::Strict, 2);
        let err = fields.integer(1, "length_ft").expect_err("strict rejects");
        assert!(matches!(
            err,
            RowParseError::InvalidField { column: "length_ft", index: 1, ref value } if value == "abc"
        ));
    }

    #[rstest]
    fn empty_key_is_rejected() {
        let record = row(&["1", ""]);
        let fields = Fields::new(&record, ParseMode::Lenient, 2);
        let err = fields.key(1, "ident").expect_err("empty key");
        assert!(matches!(err, RowParseError::MissingKey { column: "ident" }));
        assert_eq!(fields.key(0, "id").expect("present key"), "1");
    }

    #[rstest]
    fn indices_past_the_end_read_as_empty() {
        let record = row(&["only"]);
        let fields = Fields::new(&record, ParseMode::Strict, 2);
        assert_eq!(fields.text(5), "");
    }
}
