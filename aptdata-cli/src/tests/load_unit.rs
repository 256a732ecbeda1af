//! Focused unit tests covering load CLI configuration and execution.

use super::helpers::{Workspace, parse_output};
use crate::load::{LoadArgs, LoadConfig, config_from_layers_for_test, run_load_with};
use crate::{ARG_DATA_DIR, ARG_DATABASE, CliError, ENV_LOAD_DATA_DIR, ENV_LOAD_DATABASE};
use aptdata_data::{AptDb, CatalogError, LoadError, ParseMode};
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;
use std::fs;

#[rstest]
#[case(None, Some(Utf8PathBuf::from("data")), ARG_DATABASE, ENV_LOAD_DATABASE)]
#[case(Some(Utf8PathBuf::from("aptdata.db")), None, ARG_DATA_DIR, ENV_LOAD_DATA_DIR)]
fn converting_without_required_fields_errors(
    #[case] database: Option<Utf8PathBuf>,
    #[case] data_dir: Option<Utf8PathBuf>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = LoadArgs {
        database,
        data_dir,
        ..LoadArgs::default()
    };
    let err = LoadConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(None, ParseMode::Lenient)]
#[case(Some(false), ParseMode::Lenient)]
#[case(Some(true), ParseMode::Strict)]
fn strict_flag_selects_parse_mode(#[case] strict: Option<bool>, #[case] expected: ParseMode) {
    let args = LoadArgs {
        database: Some(Utf8PathBuf::from("aptdata.db")),
        data_dir: Some(Utf8PathBuf::from("data")),
        strict,
        reload: None,
    };
    let config = LoadConfig::try_from(args).expect("config should build");
    assert_eq!(config.options.parse_mode, expected);
    assert!(!config.reload);
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "database": "from-file.db",
            "data_dir": "from-file",
            "strict": true,
        }),
        None,
    );
    composer.push_environment(json!({ "data_dir": "from-env", "reload": true }));
    composer.push_cli(json!({ "database": "from-cli.db" }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.database, Utf8PathBuf::from("from-cli.db"));
    assert_eq!(config.data_dir, Utf8PathBuf::from("from-env"));
    assert_eq!(config.options.parse_mode, ParseMode::Strict);
    assert!(config.reload);
}

#[rstest]
fn load_prints_the_report_and_populates_the_catalog() {
    let workspace = Workspace::new().with_sources();
    let mut output = Vec::new();

    run_load_with(&workspace.load_config(), &mut output).expect("load should succeed");

    let report = parse_output(&output);
    assert_eq!(report["airports"]["records"], json!(2));
    assert_eq!(report["runways"]["records"], json!(2));
    assert_eq!(report["countries"]["records"], json!(1));
    assert_eq!(report["regions"]["records"], json!(1));
    assert_eq!(report["airports"]["kind"], json!("airport"));

    let db = AptDb::open(&workspace.database()).expect("reopen catalog");
    assert!(db.populated());
}

#[rstest]
fn reload_drops_records_missing_from_new_exports() {
    let workspace = Workspace::new().with_sources();
    run_load_with(&workspace.load_config(), &mut Vec::new()).expect("initial load");

    let airports = workspace.data_dir().join("airports.csv");
    let header = fs::read_to_string(&airports)
        .expect("read airports")
        .lines()
        .next()
        .map(str::to_owned)
        .expect("header line");
    fs::write(&airports, format!("{header}\n")).expect("truncate airports");

    let config = LoadConfig {
        reload: true,
        ..workspace.load_config()
    };
    let mut output = Vec::new();
    run_load_with(&config, &mut output).expect("reload should succeed");

    assert_eq!(parse_output(&output)["airports"]["records"], json!(0));
    let db = AptDb::open(&workspace.database()).expect("reopen catalog");
    assert!(matches!(
        db.airport("KSEA"),
        Err(CatalogError::NotFound { .. })
    ));
}

#[rstest]
fn load_reports_missing_sources() {
    let workspace = Workspace::new();
    let mut output = Vec::new();

    let err = run_load_with(&workspace.load_config(), &mut output).expect_err("no sources");

    match err {
        CliError::Catalog { path, source } => {
            assert_eq!(path, workspace.database());
            assert!(matches!(
                *source,
                CatalogError::Load(LoadError::SourceFile { .. })
            ));
        }
        other => panic!("expected CliError::Catalog, found {other:?}"),
    }
    assert!(output.is_empty());
}
