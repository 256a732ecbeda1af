use rusqlite::{Connection, Transaction};

use super::StoreError;

/// Identifier of the implicit root bucket that owns every top-level bucket.
pub(crate) const ROOT_BUCKET_ID: i64 = 0;

/// Create the bucket and entry tables if they are missing.
///
/// The root bucket is a self-referencing row so that every other bucket can
/// carry a non-null parent and cascade on delete.
pub(crate) fn initialise(connection: &mut Connection) -> Result<(), StoreError> {
    let transaction = connection
        .transaction()
        .map_err(|source| StoreError::Schema {
            step: "begin schema transaction",
            source,
        })?;

    run_step(
        &transaction,
        "create buckets",
        "CREATE TABLE IF NOT EXISTS buckets (
            id INTEGER PRIMARY KEY,
            parent INTEGER NOT NULL REFERENCES buckets(id) ON DELETE CASCADE,
            name BLOB NOT NULL,
            UNIQUE (parent, name)
        )",
    )?;
    run_step(
        &transaction,
        "seed root bucket",
        "INSERT OR IGNORE INTO buckets (id, parent, name) VALUES (0, 0, x'')",
    )?;
    run_step(
        &transaction,
        "create entries",
        "CREATE TABLE IF NOT EXISTS entries (
            bucket INTEGER NOT NULL REFERENCES buckets(id) ON DELETE CASCADE,
            key BLOB NOT NULL,
            value BLOB NOT NULL,
            PRIMARY KEY (bucket, key)
        ) WITHOUT ROWID",
    )?;

    transaction.commit().map_err(|source| StoreError::Schema {
        step: "commit schema transaction",
        source,
    })
}

fn run_step(
    transaction: &Transaction<'_>,
    step: &'static str,
    sql: &str,
) -> Result<(), StoreError> {
    transaction
        .execute(sql, [])
        .map(|_| ())
        .map_err(|source| StoreError::Schema { step, source })
}
