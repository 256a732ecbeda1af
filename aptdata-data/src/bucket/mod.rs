//! Nested key-value buckets persisted in a single SQLite file.
//!
//! A bucket is a named namespace holding byte keys and values, and may own
//! further buckets. Keys within a bucket iterate in byte-wise lexical order.
//! All access happens inside a transaction: [`BucketStore::update`] runs a
//! single writer, [`BucketStore::view`] a read-only snapshot. Returning an
//! error from the closure rolls the transaction back.

mod error;
mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};

pub use error::StoreError;
use schema::ROOT_BUCKET_ID;

/// Transactional bucket store backed by SQLite.
///
/// The store owns a single connection, so a value may move between threads
/// but cannot be shared between them. Other processes or connections may read
/// concurrently; the database runs in WAL mode and only one writer is
/// admitted at a time.
#[derive(Debug)]
pub struct BucketStore {
    connection: Connection,
    path: PathBuf,
}

impl BucketStore {
    /// Open or create the store at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let mut connection = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        configure(&connection)?;
        schema::initialise(&mut connection)?;
        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }

    /// Location of the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` inside a write transaction, committing when it returns `Ok`.
    pub fn update<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Tx<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let inner = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|source| StoreError::transaction("begin write transaction", source))?;
        let tx = Tx {
            inner,
            writable: true,
        };
        let value = f(&tx)?;
        tx.inner
            .commit()
            .map_err(|source| StoreError::transaction("commit write transaction", source))?;
        Ok(value)
    }

    /// Run `f` inside a read-only transaction.
    pub fn view<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Tx<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let inner = self
            .connection
            .unchecked_transaction()
            .map_err(|source| StoreError::transaction("begin read transaction", source))?;
        let tx = Tx {
            inner,
            writable: false,
        };
        let value = f(&tx)?;
        tx.inner
            .rollback()
            .map_err(|source| StoreError::transaction("end read transaction", source))?;
        Ok(value)
    }

    /// Release the underlying connection.
    pub fn close(self) -> Result<(), StoreError> {
        self.connection
            .close()
            .map_err(|(_, source)| StoreError::Close { source })
    }
}

fn configure(connection: &Connection) -> Result<(), StoreError> {
    connection
        .pragma_update(None, "foreign_keys", true)
        .map_err(|source| StoreError::Configure {
            pragma: "foreign_keys",
            source,
        })?;
    connection
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
        .map(|_| ())
        .map_err(|source| StoreError::Configure {
            pragma: "journal_mode",
            source,
        })
}

/// An open transaction against a [`BucketStore`].
pub struct Tx<'conn> {
    inner: Transaction<'conn>,
    writable: bool,
}

impl Tx<'_> {
    /// Whether this transaction may modify the store.
    #[must_use]
    pub const fn writable(&self) -> bool {
        self.writable
    }

    /// The implicit bucket holding every top-level bucket.
    #[must_use]
    pub fn root(&self) -> Bucket<'_> {
        Bucket {
            connection: &self.inner,
            id: ROOT_BUCKET_ID,
            writable: self.writable,
        }
    }

    /// Look up a top-level bucket.
    pub fn bucket(&self, name: &[u8]) -> Result<Option<Bucket<'_>>, StoreError> {
        self.root().bucket(name)
    }

    /// Return the named top-level bucket, creating it when missing.
    pub fn create_bucket_if_not_exists(&self, name: &[u8]) -> Result<Bucket<'_>, StoreError> {
        self.root().create_bucket_if_not_exists(name)
    }

    /// Delete a top-level bucket together with everything it contains.
    pub fn delete_bucket(&self, name: &[u8]) -> Result<(), StoreError> {
        self.root().delete_bucket(name)
    }
}

/// Handle to one bucket, valid for the lifetime of its transaction.
#[derive(Debug, Clone, Copy)]
pub struct Bucket<'tx> {
    connection: &'tx Connection,
    id: i64,
    writable: bool,
}

impl Bucket<'_> {
    /// Look up a nested bucket.
    pub fn bucket(&self, name: &[u8]) -> Result<Option<Self>, StoreError> {
        if name.is_empty() {
            return Ok(None);
        }
        let id = self
            .connection
            .prepare_cached("SELECT id FROM buckets WHERE parent = ?1 AND name = ?2")
            .and_then(|mut statement| {
                statement
                    .query_row((self.id, name), |row| row.get::<_, i64>(0))
                    .optional()
            })
            .map_err(|source| StoreError::transaction("look up bucket", source))?;
        Ok(id.map(|id| self.child(id)))
    }

    /// Return the named nested bucket, creating it when missing.
    pub fn create_bucket_if_not_exists(&self, name: &[u8]) -> Result<Self, StoreError> {
        self.ensure_writable("create bucket")?;
        if name.is_empty() {
            return Err(StoreError::EmptyBucketName);
        }
        if let Some(existing) = self.bucket(name)? {
            return Ok(existing);
        }
        self.connection
            .prepare_cached("INSERT INTO buckets (parent, name) VALUES (?1, ?2)")
            .and_then(|mut statement| statement.execute((self.id, name)))
            .map_err(|source| StoreError::transaction("create bucket", source))?;
        Ok(self.child(self.connection.last_insert_rowid()))
    }

    /// Delete a nested bucket and, recursively, its contents.
    pub fn delete_bucket(&self, name: &[u8]) -> Result<(), StoreError> {
        self.ensure_writable("delete bucket")?;
        if name.is_empty() {
            return Err(StoreError::EmptyBucketName);
        }
        let deleted = self
            .connection
            .prepare_cached("DELETE FROM buckets WHERE parent = ?1 AND name = ?2")
            .and_then(|mut statement| statement.execute((self.id, name)))
            .map_err(|source| StoreError::transaction("delete bucket", source))?;
        if deleted == 0 {
            return Err(StoreError::BucketNotFound {
                name: String::from_utf8_lossy(name).into_owned(),
            });
        }
        Ok(())
    }

    /// Read the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.connection
            .prepare_cached("SELECT value FROM entries WHERE bucket = ?1 AND key = ?2")
            .and_then(|mut statement| {
                statement
                    .query_row((self.id, key), |row| row.get::<_, Vec<u8>>(0))
                    .optional()
            })
            .map_err(|source| StoreError::transaction("read entry", source))
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.ensure_writable("write entry")?;
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        self.connection
            .prepare_cached("INSERT OR REPLACE INTO entries (bucket, key, value) VALUES (?1, ?2, ?3)")
            .and_then(|mut statement| statement.execute((self.id, key, value)))
            .map(|_| ())
            .map_err(|source| StoreError::transaction("write entry", source))
    }

    /// Remove the entry under `key`, returning whether one existed.
    pub fn delete(&self, key: &[u8]) -> Result<bool, StoreError> {
        self.ensure_writable("delete entry")?;
        self.connection
            .prepare_cached("DELETE FROM entries WHERE bucket = ?1 AND key = ?2")
            .and_then(|mut statement| statement.execute((self.id, key)))
            .map(|deleted| deleted > 0)
            .map_err(|source| StoreError::transaction("delete entry", source))
    }

    /// Visit every entry in key order.
    ///
    /// Iteration stops at the first error returned by `f`.
    pub fn for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&[u8], &[u8]) -> Result<(), E>,
        E: From<StoreError>,
    {
        let mut statement = self
            .connection
            .prepare_cached("SELECT key, value FROM entries WHERE bucket = ?1 ORDER BY key")
            .map_err(|source| StoreError::transaction("scan bucket", source))?;
        let mut rows = statement
            .query([self.id])
            .map_err(|source| StoreError::transaction("scan bucket", source))?;
        while let Some(row) = rows
            .next()
            .map_err(|source| StoreError::transaction("scan bucket", source))?
        {
            let key: Vec<u8> = row
                .get(0)
                .map_err(|source| StoreError::transaction("read entry key", source))?;
            let value: Vec<u8> = row
                .get(1)
                .map_err(|source| StoreError::transaction("read entry value", source))?;
            f(&key, &value)?;
        }
        Ok(())
    }

    /// Names of the nested buckets, in lexical order.
    pub fn bucket_names(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        let mut statement = self
            .connection
            .prepare_cached("SELECT name FROM buckets WHERE parent = ?1 AND id != ?1 ORDER BY name")
            .map_err(|source| StoreError::transaction("list buckets", source))?;
        let names: Vec<Vec<u8>> = statement
            .query_map([self.id], |row| row.get::<_, Vec<u8>>(0))
            .and_then(|rows| rows.collect())
            .map_err(|source| StoreError::transaction("list buckets", source))?;
        Ok(names)
    }

    const fn child(&self, id: i64) -> Self {
        Self {
            connection: self.connection,
            id,
            writable: self.writable,
        }
    }

    const fn ensure_writable(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.writable {
            Ok(())
        } else {
            Err(StoreError::ReadOnly { operation })
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support;
