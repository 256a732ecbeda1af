//! The population flag marking a complete load.
//!
//! `Meta/IsPopulated` is removed when a load starts and written `true` only
//! after every loader has committed in that load. A missing bucket, a missing
//! key or an undecodable value all mean the catalog is not populated.

use aptdata_core::{CodecError, decode, encode};
use thiserror::Error;

use crate::bucket::{BucketStore, StoreError, Tx};
use crate::layout::{IS_POPULATED, META};

/// Why a catalog does not count as populated.
#[derive(Debug, Error)]
pub enum Unpopulated {
    /// No load has ever completed, or a reload cleared the metadata.
    #[error("meta bucket does not exist")]
    MissingMetaBucket,
    /// The metadata bucket exists without a population flag.
    #[error("population flag is missing")]
    MissingFlag,
    /// The flag is stored as `false`.
    #[error("population flag is false")]
    FlagFalse,
    /// The stored flag could not be decoded.
    #[error(transparent)]
    Decode(CodecError),
    /// Reading the flag failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Check the flag inside an existing transaction.
pub fn check(tx: &Tx<'_>) -> Result<(), Unpopulated> {
    let meta = tx.bucket(META)?.ok_or(Unpopulated::MissingMetaBucket)?;
    let bytes = meta.get(IS_POPULATED)?.ok_or(Unpopulated::MissingFlag)?;
    if decode::<bool>(&bytes).map_err(Unpopulated::Decode)? {
        Ok(())
    } else {
        Err(Unpopulated::FlagFalse)
    }
}

/// Check the flag in its own read transaction.
pub fn require(store: &BucketStore) -> Result<(), Unpopulated> {
    store.view(check)
}

/// Set the flag to `true` in its own write transaction.
pub fn mark_populated(store: &mut BucketStore) -> Result<(), MarkError> {
    let value = encode(&true)?;
    store.update(|tx| {
        tx.create_bucket_if_not_exists(META)?
            .put(IS_POPULATED, &value)
            .map_err(MarkError::from)
    })
}

/// Remove the flag in its own write transaction.
///
/// A store without a metadata bucket is left untouched.
pub fn clear(store: &mut BucketStore) -> Result<(), StoreError> {
    store.update(|tx| match tx.bucket(META)? {
        Some(meta) => meta.delete(IS_POPULATED).map(|_| ()),
        None => Ok(()),
    })
}

/// Errors raised while writing the population flag.
#[derive(Debug, Error)]
pub enum MarkError {
    /// Encoding the flag failed.
    #[error(transparent)]
    Encode(#[from] CodecError),
    /// Writing the flag failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn store() -> (BucketStore, TempDir) {
        let dir = TempDir::new().expect("tempdir");
        let store = BucketStore::open(&dir.path().join("guard.db")).expect("open store");
        (store, dir)
    }

    #[rstest]
    fn fresh_store_has_no_meta_bucket(store: (BucketStore, TempDir)) {
        let (store, _dir) = store;
        assert!(matches!(require(&store), Err(Unpopulated::MissingMetaBucket)));
    }

    #[rstest]
    fn meta_without_flag_is_unpopulated(store: (BucketStore, TempDir)) {
        let (mut store, _dir) = store;
        store
            .update(|tx| tx.create_bucket_if_not_exists(META).map(|_| ()))
            .expect("create meta");
        assert!(matches!(require(&store), Err(Unpopulated::MissingFlag)));
    }

    #[rstest]
    #[case(&[0_u8], "false")]
    #[case(&[7_u8], "corrupt")]
    fn non_true_flags_are_unpopulated(
        store: (BucketStore, TempDir),
        #[case] raw: &'static [u8],
        #[case] label: &str,
    ) {
        let (mut store, _dir) = store;
        store
            .update(|tx| tx.create_bucket_if_not_exists(META)?.put(IS_POPULATED, raw))
            .expect("write flag");
        let err = require(&store).expect_err(label);
        if label == "false" {
            assert!(matches!(err, Unpopulated::FlagFalse));
        } else {
            assert!(matches!(err, Unpopulated::Decode(_)));
        }
    }

    #[rstest]
    fn marked_store_is_populated(store: (BucketStore, TempDir)) {
        let (mut store, _dir) = store;
        mark_populated(&mut store).expect("mark populated");
        require(&store).expect("populated");
    }

    #[rstest]
    fn cleared_store_is_unpopulated(store: (BucketStore, TempDir)) {
        let (mut store, _dir) = store;
        mark_populated(&mut store).expect("mark populated");
        clear(&mut store).expect("clear flag");
        assert!(matches!(require(&store), Err(Unpopulated::MissingFlag)));
    }

    #[rstest]
    fn clearing_a_fresh_store_is_a_no_op(store: (BucketStore, TempDir)) {
        let (mut store, _dir) = store;
        clear(&mut store).expect("clear flag");
        assert!(matches!(require(&store), Err(Unpopulated::MissingMetaBucket)));
    }
}
