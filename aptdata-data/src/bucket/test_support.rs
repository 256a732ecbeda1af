//! Whole-store snapshots for comparing test outcomes.

use super::{Bucket, BucketStore, StoreError};

/// One stored entry: the bucket path from the root, the key and the value.
pub(crate) type SnapshotEntry = (Vec<Vec<u8>>, Vec<u8>, Vec<u8>);

/// Every entry in every bucket, in bucket-path then key order.
pub(crate) fn snapshot(store: &BucketStore) -> Vec<SnapshotEntry> {
    store
        .view(|tx| {
            let mut entries = Vec::new();
            collect(tx.root(), &mut Vec::new(), &mut entries)?;
            Ok::<_, StoreError>(entries)
        })
        .expect("snapshot store")
}

fn collect(
    bucket: Bucket<'_>,
    path: &mut Vec<Vec<u8>>,
    entries: &mut Vec<SnapshotEntry>,
) -> Result<(), StoreError> {
    bucket.for_each(|key, value| {
        entries.push((path.clone(), key.to_vec(), value.to_vec()));
        Ok::<_, StoreError>(())
    })?;
    for name in bucket.bucket_names()? {
        let Some(child) = bucket.bucket(&name)? else {
            continue;
        };
        path.push(name);
        collect(child, path, entries)?;
        path.pop();
    }
    Ok(())
}
