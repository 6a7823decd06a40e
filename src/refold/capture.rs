//! # Capture and Apply
//!
//! The bridge between live editor buffers and the persisted model.
//!
//! - **Capture** reads the folded regions out of every open buffer and
//!   records them against the buffer's [`RecordId`], assigning ids to files
//!   seen for the first time.
//! - **Apply** asks a buffer to fold previously stored ranges.
//!
//! The host editor is reached only through the [`Buffer`] trait.

use crate::model::{FoldRange, RecordId};
use crate::registry::IdentityRegistry;
use std::collections::BTreeMap;

/// An open editor buffer, as seen by the fold tracker.
pub trait Buffer {
    /// Logical path of the file, or `None` for untitled buffers.
    fn file_identity(&self) -> Option<String>;

    /// Every currently folded region. May contain duplicates.
    fn folded_ranges(&self) -> Vec<FoldRange>;

    /// Fold `range`. Implementations must tolerate ranges that are already
    /// folded or no longer fit the buffer.
    fn fold(&mut self, range: &FoldRange);
}

/// Drop exact duplicates, keeping the first occurrence of each range.
///
/// Only identical ranges collapse; nested or overlapping folds are all kept.
pub fn dedup_ranges(ranges: impl IntoIterator<Item = FoldRange>) -> Vec<FoldRange> {
    let mut out: Vec<FoldRange> = Vec::new();
    for range in ranges {
        if !out.contains(&range) {
            out.push(range);
        }
    }
    out
}

/// Read the live folds of every buffer that has a file identity.
///
/// Buffers without an identity are skipped. When two buffers show the same
/// file the later one wins.
pub fn capture<'a, B, I>(
    registry: &mut IdentityRegistry,
    buffers: I,
) -> BTreeMap<RecordId, Vec<FoldRange>>
where
    B: Buffer + ?Sized + 'a,
    I: IntoIterator<Item = &'a B>,
{
    let mut captured = BTreeMap::new();
    for buffer in buffers {
        let Some(file) = buffer.file_identity() else {
            continue;
        };
        let id = registry.ensure(&file);
        let folds = dedup_ranges(buffer.folded_ranges());
        tracing::debug!(file = %file, id = %id, folds = folds.len(), "captured folds");
        captured.insert(id, folds);
    }
    captured
}

/// Fold each range on `buffer`, in order. Returns how many were applied.
pub fn apply<B: Buffer + ?Sized>(buffer: &mut B, ranges: &[FoldRange]) -> usize {
    for range in ranges {
        buffer.fold(range);
    }
    ranges.len()
}
