//! # Storage Layer
//!
//! Two halves:
//!
//! - [`FoldRecordStore`]: the in-memory folds of every captured file, keyed by
//!   [`RecordId`]. This is the authoritative state while a session is running.
//! - [`backend::StorageBackend`]: raw document I/O. The session decides what to
//!   read and write; the backend only knows where documents live.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: production, one directory per project.
//! - [`memory::MemBackend`]: in-memory, for tests (with write-error simulation).
//!
//! ## Storage Layout
//!
//! ```text
//! .js-folds/
//! ├── config.json          # Freeform configuration, `{}` by default
//! ├── foldsPropaties.json  # File path → record id
//! └── {id}.json            # Folds of one file
//! ```
//!
//! Records are keyed by id rather than path so renaming a file only rewrites
//! the mapping document.

use crate::codec;
use crate::error::Result;
use crate::model::{FoldRange, RecordId};
use std::collections::{BTreeMap, BTreeSet};

pub mod backend;
pub mod fs;
pub mod memory;

pub const STORE_DIR_NAME: &str = ".js-folds";
pub const CONFIG_FILENAME: &str = "config.json";
pub const INDEX_FILENAME: &str = "foldsPropaties.json";

/// In-memory folds per record id.
///
/// Entries are created on first capture, replaced wholesale on every later
/// capture, and never removed. `dirty` tracks ids whose document is behind
/// memory; a failed write leaves the id dirty so the next flush retries it.
#[derive(Debug, Default)]
pub struct FoldRecordStore {
    records: BTreeMap<RecordId, Vec<FoldRange>>,
    dirty: BTreeSet<RecordId>,
}

impl FoldRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a record document into memory. An absent document loads as empty.
    ///
    /// Loaded records are clean: they already match what is on disk.
    pub fn load(&mut self, id: &RecordId, raw: Option<&str>) -> Result<Vec<FoldRange>> {
        let ranges = match raw {
            Some(text) => codec::decode(id, text)?,
            None => Vec::new(),
        };
        self.records.insert(id.clone(), ranges.clone());
        self.dirty.remove(id);
        Ok(ranges)
    }

    /// Current folds for `id`, empty when nothing was captured yet.
    pub fn get(&self, id: &RecordId) -> &[FoldRange] {
        self.records.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    pub fn set(&mut self, id: RecordId, ranges: Vec<FoldRange>) {
        self.dirty.insert(id.clone());
        self.records.insert(id, ranges);
    }

    pub fn serialize(&self, id: &RecordId) -> Result<String> {
        codec::encode(self.get(id))
    }

    /// Ids whose document needs writing, in sorted order.
    pub fn dirty_ids(&self) -> Vec<RecordId> {
        self.dirty.iter().cloned().collect()
    }

    pub fn mark_clean(&mut self, id: &RecordId) {
        self.dirty.remove(id);
    }

    pub fn is_dirty(&self, id: &RecordId) -> bool {
        self.dirty.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
