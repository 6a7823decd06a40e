use super::backend::StorageBackend;
use super::{CONFIG_FILENAME, INDEX_FILENAME};
use crate::error::{FoldsError, Result};
use crate::model::RecordId;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since a fold session is
/// single-threaded; the `StorageBackend` trait takes `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    available: bool,
    docs: RefCell<BTreeMap<String, String>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    /// An existing, empty persistence directory.
    pub fn new() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    /// A backend whose persistence directory does not exist.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Seed a document directly, bypassing write accounting.
    pub fn put(&self, name: &str, content: &str) {
        self.docs
            .borrow_mut()
            .insert(name.to_string(), content.to_string());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.docs.borrow().get(name).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    fn write(&self, name: &str, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(FoldsError::Write {
                target: PathBuf::from(name),
                source: io::Error::other("Simulated write error"),
            });
        }
        self.put(name, content);
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn store_available(&self) -> bool {
        self.available
    }

    fn read_config(&self) -> Result<Option<String>> {
        Ok(self.get(CONFIG_FILENAME))
    }

    fn write_config(&self, content: &str) -> Result<()> {
        self.write(CONFIG_FILENAME, content)
    }

    fn read_index(&self) -> Result<Option<String>> {
        Ok(self.get(INDEX_FILENAME))
    }

    fn write_index(&self, content: &str) -> Result<()> {
        self.write(INDEX_FILENAME, content)
    }

    fn read_record(&self, id: &RecordId) -> Result<Option<String>> {
        Ok(self.get(&id.file_name()))
    }

    fn write_record(&self, id: &RecordId, content: &str) -> Result<()> {
        self.write(&id.file_name(), content)
    }

    fn list_record_ids(&self) -> Result<Vec<RecordId>> {
        Ok(self
            .docs
            .borrow()
            .keys()
            .filter(|name| name.as_str() != CONFIG_FILENAME && name.as_str() != INDEX_FILENAME)
            .filter_map(|name| name.strip_suffix(".json"))
            .map(RecordId::from)
            .collect())
    }

    fn record_path(&self, id: &RecordId) -> PathBuf {
        PathBuf::from(format!("mem://{}", id.file_name()))
    }
}
