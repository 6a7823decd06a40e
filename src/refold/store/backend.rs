use crate::error::Result;
use crate::model::RecordId;
use std::path::PathBuf;

/// Abstract interface for raw document I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `FoldSession` handles the "what" (load order, capture, flush).
///
/// All documents are UTF-8 text. Reads return `Ok(None)` when the document
/// does not exist; `Err` is reserved for real I/O failures.
pub trait StorageBackend {
    /// Check that the persistence directory exists.
    fn store_available(&self) -> bool;

    // --- Config ---

    /// Read `config.json`
    fn read_config(&self) -> Result<Option<String>>;

    fn write_config(&self, content: &str) -> Result<()>;

    // --- Identity mapping ---

    /// Read `foldsPropaties.json`
    fn read_index(&self) -> Result<Option<String>>;

    /// Write the mapping document.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_index(&self, content: &str) -> Result<()>;

    // --- Fold records ---

    fn read_record(&self, id: &RecordId) -> Result<Option<String>>;

    /// Write one fold record. Same atomicity requirement as `write_index`.
    fn write_record(&self, id: &RecordId, content: &str) -> Result<()>;

    /// Every record id that has a document in storage (for doctor).
    fn list_record_ids(&self) -> Result<Vec<RecordId>>;

    /// Where a record lives. For `MemBackend` this is a virtual path.
    fn record_path(&self, id: &RecordId) -> PathBuf;
}
