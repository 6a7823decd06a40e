use super::backend::StorageBackend;
use super::{CONFIG_FILENAME, INDEX_FILENAME};
use crate::error::{FoldsError, Result};
use crate::model::RecordId;
use std::fs;
use std::io;
use std::path::PathBuf;
use uuid::Uuid;

/// File-backed storage rooted at a project's `.js-folds/` directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn read_doc(&self, name: &str) -> Result<Option<String>> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(FoldsError::Io)?;
        Ok(Some(content))
    }

    /// Record ids become file names, so anything but a bare token is refused.
    fn record_file(id: &RecordId) -> io::Result<String> {
        if id.is_valid() {
            Ok(id.file_name())
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid record id {:?}", id.as_str()),
            ))
        }
    }

    /// Atomic write: temp file in the same directory, then rename over the target.
    fn write_doc(&self, name: &str, content: &str) -> Result<()> {
        let target = self.root.join(name);
        let tmp = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));

        let to_write_error = |source| FoldsError::Write {
            target: target.clone(),
            source,
        };

        if let Err(e) = fs::write(&tmp, content) {
            let _ = fs::remove_file(&tmp);
            return Err(to_write_error(e));
        }
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(to_write_error(e));
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn store_available(&self) -> bool {
        self.root.is_dir()
    }

    fn read_config(&self) -> Result<Option<String>> {
        self.read_doc(CONFIG_FILENAME)
    }

    fn write_config(&self, content: &str) -> Result<()> {
        self.write_doc(CONFIG_FILENAME, content)
    }

    fn read_index(&self) -> Result<Option<String>> {
        self.read_doc(INDEX_FILENAME)
    }

    fn write_index(&self, content: &str) -> Result<()> {
        self.write_doc(INDEX_FILENAME, content)
    }

    fn read_record(&self, id: &RecordId) -> Result<Option<String>> {
        let name = Self::record_file(id).map_err(FoldsError::Io)?;
        self.read_doc(&name)
    }

    fn write_record(&self, id: &RecordId, content: &str) -> Result<()> {
        let name = Self::record_file(id).map_err(|source| FoldsError::Write {
            target: self.root.join(id.file_name()),
            source,
        })?;
        self.write_doc(&name, content)
    }

    fn list_record_ids(&self) -> Result<Vec<RecordId>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(FoldsError::Io)? {
            let path = entry.map_err(FoldsError::Io)?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            if name == CONFIG_FILENAME || name == INDEX_FILENAME || name.starts_with('.') {
                continue;
            }
            if let Some(stem) = name.strip_suffix(".json") {
                ids.push(RecordId::from(stem));
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn record_path(&self, id: &RecordId) -> PathBuf {
        self.root.join(id.file_name())
    }
}
