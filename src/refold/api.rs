//! # API Facade
//!
//! A thin facade over the command layer for operator tools (the `refold`
//! binary). Editor hosts drive [`FoldSession`] directly; this layer is for
//! inspecting and repairing a project's fold store from outside an editor.
//!
//! `FoldsApi<S: StorageBackend>` is generic over the storage backend:
//! - Production: `FoldsApi<FsBackend>`
//! - Testing: `FoldsApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::session::FoldSession;
use crate::store::backend::StorageBackend;

pub struct FoldsApi<S: StorageBackend> {
    session: FoldSession<S>,
    paths: commands::FoldsPaths,
}

impl<S: StorageBackend> FoldsApi<S> {
    /// Open the store behind `backend`. Fails like session activation does
    /// (a missing directory or unreadable mapping is an error), but creates
    /// no documents; only `rename` writes.
    pub fn open(backend: S, paths: commands::FoldsPaths) -> Result<Self> {
        let mut session = FoldSession::new(backend);
        session.inspect()?;
        Ok(Self { session, paths })
    }

    pub fn list_files(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.session)
    }

    pub fn show_folds(&self, file: &str) -> Result<commands::CmdResult> {
        commands::show::run(&self.session, file)
    }

    pub fn rename(&mut self, old: &str, new: &str) -> Result<commands::CmdResult> {
        commands::rename::run(&mut self.session, old, new)
    }

    pub fn doctor(&self) -> Result<commands::CmdResult> {
        commands::doctor::run(&self.session)
    }

    pub fn config(&self, key: Option<&str>) -> Result<commands::CmdResult> {
        commands::config::run(&self.session, key)
    }

    /// Notifications raised while loading (e.g. records that failed to decode).
    pub fn take_messages(&mut self) -> Vec<commands::CmdMessage> {
        self.session.take_messages()
    }

    pub fn paths(&self) -> &commands::FoldsPaths {
        &self.paths
    }
}

/// Create the store directory. Does not need an open store.
pub fn init(paths: &commands::FoldsPaths) -> Result<commands::CmdResult> {
    commands::init::run(paths)
}

pub use commands::doctor::DoctorReport;
pub use commands::{CmdMessage, CmdResult, FoldsPaths, MessageLevel, TrackedFile};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FoldsError;
    use crate::store::memory::MemBackend;
    use crate::store::{CONFIG_FILENAME, INDEX_FILENAME};
    use std::path::PathBuf;

    fn paths() -> FoldsPaths {
        FoldsPaths::for_project(PathBuf::from("/project"))
    }

    #[test]
    fn open_fails_without_store() {
        let err = FoldsApi::open(MemBackend::unavailable(), paths()).err().unwrap();
        assert!(matches!(err, FoldsError::Setup(_)));
    }

    #[test]
    fn inspection_writes_nothing() {
        let backend = MemBackend::new();
        backend.put(INDEX_FILENAME, r#"{"/a.js": "ab12cd34"}"#);
        let api = FoldsApi::open(backend, paths()).unwrap();

        api.list_files().unwrap();
        api.show_folds("/a.js").unwrap();
        api.doctor().unwrap();
        api.config(None).unwrap();
        assert_eq!(api.session.backend().write_count(), 0);
        assert_eq!(api.session.backend().get(CONFIG_FILENAME), None);
    }

    #[test]
    fn dispatches_to_commands() {
        let backend = MemBackend::new();
        backend.put(INDEX_FILENAME, r#"{"/a.js": "ab12cd34"}"#);
        let mut api = FoldsApi::open(backend, paths()).unwrap();

        assert_eq!(api.list_files().unwrap().tracked_files.len(), 1);
        assert!(api.show_folds("/a.js").unwrap().folds.is_empty());
        api.rename("/a.js", "/b.js").unwrap();
        assert!(api.show_folds("/a.js").is_err());
        assert!(api.show_folds("/b.js").is_ok());
        assert!(api.config(None).unwrap().config.is_some());
        assert!(!api.doctor().unwrap().messages.is_empty());
        assert_eq!(api.paths().store_dir, PathBuf::from("/project/.js-folds"));
    }
}
