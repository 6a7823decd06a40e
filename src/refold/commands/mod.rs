use crate::config::FoldsConfig;
use crate::error::{FoldsError, Result};
use crate::model::{FoldRange, RecordId};
use std::path::PathBuf;

pub mod config;
pub mod doctor;
pub mod init;
pub mod list;
pub mod rename;
pub mod show;

/// Where a project keeps its fold state.
#[derive(Debug, Clone)]
pub struct FoldsPaths {
    pub project_root: PathBuf,
    pub store_dir: PathBuf,
}

impl FoldsPaths {
    pub fn for_project(project_root: PathBuf) -> Self {
        let store_dir = project_root.join(crate::store::STORE_DIR_NAME);
        Self {
            project_root,
            store_dir,
        }
    }

    /// The first root wins; an editor with no project open has nowhere to store folds.
    pub fn from_roots(roots: &[PathBuf]) -> Result<Self> {
        roots
            .first()
            .cloned()
            .map(Self::for_project)
            .ok_or_else(|| FoldsError::Setup("No project root is open".to_string()))
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One tracked file as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    pub path: String,
    pub id: RecordId,
    pub folds: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub tracked_files: Vec<TrackedFile>,
    pub folds: Vec<FoldRange>,
    pub record_paths: Vec<PathBuf>,
    pub config: Option<FoldsConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_tracked_files(mut self, files: Vec<TrackedFile>) -> Self {
        self.tracked_files = files;
        self
    }

    pub fn with_folds(mut self, folds: Vec<FoldRange>) -> Self {
        self.folds = folds;
        self
    }

    pub fn with_record_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.record_paths = paths;
        self
    }

    pub fn with_config(mut self, config: FoldsConfig) -> Self {
        self.config = Some(config);
        self
    }
}
