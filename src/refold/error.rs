use crate::model::RecordId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoldsError {
    /// The persistence directory (or the project root holding it) is missing.
    #[error("Setup error: {0}")]
    Setup(String),

    /// The identity mapping document could not be read or parsed.
    #[error("Could not load fold identities: {0}")]
    IdentityLoad(String),

    /// One fold record document is unreadable or malformed.
    #[error("Malformed fold record {id}: {reason}")]
    MalformedRecord { id: RecordId, reason: String },

    #[error("Failed to write {}: {source}", target.display())]
    Write {
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No folds recorded for {0}")]
    UnknownIdentity(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FoldsError {
    /// Session-scoped errors halt the lifecycle; record-scoped ones never do.
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, FoldsError::Setup(_) | FoldsError::IdentityLoad(_))
    }
}

pub type Result<T> = std::result::Result<T, FoldsError>;
