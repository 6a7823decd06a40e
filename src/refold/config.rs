use crate::error::{FoldsError, Result};
use crate::store::backend::StorageBackend;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contents of `.js-folds/config.json`.
///
/// The fold tracker itself reads nothing from it; keys are kept as written so
/// other tools sharing the directory can use it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FoldsConfig {
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl FoldsConfig {
    /// Load config through `backend`; an absent file reads as the default.
    pub fn load<S: StorageBackend>(backend: &S) -> Result<Self> {
        match backend.read_config()? {
            Some(content) => Self::parse(&content),
            None => Ok(Self::default()),
        }
    }

    /// Load config through `backend`, creating it as `{}` when absent.
    pub fn load_or_create<S: StorageBackend>(backend: &S) -> Result<Self> {
        match backend.read_config()? {
            Some(content) => Self::parse(&content),
            None => {
                let config = Self::default();
                config.save(backend)?;
                Ok(config)
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(content).map_err(FoldsError::Serialization)
    }

    pub fn save<S: StorageBackend>(&self, backend: &S) -> Result<()> {
        let content = if self.values.is_empty() {
            "{}".to_string()
        } else {
            serde_json::to_string_pretty(self).map_err(FoldsError::Serialization)?
        };
        backend.write_config(&content)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}
