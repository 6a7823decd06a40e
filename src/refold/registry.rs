//! # Identity Registry
//!
//! Maps a file's logical path to the [`RecordId`] naming its fold record.
//! Folds are stored per id rather than per path so a rename only rewrites
//! this mapping; the record document itself never moves.
//!
//! Persisted as `foldsPropaties.json`, a flat object of path → id. Entries are
//! created the first time a file is captured and are never removed.

use crate::error::{FoldsError, Result};
use crate::model::RecordId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityRegistry {
    entries: BTreeMap<String, RecordId>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the mapping document. An absent document is an empty mapping;
    /// anything present must be a JSON object of path to record id.
    pub fn load(raw: Option<&str>) -> Result<Self> {
        let Some(raw) = raw else {
            return Ok(Self::new());
        };
        let entries: BTreeMap<String, RecordId> =
            serde_json::from_str(raw).map_err(|e| FoldsError::IdentityLoad(e.to_string()))?;
        if let Some((file, id)) = entries.iter().find(|(_, id)| !id.is_valid()) {
            return Err(FoldsError::IdentityLoad(format!(
                "invalid record id {:?} for {}",
                id.as_str(),
                file
            )));
        }
        Ok(Self { entries })
    }

    pub fn resolve(&self, file: &str) -> Option<&RecordId> {
        self.entries.get(file)
    }

    /// Return the id for `file`, assigning a fresh one if it has none.
    pub fn ensure(&mut self, file: &str) -> RecordId {
        if let Some(id) = self.entries.get(file) {
            return id.clone();
        }
        let id = self.fresh_id();
        tracing::debug!(file, id = %id, "assigned fold record id");
        self.entries.insert(file.to_string(), id.clone());
        id
    }

    /// Move the id registered for `old` over to `new`.
    ///
    /// Returns false (and changes nothing) when `old` is not registered.
    /// An existing entry for `new` is replaced.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.entries.contains_key(old);
        }
        match self.entries.remove(old) {
            Some(id) => {
                if let Some(replaced) = self.entries.insert(new.to_string(), id) {
                    tracing::warn!(
                        from = old,
                        to = new,
                        dropped = %replaced,
                        "rename replaced an existing fold record mapping"
                    );
                }
                true
            }
            None => false,
        }
    }

    pub fn serialize(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries).map_err(FoldsError::Serialization)
    }

    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordId)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains_id(&self, id: &RecordId) -> bool {
        self.entries.values().any(|v| v == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fresh_id(&self) -> RecordId {
        loop {
            let id = RecordId::generate();
            if !self.contains_id(&id) {
                return id;
            }
        }
    }
}
