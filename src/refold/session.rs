//! # Fold Session
//!
//! [`FoldSession`] owns all fold state for one project while an editor is
//! running: the identity mapping, the in-memory fold records, and the
//! storage backend they are flushed to. The host constructs one session at
//! activation and forwards editor events to it; nothing else mutates the
//! state.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized ──load──▶ Loading ──▶ Ready ◀──▶ Flushing
//!       ▲                    │
//!       └──── setup / identity load failure
//! ```
//!
//! - Loading reads `config.json` and `foldsPropaties.json` (creating either
//!   as `{}` when absent), then every record the mapping references.
//!   [`FoldSession::inspect`] loads the same way but creates nothing, for
//!   tools that only look at a store. Only
//!   once all records are in memory does the session become `Ready` and hand
//!   folds to buffers.
//! - A malformed record degrades to "no folds" for that file. A missing
//!   directory or unreadable mapping leaves the session `Uninitialized`, and
//!   every later event is ignored.
//! - Close and session-end events capture every open buffer and flush.
//!   A rename rewrites the mapping and flushes immediately.
//!
//! ## Failure reporting
//!
//! Every failure is logged through `tracing` and queued as a [`CmdMessage`];
//! the host drains them with [`FoldSession::take_messages`] to show the user.
//! A failed write leaves memory authoritative: the record stays dirty and the
//! next flush writes the then-current state.

use crate::capture::{self, Buffer};
use crate::commands::CmdMessage;
use crate::config::FoldsConfig;
use crate::error::{FoldsError, Result};
use crate::model::{FoldRange, RecordId};
use crate::registry::IdentityRegistry;
use crate::store::backend::StorageBackend;
use crate::store::FoldRecordStore;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Ready,
    Flushing,
}

/// Outcome of the startup load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Records referenced by the mapping.
    pub records: usize,
    /// Records that could not be read or decoded and were loaded as empty.
    pub degraded: Vec<RecordId>,
    /// Folds applied to buffers open at load time.
    pub applied: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlushReport {
    pub written: Vec<RecordId>,
}

pub struct FoldSession<S: StorageBackend> {
    backend: S,
    state: SessionState,
    config: FoldsConfig,
    registry: IdentityRegistry,
    records: FoldRecordStore,
    messages: Vec<CmdMessage>,
}

impl<S: StorageBackend> FoldSession<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            state: SessionState::Uninitialized,
            config: FoldsConfig::default(),
            registry: IdentityRegistry::new(),
            records: FoldRecordStore::new(),
            messages: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn config(&self) -> &FoldsConfig {
        &self.config
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn records(&self) -> &FoldRecordStore {
        &self.records
    }

    /// Drain the notifications queued since the last call.
    pub fn take_messages(&mut self) -> Vec<CmdMessage> {
        std::mem::take(&mut self.messages)
    }

    /// Load persisted state without touching any buffer.
    pub fn load(&mut self) -> Result<LoadReport> {
        self.load_with(true)
    }

    /// Like [`load`](Self::load), but never writes: absent documents are
    /// read as empty and left absent.
    pub fn inspect(&mut self) -> Result<LoadReport> {
        self.load_with(false)
    }

    fn load_with(&mut self, create_missing: bool) -> Result<LoadReport> {
        if self.state != SessionState::Uninitialized {
            tracing::debug!(state = ?self.state, "fold session already loaded");
            return Ok(LoadReport::default());
        }

        if !self.backend.store_available() {
            let err = FoldsError::Setup(
                "There is no .js-folds directory. Please check in project directory.".to_string(),
            );
            self.report(&err);
            return Err(err);
        }

        self.state = SessionState::Loading;
        match self.load_documents(create_missing) {
            Ok(report) => {
                self.state = SessionState::Ready;
                tracing::info!(
                    files = self.registry.len(),
                    records = self.records.len(),
                    degraded = report.degraded.len(),
                    "fold session ready"
                );
                Ok(report)
            }
            Err(err) => {
                self.state = SessionState::Uninitialized;
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Load persisted state, then restore folds on every buffer already open.
    pub fn initialize<'a, B, I>(&mut self, open_buffers: I) -> Result<LoadReport>
    where
        B: Buffer + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut B>,
    {
        let mut report = self.load()?;
        if self.is_ready() {
            for buffer in open_buffers {
                report.applied += self.on_buffer_opened(buffer);
            }
        }
        Ok(report)
    }

    /// Stored folds for a file path, empty when none are known.
    pub fn folds_for(&self, file: &str) -> &[FoldRange] {
        match self.registry.resolve(file) {
            Some(id) => self.records.get(id),
            None => &[],
        }
    }

    /// Restore stored folds on a newly opened buffer. Returns how many were applied.
    pub fn on_buffer_opened<B: Buffer + ?Sized>(&mut self, buffer: &mut B) -> usize {
        if !self.is_ready() {
            return 0;
        }
        let Some(file) = buffer.file_identity() else {
            return 0;
        };
        let ranges = self.folds_for(&file).to_vec();
        let applied = capture::apply(buffer, &ranges);
        if applied > 0 {
            tracing::debug!(file = %file, folds = applied, "restored folds");
        }
        applied
    }

    /// Follow a file to its new path and flush the mapping straight away.
    ///
    /// Renaming a path the session has never seen changes nothing and writes nothing.
    pub fn on_path_renamed(&mut self, old: &str, new: &str) -> Result<FlushReport> {
        if !self.is_ready() {
            return Ok(FlushReport::default());
        }
        if !self.registry.rename(old, new) {
            tracing::debug!(from = old, to = new, "rename of untracked file ignored");
            return Ok(FlushReport::default());
        }
        tracing::debug!(from = old, to = new, "fold record follows rename");
        self.flush()
    }

    /// Record the live folds of every open buffer into memory.
    /// Returns the number of buffers captured.
    pub fn capture<'a, B, I>(&mut self, open_buffers: I) -> usize
    where
        B: Buffer + ?Sized + 'a,
        I: IntoIterator<Item = &'a B>,
    {
        if !self.is_ready() {
            return 0;
        }
        let captured = capture::capture(&mut self.registry, open_buffers);
        let count = captured.len();
        for (id, folds) in captured {
            self.records.set(id, folds);
        }
        count
    }

    pub fn on_buffer_closed<'a, B, I>(&mut self, open_buffers: I) -> Result<FlushReport>
    where
        B: Buffer + ?Sized + 'a,
        I: IntoIterator<Item = &'a B>,
    {
        self.capture(open_buffers);
        self.flush()
    }

    pub fn on_session_end<'a, B, I>(&mut self, open_buffers: I) -> Result<FlushReport>
    where
        B: Buffer + ?Sized + 'a,
        I: IntoIterator<Item = &'a B>,
    {
        self.capture(open_buffers);
        let report = self.flush()?;
        tracing::debug!(written = report.written.len(), "session end flush complete");
        Ok(report)
    }

    /// Write the mapping and every changed record.
    ///
    /// All records are attempted; the first failure is returned after the rest
    /// have been tried. Does nothing unless the session is `Ready`.
    pub fn flush(&mut self) -> Result<FlushReport> {
        if !self.is_ready() {
            return Ok(FlushReport::default());
        }
        self.state = SessionState::Flushing;
        let result = self.write_all();
        self.state = SessionState::Ready;
        result
    }

    fn write_all(&mut self) -> Result<FlushReport> {
        let mut report = FlushReport::default();
        let mut first_err = None;

        let index = self.registry.serialize()?;
        if let Err(err) = self.backend.write_index(&index) {
            self.report(&err);
            first_err = Some(err);
        }

        for id in self.records.dirty_ids() {
            let text = self.records.serialize(&id)?;
            match self.backend.write_record(&id, &text) {
                Ok(()) => {
                    self.records.mark_clean(&id);
                    report.written.push(id);
                }
                Err(err) => {
                    self.report(&err);
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => {
                tracing::info!(records = report.written.len(), "flushed fold state");
                Ok(report)
            }
        }
    }

    fn load_documents(&mut self, create_missing: bool) -> Result<LoadReport> {
        let config = if create_missing {
            FoldsConfig::load_or_create(&self.backend)
        } else {
            FoldsConfig::load(&self.backend)
        };
        self.config = match config {
            Ok(config) => config,
            Err(err) => {
                self.warn(format!("Ignoring config.json: {}", err));
                FoldsConfig::default()
            }
        };

        let raw_index = self
            .backend
            .read_index()
            .map_err(|e| FoldsError::IdentityLoad(e.to_string()))?;
        if raw_index.is_none() && create_missing {
            if let Err(err) = self.backend.write_index("{}") {
                self.warn(format!("Could not create the identity mapping: {}", err));
            }
        }
        let registry = IdentityRegistry::load(raw_index.as_deref())?;

        let ids: BTreeSet<RecordId> = registry.ids().cloned().collect();
        let mut records = FoldRecordStore::new();
        let mut report = LoadReport {
            records: ids.len(),
            ..LoadReport::default()
        };

        for id in ids {
            let loaded = self
                .backend
                .read_record(&id)
                .map_err(|e| FoldsError::MalformedRecord {
                    id: id.clone(),
                    reason: e.to_string(),
                })
                .and_then(|raw| records.load(&id, raw.as_deref()));

            if let Err(err) = loaded {
                self.warn(format!("Folds not restored: {}", err));
                records.load(&id, None)?;
                report.degraded.push(id);
            }
        }

        self.registry = registry;
        self.records = records;
        Ok(report)
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.messages.push(CmdMessage::warning(message));
    }

    fn report(&mut self, err: &FoldsError) {
        tracing::error!(error = %err, "fold persistence failed");
        self.messages.push(CmdMessage::error(err.to_string()));
    }
}
