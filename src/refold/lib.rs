//! # Refold Architecture
//!
//! Refold remembers which regions of a file were folded (collapsed) in an
//! editor and folds them again when the file is reopened, across sessions.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host editor / `refold` binary                              │
//! │  - Forwards open, rename, close and session-end events      │
//! │  - Shows queued notifications to the user                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs) / API facade (api.rs, commands/)      │
//! │  - Load, apply, capture, flush lifecycle                    │
//! │  - Operator commands: list, show, rename, doctor            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (registry.rs, store/, capture.rs, codec.rs)          │
//! │  - Path → record id mapping, folds per record id            │
//! │  - Dedup on capture, JSON codec with validation             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage backends (store/backend.rs)                        │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: the session owns the state
//!
//! One [`session::FoldSession`] exists per activation. The identity mapping
//! and fold records live inside it and are only changed through its event
//! methods, so there is no global state and no locking: a session is used
//! from the host's single event thread.
//!
//! The editor is reached only through [`capture::Buffer`]; the core never
//! writes to stdout/stderr. Problems are logged with `tracing` and queued as
//! [`commands::CmdMessage`]s for the host to display.
//!
//! ## Module Overview
//!
//! - [`session`]: The lifecycle coordinator
//! - [`capture`]: Reading folds out of buffers and applying them back
//! - [`registry`]: File path → record id mapping
//! - [`store`]: In-memory records and storage backends
//! - [`codec`]: Record document format
//! - [`model`]: `Point`, `FoldRange`, `RecordId`
//! - [`api`] / [`commands`]: Operator facade used by the binary
//! - [`init`]: Project root discovery
//! - [`config`]: `config.json`
//! - [`error`]: Error types

pub mod api;
pub mod capture;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod registry;
pub mod session;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
