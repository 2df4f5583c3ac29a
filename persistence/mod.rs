/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Session-scoped persistence of the history stack.
//!
//! The persisted record is a cache, not a source of truth: the in-memory
//! stack keeps working for the rest of the session when storage is
//! unavailable, and a missing or malformed record always loads as an empty
//! stack rather than an error.
//!
//! - `FileSessionStore`: one JSON record per session id under a host-owned
//!   directory; survives a reload within the same session, never leaks
//!   across sessions (distinct ids map to distinct records)
//! - `MemorySessionStore`: in-process fallback for hosts with storage
//!   disabled, with fail injection for exercising degraded paths

pub mod types;

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::history::HistoryStack;
use types::{PersistedStack, STACK_FORMAT_VERSION};

/// Storage failure surfaced by `save`/`clear`. Callers treat these as
/// non-fatal; `load` never returns one.
#[derive(Debug)]
pub enum StoreError {
    Io(String),
    Serialize(String),
    Session(String),
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {e}"),
            StoreError::Serialize(e) => write!(f, "Serialization error: {e}"),
            StoreError::Session(e) => write!(f, "Session error: {e}"),
            StoreError::Unavailable(e) => write!(f, "Storage unavailable: {e}"),
        }
    }
}

/// Save/load contract for the session history record.
pub trait SessionStore {
    /// Overwrite the stored stack with the current one.
    fn save(&mut self, stack: &HistoryStack) -> Result<(), StoreError>;

    /// Read the stored stack. Missing, malformed, or foreign-version records
    /// load as an empty stack; this never fails.
    fn load(&self) -> HistoryStack;

    /// Drop the stored record (session teardown). Absent records are fine.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// File-backed session store: one JSON record per session id.
pub struct FileSessionStore {
    record_path: PathBuf,
}

impl FileSessionStore {
    /// Open a store for `session_id` under `base_dir`, creating the
    /// directory if needed.
    pub fn open(base_dir: impl Into<PathBuf>, session_id: &str) -> Result<Self, StoreError> {
        let record_name = Self::record_name(session_id)?;
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)
            .map_err(|e| StoreError::Io(format!("Failed to create store dir: {e}")))?;

        Ok(Self {
            record_path: base_dir.join(record_name),
        })
    }

    /// Path of the record this store reads and writes.
    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    fn record_name(session_id: &str) -> Result<String, StoreError> {
        let trimmed = session_id.trim();
        if trimmed.is_empty() {
            return Err(StoreError::Session(
                "Session id must not be empty".to_string(),
            ));
        }
        if trimmed.contains(['/', '\\']) || trimmed.contains("..") {
            return Err(StoreError::Session(format!(
                "Session id must be a plain token, got {trimmed:?}"
            )));
        }
        Ok(format!("history-{trimmed}.json"))
    }
}

impl SessionStore for FileSessionStore {
    fn save(&mut self, stack: &HistoryStack) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&PersistedStack::from_stack(stack))
            .map_err(|e| StoreError::Serialize(format!("{e}")))?;
        std::fs::write(&self.record_path, bytes)
            .map_err(|e| StoreError::Io(format!("Failed to write record: {e}")))?;
        debug!(
            "persisted history stack ({} entries) to {}",
            stack.len(),
            self.record_path.display()
        );
        Ok(())
    }

    fn load(&self) -> HistoryStack {
        let bytes = match std::fs::read(&self.record_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return HistoryStack::new();
            },
            Err(e) => {
                warn!(
                    "failed to read history record {}: {e}; starting empty",
                    self.record_path.display()
                );
                return HistoryStack::new();
            },
        };

        let persisted: PersistedStack = match serde_json::from_slice(&bytes) {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!(
                    "malformed history record {}: {e}; starting empty",
                    self.record_path.display()
                );
                return HistoryStack::new();
            },
        };

        if persisted.version != STACK_FORMAT_VERSION {
            warn!(
                "history record {} has format version {} (expected {}); starting empty",
                self.record_path.display(),
                persisted.version,
                STACK_FORMAT_VERSION
            );
            return HistoryStack::new();
        }

        persisted.into_stack()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.record_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(format!("Failed to remove record: {e}"))),
        }
    }
}

/// In-process session store. Holds the serialized record like the file
/// store does, so serialization faults surface identically.
#[derive(Default)]
pub struct MemorySessionStore {
    record: Option<Vec<u8>>,
    fail_saves: bool,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `save` calls fail, emulating quota exhaustion or
    /// disabled storage.
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&mut self, stack: &HistoryStack) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Unavailable(
                "In-memory store configured to reject writes".to_string(),
            ));
        }
        let bytes = serde_json::to_vec(&PersistedStack::from_stack(stack))
            .map_err(|e| StoreError::Serialize(format!("{e}")))?;
        self.record = Some(bytes);
        Ok(())
    }

    fn load(&self) -> HistoryStack {
        let Some(bytes) = &self.record else {
            return HistoryStack::new();
        };
        match serde_json::from_slice::<PersistedStack>(bytes) {
            Ok(persisted) if persisted.version == STACK_FORMAT_VERSION => persisted.into_stack(),
            Ok(_) | Err(_) => {
                warn!("malformed in-memory history record; starting empty");
                HistoryStack::new()
            },
        }
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.record = None;
        Ok(())
    }
}
