/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serializable types for history-stack persistence.

use serde::{Deserialize, Serialize};

use crate::history::{HistoryEntry, HistoryStack};

/// Format version written into every persisted record. Records carrying a
/// different version load as an empty stack.
pub const STACK_FORMAT_VERSION: u32 = 1;

/// Persisted visited location.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PersistedEntry {
    pub path: String,
    pub key: String,
}

/// Persisted form of the full history stack.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PersistedStack {
    pub version: u32,
    pub entries: Vec<PersistedEntry>,
    pub saved_at_secs: u64,
}

impl PersistedStack {
    /// Snapshot the in-memory stack into its persisted form.
    pub fn from_stack(stack: &HistoryStack) -> Self {
        let entries = stack
            .iter()
            .map(|entry| PersistedEntry {
                path: entry.path.clone(),
                key: entry.key.clone(),
            })
            .collect();

        let saved_at_secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            version: STACK_FORMAT_VERSION,
            entries,
            saved_at_secs,
        }
    }

    /// Rebuild the in-memory stack, preserving entry order.
    pub fn into_stack(self) -> HistoryStack {
        HistoryStack::from_entries(
            self.entries
                .into_iter()
                .map(|entry| HistoryEntry::with_key(entry.path, entry.key))
                .collect(),
        )
    }
}
