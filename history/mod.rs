/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! In-memory history stack for session navigation.
//!
//! Core structures:
//! - `HistoryEntry`: one visited location (path + per-event key)
//! - `HistoryStack`: ordered record of visited locations; append-only during
//!   forward navigation, truncated on backward jumps

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One visited location within a browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Application path, e.g. `/books/123`.
    pub path: String,

    /// Unique per navigation event. Host-provided where the routing layer
    /// mints its own keys; `HistoryEntry::new` mints a UUIDv4 otherwise.
    pub key: String,
}

impl HistoryEntry {
    /// Create an entry with a freshly minted key.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: Uuid::new_v4().to_string(),
        }
    }

    /// Create an entry with a host-provided key.
    pub fn with_key(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }
}

/// Ordered record of visited locations within a session.
///
/// Invariant: never empty once initialized, and the last element is always
/// the current location. Both hold because every navigation event flows
/// through [`HistoryStack::sync`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
}

impl HistoryStack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack from an ordered list of entries (e.g. a rehydrated
    /// persisted record).
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current location (last element), if the stack is initialized.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Drop all entries (session teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Fold one navigation event into the stack.
    ///
    /// Policy, in order:
    /// 1. empty stack: push
    /// 2. key already present: a jump back to a visited record; everything
    ///    above it is truncated and its path refreshed
    /// 3. path equals the current top (fresh key): consecutive duplicate;
    ///    the top's key is refreshed without growing the stack
    /// 4. otherwise: forward navigation; append
    pub fn sync(&mut self, incoming: HistoryEntry) {
        if self.entries.is_empty() {
            self.entries.push(incoming);
            return;
        }

        if let Some(index) = self.entries.iter().position(|e| e.key == incoming.key) {
            self.entries.truncate(index + 1);
            if let Some(entry) = self.entries.last_mut() {
                entry.path = incoming.path;
            }
            return;
        }

        if let Some(top) = self.entries.last_mut() {
            if top.path == incoming.path {
                top.key = incoming.key;
                return;
            }
        }

        self.entries.push(incoming);
    }
}
