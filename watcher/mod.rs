/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Keeps the in-memory history stack consistent with host navigation.
//!
//! Architecture:
//! - Every location change from the host routing layer flows through
//!   `handle_location_change`, which syncs the stack and persists it
//! - An empty in-memory stack with non-zero ambient history depth means a
//!   mid-session reload: the stack is rehydrated from the store first
//! - `run` is the channel-consumer form: a single thread drains
//!   `WatcherEvent`s strictly in delivery order, so no locking is needed
//!
//! Persistence is best-effort: a failed save is logged and the in-memory
//! stack stays authoritative for the rest of the session.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};

use crate::history::{HistoryEntry, HistoryStack};
use crate::navigator::{self, NavCommand};
use crate::persistence::SessionStore;

/// A location-change notification from the host routing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationChange {
    /// The new application path.
    pub path: String,

    /// The host's per-navigation-event key.
    pub key: String,
}

impl LocationChange {
    pub fn new(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }
}

/// Host-provided view of the native history depth. Used only to tell a fresh
/// session (depth 0) from a mid-session reload (depth > 0 with an empty
/// in-memory stack).
pub trait AmbientHistory {
    fn depth(&self) -> usize;
}

/// A fixed depth; handy for hosts where the distinction never changes.
impl AmbientHistory for usize {
    fn depth(&self) -> usize {
        *self
    }
}

/// Depth backed by a shared atomic, for hosts that track their history
/// length elsewhere (and for driving the watcher from tests).
#[derive(Clone, Default)]
pub struct SharedDepth(Arc<AtomicUsize>);

impl SharedDepth {
    pub fn new(depth: usize) -> Self {
        Self(Arc::new(AtomicUsize::new(depth)))
    }

    pub fn set(&self, depth: usize) {
        self.0.store(depth, Ordering::Relaxed);
    }
}

impl AmbientHistory for SharedDepth {
    fn depth(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

/// Events consumed by the watcher loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatcherEvent {
    /// The host navigated; carries the new location.
    LocationChanged(LocationChange),

    /// The user asked for the logical parent of the current screen.
    NavigateUp,

    /// End the loop.
    Shutdown,
}

/// Owns the session's history stack and keeps it consistent with actual
/// host navigation. The stack is explicit state: no ambient singleton.
pub struct NavigationWatcher<S, H> {
    stack: HistoryStack,
    store: S,
    host: H,
}

impl<S: SessionStore, H: AmbientHistory> NavigationWatcher<S, H> {
    pub fn new(store: S, host: H) -> Self {
        Self {
            stack: HistoryStack::new(),
            store,
            host,
        }
    }

    /// Current stack contents.
    pub fn stack(&self) -> &HistoryStack {
        &self.stack
    }

    /// Fold one location change into the stack and persist the result.
    ///
    /// Rehydration from the store happens at most once per watcher: only an
    /// uninitialized stack paired with non-zero ambient depth qualifies, and
    /// after the first sync the stack is never empty again.
    pub fn handle_location_change(&mut self, change: LocationChange) {
        if self.stack.is_empty() && self.host.depth() > 0 {
            self.stack = self.store.load();
            debug!(
                "rehydrated history stack ({} entries) after reload",
                self.stack.len()
            );
        }

        self.stack
            .sync(HistoryEntry::with_key(change.path, change.key));

        if let Err(e) = self.store.save(&self.stack) {
            warn!("history stack save failed; continuing in-memory only: {e}");
        }
    }

    /// Compute the up-navigation command for the current stack.
    ///
    /// The stack is not mutated here: the host executes the command and the
    /// resulting location change flows back through
    /// `handle_location_change`, where a key match truncates the stack.
    pub fn navigate_up(&self) -> NavCommand {
        navigator::up_command(&self.stack)
    }

    /// Drain events strictly in delivery order until `Shutdown` or sender
    /// disconnect. `NavigateUp` emits exactly one command; location changes
    /// emit none.
    pub fn run(mut self, events: Receiver<WatcherEvent>, commands: Sender<NavCommand>) {
        for event in events {
            match event {
                WatcherEvent::LocationChanged(change) => {
                    self.handle_location_change(change);
                },
                WatcherEvent::NavigateUp => {
                    if commands.send(self.navigate_up()).is_err() {
                        break;
                    }
                },
                WatcherEvent::Shutdown => break,
            }
        }
    }
}
