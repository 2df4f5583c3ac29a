/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Session-scoped navigation-history tracking.
//!
//! Reconstructs a logical back-stack from the host's location-change events,
//! persists it across reloads within the same session, and computes logical
//! "up" navigation independent of raw back/forward depth.
//!
//! Components:
//! - `history`: the in-memory `HistoryStack` and its sync policy
//! - `persistence`: best-effort session-scoped storage of the stack
//! - `watcher`: keeps the stack consistent with host navigation events
//! - `navigator`: ancestor-path search and the up-navigation policy

pub mod history;
pub mod navigator;
pub mod persistence;
pub mod watcher;

pub use history::{HistoryEntry, HistoryStack};
pub use navigator::{find_upper_path_diff, NavCommand, NO_ANCESTOR, ROOT_PATH};
pub use persistence::{FileSessionStore, MemorySessionStore, SessionStore, StoreError};
pub use watcher::{AmbientHistory, LocationChange, NavigationWatcher, SharedDepth, WatcherEvent};

/// Crate version string, exposed for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
