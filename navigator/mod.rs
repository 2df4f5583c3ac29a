/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Logical "up" navigation over the history stack.
//!
//! "Up" means the nearest previously visited ancestor of the current path in
//! the application's path hierarchy, reached via a relative history jump so
//! the host's own back-stack stays consistent.

use crate::history::HistoryStack;

/// The application root, used as the redirect target when no ancestor exists.
pub const ROOT_PATH: &str = "/";

/// Sentinel returned by [`find_upper_path_diff`] when no ancestor is on the
/// stack. Doubles as the one-step-back delta in the multi-entry fallback.
pub const NO_ANCESTOR: i32 = -1;

/// Navigation command issued to the host routing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    /// Replace the current history entry with an absolute path.
    Replace(String),

    /// Move N entries through history (negative = backward).
    Go(i32),
}

/// Find the offset of the nearest prior entry whose path is a strict
/// prefix-ancestor of the current path.
///
/// Scans from the entry below the top backwards; the first match yields its
/// negative distance from the top. Returns [`NO_ANCESTOR`] when the stack
/// holds no ancestor of the current location (or is empty).
pub fn find_upper_path_diff(stack: &HistoryStack) -> i32 {
    let Some(current) = stack.last() else {
        return NO_ANCESTOR;
    };
    let current_segments = path_segments(&current.path);

    for (distance, entry) in stack.iter().rev().skip(1).enumerate() {
        if is_ancestor(&path_segments(&entry.path), &current_segments) {
            return -(distance as i32 + 1);
        }
    }
    NO_ANCESTOR
}

/// Compute the up-navigation command for the current stack.
///
/// With no ancestor on a single-entry stack (or an uninitialized one) there
/// is no meaningful "back": a bare history jump would leave the application,
/// so the command is a redirect to the root. In every other case the command
/// is a relative jump; the [`NO_ANCESTOR`] sentinel makes the multi-entry
/// no-ancestor case a one-step-back.
pub fn up_command(stack: &HistoryStack) -> NavCommand {
    let diff = find_upper_path_diff(stack);
    if diff == NO_ANCESTOR && stack.len() <= 1 {
        NavCommand::Replace(ROOT_PATH.to_string())
    } else {
        NavCommand::Go(diff)
    }
}

/// Split a path into normalized segments. Query and fragment suffixes are
/// stripped; empty segments (duplicate or trailing slashes) are dropped.
fn path_segments(path: &str) -> Vec<&str> {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// A strict prefix-ancestor: fewer segments than the current path, and every
/// segment matches. The root (zero segments) is an ancestor of any non-root
/// path.
fn is_ancestor(candidate: &[&str], current: &[&str]) -> bool {
    candidate.len() < current.len() && current[..candidate.len()] == *candidate
}
