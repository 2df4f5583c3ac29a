/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Trace replay tool: drives a `NavigationWatcher` from a text trace and
//! prints the resulting stack and emitted commands.
//!
//! Trace format, one directive per line:
//! - a path (`/books/123`): a forward navigation to that path
//! - `up`: compute up-navigation and apply the emitted command
//! - blank lines and `#` comments are skipped

use std::path::PathBuf;
use std::process::ExitCode;

use bpaf::Bpaf;

use navtrail::{
    FileSessionStore, HistoryEntry, LocationChange, NavCommand, NavigationWatcher, SharedDepth,
};

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
/// Replay a navigation trace through the session history watcher.
struct Options {
    /// Directory holding the session record (defaults to the system temp dir)
    #[bpaf(argument("DIR"))]
    state_dir: Option<PathBuf>,

    /// Session id scoping the persisted record
    #[bpaf(argument("ID"), fallback(String::from("replay")))]
    session: String,

    /// Trace file to replay
    #[bpaf(positional("TRACE"))]
    trace: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let opts = options().run();

    match replay(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("navtrail: {err}");
            ExitCode::FAILURE
        },
    }
}

fn replay(opts: &Options) -> Result<(), String> {
    let state_dir = opts
        .state_dir
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    let store = FileSessionStore::open(state_dir, &opts.session).map_err(|e| e.to_string())?;

    let depth = SharedDepth::new(0);
    let mut watcher = NavigationWatcher::new(store, depth.clone());

    let trace = std::fs::read_to_string(&opts.trace)
        .map_err(|e| format!("failed to read trace {}: {e}", opts.trace.display()))?;

    for line in trace.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line == "up" {
            let command = watcher.navigate_up();
            println!("up        -> {command:?}");
            apply_command(&mut watcher, &depth, command);
        } else {
            let entry = HistoryEntry::new(line);
            depth.set(watcher.stack().len() + 1);
            watcher.handle_location_change(LocationChange::new(entry.path, entry.key));
            println!("navigate  -> {line}");
        }
    }

    println!("\nfinal stack ({} entries):", watcher.stack().len());
    for entry in watcher.stack().iter() {
        println!("  {}", entry.path);
    }
    Ok(())
}

/// Play the host's part: execute the command and deliver the location
/// change it would produce back to the watcher.
fn apply_command(
    watcher: &mut NavigationWatcher<FileSessionStore, SharedDepth>,
    depth: &SharedDepth,
    command: NavCommand,
) {
    match command {
        NavCommand::Replace(path) => {
            let entry = HistoryEntry::new(path);
            watcher.handle_location_change(LocationChange::new(entry.path, entry.key));
        },
        NavCommand::Go(delta) => {
            let len = watcher.stack().len();
            if len == 0 {
                return;
            }
            let target = (len as i64 - 1 + delta as i64).clamp(0, len as i64 - 1) as usize;
            if let Some(entry) = watcher.stack().get(target) {
                let change = LocationChange::new(entry.path.clone(), entry.key.clone());
                depth.set(len);
                watcher.handle_location_change(change);
            }
        },
    }
}
