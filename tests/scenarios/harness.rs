use tempfile::TempDir;

use navtrail::{
    FileSessionStore, HistoryStack, LocationChange, NavCommand, NavigationWatcher, SharedDepth,
};

const SESSION_ID: &str = "scenario-tab";

/// Drives a watcher the way a host routing layer would: forward
/// navigations mint fresh keys and grow the ambient depth, up-navigation
/// commands are executed host-side and fed back as location changes.
pub(crate) struct TestHarness {
    pub(crate) watcher: NavigationWatcher<FileSessionStore, SharedDepth>,
    pub(crate) depth: SharedDepth,
    state_dir: TempDir,
    next_key: u64,
}

impl TestHarness {
    pub(crate) fn new() -> Self {
        let state_dir = TempDir::new().expect("temp dir");
        let store =
            FileSessionStore::open(state_dir.path(), SESSION_ID).expect("session store");
        let depth = SharedDepth::new(0);

        Self {
            watcher: NavigationWatcher::new(store, depth.clone()),
            depth,
            state_dir,
            next_key: 0,
        }
    }

    pub(crate) fn stack(&self) -> &HistoryStack {
        self.watcher.stack()
    }

    /// Forward navigation to `path` with a freshly minted key.
    pub(crate) fn navigate(&mut self, path: &str) -> String {
        self.next_key += 1;
        let key = format!("key-{}", self.next_key);
        self.depth.set(self.watcher.stack().len() + 1);
        self.watcher
            .handle_location_change(LocationChange::new(path, key.clone()));
        key
    }

    /// Deliver a location change with an explicit key (a back/forward jump
    /// re-delivers the key of the visited record).
    pub(crate) fn deliver(&mut self, path: &str, key: &str) {
        self.watcher
            .handle_location_change(LocationChange::new(path, key));
    }

    pub(crate) fn up(&mut self) -> NavCommand {
        self.watcher.navigate_up()
    }

    /// Execute a command host-side and feed the resulting location change
    /// back to the watcher.
    pub(crate) fn apply(&mut self, command: NavCommand) {
        match command {
            NavCommand::Replace(path) => {
                self.next_key += 1;
                let key = format!("key-{}", self.next_key);
                self.watcher
                    .handle_location_change(LocationChange::new(path, key));
            },
            NavCommand::Go(delta) => {
                let len = self.watcher.stack().len();
                if len == 0 {
                    return;
                }
                let target = (len as i64 - 1 + delta as i64).clamp(0, len as i64 - 1) as usize;
                let entry = self
                    .watcher
                    .stack()
                    .get(target)
                    .expect("jump target on stack")
                    .clone();
                self.deliver(&entry.path, &entry.key);
            },
        }
    }

    /// Simulate a page reload: a fresh watcher over the same session record,
    /// with ambient depth carried over from the host history.
    pub(crate) fn reload(&mut self) {
        let store =
            FileSessionStore::open(self.state_dir.path(), SESSION_ID).expect("session store");
        let depth = SharedDepth::new(self.watcher.stack().len().max(1));
        self.depth = depth.clone();
        self.watcher = NavigationWatcher::new(store, depth);
    }

    /// Paths currently on the stack, bottom to top.
    pub(crate) fn paths(&self) -> Vec<String> {
        self.stack().iter().map(|e| e.path.clone()).collect()
    }
}
