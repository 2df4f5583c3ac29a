use crate::harness::TestHarness;
use navtrail::NavCommand;

#[test]
fn reload_rehydrates_stack_from_session_record() {
    let mut harness = TestHarness::new();
    harness.navigate("/a");
    harness.navigate("/a/b");
    let last_key = harness.navigate("/a/b/c");

    harness.reload();
    assert!(harness.stack().is_empty());

    // The routing layer re-announces the current location after reload.
    harness.deliver("/a/b/c", &last_key);

    assert_eq!(harness.paths(), vec!["/a", "/a/b", "/a/b/c"]);
    assert_eq!(harness.stack().last().unwrap().key, last_key);
}

#[test]
fn rehydrated_top_matches_persisted_top() {
    let mut harness = TestHarness::new();
    harness.navigate("/x");
    let key = harness.navigate("/x/y");
    let persisted_top = harness.stack().last().unwrap().clone();

    harness.reload();
    harness.deliver("/x/y", &key);

    assert_eq!(harness.stack().last(), Some(&persisted_top));
}

#[test]
fn up_navigation_survives_reload() {
    let mut harness = TestHarness::new();
    harness.navigate("/shop");
    harness.navigate("/promo");
    let key = harness.navigate("/shop/item");

    harness.reload();
    harness.deliver("/shop/item", &key);

    // Logical parent is /shop, two entries down, despite raw depth 1.
    let command = harness.up();
    assert_eq!(command, NavCommand::Go(-2));

    harness.apply(command);
    assert_eq!(harness.paths(), vec!["/shop"]);
}

#[test]
fn fresh_session_ignores_leftover_record() {
    let mut harness = TestHarness::new();
    harness.navigate("/a");
    harness.navigate("/b");

    harness.reload();
    // Depth 0 means a genuinely fresh session, not a reload; the leftover
    // record must not be consulted.
    harness.depth.set(0);
    harness.deliver("/landing", "fresh-key");

    assert_eq!(harness.paths(), vec!["/landing"]);
}

#[test]
fn reload_with_fresh_navigation_restarts_from_rehydrated_stack() {
    let mut harness = TestHarness::new();
    harness.navigate("/a");
    harness.navigate("/b");

    harness.reload();
    // User navigated somewhere new right after the reload; the event key is
    // fresh, so the restored stack grows instead of truncating.
    harness.navigate("/c");

    assert_eq!(harness.paths(), vec!["/a", "/b", "/c"]);
}
