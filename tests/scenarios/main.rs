mod harness;

mod rehydrate;

#[test]
fn scenarios_binary_smoke_runs() {
    assert!(!navtrail::VERSION.is_empty());
}
