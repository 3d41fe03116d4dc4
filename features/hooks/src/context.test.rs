use super::*;

#[test]
fn metadata_round_trips() {
    let ctx = HookContext::new("session-1", PathBuf::from("/tmp")).with_metadata("source", "compact");
    assert_eq!(ctx.get_metadata("source"), Some("compact"));
    assert_eq!(ctx.get_metadata("missing"), None);
}

#[test]
fn new_context_has_no_metadata() {
    let ctx = HookContext::new("session-1", PathBuf::from("/tmp"));
    assert_eq!(ctx.get_metadata("anything"), None);
}
