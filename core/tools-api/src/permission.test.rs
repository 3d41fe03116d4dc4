use super::*;

#[test]
fn default_mode_neither_pre_approves_nor_denies_unsafe() {
    let mode = PermissionMode::default();
    assert!(matches!(mode, PermissionMode::Default));
    assert!(!mode.pre_approves_unsafe());
    assert!(!mode.denies_everything_unsafe());
}

#[test]
fn bypass_and_accept_edits_pre_approve_unsafe_tools() {
    assert!(PermissionMode::Bypass.pre_approves_unsafe());
    assert!(PermissionMode::AcceptEdits.pre_approves_unsafe());
}

#[test]
fn plan_and_dont_ask_deny_unsafe_tools_outright() {
    assert!(PermissionMode::Plan.denies_everything_unsafe());
    assert!(PermissionMode::DontAsk.denies_everything_unsafe());
    assert!(!PermissionMode::Plan.pre_approves_unsafe());
}
