use cocode_protocol::EntryPayload;
use cocode_protocol::UserMessage;

use super::*;

fn entry(parent: Option<Uuid>) -> SessionEntry {
    let mut e = SessionEntry::new(EntryPayload::User(UserMessage::text("hi")));
    e.parent_id = parent;
    e
}

#[test]
fn branch_walks_root_to_leaf_in_order() {
    let mut tree = SessionTree::new();
    let root = entry(None);
    let root_id = root.id;
    tree.insert(root);
    let child = entry(Some(root_id));
    let child_id = child.id;
    tree.insert(child);

    let branch = tree.branch(child_id).unwrap();
    assert_eq!(branch.len(), 2);
    assert_eq!(branch[0].id, root_id);
    assert_eq!(branch[1].id, child_id);
}

#[test]
fn unknown_leaf_is_an_error() {
    let tree = SessionTree::new();
    assert!(tree.branch(Uuid::new_v4()).is_err());
}

#[test]
fn leaves_excludes_entries_with_children() {
    let mut tree = SessionTree::new();
    let root = entry(None);
    let root_id = root.id;
    tree.insert(root);
    let child = entry(Some(root_id));
    let child_id = child.id;
    tree.insert(child);

    assert_eq!(tree.leaves(), vec![child_id]);
}

#[test]
fn two_children_of_same_parent_form_a_fork() {
    let mut tree = SessionTree::new();
    let root = entry(None);
    let root_id = root.id;
    tree.insert(root);
    let a = entry(Some(root_id));
    let a_id = a.id;
    tree.insert(a);
    let b = entry(Some(root_id));
    let b_id = b.id;
    tree.insert(b);

    let mut leaves = tree.leaves();
    leaves.sort();
    let mut expected = vec![a_id, b_id];
    expected.sort();
    assert_eq!(leaves, expected);
    assert_eq!(tree.children_of(root_id).len(), 2);
}
