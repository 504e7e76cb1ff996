use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::cursor::{Reconciled, TreeCursor};
use super::*;

fn name(rule: &str) -> Arc<str> {
    Arc::from(rule)
}

/// `Expr(Term(Num) Op Term(Num))` over offsets 0..3.
fn sample_tree() -> ParseTree {
    let mut cursor = TreeCursor::default();
    cursor.open(name("Expr"), 0);
    cursor.open(name("Term"), 0);
    cursor.open(name("Num"), 0);
    cursor.close(1);
    cursor.close(1);
    cursor.open(name("Op"), 1);
    cursor.close(2);
    cursor.open(name("Term"), 2);
    cursor.open(name("Num"), 2);
    cursor.close(3);
    cursor.close(3);
    cursor.close(3);
    cursor.to_tree()
}

#[test]
fn nodes_are_stored_in_document_order() {
    let tree = sample_tree();
    let names: Vec<_> = tree.iter().map(|node| node.rule_name()).collect();
    assert_eq!(names, ["Expr", "Term", "Num", "Op", "Term", "Num"]);
}

#[test]
fn parent_links_mirror_children() {
    let tree = sample_tree();
    for node in tree.iter() {
        for child in node.children() {
            assert_eq!(child.parent().map(|p| p.id()), Some(node.id()));
        }
    }
    assert!(tree.root().and_then(|root| root.parent()).is_none());
}

#[test]
fn slice_materializes_span() {
    let tree = sample_tree();
    let input = ['1', '+', '2'];
    let spans: Vec<String> = tree
        .iter()
        .map(|node| node.slice(&input).iter().collect())
        .collect();
    assert_eq!(spans, ["1+2", "1", "1", "+", "2", "2"]);
}

#[test]
fn display_indents_children() {
    let expected = "\
Expr [0..3)
  Term [0..1)
    Num [0..1)
  Op [1..2)
  Term [2..3)
    Num [2..3)
";
    assert_eq!(sample_tree().to_string(), expected);
}

#[test]
fn subtree_excluding_skips_named_child() {
    let tree = sample_tree();
    let root = tree.root().map(|node| node.id());
    let op = tree.iter().find(|node| node.rule_name() == "Op").map(|n| n.id());
    let (Some(root), Some(op)) = (root, op) else {
        panic!("sample tree lost its nodes");
    };

    let copy = tree.subtree_excluding(root, Some(op));
    let names: Vec<_> = copy.iter().map(|node| node.rule_name()).collect();
    assert_eq!(names, ["Expr", "Term", "Num", "Term", "Num"]);
    // The source tree is untouched.
    assert_eq!(tree.len(), 6);
}

#[test]
fn subtree_excluding_root_is_empty() {
    let tree = sample_tree();
    let root = NodeId(0);
    assert!(tree.subtree_excluding(root, Some(root)).is_empty());
    assert!(tree.subtree_excluding(NodeId(99), None).is_empty());
}

#[test]
fn forked_cursor_rebuilds_parent_on_close() {
    let mut cursor = TreeCursor::default();
    cursor.open(name("List"), 0);
    cursor.open(name("Item"), 0);
    cursor.close(1);
    cursor.open(name("Item"), 1);

    let mut fork = cursor.fork();
    assert_eq!(fork.depth(), 2);

    // The fork consumes a longer item than the original.
    assert_eq!(fork.close(3), Reconciled::Rebuilt);
    assert_eq!(fork.close(3), Reconciled::TopLevel);
    assert_eq!(cursor.close(2), Reconciled::Attached);
    assert_eq!(cursor.close(2), Reconciled::TopLevel);

    let (forked, original) = (fork.to_tree(), cursor.to_tree());
    let forked: Vec<_> = forked.iter().map(|n| (n.rule_name(), n.span())).collect();
    let original: Vec<_> = original.iter().map(|n| (n.rule_name(), n.span())).collect();
    assert_eq!(forked, [("List", 0..3), ("Item", 0..1), ("Item", 1..3)]);
    assert_eq!(original, [("List", 0..2), ("Item", 0..1), ("Item", 1..2)]);
}

#[test]
fn sibling_forks_do_not_share_children() {
    let mut cursor = TreeCursor::default();
    cursor.open(name("Root"), 0);
    cursor.open(name("Alt"), 0);

    let mut left = cursor.fork();
    let mut right = cursor.fork();
    left.open(name("Left"), 0);
    left.close(1);
    right.open(name("Right"), 0);
    right.close(2);
    for fork in [&mut left, &mut right] {
        fork.close(2);
        fork.close(2);
    }

    let left: Vec<_> = left.to_tree().iter().map(|n| n.rule_name().to_owned()).collect();
    let right: Vec<_> = right.to_tree().iter().map(|n| n.rule_name().to_owned()).collect();
    assert_eq!(left, ["Root", "Alt", "Left"]);
    assert_eq!(right, ["Root", "Alt", "Right"]);
}
