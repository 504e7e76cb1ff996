//! Branch-private tree state.
//!
//! A branch owns the stack of nodes it has opened but not yet closed.
//! Completed nodes are immutable and shared between branches through `Arc`,
//! so only the open frames ever need copying.
//!
//! Forking keeps the innermost open frame as the fork's private fragment and
//! freezes every frame below it into a shared ancestry chain. When the
//! fragment's node closes and the fork holds no open parent, the parent is
//! cloned out of the ancestry, which structurally excludes the child being
//! completed, and the completed node is attached to the clone.

use std::sync::Arc;

use smallvec::SmallVec;

use super::ParseTree;

pub(crate) type Children = SmallVec<[Arc<MatchNode>; 4]>;

/// A closed rule match.
#[derive(Debug)]
pub(crate) struct MatchNode {
    pub(crate) rule_name: Arc<str>,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) children: Children,
}

#[derive(Clone, Debug)]
struct OpenNode {
    rule_name: Arc<str>,
    start: usize,
    children: Children,
}

impl OpenNode {
    fn close(self, end: usize) -> Arc<MatchNode> {
        Arc::new(MatchNode {
            rule_name: self.rule_name,
            start: self.start,
            end,
            children: self.children,
        })
    }
}

/// Open frames frozen at a fork, innermost first.
#[derive(Debug)]
struct Ancestor {
    node: OpenNode,
    parent: Option<Arc<Ancestor>>,
}

/// How a closed node found its parent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Reconciled {
    /// The branch still held the parent frame.
    Attached,
    /// The branch had diverged; its parent was cloned from the ancestry.
    Rebuilt,
    /// The node has no parent and joins the top level.
    TopLevel,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct TreeCursor {
    open: Vec<OpenNode>,
    ancestry: Option<Arc<Ancestor>>,
    completed: Vec<Arc<MatchNode>>,
}

impl TreeCursor {
    pub(crate) fn open(&mut self, rule_name: Arc<str>, start: usize) {
        self.open.push(OpenNode {
            rule_name,
            start,
            children: SmallVec::new(),
        });
    }

    /// Close the innermost open node at `end` and attach it to its parent.
    pub(crate) fn close(&mut self, end: usize) -> Reconciled {
        let Some(node) = self.open.pop() else {
            debug_assert!(false, "tree cursor closed without an open node");
            return Reconciled::TopLevel;
        };
        let node = node.close(end);

        if let Some(parent) = self.open.last_mut() {
            parent.children.push(node);
            return Reconciled::Attached;
        }

        match self.ancestry.take() {
            Some(ancestor) => {
                let mut parent = ancestor.node.clone();
                parent.children.push(node);
                self.ancestry.clone_from(&ancestor.parent);
                self.open.push(parent);
                Reconciled::Rebuilt
            }
            None => {
                self.completed.push(node);
                Reconciled::TopLevel
            }
        }
    }

    /// Copy for a forked branch.
    pub(crate) fn fork(&self) -> Self {
        let Some((top, below)) = self.open.split_last() else {
            return self.clone();
        };

        let mut ancestry = self.ancestry.clone();
        for node in below {
            ancestry = Some(Arc::new(Ancestor {
                node: node.clone(),
                parent: ancestry,
            }));
        }

        TreeCursor {
            open: vec![top.clone()],
            ancestry,
            completed: self.completed.clone(),
        }
    }

    /// Number of open nodes, including frozen ancestors.
    pub(crate) fn depth(&self) -> usize {
        let mut depth = self.open.len();
        let mut ancestor = self.ancestry.as_deref();
        while let Some(frame) = ancestor {
            depth += 1;
            ancestor = frame.parent.as_deref();
        }
        depth
    }

    /// Snapshot of every completed top-level node.
    pub(crate) fn to_tree(&self) -> ParseTree {
        ParseTree::from_matches(&self.completed)
    }
}
