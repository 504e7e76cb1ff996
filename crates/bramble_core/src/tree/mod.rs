//! Parse trees.
//!
//! While matching, each branch builds its tree through a private
//! [`cursor::TreeCursor`]. The tree handed to callers is a flat arena: nodes
//! are stored in pre-order and refer to each other by [`NodeId`], with a
//! non-owning parent index and ordered child lists.

pub(crate) mod cursor;

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use bramble_stack::ensure_sufficient_stack;

use cursor::MatchNode;

/// Index of a node within its [`ParseTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct NodeData {
    rule_name: String,
    start: usize,
    end: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The parse tree of one surviving branch.
///
/// Usually holds a single root, the entry rule. Matching a combinator
/// directly, or an atomic entry rule, can leave several top-level nodes or
/// none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseTree {
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl ParseTree {
    pub(crate) fn from_matches(matches: &[Arc<MatchNode>]) -> Self {
        let mut tree = ParseTree::default();
        for node in matches {
            let id = tree.push_match(node, None);
            tree.roots.push(id);
        }
        tree
    }

    fn push_match(&mut self, node: &MatchNode, parent: Option<NodeId>) -> NodeId {
        ensure_sufficient_stack(|| {
            let id = self.push(NodeData {
                rule_name: node.rule_name.to_string(),
                start: node.start,
                end: node.end,
                parent,
                children: Vec::with_capacity(node.children.len()),
            });
            for child in &node.children {
                let child = self.push_match(child, Some(id));
                self.nodes[id.0].children.push(child);
            }
            id
        })
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    /// The first top-level node.
    pub fn root(&self) -> Option<Node<'_>> {
        self.roots.first().map(|&id| self.node(id))
    }

    pub fn roots(&self) -> impl ExactSizeIterator<Item = Node<'_>> + '_ {
        self.roots.iter().map(|&id| self.node(id))
    }

    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then(|| self.node(id))
    }

    /// Every node in document order (pre-order).
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Node<'_>> + '_ {
        (0..self.nodes.len()).map(|index| self.node(NodeId(index)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deep copy of the subtree at `root`, leaving out the subtree at
    /// `excluded`.
    ///
    /// The copy's single root is `root`; its parent link is dropped.
    pub fn subtree_excluding(&self, root: NodeId, excluded: Option<NodeId>) -> ParseTree {
        let mut copy = ParseTree::default();
        if root.0 < self.nodes.len() && Some(root) != excluded {
            let id = self.copy_into(&mut copy, root, None, excluded);
            copy.roots.push(id);
        }
        copy
    }

    fn copy_into(
        &self,
        out: &mut ParseTree,
        id: NodeId,
        parent: Option<NodeId>,
        excluded: Option<NodeId>,
    ) -> NodeId {
        ensure_sufficient_stack(|| {
            let source = &self.nodes[id.0];
            let copied = out.push(NodeData {
                rule_name: source.rule_name.clone(),
                start: source.start,
                end: source.end,
                parent,
                children: Vec::new(),
            });
            for &child in &source.children {
                if Some(child) == excluded {
                    continue;
                }
                let child = self.copy_into(out, child, Some(copied), excluded);
                out.nodes[copied.0].children.push(child);
            }
            copied
        })
    }

    fn node(&self, id: NodeId) -> Node<'_> {
        Node { tree: self, id }
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(f: &mut fmt::Formatter<'_>, node: Node<'_>, depth: usize) -> fmt::Result {
            writeln!(
                f,
                "{:indent$}{} [{}..{})",
                "",
                node.rule_name(),
                node.start_position(),
                node.end_position(),
                indent = depth * 2
            )?;
            node.children()
                .try_for_each(|child| write_node(f, child, depth + 1))
        }

        self.roots().try_for_each(|root| write_node(f, root, 0))
    }
}

/// Read-only view of one node.
#[derive(Copy, Clone)]
pub struct Node<'t> {
    tree: &'t ParseTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t ParseTree {
        self.tree
    }

    pub fn rule_name(&self) -> &'t str {
        &self.data().rule_name
    }

    /// Offset of the first token this node matched.
    pub fn start_position(&self) -> usize {
        self.data().start
    }

    /// Offset one past the last token this node matched.
    pub fn end_position(&self) -> usize {
        self.data().end
    }

    pub fn span(&self) -> Range<usize> {
        self.data().start..self.data().end
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = Node<'t>> + ExactSizeIterator + 't {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.node(id))
    }

    pub fn is_leaf(&self) -> bool {
        self.data().children.is_empty()
    }

    /// The tokens of `input` this node matched.
    ///
    /// Empty if the span lies outside `input`.
    pub fn slice<'a, T>(&self, input: &'a [T]) -> &'a [T] {
        input.get(self.span()).unwrap_or_default()
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}..{}",
            self.rule_name(),
            self.start_position(),
            self.end_position()
        )
    }
}

#[cfg(test)]
mod tests;
