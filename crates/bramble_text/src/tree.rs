//! Parse trees over text.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use bramble_core::{Node, NodeId, ParseTree};

/// A parse tree together with the text it was parsed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextTree {
    tree: ParseTree,
    input: Arc<[char]>,
}

impl TextTree {
    pub(crate) fn new(tree: ParseTree, input: Arc<[char]>) -> Self {
        TextTree { tree, input }
    }

    pub fn root(&self) -> Option<TextNode<'_>> {
        self.tree.root().map(|node| self.wrap(node))
    }

    pub fn get(&self, id: NodeId) -> Option<TextNode<'_>> {
        self.tree.get(id).map(|node| self.wrap(node))
    }

    /// Every node in document order.
    pub fn iter(&self) -> impl Iterator<Item = TextNode<'_>> + '_ {
        self.tree.iter().map(|node| self.wrap(node))
    }

    pub fn parse_tree(&self) -> &ParseTree {
        &self.tree
    }

    pub fn into_parse_tree(self) -> ParseTree {
        self.tree
    }

    /// Hand the root to `walker`.
    pub fn walk<W: TextWalker + ?Sized>(&self, walker: &mut W) {
        for root in self.tree.roots() {
            walker.enter(self.wrap(root));
        }
    }

    fn wrap<'t>(&'t self, node: Node<'t>) -> TextNode<'t> {
        TextNode {
            node,
            input: &self.input,
        }
    }
}

impl fmt::Display for TextTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}

/// A node of a [`TextTree`].
#[derive(Copy, Clone)]
pub struct TextNode<'t> {
    node: Node<'t>,
    input: &'t [char],
}

impl<'t> TextNode<'t> {
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    pub fn rule_name(&self) -> &'t str {
        self.node.rule_name()
    }

    /// Character span of the match.
    pub fn span(&self) -> Range<usize> {
        self.node.span()
    }

    /// The matched text.
    pub fn image(&self) -> String {
        self.node.slice(self.input).iter().collect()
    }

    pub fn parent(&self) -> Option<TextNode<'t>> {
        self.node.parent().map(|node| self.with(node))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = TextNode<'t>> + 't {
        let input = self.input;
        self.node.children().map(move |node| TextNode { node, input })
    }

    /// First child matched by the rule named `rule_name`.
    pub fn child(&self, rule_name: &str) -> Option<TextNode<'t>> {
        self.children().find(|child| child.rule_name() == rule_name)
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    fn with(&self, node: Node<'t>) -> TextNode<'t> {
        TextNode {
            node,
            input: self.input,
        }
    }
}

impl fmt::Debug for TextNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.rule_name(), self.image())
    }
}

/// Depth-first visitor over a [`TextTree`].
///
/// The default `enter` visits the children in order, so implementations
/// override it for the rules they care about and call [`walk_children`] to
/// keep descending.
pub trait TextWalker {
    fn enter(&mut self, node: TextNode<'_>) {
        walk_children(self, node);
    }
}

pub fn walk_children<W: TextWalker + ?Sized>(walker: &mut W, node: TextNode<'_>) {
    for child in node.children() {
        walker.enter(child);
    }
}

/// The images of every leaf, in document order.
///
/// Reproduces the input when every consumed character is covered by a
/// recorded leaf.
pub fn leaf_images(tree: &TextTree) -> String {
    #[derive(Default)]
    struct Leaves(String);

    impl TextWalker for Leaves {
        fn enter(&mut self, node: TextNode<'_>) {
            if node.is_leaf() {
                self.0.push_str(&node.image());
            } else {
                walk_children(self, node);
            }
        }
    }

    let mut leaves = Leaves::default();
    tree.walk(&mut leaves);
    leaves.0
}
