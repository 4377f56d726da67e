//! Arena-backed syntax tree.

use super::kind::{NodeKind, SyntaxKind};

/// Index of a node in its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Returns the arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Source range of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line number of the start (1-indexed).
    pub line: usize,
    /// Column of the start (1-indexed, in bytes).
    pub column: usize,
}

impl Span {
    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Shape of the node.
    pub kind: NodeKind,
    /// Source range.
    pub span: Span,
    /// Enclosing node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Child nodes in source order.
    pub children: Vec<NodeId>,
}

/// An immutable syntax tree over one source file.
///
/// Nodes are stored in a flat arena with the root at index 0; parent links
/// are plain [`NodeId`]s so the structure stays acyclic. Use
/// [`SyntaxTree::preorder`] for source order, not the arena index.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<Node>,
    has_errors: bool,
}

impl SyntaxTree {
    pub(crate) fn from_parts(source: String, nodes: Vec<Node>, has_errors: bool) -> Self {
        Self {
            source,
            nodes,
            has_errors,
        }
    }

    /// Returns the root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the source text the tree was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the parser had to recover from syntax errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the kind of `id`.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Returns the dispatch tag of `id`.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> SyntaxKind {
        self.kind(id).tag()
    }

    /// Returns the parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the children of `id` in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Returns the source span of `id`.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    /// Returns the raw source text of `id`.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        let span = self.span(id);
        self.source.get(span.start..span.end).unwrap_or("")
    }

    /// Returns the identifier name if `id` is an identifier.
    #[must_use]
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Returns the callee name if `id` is a call to a plain identifier.
    #[must_use]
    pub fn callee_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::CallExpression { callee, .. } => self.identifier_name(*callee),
            _ => None,
        }
    }

    /// Returns the call arguments if `id` is a call expression.
    #[must_use]
    pub fn call_arguments(&self, id: NodeId) -> Option<&[NodeId]> {
        match self.kind(id) {
            NodeKind::CallExpression { arguments, .. } => Some(arguments),
            _ => None,
        }
    }

    /// Returns the declared parameters of a function, arrow function or method.
    #[must_use]
    pub fn function_params(&self, id: NodeId) -> Option<&[NodeId]> {
        match self.kind(id) {
            NodeKind::FunctionExpression { params }
            | NodeKind::ArrowFunctionExpression { params }
            | NodeKind::FunctionDeclaration { params }
            | NodeKind::MethodDefinition { params, .. } => Some(params),
            _ => None,
        }
    }

    /// Iterates over the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Iterates over all nodes top-down, parents before children.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: if self.nodes.is_empty() {
                Vec::new()
            } else {
                vec![self.root()]
            },
        }
    }
}

/// Top-down iterator over a [`SyntaxTree`].
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: NodeKind, parent: Option<NodeId>, start: usize, end: usize) -> Node {
        Node {
            kind,
            span: Span {
                start,
                end,
                line: 1,
                column: start + 1,
            },
            parent,
            children: Vec::new(),
        }
    }

    /// `skip(0)` built by hand.
    fn sample() -> SyntaxTree {
        let mut root = leaf(NodeKind::Program, None, 0, 7);
        let mut call = leaf(
            NodeKind::CallExpression {
                callee: NodeId(2),
                arguments: vec![NodeId(3)],
            },
            Some(NodeId(0)),
            0,
            7,
        );
        let callee = leaf(
            NodeKind::Identifier {
                name: "skip".into(),
            },
            Some(NodeId(1)),
            0,
            4,
        );
        let arg = leaf(NodeKind::NumericLiteral { value: 0.0 }, Some(NodeId(1)), 5, 6);
        root.children.push(NodeId(1));
        call.children.extend([NodeId(2), NodeId(3)]);
        SyntaxTree::from_parts("skip(0)".into(), vec![root, call, callee, arg], false)
    }

    #[test]
    fn preorder_visits_parents_first() {
        let tree = sample();
        let order: Vec<usize> = tree.preorder().map(NodeId::index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn text_and_names() {
        let tree = sample();
        assert_eq!(tree.text(NodeId(1)), "skip(0)");
        assert_eq!(tree.callee_name(NodeId(1)), Some("skip"));
        assert_eq!(tree.call_arguments(NodeId(1)), Some(&[NodeId(3)][..]));
        assert_eq!(tree.identifier_name(NodeId(3)), None);
    }

    #[test]
    fn ancestors_walk_to_root() {
        let tree = sample();
        let chain: Vec<NodeId> = tree.ancestors(NodeId(3)).collect();
        assert_eq!(chain, vec![NodeId(1), NodeId(0)]);
    }
}
