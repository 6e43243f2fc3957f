//! Arena-backed syntax tree and traversal helpers.

use super::node::{Node, NodeId, NodeKind};
use crate::token::Span;

/// A parsed source file. Nodes are stored in an arena; children precede
/// their parents in allocation order.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.kind(id).children()
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Pre-order traversal of the whole tree in source order.
    pub fn preorder(&self) -> Preorder<'_> {
        self.preorder_from(self.root)
    }

    /// Pre-order traversal of the subtree rooted at `id`, including `id`.
    pub fn preorder_from(&self, id: NodeId) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![id],
        }
    }

    /// Name of an `Identifier` node.
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Source text covered by `id`.
    pub fn text<'s>(&self, id: NodeId, source: &'s str) -> &'s str {
        let span = self.span(id);
        source.get(span.start..span.end).unwrap_or("")
    }

    /// All nodes with their ids, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx as u32), node))
    }
}

pub struct Ancestors<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

pub struct Preorder<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        let children = self.tree.children(current);
        self.stack.extend(children.into_iter().rev());
        Some(current)
    }
}

/// Incremental tree construction used by the parser.
///
/// Allocating a node sets the parent link of each of its children, so the
/// tree is consistent as soon as the root is allocated.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for child in kind.children() {
            self.nodes[child.index()].parent = Some(id);
        }
        self.nodes.push(Node::new(kind, span));
        id
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    /// Replace the kind of an already allocated node, re-linking children.
    pub fn replace(&mut self, id: NodeId, kind: NodeKind, span: Span) {
        for child in kind.children() {
            self.nodes[child.index()].parent = Some(id);
        }
        let node = &mut self.nodes[id.index()];
        node.kind = kind;
        node.span = span;
    }

    /// Current arena length, for backtracking.
    pub fn checkpoint(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every node allocated after `checkpoint` and clear parent links
    /// that pointed at them.
    pub fn rollback(&mut self, checkpoint: usize) {
        let removed = self.nodes.split_off(checkpoint.min(self.nodes.len()));
        for node in &removed {
            for child in node.kind.children() {
                if let Some(kept) = self.nodes.get_mut(child.index()) {
                    kept.parent = None;
                }
            }
        }
    }

    pub fn finish(self, root: NodeId) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            root,
        }
    }
}
