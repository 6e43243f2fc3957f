//! Syntax tree types.

pub mod node;
pub mod tree;

pub use node::{
    Class, Function, ImportKind, LiteralValue, MethodKind, Node, NodeId, NodeKind, PropertyKind,
    VarKind,
};
pub use tree::{Ancestors, Preorder, SyntaxTree, TreeBuilder};
