//! Facts about the nodes enclosing a site.

use zod_v4_syntax::{NodeId, NodeKind, SyntaxTree};

use super::classify::method_name;

/// React hooks whose first argument is a memoized callback.
const MEMO_HOOKS: &[&str] = &["useMemo", "useCallback"];

/// Function declarations, function expressions and arrows.
pub fn is_function(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::FunctionDeclaration(_)
            | NodeKind::FunctionExpression(_)
            | NodeKind::ArrowFunctionExpression(_)
    )
}

/// Nearest function enclosing `node`, not counting `node` itself.
pub fn enclosing_function(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node).find(|&id| is_function(tree.kind(id)))
}

/// Whether any ancestor of `node` is a `try` statement, whichever of its
/// clauses `node` sits in.
pub fn is_inside_try(tree: &SyntaxTree, node: NodeId) -> bool {
    tree.ancestors(node)
        .any(|id| matches!(tree.kind(id), NodeKind::TryStatement { .. }))
}

/// Whether `function` is the first argument of `useMemo`/`useCallback`,
/// called bare or through a namespace such as `React.useMemo`.
pub fn is_memoized_callback(tree: &SyntaxTree, function: NodeId) -> bool {
    if !matches!(
        tree.kind(function),
        NodeKind::ArrowFunctionExpression(_) | NodeKind::FunctionExpression(_)
    ) {
        return false;
    }
    let Some(parent) = tree.parent(function) else {
        return false;
    };
    let NodeKind::CallExpression {
        callee, arguments, ..
    } = tree.kind(parent)
    else {
        return false;
    };
    if arguments.first() != Some(&function) {
        return false;
    }
    let hook = tree
        .identifier_name(*callee)
        .or_else(|| method_name(tree, *callee));
    hook.is_some_and(|name| MEMO_HOOKS.contains(&name))
}
