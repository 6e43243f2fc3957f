//! Variable resolution through the scope chain.

use tracing::trace;
use zod_v4_syntax::{Binding, BindingKind, NodeId, NodeKind, ScopeChain, ScopeTree, SyntaxTree};

/// Nearest binding of `name` in `chain`, walking strictly outward from the
/// innermost frame.
pub fn resolve_in_chain<'s>(chain: &ScopeChain<'s>, name: &str) -> Option<&'s Binding> {
    for (depth, scope) in chain.frames().iter().enumerate() {
        if let Some(binding) = scope.get(name) {
            trace!(name, depth, kind = ?binding.kind, "resolved");
            return Some(binding);
        }
    }
    None
}

/// Binding of `name` visible at `site`.
pub fn resolve_declaration<'s>(
    scopes: &'s ScopeTree,
    name: &str,
    site: NodeId,
) -> Option<&'s Binding> {
    resolve_in_chain(&scopes.chain(site), name)
}

/// The `VariableDeclarator` that declares `name` in `chain`. Parameters,
/// imports, functions and other non-variable bindings resolve to `None`.
pub fn resolve_variable_declarator(
    tree: &SyntaxTree,
    chain: &ScopeChain<'_>,
    name: &str,
) -> Option<NodeId> {
    let binding = resolve_in_chain(chain, name)?;
    if !matches!(
        binding.kind,
        BindingKind::Var | BindingKind::Let | BindingKind::Const
    ) {
        return None;
    }
    matches!(tree.kind(binding.declaration), NodeKind::VariableDeclarator { .. })
        .then_some(binding.declaration)
}
