//! Call chain walking.
//!
//! A chain is a run of calls linked by "the callee's object is another
//! call", read from the outermost call inward: `z.string().min(1).email()`
//! is `email(..)`, then `min(1)`, then `z.string()`. Each step moves to a
//! strict child, so every walk terminates.

use zod_v4_syntax::{NodeId, NodeKind, SyntaxTree};

use super::classify::{callee_member, is_entry_identifier};

/// Calls of a chain from `start` inward. Stops at the first call whose
/// callee is not a member access or whose object is not a call.
pub struct ChainCalls<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl<'t> ChainCalls<'t> {
    pub fn new(tree: &'t SyntaxTree, start: NodeId) -> Self {
        let next = matches!(tree.kind(start), NodeKind::CallExpression { .. }).then_some(start);
        Self { tree, next }
    }
}

impl Iterator for ChainCalls<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = callee_member(self.tree, current)
            .map(|(object, _)| object)
            .filter(|&object| matches!(self.tree.kind(object), NodeKind::CallExpression { .. }));
        Some(current)
    }
}

/// First call in the chain from `start` whose callee is `z.<member>`.
pub fn find_anchor_call(tree: &SyntaxTree, start: NodeId, member: &str) -> Option<NodeId> {
    ChainCalls::new(tree, start).find(|&call| {
        callee_member(tree, call).is_some_and(|(object, property)| {
            is_entry_identifier(tree, object) && tree.identifier_name(property) == Some(member)
        })
    })
}

/// True iff at least one call sits strictly between `anchor` and
/// `terminal`, i.e. the terminal's callee object is not the anchor.
pub fn has_intervening_calls(tree: &SyntaxTree, anchor: NodeId, terminal: NodeId) -> bool {
    match callee_member(tree, terminal) {
        Some((object, _)) => object != anchor,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zod_v4_syntax::parse;

    fn outer_call(tree: &SyntaxTree) -> NodeId {
        tree.preorder()
            .find(|&id| matches!(tree.kind(id), NodeKind::CallExpression { .. }))
            .expect("source has a call")
    }

    #[test]
    fn test_chain_calls_outermost_first() {
        let source = "z.string().min(1).email()";
        let tree = parse(source).unwrap();
        let texts: Vec<_> = ChainCalls::new(&tree, outer_call(&tree))
            .map(|call| tree.text(call, source))
            .collect();
        assert_eq!(
            texts,
            vec!["z.string().min(1).email()", "z.string().min(1)", "z.string()"]
        );
    }

    #[test]
    fn test_chain_stops_at_plain_call() {
        let tree = parse("build().trim()").unwrap();
        assert_eq!(ChainCalls::new(&tree, outer_call(&tree)).count(), 2);
    }

    #[test]
    fn test_find_anchor_call() {
        let source = "z.string().min(1).email()";
        let tree = parse(source).unwrap();
        let anchor = find_anchor_call(&tree, outer_call(&tree), "string").unwrap();
        assert_eq!(tree.text(anchor, source), "z.string()");
        assert!(find_anchor_call(&tree, outer_call(&tree), "number").is_none());
    }

    #[test]
    fn test_find_anchor_call_requires_entry_identifier() {
        let tree = parse("zod.string().email()").unwrap();
        assert!(find_anchor_call(&tree, outer_call(&tree), "string").is_none());
    }

    #[test]
    fn test_intervening_calls() {
        let source = "z.string().min(1).email()";
        let tree = parse(source).unwrap();
        let terminal = outer_call(&tree);
        let anchor = find_anchor_call(&tree, terminal, "string").unwrap();
        assert!(has_intervening_calls(&tree, anchor, terminal));

        let source = "z.string().email()";
        let tree = parse(source).unwrap();
        let terminal = outer_call(&tree);
        let anchor = find_anchor_call(&tree, terminal, "string").unwrap();
        assert!(!has_intervening_calls(&tree, anchor, terminal));
    }

    #[test]
    fn test_long_chain_terminates() {
        let source = format!("z.string(){}", ".trim()".repeat(150));
        let tree = parse(&source).unwrap();
        assert_eq!(ChainCalls::new(&tree, outer_call(&tree)).count(), 151);
    }
}
