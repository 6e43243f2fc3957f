//! Rule: no-deprecated-ip-methods (Z1011)
//!
//! Flags the removed `.ip()` and `.cidr()` string methods. The top-level
//! `z.ip()` is left to the call site that chains it.

use crate::analysis::{callee_member, is_anchored_call, is_entry_identifier};
use crate::rule::*;

pub struct NoDeprecatedIpMethods;

static META: RuleMeta = RuleMeta {
    name: "no-deprecated-ip-methods",
    code: "Z1011",
    description: "Disallow the removed .ip() and .cidr() string methods",
    category: Category::Breaking,
    fixable: false,
    messages: &[
        (
            "removedIp",
            ".ip() was removed in Zod v4. Use .ipv4() or .ipv6() instead. For both, use z.union([z.ipv4(), z.ipv6()]).",
        ),
        (
            "removedCidr",
            ".cidr() was removed in Zod v4. Use .cidrv4() or .cidrv6() instead.",
        ),
    ],
};

impl LintRule for NoDeprecatedIpMethods {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call_expression(
        &self,
        call: CallExpr<'_>,
        ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        let tree = ctx.tree;
        let Some((object, property)) = callee_member(tree, call.id) else {
            return vec![];
        };
        let id = match tree.identifier_name(property) {
            Some("ip") if !is_entry_identifier(tree, object) => "removedIp",
            Some("cidr") => "removedCidr",
            _ => return vec![],
        };
        if !is_anchored_call(tree, call.id) {
            return vec![];
        }
        vec![LintDiagnostic::new(&META, id, &[], tree, call.id)]
    }
}
