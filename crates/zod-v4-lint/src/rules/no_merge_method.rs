//! Rule: no-merge-method (Z1005)
//!
//! Flags `.merge()` on schemas; v4 expects `.extend(other.shape)` or a spread
//! of both shapes.

use crate::analysis::{callee_member, is_likely_schema_call};
use crate::rule::*;

pub struct NoMergeMethod;

pub(crate) static META: RuleMeta = RuleMeta {
    name: "no-merge-method",
    code: "Z1005",
    description: "Disallow .merge() in favor of .extend() or shape spreading",
    category: Category::Breaking,
    fixable: false,
    messages: &[(
        "deprecatedMerge",
        ".merge() is deprecated in Zod v4. Use .extend() instead: schema.extend(otherSchema.shape) or use the spread operator in z.object({ ...schema1.shape, ...schema2.shape })",
    )],
};

impl LintRule for NoMergeMethod {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call_expression(
        &self,
        call: CallExpr<'_>,
        ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        let tree = ctx.tree;
        let Some((_, property)) = callee_member(tree, call.id) else {
            return vec![];
        };
        if tree.identifier_name(property) != Some("merge") || !is_likely_schema_call(tree, call.id) {
            return vec![];
        }
        vec![LintDiagnostic::new(&META, "deprecatedMerge", &[], tree, call.id)]
    }
}
