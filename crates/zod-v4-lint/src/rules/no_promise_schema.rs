//! Rule: no-promise-schema (Z1012)

use crate::analysis::{callee_member, is_entry_identifier};
use crate::rule::*;

pub struct NoPromiseSchema;

static META: RuleMeta = RuleMeta {
    name: "no-promise-schema",
    code: "Z1012",
    description: "Disallow z.promise()",
    category: Category::Breaking,
    fixable: false,
    messages: &[(
        "deprecatedPromise",
        "z.promise() is deprecated in Zod v4. Await your promises before parsing instead of wrapping schemas with z.promise().",
    )],
};

impl LintRule for NoPromiseSchema {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call_expression(
        &self,
        call: CallExpr<'_>,
        ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        let tree = ctx.tree;
        match callee_member(tree, call.id) {
            Some((object, property))
                if is_entry_identifier(tree, object)
                    && tree.identifier_name(property) == Some("promise") =>
            {
                vec![LintDiagnostic::new(&META, "deprecatedPromise", &[], tree, call.id)]
            }
            _ => vec![],
        }
    }
}
