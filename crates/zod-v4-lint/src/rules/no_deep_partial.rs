//! Rule: no-deep-partial (Z1010)

use crate::analysis::{callee_member, is_likely_schema_call};
use crate::rule::*;

pub struct NoDeepPartial;

static META: RuleMeta = RuleMeta {
    name: "no-deep-partial",
    code: "Z1010",
    description: "Disallow the removed .deepPartial() method",
    category: Category::Breaking,
    fixable: false,
    messages: &[(
        "removedDeepPartial",
        ".deepPartial() was removed in Zod v4. Consider using .partial() for shallow partial or manually creating nested partial schemas.",
    )],
};

impl LintRule for NoDeepPartial {
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
        if tree.identifier_name(property) != Some("deepPartial") || !is_likely_schema_call(tree, call.id) {
            return vec![];
        }
        vec![LintDiagnostic::new(&META, "removedDeepPartial", &[], tree, call.id)]
    }
}

#[cfg(test)]
mod tests {
    use crate::rule::LintDiagnostic;
    use crate::Linter;

    fn lint(source: &str) -> Vec<LintDiagnostic> {
        let linter = Linter::new();
        linter.lint_source(source, "test.ts").diagnostics
    }

    fn has_rule(diags: &[LintDiagnostic], code: &str) -> bool {
        diags.iter().any(|d| d.code == code)
    }

    #[test]
    fn test_deep_partial_flagged() {
        assert!(has_rule(&lint("z.object({ a: z.object({}) }).deepPartial()"), "Z1010"));
        assert!(has_rule(&lint("settingsSchema.deepPartial()"), "Z1010"));
    }

    #[test]
    fn test_partial_ok() {
        assert!(!has_rule(&lint("settingsSchema.partial()"), "Z1010"));
        assert!(!has_rule(&lint("utils.deepPartial(obj)"), "Z1010"));
    }
}
