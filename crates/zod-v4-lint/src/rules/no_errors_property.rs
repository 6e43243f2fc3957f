//! Rule: no-errors-property (Z1007)
//!
//! `ZodError.errors` is renamed to `ZodError.issues` in v4.

use crate::analysis::{is_error_member, looks_like_error_value};
use crate::fix::Fixer;
use crate::rule::*;

pub struct NoErrorsProperty;

static META: RuleMeta = RuleMeta {
    name: "no-errors-property",
    code: "Z1007",
    description: "Disallow ZodError.errors in favor of ZodError.issues",
    category: Category::Breaking,
    fixable: true,
    messages: &[(
        "deprecatedErrorsProperty",
        "ZodError.errors is renamed to ZodError.issues in Zod v4. Use .issues instead of .errors.",
    )],
};

fn is_error_name(name: &str) -> bool {
    looks_like_error_value(name) || name.eq_ignore_ascii_case("validationerror")
}

impl LintRule for NoErrorsProperty {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_member_expression(
        &self,
        member: MemberExpr,
        ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        let tree = ctx.tree;
        if member.computed || tree.identifier_name(member.property) != Some("errors") {
            return vec![];
        }
        let on_error = tree.identifier_name(member.object).is_some_and(is_error_name)
            || is_error_member(tree, member.object);
        if !on_error {
            return vec![];
        }

        let mut fixer = Fixer::new(tree);
        fixer.replace_text(member.property, "issues");
        vec![
            LintDiagnostic::new(&META, "deprecatedErrorsProperty", &[], tree, member.property)
                .with_fix(fixer.finish_or_withhold(META.name)),
        ]
    }
}
