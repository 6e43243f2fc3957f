//! Rule: prefer-safeParse (Z2001)
//!
//! Suggests `.safeParse()` over the throwing `.parse()`. Inside a `try`
//! statement the call is still reported, but the rename is not offered
//! since the surrounding code may rely on the throw.

use crate::analysis::{callee_member, is_inside_try, is_likely_schema_call};
use crate::fix::Fixer;
use crate::rule::*;

pub struct PreferSafeParse;

pub(crate) static META: RuleMeta = RuleMeta {
    name: "prefer-safeParse",
    code: "Z2001",
    description: "Prefer .safeParse() over .parse()",
    category: Category::BestPractice,
    fixable: true,
    messages: &[(
        "preferSafeParse",
        "Prefer .safeParse() over .parse(). safeParse returns a result object { success, data, error } instead of throwing, making error handling more explicit and predictable.",
    )],
};

impl LintRule for PreferSafeParse {
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
        if tree.identifier_name(property) != Some("parse") || !is_likely_schema_call(tree, call.id) {
            return vec![];
        }

        let diagnostic = LintDiagnostic::new(&META, "preferSafeParse", &[], tree, call.id);
        if is_inside_try(tree, call.id) {
            return vec![diagnostic];
        }
        let mut fixer = Fixer::new(tree);
        fixer.replace_text(property, "safeParse");
        vec![diagnostic.with_fix(fixer.finish_or_withhold(META.name))]
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

    fn own(source: &str) -> Vec<LintDiagnostic> {
        lint(source).into_iter().filter(|d| d.code == "Z2001").collect()
    }

    #[test]
    fn test_parse_flagged_and_fixed() {
        let source = "const user = UserSchema.parse(input);";
        let diags = own(source);
        assert_eq!(diags.len(), 1);
        let patch = diags[0].fix.as_ref().unwrap();
        assert_eq!(patch.apply(source).unwrap(), "const user = UserSchema.safeParse(input);");
    }

    #[test]
    fn test_inline_schema_parse_flagged() {
        assert_eq!(own("z.string().parse(value)").len(), 1);
    }

    #[test]
    fn test_inside_try_reported_without_fix() {
        let diags = own("try { UserSchema.parse(input) } catch (e) { handle(e) }");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].fix.is_none());
    }

    #[test]
    fn test_non_schema_parse_ok() {
        assert!(own("JSON.parse(text)").is_empty());
        assert!(own("UserSchema.safeParse(input)").is_empty());
    }
}
