//! Rule: no-deprecated-format-methods (Z1004)
//!
//! Flags `.format()` and `.flatten()` on a `ZodError`. Errors are recognized
//! by shape: `result.error.format()`, or a call on a variable named like
//! `error`, `err`, `e` or `zodError`.

use crate::analysis::{callee_member, is_error_member, looks_like_error_value};
use crate::rule::*;

const DEPRECATED_ERROR_METHODS: &[&str] = &["format", "flatten"];

pub struct NoDeprecatedFormatMethods;

static META: RuleMeta = RuleMeta {
    name: "no-deprecated-format-methods",
    code: "Z1004",
    description: "Disallow ZodError .format() and .flatten() in favor of z.treeifyError()",
    category: Category::Breaking,
    fixable: false,
    messages: &[(
        "deprecatedFormatMethod",
        ".{{ method }}() on ZodError is deprecated in Zod v4. Use z.treeifyError(error) instead.",
    )],
};

impl LintRule for NoDeprecatedFormatMethods {
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
        let Some(method) = tree.identifier_name(property) else {
            return vec![];
        };
        if !DEPRECATED_ERROR_METHODS.contains(&method) {
            return vec![];
        }

        let on_error = is_error_member(tree, object)
            || tree
                .identifier_name(object)
                .is_some_and(looks_like_error_value);
        if !on_error {
            return vec![];
        }
        vec![LintDiagnostic::new(
            &META,
            "deprecatedFormatMethod",
            &[("method", method)],
            tree,
            call.id,
        )]
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
    fn test_result_error_format_flagged() {
        let diags = lint("const formatted = result.error.format();");
        assert!(has_rule(&diags, "Z1004"), "got: {:?}", diags);
        assert_eq!(
            diags[0].message,
            ".format() on ZodError is deprecated in Zod v4. Use z.treeifyError(error) instead."
        );
    }

    #[test]
    fn test_error_variable_flatten_flagged() {
        assert!(has_rule(&lint("err.flatten()"), "Z1004"));
        assert!(has_rule(&lint("zodError.flatten()"), "Z1004"));
        assert!(has_rule(&lint("try { run() } catch (e) { log(e.format()) }"), "Z1004"));
    }

    #[test]
    fn test_other_format_calls_ok() {
        assert!(!has_rule(&lint("date.format('YYYY')"), "Z1004"));
        assert!(!has_rule(&lint("items.flatten()"), "Z1004"));
        assert!(!has_rule(&lint("error.toString()"), "Z1004"));
    }

    #[test]
    fn test_no_fix() {
        let diags = lint("error.format()");
        assert!(diags.iter().all(|d| d.fix.is_none()));
    }
}
