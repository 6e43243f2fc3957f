//! Rule: no-deprecated-error-params (Z1003)
//!
//! Flags `invalid_type_error` and `required_error` in the params object of
//! a zod call. v4 merges both into a single `error` param.

use crate::analysis::{count_property_keys, is_anchored_call, property_key_name, ERROR_PARAM_KEYS};
use crate::fix::Fixer;
use crate::rule::*;
use zod_v4_syntax::NodeKind;

const DEPRECATED_ERROR_PARAMS: &[&str] = &["invalid_type_error", "required_error"];

pub struct NoDeprecatedErrorParams;

static META: RuleMeta = RuleMeta {
    name: "no-deprecated-error-params",
    code: "Z1003",
    description: "Disallow invalid_type_error and required_error in favor of the error param",
    category: Category::Breaking,
    fixable: true,
    messages: &[(
        "deprecatedErrorParam",
        "'{{ param }}' is deprecated in Zod v4. Use the 'error' parameter instead: { error: '...' } or { error: (iss) => '...' }",
    )],
};

impl LintRule for NoDeprecatedErrorParams {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call_expression(
        &self,
        call: CallExpr<'_>,
        ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        let tree = ctx.tree;
        if !is_anchored_call(tree, call.id) {
            return vec![];
        }

        let mut diagnostics = vec![];
        for &arg in call.arguments {
            let NodeKind::ObjectExpression { properties } = tree.kind(arg) else {
                continue;
            };
            // Renaming must not leave two `error` keys behind.
            let collides = count_property_keys(tree, arg, ERROR_PARAM_KEYS) > 1;

            for &property in properties {
                let Some(param) = property_key_name(tree, property) else {
                    continue;
                };
                if !DEPRECATED_ERROR_PARAMS.contains(&param) {
                    continue;
                }
                let diagnostic =
                    LintDiagnostic::new(&META, "deprecatedErrorParam", &[("param", param)], tree, property);
                if collides {
                    diagnostics.push(
                        diagnostic.with_note("merge the error messages into a single 'error' param"),
                    );
                    continue;
                }
                let mut fixer = Fixer::new(tree);
                fixer.rename_property_key(property, "error");
                diagnostics.push(diagnostic.with_fix(fixer.finish_or_withhold(META.name)));
            }
        }
        diagnostics
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

    fn own(diags: &[LintDiagnostic]) -> Vec<&LintDiagnostic> {
        diags.iter().filter(|d| d.code == "Z1003").collect()
    }

    #[test]
    fn test_required_error_flagged_and_fixed() {
        let source = "z.string({ required_error: 'Name is required' })";
        let diags = lint(source);
        let found = own(&diags);
        assert_eq!(found.len(), 1, "got: {:?}", diags);
        assert!(found[0].message.starts_with("'required_error' is deprecated"));
        let patch = found[0].fix.as_ref().unwrap();
        assert_eq!(patch.apply(source).unwrap(), "z.string({ error: 'Name is required' })");
    }

    #[test]
    fn test_invalid_type_error_in_chain() {
        let diags = lint("z.string().min(1).max(5, { invalid_type_error: 'bad' })");
        assert!(has_rule(&diags, "Z1003"), "got: {:?}", diags);
    }

    #[test]
    fn test_shorthand_keeps_value() {
        let source = "z.number({ required_error })";
        let diags = lint(source);
        let patch = own(&diags)[0].fix.as_ref().unwrap();
        assert_eq!(patch.apply(source).unwrap(), "z.number({ error: required_error })");
    }

    #[test]
    fn test_both_params_report_without_fix() {
        let diags = lint("z.string({ required_error: 'a', invalid_type_error: 'b' })");
        let found = own(&diags);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|d| d.fix.is_none()));
    }

    #[test]
    fn test_existing_error_key_blocks_fix() {
        let diags = lint("z.string({ error: 'a', required_error: 'b' })");
        let found = own(&diags);
        assert_eq!(found.len(), 1);
        assert!(found[0].fix.is_none());
    }

    #[test]
    fn test_error_param_ok() {
        assert!(!has_rule(&lint("z.string({ error: 'required' })"), "Z1003"));
    }

    #[test]
    fn test_non_zod_call_ok() {
        assert!(!has_rule(&lint("other.string({ required_error: 'x' })"), "Z1003"));
    }
}
