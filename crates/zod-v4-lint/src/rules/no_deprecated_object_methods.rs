//! Rule: no-deprecated-object-methods (Z1008)
//!
//! `.strict()` and `.passthrough()` give way to `z.strictObject()` and
//! `z.looseObject()`; `.strip()` is gone.

use crate::analysis::{callee_member, is_likely_schema_call};
use crate::rule::*;

pub struct NoDeprecatedObjectMethods;

static META: RuleMeta = RuleMeta {
    name: "no-deprecated-object-methods",
    code: "Z1008",
    description: "Disallow .strict(), .passthrough() and .strip() on object schemas",
    category: Category::Breaking,
    fixable: false,
    messages: &[
        (
            "deprecatedStrict",
            ".strict() is deprecated in Zod v4. Use z.strictObject() instead to create a strict object schema.",
        ),
        (
            "deprecatedPassthrough",
            ".passthrough() is deprecated in Zod v4. Use z.looseObject() instead to allow extra properties.",
        ),
        (
            "deprecatedStrip",
            ".strip() is removed in Zod v4. Use z.object(existingSchema.shape) to create a new schema without extra properties.",
        ),
    ],
};

fn message_id(method: &str) -> Option<&'static str> {
    match method {
        "strict" => Some("deprecatedStrict"),
        "passthrough" => Some("deprecatedPassthrough"),
        "strip" => Some("deprecatedStrip"),
        _ => None,
    }
}

impl LintRule for NoDeprecatedObjectMethods {
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
        let Some(id) = tree.identifier_name(property).and_then(message_id) else {
            return vec![];
        };
        if !is_likely_schema_call(tree, call.id) {
            return vec![];
        }
        vec![LintDiagnostic::new(&META, id, &[], tree, call.id)]
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

    fn message_ids(source: &str) -> Vec<&'static str> {
        lint(source)
            .iter()
            .filter(|d| d.code == "Z1008")
            .map(|d| d.message_id)
            .collect()
    }

    #[test]
    fn test_each_method_has_its_message() {
        assert_eq!(message_ids("z.object({}).strict()"), ["deprecatedStrict"]);
        assert_eq!(message_ids("UserSchema.passthrough()"), ["deprecatedPassthrough"]);
        assert_eq!(message_ids("z.object({ a: z.string() }).strip()"), ["deprecatedStrip"]);
    }

    #[test]
    fn test_unrelated_calls_ok() {
        assert!(message_ids("app.strict()").is_empty());
        assert!(message_ids("text.strip()").is_empty());
        assert!(message_ids("z.strictObject({})").is_empty());
    }
}
