//! Rule: no-record-single-arg (Z1002)
//!
//! v4 requires both a key schema and a value schema: `z.record(z.string(), V)`.

use crate::analysis::{callee_member, is_entry_identifier};
use crate::rule::*;

pub struct NoRecordSingleArg;

static META: RuleMeta = RuleMeta {
    name: "no-record-single-arg",
    code: "Z1002",
    description: "Require z.record() to receive a key schema and a value schema",
    category: Category::Breaking,
    fixable: false,
    messages: &[(
        "recordRequiresTwoArgs",
        "z.record() requires two arguments in Zod v4: z.record(keySchema, valueSchema). The first argument is the key schema (usually z.string()) and the second is the value schema.",
    )],
};

impl LintRule for NoRecordSingleArg {
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
        if !is_entry_identifier(tree, object) || tree.identifier_name(property) != Some("record") {
            return vec![];
        }
        if call.arguments.len() != 1 {
            return vec![];
        }
        vec![LintDiagnostic::new(&META, "recordRequiresTwoArgs", &[], tree, call.id)]
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
    fn test_single_arg_flagged() {
        let diags = lint("const m = z.record(z.string());");
        assert!(has_rule(&diags, "Z1002"), "should flag single-arg record, got: {:?}", diags);
        assert!(diags[0].fix.is_none());
    }

    #[test]
    fn test_two_args_ok() {
        assert!(!has_rule(&lint("z.record(z.string(), z.number())"), "Z1002"));
    }

    #[test]
    fn test_no_args_not_flagged() {
        assert!(!has_rule(&lint("z.record()"), "Z1002"));
    }

    #[test]
    fn test_other_record_ok() {
        assert!(!has_rule(&lint("immutable.record(shape)"), "Z1002"));
        assert!(!has_rule(&lint("z.object({}).record(x)"), "Z1002"));
    }
}
