//! Rule: prefer-error-param (Z2003)
//!
//! Flags the `message` param of zod calls; v4 spells it `error`. The shape
//! object of a direct `z.object({...})` call is skipped, since its keys are
//! field names.

use crate::analysis::{
    callee_member, count_property_keys, is_anchored_call, is_entry_identifier, property_key_name,
    ERROR_PARAM_KEYS,
};
use crate::fix::Fixer;
use crate::rule::*;
use zod_v4_syntax::{NodeId, NodeKind, SyntaxTree};

pub struct PreferErrorParam;

static META: RuleMeta = RuleMeta {
    name: "prefer-error-param",
    code: "Z2003",
    description: "Prefer the error param over message for error customization",
    category: Category::BestPractice,
    fixable: true,
    messages: &[(
        "preferErrorParam",
        "The 'message' parameter is deprecated in Zod v4. Use 'error' instead: { error: '...' } or { error: (iss) => '...' }",
    )],
};

fn is_direct_object_call(tree: &SyntaxTree, call: NodeId) -> bool {
    callee_member(tree, call).is_some_and(|(object, property)| {
        is_entry_identifier(tree, object) && tree.identifier_name(property) == Some("object")
    })
}

impl LintRule for PreferErrorParam {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call_expression(
        &self,
        call: CallExpr<'_>,
        ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        let tree = ctx.tree;
        if !is_anchored_call(tree, call.id) || is_direct_object_call(tree, call.id) {
            return vec![];
        }

        let mut diagnostics = vec![];
        for &arg in call.arguments {
            let NodeKind::ObjectExpression { properties } = tree.kind(arg) else {
                continue;
            };
            let collides = count_property_keys(tree, arg, ERROR_PARAM_KEYS) > 1;

            for &property in properties {
                if property_key_name(tree, property) != Some("message") {
                    continue;
                }
                let diagnostic = LintDiagnostic::new(&META, "preferErrorParam", &[], tree, property);
                if collides {
                    diagnostics.push(diagnostic);
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
