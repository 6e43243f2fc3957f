//! Rule: no-deprecated-string-format (Z1001)
//!
//! Flags string format methods such as `z.string().email()`, which v4
//! replaces with top-level functions like `z.email()`. The call is rewritten
//! when `z.string()` takes no arguments and nothing else is chained before
//! the format method, so no configuration would be lost.

use crate::analysis::{callee_member, find_anchor_call, has_intervening_calls, is_anchored_call};
use crate::fix::Fixer;
use crate::rule::*;
use zod_v4_syntax::NodeKind;

/// Format methods that exist as top-level `z.*` functions in v4.
pub const TOP_LEVEL_FORMATS: &[&str] = &[
    "email",
    "url",
    "uuid",
    "cuid",
    "cuid2",
    "ulid",
    "ip",
    "ipv4",
    "ipv6",
    "cidr",
    "cidrv4",
    "cidrv6",
    "emoji",
    "nanoid",
    "base64",
    "base64url",
    "jwt",
    "ascii",
    "utf8",
    "hexadecimal",
    "e164",
    "bic",
    "iban",
    "date",
    "time",
    "datetime",
    "duration",
];

pub struct NoDeprecatedStringFormat;

pub(crate) static META: RuleMeta = RuleMeta {
    name: "no-deprecated-string-format",
    code: "Z1001",
    description: "Disallow z.string().email() style format methods in favor of top-level z.email()",
    category: Category::Breaking,
    fixable: true,
    messages: &[(
        "deprecatedStringFormat",
        "z.string().{{ method }}() is deprecated in Zod v4. Use z.{{ method }}() instead.",
    )],
};

impl LintRule for NoDeprecatedStringFormat {
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
        if !TOP_LEVEL_FORMATS.contains(&method) || !is_anchored_call(tree, call.id) {
            return vec![];
        }
        if !matches!(tree.kind(object), NodeKind::CallExpression { .. }) {
            return vec![];
        }
        let Some(string_call) = find_anchor_call(tree, object, "string") else {
            return vec![];
        };

        let diagnostic = LintDiagnostic::new(
            &META,
            "deprecatedStringFormat",
            &[("method", method)],
            tree,
            call.id,
        );

        let string_has_args = matches!(
            tree.kind(string_call),
            NodeKind::CallExpression { arguments, .. } if !arguments.is_empty()
        );
        if string_has_args || has_intervening_calls(tree, string_call, call.id) {
            return vec![diagnostic.with_note(format!(
                "z.{method}() cannot be applied automatically while z.string() is configured or other methods precede .{method}()"
            ))];
        }

        let args = match (call.arguments.first(), call.arguments.last()) {
            (Some(&first), Some(&last)) => ctx.text_between(first, last),
            _ => "",
        };
        let mut fixer = Fixer::new(tree);
        fixer.replace_text(call.id, format!("z.{method}({args})"));
        vec![diagnostic.with_fix(fixer.finish_or_withhold(META.name))]
    }
}
