//! Rule: no-superrefine (Z1006)
//!
//! `.superRefine((data, ctx) => ...)` becomes `.check((ctx) => ...)` in v4,
//! with the validated value read from `ctx.value`. The fix rewrites the
//! callback signature and binds the old data parameter at the top of the
//! block:
//!
//! ```text
//! .superRefine((val, ctx) => { body })
//! .check((ctx) => { const { value: val } = ctx; body })
//! ```
//!
//! Only inline callbacks with a block body are rewritten. A callback passed
//! by reference, or one with an expression body, is reported without a fix.

use crate::analysis::{callee_member, is_likely_schema_call};
use crate::fix::{Fixer, Patch};
use crate::rule::*;
use zod_v4_syntax::{Function, NodeId, NodeKind, SyntaxTree};

/// Parameter names that already denote the v4 check context.
const CONTEXT_NAMES: &[&str] = &["ctx", "context"];

const CONTEXT_NAME: &str = "ctx";

pub struct NoSuperRefine;

static META: RuleMeta = RuleMeta {
    name: "no-superrefine",
    code: "Z1006",
    description: "Disallow .superRefine() in favor of .check()",
    category: Category::Breaking,
    fixable: true,
    messages: &[(
        "deprecatedSuperRefine",
        ".superRefine() is deprecated in Zod v4. Use .check() instead.",
    )],
};

/// The function literal passed as `arg`, if any.
fn inline_callback(tree: &SyntaxTree, arg: NodeId) -> Option<&Function> {
    match tree.kind(arg) {
        NodeKind::ArrowFunctionExpression(function) | NodeKind::FunctionExpression(function) => {
            Some(function)
        }
        _ => None,
    }
}

/// Pattern of a parameter that can be moved into a destructuring
/// declaration as is.
fn movable_pattern(tree: &SyntaxTree, param: NodeId) -> Option<NodeId> {
    match tree.kind(param) {
        NodeKind::Param {
            pattern,
            default: None,
            ..
        } if !matches!(tree.kind(*pattern), NodeKind::RestElement { .. }) => Some(*pattern),
        _ => None,
    }
}

/// Edits turning `callback` into a one-argument `check` callback, or `None`
/// when its shape cannot be rewritten mechanically.
fn rewrite_callback(
    ctx: &LintContext<'_>,
    property: NodeId,
    function: &Function,
) -> Option<Patch> {
    let tree = ctx.tree;
    let body = function.body?;
    if !matches!(tree.kind(body), NodeKind::BlockStatement { .. }) {
        return None;
    }
    let body_span = tree.span(body);
    let block_open = body_span.start..body_span.start + 1;

    let mut fixer = Fixer::new(tree);
    fixer.replace_text(property, "check");

    match function.params.as_slice() {
        [] => {}
        [only] => {
            let pattern = movable_pattern(tree, *only)?;
            let name = ctx.text(pattern);
            if !CONTEXT_NAMES.contains(&name) {
                fixer.replace_text(*only, CONTEXT_NAME);
                fixer.insert_text_after_range(
                    block_open,
                    format!(" const {{ value: {name} }} = {CONTEXT_NAME};"),
                );
            }
        }
        [first, second, ..] => {
            let data = ctx.text(movable_pattern(tree, *first)?);
            let context = match tree.kind(movable_pattern(tree, *second)?) {
                NodeKind::Identifier { name } => name.as_str(),
                _ => return None,
            };
            let last = function.params.last().copied().unwrap_or(*second);
            let params_range = tree.span(*first).start..tree.span(last).end;
            fixer.replace_text_range(params_range, context);
            fixer.insert_text_after_range(
                block_open,
                format!(" const {{ value: {data} }} = {context};"),
            );
        }
    }
    fixer.finish_or_withhold(META.name)
}

impl LintRule for NoSuperRefine {
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
        if tree.identifier_name(property) != Some("superRefine") || !is_likely_schema_call(tree, call.id) {
            return vec![];
        }

        let diagnostic = LintDiagnostic::new(&META, "deprecatedSuperRefine", &[], tree, call.id)
            .with_note("the .check() callback receives a single context; the value is ctx.value");
        let fix = call
            .arguments
            .first()
            .and_then(|&arg| inline_callback(tree, arg))
            .and_then(|function| rewrite_callback(ctx, property, function));
        vec![diagnostic.with_fix(fix)]
    }
}
