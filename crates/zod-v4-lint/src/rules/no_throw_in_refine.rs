//! Rule: no-throw-in-refine (Z1013)
//!
//! Zod does not catch exceptions thrown from `.refine()`, `.superRefine()`
//! or `.transform()` callbacks. Only throws that escape the callback itself
//! are reported: nested functions are not entered, and a `try` block shields
//! the throws inside it while its `catch` and `finally` clauses do not.

use crate::analysis::{callee_member, is_function, is_likely_schema_call};
use crate::rule::*;
use zod_v4_syntax::{NodeId, NodeKind, SyntaxTree};

pub struct NoThrowInRefine;

static META: RuleMeta = RuleMeta {
    name: "no-throw-in-refine",
    code: "Z1013",
    description: "Disallow throw statements inside .refine(), .superRefine() and .transform() callbacks",
    category: Category::Breaking,
    fixable: false,
    messages: &[
        (
            "throwInRefine",
            "Throwing inside .refine() is not captured by Zod. Return a falsy value to signal validation failure instead.",
        ),
        (
            "throwInSuperRefine",
            "Throwing inside .superRefine() is not captured by Zod. Use ctx.addIssue() to report validation errors instead.",
        ),
        (
            "throwInTransform",
            "Throwing inside .transform() is not captured by Zod. Use ctx.issues.push() and return z.NEVER instead.",
        ),
    ],
};

/// Message id and replacement hint for each callback-taking method.
fn target(method: &str) -> Option<(&'static str, &'static str)> {
    match method {
        "refine" => Some(("throwInRefine", "return isValid(val) || 'Invalid value'")),
        "superRefine" => Some((
            "throwInSuperRefine",
            "ctx.addIssue({ code: 'custom', message: 'Invalid' })",
        )),
        "transform" => Some((
            "throwInTransform",
            "ctx.issues.push({ code: 'custom', message: 'Invalid', input: val }); return z.NEVER",
        )),
        _ => None,
    }
}

/// `throw` statements under `body` that would propagate out of the
/// enclosing callback, in source order.
fn escaping_throws(tree: &SyntaxTree, body: NodeId) -> Vec<NodeId> {
    let mut throws = Vec::new();
    let mut stack = vec![body];
    while let Some(node) = stack.pop() {
        let kind = tree.kind(node);
        if is_function(kind) {
            continue;
        }
        match kind {
            NodeKind::ThrowStatement { .. } => throws.push(node),
            NodeKind::TryStatement {
                handler, finalizer, ..
            } => {
                stack.extend(*finalizer);
                stack.extend(*handler);
            }
            _ => stack.extend(tree.children(node).into_iter().rev()),
        }
    }
    throws
}

impl LintRule for NoThrowInRefine {
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
        let Some((message_id, hint)) = tree.identifier_name(property).and_then(target) else {
            return vec![];
        };
        if !is_likely_schema_call(tree, call.id) {
            return vec![];
        }

        let Some(&callback) = call.arguments.first() else {
            return vec![];
        };
        let body = match tree.kind(callback) {
            NodeKind::ArrowFunctionExpression(function) | NodeKind::FunctionExpression(function) => {
                function.body
            }
            _ => None,
        };
        let Some(body) = body.filter(|&body| matches!(tree.kind(body), NodeKind::BlockStatement { .. }))
        else {
            return vec![];
        };

        escaping_throws(tree, body)
            .into_iter()
            .map(|statement| {
                LintDiagnostic::new(&META, message_id, &[], tree, statement)
                    .with_note(format!("instead: {hint}"))
            })
            .collect()
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
        lint(source).into_iter().filter(|d| d.code == "Z1013").collect()
    }

    #[test]
    fn test_throw_in_refine_flagged() {
        let source = "z.string().refine((val) => { if (!val) throw new Error('bad'); return true; })";
        let diags = own(source);
        assert_eq!(diags.len(), 1, "got: {:?}", diags);
        assert_eq!(diags[0].message_id, "throwInRefine");
        assert_eq!(&source[diags[0].span.range()], "throw new Error('bad');");
    }

    #[test]
    fn test_message_per_method() {
        let ids = |source: &str| own(source).iter().map(|d| d.message_id).collect::<Vec<_>>();
        assert_eq!(
            ids("schema.superRefine((val, ctx) => { throw new Error('x') })"),
            ["throwInSuperRefine"]
        );
        assert_eq!(
            ids("z.string().transform(function (val) { throw new Error('x') })"),
            ["throwInTransform"]
        );
    }

    #[test]
    fn test_throw_in_try_block_ok() {
        assert!(own("schema.refine((v) => { try { throw new Error('x') } catch {} return true })").is_empty());
    }

    #[test]
    fn test_throw_in_catch_flagged() {
        let diags = own("schema.refine((v) => { try {} catch { throw new Error('x') } })");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_throw_in_finally_flagged() {
        let diags = own("schema.refine((v) => { try { run() } finally { throw new Error('x') } })");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_nested_function_ok() {
        let source = "schema.refine((v) => { const f = () => { throw new Error('x') }; return v.every(function (i) { throw i }) })";
        assert!(own(source).is_empty());
    }

    #[test]
    fn test_multiple_throws_in_order() {
        let source = "schema.refine((v) => { if (a) throw one; if (b) { throw two } return true })";
        let diags = own(source);
        assert_eq!(diags.len(), 2);
        assert!(diags[0].span.start < diags[1].span.start);
    }

    #[test]
    fn test_expression_body_and_references_ok() {
        assert!(own("schema.refine((v) => v.length > 0)").is_empty());
        assert!(own("schema.refine(validate)").is_empty());
    }

    #[test]
    fn test_non_schema_ok() {
        assert!(own("stream.transform((c) => { throw new Error('x') })").is_empty());
    }
}
