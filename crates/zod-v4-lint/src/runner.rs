//! Lint runner: single pre-order pass that dispatches to all enabled rules.

use tracing::trace;
use zod_v4_syntax::NodeKind;

use crate::rule::{CallExpr, LintContext, LintDiagnostic, LintRule, MemberExpr, Severity};

/// Runs all enabled lint rules over a tree in a single traversal.
pub struct LintRunner<'a> {
    rules: Vec<(&'a dyn LintRule, Severity)>,
    ctx: LintContext<'a>,
    diagnostics: Vec<LintDiagnostic>,
}

impl<'a> LintRunner<'a> {
    /// Create a new runner. Each rule is paired with the severity its
    /// diagnostics receive.
    pub fn new(rules: Vec<(&'a dyn LintRule, Severity)>, ctx: LintContext<'a>) -> Self {
        Self {
            rules,
            ctx,
            diagnostics: Vec::new(),
        }
    }

    /// Run all rules over the tree and return diagnostics ordered by
    /// source position.
    pub fn run(mut self) -> Vec<LintDiagnostic> {
        let tree = self.ctx.tree;
        for id in tree.preorder() {
            match tree.kind(id) {
                NodeKind::CallExpression {
                    callee, arguments, ..
                } => {
                    let call = CallExpr {
                        id,
                        callee: *callee,
                        arguments,
                    };
                    for &(rule, severity) in &self.rules {
                        let found = rule.check_call_expression(call, &self.ctx);
                        Self::collect(&mut self.diagnostics, found, severity);
                    }
                }
                NodeKind::MemberExpression {
                    object,
                    property,
                    computed,
                    ..
                } => {
                    let member = MemberExpr {
                        id,
                        object: *object,
                        property: *property,
                        computed: *computed,
                    };
                    for &(rule, severity) in &self.rules {
                        let found = rule.check_member_expression(member, &self.ctx);
                        Self::collect(&mut self.diagnostics, found, severity);
                    }
                }
                _ => {}
            }
        }

        // Rules may report on nodes other than the visited one.
        self.diagnostics.sort_by_key(|d| d.span.start);
        self.diagnostics
    }

    fn collect(out: &mut Vec<LintDiagnostic>, found: Vec<LintDiagnostic>, severity: Severity) {
        for mut diagnostic in found {
            trace!(rule = diagnostic.rule, start = diagnostic.span.start, "reported");
            diagnostic.severity = severity;
            out.push(diagnostic);
        }
    }
}
