//! Lint rule trait and supporting types.
//!
//! Each lint rule implements `LintRule` and provides metadata (`RuleMeta`),
//! and one or more `check_*` methods that inspect syntax nodes. Rules never
//! choose their own severity; that is assigned by [`LintConfig`](crate::LintConfig).

use serde::{Deserialize, Serialize};
use zod_v4_syntax::{NodeId, ScopeChain, ScopeTree, Span, SyntaxTree};

use crate::fix::Patch;

/// Severity level for a lint diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule is disabled.
    Off,
    /// Reports as a warning (does not affect exit code).
    Warn,
    /// Reports as an error (causes non-zero exit code).
    Error,
}

impl Severity {
    /// Parse a severity as written in configuration files.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "off" => Some(Severity::Off),
            "warn" | "warning" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

/// Category of a lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Code that no longer works, or changed meaning, under zod v4.
    Breaking,
    /// Recommended patterns that are not required by the upgrade.
    BestPractice,
}

/// Static metadata for a lint rule.
pub struct RuleMeta {
    /// Rule name, e.g. "no-merge-method".
    pub name: &'static str,
    /// Lint code, e.g. "Z1005".
    pub code: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Category.
    pub category: Category,
    /// Whether the rule can provide auto-fixes.
    pub fixable: bool,
    /// Message templates keyed by message id. Placeholders are written
    /// `{{ name }}`.
    pub messages: &'static [(&'static str, &'static str)],
}

impl RuleMeta {
    /// Render the message `id` with `data` substituted into its
    /// placeholders. Unknown ids render as the id itself.
    pub fn message(&self, id: &str, data: &[(&str, &str)]) -> String {
        let template = self
            .messages
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, template)| *template)
            .unwrap_or(id);
        interpolate(template, data)
    }
}

fn interpolate(template: &str, data: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = after[..close].trim();
        match data.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

/// Context passed to each rule during lint checking.
pub struct LintContext<'a> {
    /// The original source code.
    pub source: &'a str,
    /// Syntax tree of `source`.
    pub tree: &'a SyntaxTree,
    /// Lexical scopes of `tree`.
    pub scopes: &'a ScopeTree,
    /// Path of the file being linted.
    pub file_path: &'a str,
}

impl<'a> LintContext<'a> {
    /// Source text covered by `node`.
    pub fn text(&self, node: NodeId) -> &'a str {
        self.tree.text(node, self.source)
    }

    /// Source text from the start of `first` to the end of `last`.
    pub fn text_between(&self, first: NodeId, last: NodeId) -> &'a str {
        let start = self.tree.span(first).start;
        let end = self.tree.span(last).end;
        self.source.get(start..end).unwrap_or("")
    }

    /// Scope chain at `node`, innermost first.
    pub fn scope_chain(&self, node: NodeId) -> ScopeChain<'a> {
        self.scopes.chain(node)
    }
}

/// A call expression handed to [`LintRule::check_call_expression`].
#[derive(Debug, Clone, Copy)]
pub struct CallExpr<'t> {
    pub id: NodeId,
    pub callee: NodeId,
    pub arguments: &'t [NodeId],
}

/// A member expression handed to [`LintRule::check_member_expression`].
#[derive(Debug, Clone, Copy)]
pub struct MemberExpr {
    pub id: NodeId,
    pub object: NodeId,
    pub property: NodeId,
    pub computed: bool,
}

/// A single lint diagnostic emitted by a rule.
#[derive(Debug, Clone, Serialize)]
pub struct LintDiagnostic {
    /// Rule name (e.g. "no-merge-method").
    pub rule: &'static str,
    /// Lint code (e.g. "Z1005").
    pub code: &'static str,
    /// Message id within the rule (e.g. "deprecatedMerge").
    pub message_id: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Source location.
    pub span: Span,
    /// Reported node, absent for parse errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeId>,
    /// Severity level, assigned from configuration.
    pub severity: Severity,
    /// Optional auto-fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Patch>,
    /// Additional notes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl LintDiagnostic {
    /// Report `node` with the message `message_id` of `meta`.
    pub fn new(
        meta: &'static RuleMeta,
        message_id: &'static str,
        data: &[(&str, &str)],
        tree: &SyntaxTree,
        node: NodeId,
    ) -> Self {
        Self {
            rule: meta.name,
            code: meta.code,
            message_id,
            message: meta.message(message_id, data),
            span: tree.span(node),
            node: Some(node),
            severity: Severity::Error,
            fix: None,
            notes: vec![],
        }
    }

    pub fn with_fix(mut self, fix: Option<Patch>) -> Self {
        self.fix = fix;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Trait that every lint rule must implement.
///
/// Rules receive individual nodes and return diagnostics.
/// Default implementations return no diagnostics, so rules only
/// need to override the methods relevant to them. A node whose shape does
/// not match what a rule looks for yields an empty result.
pub trait LintRule: Send + Sync {
    /// Static metadata for this rule.
    fn meta(&self) -> &'static RuleMeta;

    /// Check a call expression.
    fn check_call_expression(
        &self,
        _call: CallExpr<'_>,
        _ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        vec![]
    }

    /// Check a member expression.
    fn check_member_expression(
        &self,
        _member: MemberExpr,
        _ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        vec![]
    }
}
