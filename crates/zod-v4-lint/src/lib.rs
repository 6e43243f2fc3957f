//! zod v4 migration linter
//!
//! Syntax-based lint rules that find zod v3 API usage and, where a
//! mechanical rewrite is safe, fix it to the v4 API.
//!
//! # Architecture
//!
//! - Each rule implements [`LintRule`] and checks call and member
//!   expressions.
//! - The [`LintRunner`](runner::LintRunner) walks the tree once and
//!   dispatches to all enabled rules (single pre-order pass).
//! - [`analysis`] holds the shared classifier, chain walker and scope
//!   resolver the rules are built from.
//! - [`Linter`] is the public entry point: create one, then call
//!   [`lint_source`](Linter::lint_source), [`lint_tree`](Linter::lint_tree)
//!   or [`fix_source`](Linter::fix_source).
//!
//! # Example
//!
//! ```ignore
//! use zod_v4_lint::Linter;
//!
//! let linter = Linter::new();
//! let result = linter.lint_source("const s = z.string().email();", "schema.ts");
//! for d in &result.diagnostics {
//!     println!("[{}] {}: {}", d.code, d.rule, d.message);
//! }
//! let fixed = linter.fix_source("const s = z.string().email();", "schema.ts");
//! assert_eq!(fixed.output, "const s = z.email();");
//! ```

#![warn(rust_2018_idioms)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod fix;
pub mod render;
pub mod rule;
pub mod rules;
mod runner;

pub use config::{LintConfig, Preset};
pub use error::{ConfigError, FixError, LintError};
pub use fix::{apply_patches, Edit, FixOutcome, Fixer, Patch};
pub use rule::{
    CallExpr, Category, LintContext, LintDiagnostic, LintRule, MemberExpr, RuleMeta, Severity,
};

use std::path::Path;

use serde::Serialize;
use tracing::debug;
use zod_v4_syntax::{ParseError, ScopeTree, SyntaxTree};

use runner::LintRunner;

/// Rule name and code given to parse failures.
pub const PARSE_ERROR_RULE: &str = "parse-error";
pub const PARSE_ERROR_CODE: &str = "Z0001";

/// Upper bound on lint-and-fix rounds in [`Linter::fix_source`].
pub const MAX_FIX_PASSES: usize = 10;

/// Result of linting a single file.
#[derive(Debug, Serialize)]
pub struct LintResult {
    /// File path that was linted.
    pub file_path: String,
    /// All diagnostics emitted for this file, ordered by position.
    pub diagnostics: Vec<LintDiagnostic>,
    /// Number of diagnostics that have an auto-fix.
    pub fixable_count: usize,
}

impl LintResult {
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warn)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Result of [`Linter::fix_source`].
#[derive(Debug)]
pub struct FixReport {
    /// Source after all applied fixes.
    pub output: String,
    /// Lint-and-fix rounds that applied at least one patch.
    pub passes: usize,
    /// Patches applied across all rounds.
    pub fixes_applied: usize,
    /// Diagnostics of the final source.
    pub remaining: Vec<LintDiagnostic>,
}

/// The zod v4 linter. Holds the rule set and configuration.
pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    config: LintConfig,
}

impl Linter {
    /// Create a linter with all rules and the default preset.
    pub fn new() -> Self {
        Self {
            rules: rules::all_rules(),
            config: LintConfig::new(),
        }
    }

    /// Create a linter with configuration overrides.
    pub fn with_config(config: LintConfig) -> Self {
        Self {
            rules: rules::all_rules(),
            config,
        }
    }

    /// Create a linter configured from a TOML file.
    pub fn from_config_file(path: &Path) -> Result<Self, LintError> {
        Ok(Self::with_config(LintConfig::from_file(path)?))
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Lint an already parsed tree of `source`.
    pub fn lint_tree(&self, tree: &SyntaxTree, source: &str, file_path: &str) -> LintResult {
        let scopes = ScopeTree::build(tree);

        let active_rules: Vec<(&dyn LintRule, Severity)> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let severity = self.config.effective_severity(rule.meta());
                if severity == Severity::Off {
                    debug!(rule = rule.meta().name, "rule disabled by configuration");
                    return None;
                }
                Some((rule.as_ref(), severity))
            })
            .collect();

        let ctx = LintContext {
            source,
            tree,
            scopes: &scopes,
            file_path,
        };

        let diagnostics = LintRunner::new(active_rules, ctx).run();
        let fixable_count = diagnostics.iter().filter(|d| d.fix.is_some()).count();

        debug!(
            file = file_path,
            diagnostics = diagnostics.len(),
            fixable = fixable_count,
            "linted"
        );

        LintResult {
            file_path: file_path.to_string(),
            diagnostics,
            fixable_count,
        }
    }

    /// Parse source code and lint it.
    ///
    /// Parse errors are converted to lint diagnostics so the caller gets a
    /// uniform result.
    pub fn lint_source(&self, source: &str, file_path: &str) -> LintResult {
        match zod_v4_syntax::parse(source) {
            Ok(tree) => self.lint_tree(&tree, source, file_path),
            Err(parse_errors) => {
                debug!(file = file_path, errors = parse_errors.len(), "parse failed");
                let diagnostics: Vec<LintDiagnostic> =
                    parse_errors.iter().map(parse_error_diagnostic).collect();
                LintResult {
                    file_path: file_path.to_string(),
                    diagnostics,
                    fixable_count: 0,
                }
            }
        }
    }

    /// Read a file and lint it.
    pub fn lint_file(&self, path: &Path) -> Result<LintResult, LintError> {
        let source = std::fs::read_to_string(path).map_err(|source| LintError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.lint_source(&source, &path.display().to_string()))
    }

    /// Lint and apply fixes repeatedly until no patch applies or
    /// [`MAX_FIX_PASSES`] rounds have run.
    pub fn fix_source(&self, source: &str, file_path: &str) -> FixReport {
        let mut current = source.to_string();
        let mut passes = 0;
        let mut fixes_applied = 0;

        loop {
            let result = self.lint_source(&current, file_path);
            if result.fixable_count == 0 || passes == MAX_FIX_PASSES {
                return FixReport {
                    output: current,
                    passes,
                    fixes_applied,
                    remaining: result.diagnostics,
                };
            }

            let outcome = apply_patches(
                &current,
                result.diagnostics.iter().filter_map(|d| d.fix.as_ref()),
            );
            if outcome.applied == 0 {
                return FixReport {
                    output: current,
                    passes,
                    fixes_applied,
                    remaining: result.diagnostics,
                };
            }

            debug!(
                file = file_path,
                pass = passes + 1,
                applied = outcome.applied,
                skipped = outcome.skipped,
                "fixes applied"
            );
            passes += 1;
            fixes_applied += outcome.applied;
            current = outcome.output;
        }
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_error_diagnostic(error: &ParseError) -> LintDiagnostic {
    let mut diagnostic = LintDiagnostic {
        rule: PARSE_ERROR_RULE,
        code: PARSE_ERROR_CODE,
        message_id: "parseError",
        message: format!("Parse error: {}", error.message),
        span: error.span,
        node: None,
        severity: Severity::Error,
        fix: None,
        notes: vec![],
    };
    if let Some(suggestion) = &error.suggestion {
        diagnostic = diagnostic.with_note(suggestion.clone());
    }
    diagnostic
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linter_empty_source() {
        let linter = Linter::new();
        let result = linter.lint_source("", "empty.ts");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_linter_parse_error() {
        let linter = Linter::new();
        let result = linter.lint_source("function {{{", "bad.ts");
        assert!(!result.diagnostics.is_empty());
        assert_eq!(result.diagnostics[0].code, "Z0001");
        assert_eq!(result.diagnostics[0].rule, "parse-error");
        assert_eq!(result.fixable_count, 0);
    }

    #[test]
    fn test_linter_too_deep_source_is_one_parse_error() {
        let linter = Linter::new();
        let nested = format!(
            "x = {}z.string(){};",
            "z.object({a: ".repeat(60),
            "})".repeat(60)
        );
        for source in [nested, format!("x = {}1", "!".repeat(50_000))] {
            let result = linter.lint_source(&source, "deep.ts");
            assert_eq!(result.diagnostics.len(), 1, "got: {:?}", result.diagnostics);
            assert_eq!(result.diagnostics[0].code, "Z0001");
        }
    }

    #[test]
    fn test_linter_clean_source() {
        let linter = Linter::new();
        let result = linter.lint_source(
            "import { z } from 'zod';\nexport const user = z.object({ name: z.string() });",
            "clean.ts",
        );
        assert!(result.diagnostics.is_empty(), "got: {:?}", result.diagnostics);
    }

    #[test]
    fn test_linter_with_config_disables_rule() {
        let mut config = LintConfig::new();
        config.set_severity("no-merge-method", Severity::Off);

        let linter = Linter::with_config(config);
        let result = linter.lint_source("a.merge(bSchema); userSchema.merge(b);", "test.ts");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_linter_counts_by_severity() {
        let linter = Linter::new();
        let result = linter.lint_source("userSchema.merge(b);\nuserSchema.parse(x);", "test.ts");
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.fixable_count, 1);
    }

    #[test]
    fn test_fix_source_reaches_fixed_point() {
        let linter = Linter::new();
        let report = linter.fix_source(
            "const a = z.string().email();\nconst b = z.string({ required_error: 'x' });",
            "test.ts",
        );
        assert_eq!(
            report.output,
            "const a = z.email();\nconst b = z.string({ error: 'x' });"
        );
        assert_eq!(report.fixes_applied, 2);
        assert!(report.remaining.is_empty());
    }

    #[test]
    fn test_fix_source_without_fixes_is_identity() {
        let linter = Linter::new();
        let source = "z.record(z.string());";
        let report = linter.fix_source(source, "test.ts");
        assert_eq!(report.output, source);
        assert_eq!(report.passes, 0);
        assert_eq!(report.remaining.len(), 1);
    }

    #[test]
    fn test_lint_file_missing() {
        let linter = Linter::new();
        let err = linter
            .lint_file(Path::new("/definitely/not/here.ts"))
            .unwrap_err();
        assert!(matches!(err, LintError::Read { .. }));
    }
}
