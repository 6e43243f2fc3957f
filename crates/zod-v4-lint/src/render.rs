//! Diagnostic output: codespan-reporting for terminals, serde_json for
//! tooling.

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use termcolor::{NoColor, WriteColor};

use crate::fix::Patch;
use crate::rule::{LintDiagnostic, Severity};
use crate::LintResult;

/// Render results as a pretty-printed JSON array.
pub fn to_json(results: &[LintResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}

/// Write `result` to `writer` with source snippets.
pub fn emit(
    writer: &mut dyn WriteColor,
    result: &LintResult,
    source: &str,
) -> Result<(), codespan_reporting::files::Error> {
    let mut files = SimpleFiles::new();
    let file_id = files.add(result.file_path.as_str(), source);
    let config = term::Config::default();

    for lint_diag in &result.diagnostics {
        if let Some(diag) = to_codespan(lint_diag, file_id) {
            term::emit(writer, &config, &files, &diag)?;
        }
    }
    Ok(())
}

/// Render `result` as uncolored text.
pub fn to_pretty(result: &LintResult, source: &str) -> Result<String, codespan_reporting::files::Error> {
    let mut writer = NoColor::new(Vec::new());
    emit(&mut writer, result, source)?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

/// One-line summary, e.g. `Linted 2 files: 1 error, 3 warnings.`
pub fn summary(results: &[LintResult]) -> String {
    let files = results.len();
    let errors: usize = results.iter().map(LintResult::error_count).sum();
    let warnings: usize = results.iter().map(LintResult::warning_count).sum();
    let head = format!("Linted {} file{}", files, plural(files));
    if errors == 0 && warnings == 0 {
        return format!("{head}: no issues found.");
    }
    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!("{} error{}", errors, plural(errors)));
    }
    if warnings > 0 {
        parts.push(format!("{} warning{}", warnings, plural(warnings)));
    }
    format!("{head}: {}.", parts.join(", "))
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn to_codespan(lint_diag: &LintDiagnostic, file_id: usize) -> Option<Diagnostic<usize>> {
    let diag = match lint_diag.severity {
        Severity::Error => Diagnostic::error(),
        Severity::Warn => Diagnostic::warning(),
        Severity::Off => return None,
    };

    let mut notes = lint_diag.notes.clone();
    if let Some(fix) = &lint_diag.fix {
        notes.push(format!("help: {}", fix_help(fix)));
    }

    Some(
        diag.with_message(&lint_diag.message)
            .with_code(lint_diag.code)
            .with_labels(vec![
                Label::primary(file_id, lint_diag.span.range()).with_message(lint_diag.rule)
            ])
            .with_notes(notes),
    )
}

fn fix_help(fix: &Patch) -> String {
    match fix.edits() {
        [single] if single.start == single.end => {
            format!("insert '{}'", single.replacement)
        }
        [single] => format!("replace with '{}'", single.replacement),
        edits => format!("auto-fix available ({} edits)", edits.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Linter;

    fn lint(source: &str) -> LintResult {
        Linter::new().lint_source(source, "schema.ts")
    }

    #[test]
    fn test_pretty_output() {
        let source = "const s = z.string().email();\n";
        let text = to_pretty(&lint(source), source).unwrap();
        assert!(text.contains("error[Z1001]"), "got:\n{}", text);
        assert!(text.contains("schema.ts:1:11"), "got:\n{}", text);
        assert!(text.contains("no-deprecated-string-format"), "got:\n{}", text);
        assert!(text.contains("help: replace with 'z.email()'"), "got:\n{}", text);
    }

    #[test]
    fn test_pretty_output_for_warning() {
        let source = "userSchema.parse(input);\n";
        let text = to_pretty(&lint(source), source).unwrap();
        assert!(text.contains("warning[Z2001]"), "got:\n{}", text);
    }

    #[test]
    fn test_json_output() {
        let source = "const s = z.string().email();";
        let json = to_json(&[lint(source)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let diag = &value[0]["diagnostics"][0];
        assert_eq!(value[0]["file_path"], "schema.ts");
        assert_eq!(diag["code"], "Z1001");
        assert_eq!(diag["severity"], "error");
        assert_eq!(diag["message_id"], "deprecatedStringFormat");
        assert_eq!(diag["span"]["line"], 1);
        assert_eq!(diag["fix"]["edits"][0]["replacement"], "z.email()");
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(&[lint("z.string();")]), "Linted 1 file: no issues found.");
        let results = [lint("userSchema.merge(o);"), lint("userSchema.parse(i);")];
        assert_eq!(summary(&results), "Linted 2 files: 1 error, 1 warning.");
    }
}
