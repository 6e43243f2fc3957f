//! Integration tests for the migration rule set
//!
//! Runs whole sources through the public `Linter` API: reporting, fixing,
//! configuration and rendering.

use std::io::Write;

use zod_v4_lint::{render, LintConfig, LintDiagnostic, Linter, Preset, Severity};

fn lint(source: &str) -> Vec<LintDiagnostic> {
    Linter::new().lint_source(source, "schema.ts").diagnostics
}

fn with_rule<'d>(diags: &'d [LintDiagnostic], rule: &str) -> Vec<&'d LintDiagnostic> {
    diags.iter().filter(|d| d.rule == rule).collect()
}

#[test]
fn test_superrefine_callback_rewrite() {
    let source =
        "z.string().superRefine((val, ctx) => { if (!val) ctx.addIssue({ code: 'custom' }) })";
    let diags = lint(source);
    let found = with_rule(&diags, "no-superrefine");
    assert_eq!(found.len(), 1, "got: {:?}", diags);

    let report = Linter::new().fix_source(source, "schema.ts");
    assert_eq!(
        report.output,
        "z.string().check((ctx) => { const { value: val } = ctx; if (!val) ctx.addIssue({ code: 'custom' }) })"
    );
}

#[test]
fn test_superrefine_reference_callback_has_no_fix() {
    let diags = lint("schema.superRefine(customValidator)");
    let found = with_rule(&diags, "no-superrefine");
    assert_eq!(found.len(), 1);
    assert!(found[0].fix.is_none());
}

#[test]
fn test_rewritten_callback_keeps_body_verbatim() {
    let body = " if (d.a > d.b) c.addIssue({ code: 'custom', path: ['a'] }); return d; ";
    let source = format!("schema.superRefine((d, c) => {{{body}}})");
    let report = Linter::new().fix_source(&source, "schema.ts");
    assert_eq!(
        report.output,
        format!("schema.check((c) => {{ const {{ value: d }} = c;{body}}})")
    );
    assert!(with_rule(&report.remaining, "no-superrefine").is_empty());
}

#[test]
fn test_canonical_check_callback_is_stable() {
    let source = "schema.check((ctx) => { ctx.addIssue(issue) })";
    let report = Linter::new().fix_source(source, "schema.ts");
    assert_eq!(report.output, source);
    assert_eq!(report.passes, 0);
}

#[test]
fn test_record_single_arg_reported_without_fix() {
    let diags = lint("z.record(z.string())");
    let found = with_rule(&diags, "no-record-single-arg");
    assert_eq!(found.len(), 1);
    assert!(found[0].fix.is_none());
}

#[test]
fn test_enum_array_without_const() {
    let diags = lint("const roles = ['admin', 'user']; z.enum(roles)");
    assert_eq!(with_rule(&diags, "require-enum-as-const").len(), 1);
}

#[test]
fn test_throw_scanner_respects_try() {
    let caught = lint("schema.refine((v) => { try { throw new Error('x') } catch {} return true })");
    assert!(with_rule(&caught, "no-throw-in-refine").is_empty());

    let rethrown = lint("schema.refine((v) => { try {} catch { throw new Error('x') } })");
    assert_eq!(with_rule(&rethrown, "no-throw-in-refine").len(), 1);
}

#[test]
fn test_diagnostics_ordered_by_position() {
    let source = "\
const a = z.string().email();
const b = z.record(z.number());
const c = userSchema.merge(other);
const d = z.nativeEnum(Role);
";
    let diags = lint(source);
    let rules: Vec<_> = diags.iter().map(|d| d.rule).collect();
    assert_eq!(
        rules,
        [
            "no-deprecated-string-format",
            "no-record-single-arg",
            "no-merge-method",
            "no-native-enum",
        ]
    );
    assert!(diags.windows(2).all(|w| w[0].span.start <= w[1].span.start));
}

#[test]
fn test_fix_source_migrates_whole_file() {
    let source = "\
const User = z.object({
  email: z.string().min(3).email({ message: 'bad email' }),
  name: z.string({ required_error: 'required' }),
});
const result = User.safeParse(input);
if (!result.success) report(result.error.errors);
";
    let report = Linter::new().fix_source(source, "schema.ts");
    assert_eq!(
        report.output,
        "\
const User = z.object({
  email: z.string().min(3).email({ error: 'bad email' }),
  name: z.string({ error: 'required' }),
});
const result = User.safeParse(input);
if (!result.success) report(result.error.issues);
"
    );
    // `.min(3)` precedes the format method, so it stays for manual migration.
    let remaining: Vec<_> = report.remaining.iter().map(|d| d.rule).collect();
    assert!(remaining.contains(&"no-deprecated-string-format"), "{:?}", remaining);
}

#[test]
fn test_recommended_preset_skips_best_practices() {
    let linter = Linter::with_config(LintConfig::with_preset(Preset::Recommended));
    let diags = linter
        .lint_source("userSchema.parse(x);\nuserSchema.merge(y);", "schema.ts")
        .diagnostics;
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, "no-merge-method");
}

#[test]
fn test_all_preset_promotes_best_practices() {
    let linter = Linter::with_config(LintConfig::with_preset(Preset::All));
    let diags = linter.lint_source("userSchema.parse(x);", "schema.ts").diagnostics;
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Error);
}

#[test]
fn test_config_file_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[lint]\npreset = \"strict\"\n\n[lint.rules]\n\"zod-v4/no-merge-method\" = \"warn\"\n\"prefer-safeParse\" = \"off\""
    )
    .unwrap();

    let linter = Linter::from_config_file(file.path()).unwrap();
    let diags = linter
        .lint_source("userSchema.parse(x);\nuserSchema.merge(y);", "schema.ts")
        .diagnostics;
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, "no-merge-method");
    assert_eq!(diags[0].severity, Severity::Warn);
}

#[test]
fn test_config_file_unknown_rule() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[lint.rules]\n\"no-such-rule\" = \"error\"").unwrap();
    assert!(Linter::from_config_file(file.path()).is_err());
}

#[test]
fn test_lint_file_and_render() {
    let mut file = tempfile::Builder::new().suffix(".ts").tempfile().unwrap();
    let source = "export const Color = z.nativeEnum(Colors);\n";
    file.write_all(source.as_bytes()).unwrap();

    let result = Linter::new().lint_file(file.path()).unwrap();
    assert_eq!(result.error_count(), 1);

    let pretty = render::to_pretty(&result, source).unwrap();
    assert!(pretty.contains("error[Z1009]"), "{}", pretty);
    assert!(pretty.contains("no-native-enum"), "{}", pretty);

    let json = render::to_json(std::slice::from_ref(&result)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["diagnostics"][0]["message_id"], "deprecatedNativeEnum");
    assert_eq!(
        render::summary(std::slice::from_ref(&result)),
        "Linted 1 file: 1 error."
    );
}
