//! Rule: no-native-enum (Z1009)

use crate::analysis::{callee_member, is_entry_identifier};
use crate::rule::*;

pub struct NoNativeEnum;

static META: RuleMeta = RuleMeta {
    name: "no-native-enum",
    code: "Z1009",
    description: "Disallow z.nativeEnum() in favor of z.enum()",
    category: Category::Breaking,
    fixable: false,
    messages: &[(
        "deprecatedNativeEnum",
        "z.nativeEnum() is deprecated in Zod v4. Use z.enum() instead, which now supports native TypeScript enums directly.",
    )],
};

impl LintRule for NoNativeEnum {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call_expression(
        &self,
        call: CallExpr<'_>,
        ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        let tree = ctx.tree;
        match callee_member(tree, call.id) {
            Some((object, property))
                if is_entry_identifier(tree, object)
                    && tree.identifier_name(property) == Some("nativeEnum") =>
            {
                vec![LintDiagnostic::new(&META, "deprecatedNativeEnum", &[], tree, call.id)]
            }
            _ => vec![],
        }
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
    fn test_native_enum_flagged() {
        let diags = lint("enum Role { Admin, User }\nconst role = z.nativeEnum(Role);");
        assert!(has_rule(&diags, "Z1009"), "got: {:?}", diags);
    }

    #[test]
    fn test_enum_ok() {
        assert!(!has_rule(&lint("z.enum(Role)"), "Z1009"));
        assert!(!has_rule(&lint("other.nativeEnum(Role)"), "Z1009"));
    }
}
