//! Rule: require-enum-as-const (Z1014)
//!
//! An array variable passed to `z.enum()` needs `as const`, otherwise it is
//! typed `string[]` and the enum loses its literal members. Inline array
//! literals infer correctly and are accepted. Names that do not resolve to a
//! local variable (imports, parameters, TypeScript enums) are not reported.

use crate::analysis::{callee_member, is_entry_identifier, resolve_variable_declarator};
use crate::rule::*;
use zod_v4_syntax::{NodeId, NodeKind, SyntaxTree};

pub struct RequireEnumAsConst;

static META: RuleMeta = RuleMeta {
    name: "require-enum-as-const",
    code: "Z1014",
    description: "Require arrays passed to z.enum() to have 'as const'",
    category: Category::Breaking,
    fixable: false,
    messages: &[(
        "enumRequiresConst",
        "Array passed to z.enum() should have 'as const' for proper type inference.",
    )],
};

fn is_as_const(tree: &SyntaxTree, node: NodeId) -> bool {
    match tree.kind(node) {
        NodeKind::TsAsExpression {
            type_annotation, ..
        } => matches!(
            tree.kind(*type_annotation),
            NodeKind::TsType { name: Some(name) } if name == "const"
        ),
        _ => false,
    }
}

fn needs_const_assertion(ctx: &LintContext<'_>, arg: NodeId) -> bool {
    let tree = ctx.tree;
    match tree.kind(arg) {
        NodeKind::ArrayExpression { .. } => false,
        NodeKind::TsAsExpression { .. } => !is_as_const(tree, arg),
        NodeKind::Identifier { name } => {
            let Some(declarator) = resolve_variable_declarator(tree, &ctx.scope_chain(arg), name) else {
                return false;
            };
            let NodeKind::VariableDeclarator {
                type_annotation,
                init,
                ..
            } = tree.kind(declarator)
            else {
                return false;
            };
            if type_annotation.is_some() {
                return true;
            }
            !init.is_some_and(|init| is_as_const(tree, init))
        }
        _ => false,
    }
}

impl LintRule for RequireEnumAsConst {
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
        if !is_entry_identifier(tree, object) || tree.identifier_name(property) != Some("enum") {
            return vec![];
        }
        let Some(&arg) = call.arguments.first() else {
            return vec![];
        };
        if !needs_const_assertion(ctx, arg) {
            return vec![];
        }
        vec![LintDiagnostic::new(&META, "enumRequiresConst", &[], tree, arg)
            .with_note("declare the array as `['admin', 'user'] as const`, or pass it inline")]
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
        lint(source).into_iter().filter(|d| d.code == "Z1014").collect()
    }

    #[test]
    fn test_array_variable_without_const_flagged() {
        let source = "const roles = ['admin', 'user'];\nconst Role = z.enum(roles);";
        let diags = own(source);
        assert_eq!(diags.len(), 1, "got: {:?}", diags);
        assert_eq!(&source[diags[0].span.range()], "roles");
    }

    #[test]
    fn test_as_const_variable_ok() {
        assert!(own("const roles = ['admin', 'user'] as const;\nz.enum(roles);").is_empty());
    }

    #[test]
    fn test_inline_array_ok() {
        assert!(own("z.enum(['admin', 'user'])").is_empty());
        assert!(own("z.enum(['admin', 'user'] as const)").is_empty());
    }

    #[test]
    fn test_type_annotation_flagged() {
        assert_eq!(own("const roles: string[] = ['admin'];\nz.enum(roles);").len(), 1);
    }

    #[test]
    fn test_other_assertions_flagged() {
        assert_eq!(own("z.enum(list as string[])").len(), 1);
        assert_eq!(own("const roles = load() as Roles;\nz.enum(roles);").len(), 1);
    }

    #[test]
    fn test_non_array_initializer_flagged() {
        assert_eq!(own("let roles;\nz.enum(roles);").len(), 1);
        assert_eq!(own("const roles = getRoles();\nz.enum(roles);").len(), 1);
    }

    #[test]
    fn test_unresolved_names_ok() {
        assert!(own("import { roles } from './roles';\nz.enum(roles);").is_empty());
        assert!(own("z.enum(roles)").is_empty());
        assert!(own("function f(roles) { return z.enum(roles); }").is_empty());
        assert!(own("enum Role { Admin, User }\nz.enum(Role);").is_empty());
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let source = "const roles = ['a'] as const;\nfunction f() {\n  const roles = ['b'];\n  return z.enum(roles);\n}";
        assert_eq!(own(source).len(), 1);
    }

    #[test]
    fn test_other_arguments_ok() {
        assert!(own("z.enum(getRoles())").is_empty());
        assert!(own("z.enum(config.roles)").is_empty());
    }
}
