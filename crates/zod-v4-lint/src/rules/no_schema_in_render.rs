//! Rule: no-schema-in-render (Z2002)
//!
//! Flags schema construction inside functions, where it reruns on every
//! call or render. Callbacks memoized with `useMemo`/`useCallback` are
//! exempt, and so are expression-bodied factories such as
//! `const createSchema = (t) => z.object(..)` unless they are themselves
//! declared inside a function.

use crate::analysis::{callee_member, enclosing_function, is_entry_identifier, is_memoized_callback};
use crate::rule::*;
use zod_v4_syntax::{NodeId, NodeKind, SyntaxTree};

/// `z.*` factories that build a new schema.
const SCHEMA_FACTORIES: &[&str] = &[
    "object",
    "string",
    "number",
    "boolean",
    "array",
    "tuple",
    "union",
    "discriminatedUnion",
    "intersection",
    "record",
    "map",
    "set",
    "function",
    "lazy",
    "literal",
    "enum",
    "nativeEnum",
    "promise",
    "any",
    "unknown",
    "never",
    "void",
    "null",
    "undefined",
    "bigint",
    "date",
    "symbol",
    "nan",
    "instanceof",
    "custom",
    "preprocess",
    "coerce",
    "email",
    "url",
    "uuid",
    "cuid",
    "cuid2",
    "ulid",
    "ip",
    "ipv4",
    "ipv6",
    "datetime",
    "base64",
];

pub struct NoSchemaInRender;

static META: RuleMeta = RuleMeta {
    name: "no-schema-in-render",
    code: "Z2002",
    description: "Disallow creating schemas inside functions and components",
    category: Category::BestPractice,
    fixable: false,
    messages: &[(
        "schemaInRender",
        "Avoid creating Zod schemas inside functions or React components. Schemas are recreated on every render/call, causing performance issues. Move the schema to module scope or use useMemo.",
    )],
};

impl LintRule for NoSchemaInRender {
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
        let creates_schema = is_entry_identifier(tree, object)
            && tree
                .identifier_name(property)
                .is_some_and(|name| SCHEMA_FACTORIES.contains(&name));
        if !creates_schema {
            return vec![];
        }

        if !rebuilt_per_call(tree, call.id) {
            return vec![];
        }
        vec![LintDiagnostic::new(&META, "schemaInRender", &[], tree, call.id)]
    }
}

/// Whether `call` reruns with the body of some function that is neither
/// memoized nor a schema factory.
fn rebuilt_per_call(tree: &SyntaxTree, call: NodeId) -> bool {
    let mut inner = call;
    while let Some(function) = enclosing_function(tree, inner) {
        if is_memoized_callback(tree, function) {
            return false;
        }
        if !is_factory_body(tree, function, inner) {
            return true;
        }
        inner = function;
    }
    false
}

/// `function` is an arrow whose expression body is `node` or contains it.
fn is_factory_body(tree: &SyntaxTree, function: NodeId, node: NodeId) -> bool {
    let NodeKind::ArrowFunctionExpression(arrow) = tree.kind(function) else {
        return false;
    };
    let Some(body) = arrow.body else {
        return false;
    };
    if matches!(tree.kind(body), NodeKind::BlockStatement { .. }) {
        return false;
    }
    body == node || tree.ancestors(node).any(|id| id == body)
}

#[cfg(test)]
mod tests {
    use crate::rule::LintDiagnostic;
    use crate::Linter;

    fn lint(source: &str) -> Vec<LintDiagnostic> {
        let linter = Linter::new();
        linter.lint_source(source, "test.ts").diagnostics
    }

    fn count(source: &str) -> usize {
        lint(source).iter().filter(|d| d.code == "Z2002").count()
    }

    #[test]
    fn test_schema_in_component_flagged() {
        let source = "function Form() {\n  const schema = z.object({ name: z.string() });\n  return schema;\n}";
        assert_eq!(count(source), 2);
    }

    #[test]
    fn test_schema_in_block_arrow_flagged() {
        let source = "const validate = (data) => {\n  const schema = z.string();\n  return schema.safeParse(data);\n};";
        assert_eq!(count(source), 1);
    }

    #[test]
    fn test_module_level_factory_ok() {
        assert_eq!(count("const make = () => z.string();"), 0);
        assert_eq!(
            count("const createSchema = (t) => z.object({ email: z.email(t('error')) })"),
            0
        );
        assert_eq!(count("const curried = (a) => (b) => z.string().min(a).max(b);"), 0);
    }

    #[test]
    fn test_factory_used_from_memo_ok() {
        let source = "const createSchema = (t) => z.object({ email: z.email(t('error')) })\nconst Form = ({ t }) => {\n  const schema = useMemo(() => createSchema(t), [t])\n  return null\n}";
        assert_eq!(count(source), 0);
    }

    #[test]
    fn test_factory_inside_component_flagged() {
        let source = "function Form() {\n  const make = () => z.string();\n  return make;\n}";
        assert_eq!(count(source), 1);
    }

    #[test]
    fn test_default_parameter_flagged() {
        assert_eq!(count("const f = (s = z.string()) => s;"), 1);
    }

    #[test]
    fn test_function_returned_from_memo_flagged() {
        let source = "const C = () => {\n  const m = useMemo(() => {\n    return function inner() { return z.string() }\n  }, [])\n  return null\n}";
        assert_eq!(count(source), 1);
    }

    #[test]
    fn test_module_scope_ok() {
        assert_eq!(count("const schema = z.object({ name: z.string() });"), 0);
    }

    #[test]
    fn test_memoized_ok() {
        let source = "function Form() {\n  const schema = useMemo(() => z.string(), []);\n  const other = React.useMemo(() => z.number(), []);\n}";
        assert_eq!(count(source), 0);
    }

    #[test]
    fn test_non_factory_method_ok() {
        assert_eq!(count("function f() { return z.infer; }"), 0);
        assert_eq!(count("function f(s) { return z.treeifyError(s); }"), 0);
    }
}
