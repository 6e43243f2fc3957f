//! Parser tests over realistic schema code, plus robustness checks for
//! malformed and pathological input.

use zod_v4_syntax::{parse, NodeKind, ParseErrorKind, SyntaxTree};

fn parse_ok(source: &str) -> SyntaxTree {
    parse(source).unwrap_or_else(|errors| panic!("parse failed: {:?}", errors))
}

fn count(tree: &SyntaxTree, pred: impl Fn(&NodeKind) -> bool) -> usize {
    tree.preorder().filter(|&id| pred(tree.kind(id))).count()
}

// ============================================================================
// Schema Modules
// ============================================================================

#[test]
fn test_schema_module() {
    let source = r#"
import { z } from "zod";
import type { NextApiRequest } from "next";

export const UserSchema = z.object({
  id: z.string().uuid(),
  email: z.string().email({ message: "Invalid email" }),
  age: z.number({ invalid_type_error: "Age must be a number" }).int().positive().optional(),
  role: z.enum(["admin", "user"] as const),
  tags: z.array(z.string()).default([]),
});

export type User = z.infer<typeof UserSchema>;

export async function handler(req: NextApiRequest): Promise<User | null> {
  try {
    return UserSchema.parse(req.body);
  } catch (error) {
    if (error instanceof z.ZodError) {
      console.error(error.errors);
    }
    return null;
  }
}
"#;
    let tree = parse_ok(source);
    assert_eq!(
        count(&tree, |k| matches!(k, NodeKind::ImportDeclaration { .. })),
        2
    );
    assert!(count(&tree, |k| matches!(k, NodeKind::CallExpression { .. })) >= 15);
    assert_eq!(count(&tree, |k| matches!(k, NodeKind::TryStatement { .. })), 1);
}

#[test]
fn test_refinement_callbacks() {
    let source = r#"
const Password = z
  .string()
  .min(8)
  .superRefine((val, ctx) => {
    if (!/[A-Z]/.test(val)) {
      ctx.addIssue({ code: z.ZodIssueCode.custom, message: "Needs uppercase" });
    }
  })
  .refine(async function (value) { return await check(value) }, { message: "taken" });
"#;
    let tree = parse_ok(source);
    assert_eq!(
        count(&tree, |k| matches!(k, NodeKind::ArrowFunctionExpression(_))),
        1
    );
    assert_eq!(
        count(&tree, |k| matches!(k, NodeKind::FunctionExpression(f) if f.is_async)),
        1
    );
    assert_eq!(
        count(&tree, |k| matches!(
            k,
            NodeKind::Literal(zod_v4_syntax::LiteralValue::RegExp(_))
        )),
        1
    );
}

#[test]
fn test_react_component_with_generics() {
    let source = r#"
export function Form<T extends object>({ initial }: { initial: T }) {
  const schema = useMemo(() => z.object({ name: z.string() }), []);
  const [state, setState] = useState<T>(initial);
  const onSubmit = useCallback(async (values: T) => {
    const result = schema.safeParse(values);
    if (!result.success) setState(initial!);
  }, [schema]);
  return render(`${state}`);
}
"#;
    let tree = parse_ok(source);
    assert_eq!(
        count(&tree, |k| matches!(k, NodeKind::TsNonNullExpression { .. })),
        1
    );
    assert_eq!(
        count(&tree, |k| matches!(k, NodeKind::ArrayPattern { .. })),
        1
    );
}

#[test]
fn test_spans_cover_source_text() {
    let source = "const s = z.string().email();";
    let tree = parse_ok(source);
    let outer_call = tree
        .preorder()
        .find(|&id| matches!(tree.kind(id), NodeKind::CallExpression { .. }))
        .unwrap();
    assert_eq!(tree.text(outer_call, source), "z.string().email()");
    let span = tree.span(outer_call);
    assert_eq!((span.line, span.column), (1, 11));
}

#[test]
fn test_parents_are_linked() {
    let tree = parse_ok("f(a.b)");
    for id in tree.preorder() {
        for child in tree.children(id) {
            assert_eq!(tree.parent(child), Some(id));
        }
    }
    assert_eq!(tree.parent(tree.root()), None);
}

// ============================================================================
// Errors and Robustness
// ============================================================================

#[test]
fn test_jsx_is_rejected() {
    let errors = parse("const el = <div />;").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e.kind, ParseErrorKind::Unsupported { .. })));
}

#[test]
fn test_unterminated_string_is_a_lex_error() {
    let errors = parse("const s = 'oops").unwrap_err();
    assert!(matches!(errors[0].kind, ParseErrorKind::Lex(_)));
}

#[test]
fn test_multiple_errors_are_collected() {
    let errors = parse("const = 1;\nlet ok = 2;\nfunction ( {}\n").unwrap_err();
    assert!(errors.len() >= 2, "expected several errors, got {:?}", errors);
}

#[test]
fn test_moderate_nesting_parses() {
    let depth = 40;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    parse_ok(&source);
}

#[test]
fn test_deep_nesting_hits_limit() {
    let depth = 500;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let errors = parse(&source).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e.kind, ParseErrorKind::ParserLimitExceeded { .. })));
}

fn assert_depth_limited(source: &str) {
    let errors = parse(source).unwrap_err();
    assert_eq!(errors.len(), 1, "got: {:?}", errors);
    assert!(matches!(
        errors[0].kind,
        ParseErrorKind::ParserLimitExceeded { .. }
    ));
}

#[test]
fn test_prefix_operator_runs_hit_limit() {
    assert_depth_limited(&format!("x = {}1", "!".repeat(50_000)));
    assert_depth_limited(&format!("x = {}1", "-".repeat(50_000)));
    assert_depth_limited(&format!("x = {}y", "typeof ".repeat(50_000)));
    assert_depth_limited(&format!("x = {}y", "new ".repeat(50_000)));
}

#[test]
fn test_await_run_hits_limit() {
    let source = format!("async function f() {{ x = {}1 }}", "await ".repeat(50_000));
    assert_depth_limited(&source);
}

#[test]
fn test_exponent_chain_hits_limit() {
    let source = format!("x = 2{}", " ** 2".repeat(50_000));
    assert_depth_limited(&source);
}

#[test]
fn test_nested_destructuring_hits_limit() {
    let depth = 50_000;
    let source = format!("const {}a{} = x;", "[".repeat(depth), "]".repeat(depth));
    assert_depth_limited(&source);

    let source = format!("const {}b{} = x;", "{ a: ".repeat(depth), " }".repeat(depth));
    assert_depth_limited(&source);
}

#[test]
fn test_nested_schema_objects() {
    let nest = |depth: usize| {
        format!(
            "x = {}z.string(){};",
            "z.object({a: ".repeat(depth),
            "})".repeat(depth)
        )
    };
    // Each level is an argument plus a property value.
    parse_ok(&nest(40));
    assert_depth_limited(&nest(60));
    assert_depth_limited(&nest(5_000));
}

#[test]
fn test_deeply_nested_template_lexes() {
    let depth = 20_000;
    let source = format!("x = {}y{};", "`${".repeat(depth), "}`".repeat(depth));
    parse_ok(&source);
}

#[test]
fn test_long_call_chain() {
    let mut source = String::from("z.string()");
    for _ in 0..200 {
        source.push_str(".min(1)");
    }
    let tree = parse_ok(&source);
    assert_eq!(
        count(&tree, |k| matches!(k, NodeKind::CallExpression { .. })),
        201
    );
}
