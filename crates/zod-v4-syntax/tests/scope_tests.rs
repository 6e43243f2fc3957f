//! Scope analysis over parsed files.

use zod_v4_syntax::{parse, BindingKind, NodeId, NodeKind, ScopeKind, ScopeTree, SyntaxTree};

fn nth_identifier(tree: &SyntaxTree, name: &str, nth: usize) -> NodeId {
    tree.preorder()
        .filter(|&id| tree.identifier_name(id) == Some(name))
        .nth(nth)
        .unwrap_or_else(|| panic!("identifier {} #{} not found", name, nth))
}

#[test]
fn test_chain_ends_at_module() {
    let tree = parse("function outer() { return () => { { inner(); } }; }").unwrap();
    let scopes = ScopeTree::build(&tree);
    let chain = scopes.chain(nth_identifier(&tree, "inner", 0));
    let kinds: Vec<ScopeKind> = chain.frames().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ScopeKind::Block,
            ScopeKind::Function,
            ScopeKind::Function,
            ScopeKind::Module
        ]
    );
}

#[test]
fn test_function_declarations_and_classes() {
    let tree = parse("function helper() {}\nclass Repo {}\nenum Kind { A }").unwrap();
    let scopes = ScopeTree::build(&tree);
    let module = scopes.module_scope();
    assert_eq!(module.get("helper").map(|b| b.kind), Some(BindingKind::Function));
    assert_eq!(module.get("Repo").map(|b| b.kind), Some(BindingKind::Class));
    assert_eq!(module.get("Kind").map(|b| b.kind), Some(BindingKind::Enum));
}

#[test]
fn test_for_head_bindings_are_scoped_to_loop() {
    let tree = parse("for (const item of items) { use(item); }\nafter(item);").unwrap();
    let scopes = ScopeTree::build(&tree);
    let inside = scopes.chain(nth_identifier(&tree, "use", 0));
    assert_eq!(inside.lookup("item").map(|b| b.kind), Some(BindingKind::Const));
    let outside = scopes.chain(nth_identifier(&tree, "after", 0));
    assert!(outside.lookup("item").is_none());
}

#[test]
fn test_declaration_points_at_declarator() {
    let source = "const roles = ['admin', 'user'];\nz.enum(roles);";
    let tree = parse(source).unwrap();
    let scopes = ScopeTree::build(&tree);
    let site = nth_identifier(&tree, "roles", 1);
    let binding = scopes.chain(site).lookup("roles").unwrap();
    match tree.kind(binding.declaration) {
        NodeKind::VariableDeclarator { init: Some(init), .. } => {
            assert_eq!(tree.text(*init, source), "['admin', 'user']");
        }
        other => panic!("expected declarator, got {:?}", other),
    }
}

#[test]
fn test_parameter_defaults_do_not_bind() {
    let tree = parse("function f({ a = fallback }, [b] = defaults) { body(); }").unwrap();
    let scopes = ScopeTree::build(&tree);
    let chain = scopes.chain(nth_identifier(&tree, "body", 0));
    assert_eq!(chain.lookup("a").map(|b| b.kind), Some(BindingKind::Parameter));
    assert_eq!(chain.lookup("b").map(|b| b.kind), Some(BindingKind::Parameter));
    assert!(chain.lookup("fallback").is_none());
    assert!(chain.lookup("defaults").is_none());
}
