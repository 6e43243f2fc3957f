//! Lexical scope analysis.
//!
//! [`ScopeTree::build`] walks a [`SyntaxTree`] once and records every scope
//! and the bindings declared in it. Queries go through [`ScopeChain`], an
//! explicit list of frames from the innermost scope at a site out to the
//! module scope.

use rustc_hash::FxHashMap;

use crate::ast::{NodeId, NodeKind, SyntaxTree, VarKind};

/// Index of a scope in its [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Function,
    Block,
    Catch,
    For,
    Switch,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Var,
    Let,
    Const,
    Function,
    Class,
    Parameter,
    Import,
    CatchParameter,
    Enum,
}

impl From<VarKind> for BindingKind {
    fn from(kind: VarKind) -> Self {
        match kind {
            VarKind::Var => BindingKind::Var,
            VarKind::Let => BindingKind::Let,
            VarKind::Const => BindingKind::Const,
        }
    }
}

/// A declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub kind: BindingKind,
    /// The binding identifier.
    pub node: NodeId,
    /// The declaring node: a `VariableDeclarator`, `Param`,
    /// `ImportSpecifier`, function, class, enum or catch clause.
    pub declaration: NodeId,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Node that introduced the scope.
    pub node: NodeId,
    pub parent: Option<ScopeId>,
    bindings: FxHashMap<String, Binding>,
}

impl Scope {
    pub fn new(kind: ScopeKind, node: NodeId, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            node,
            parent,
            bindings: FxHashMap::default(),
        }
    }

    /// Add a binding. Redeclarations keep the first declaration.
    pub fn declare(&mut self, binding: Binding) {
        self.bindings.entry(binding.name.clone()).or_insert(binding);
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }
}

/// Scopes enclosing a site, innermost first.
#[derive(Debug, Clone)]
pub struct ScopeChain<'s> {
    frames: Vec<&'s Scope>,
}

impl<'s> ScopeChain<'s> {
    /// Build a chain from explicit frames, innermost first.
    pub fn from_frames(frames: Vec<&'s Scope>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[&'s Scope] {
        &self.frames
    }

    /// Nearest binding of `name`, walking strictly outward.
    pub fn lookup(&self, name: &str) -> Option<&'s Binding> {
        self.frames.iter().find_map(|scope| scope.get(name))
    }
}

/// All scopes of one file.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    /// Innermost scope of every node, indexed by `NodeId`. A node that
    /// introduces a scope maps to that scope.
    node_scope: Vec<ScopeId>,
}

impl ScopeTree {
    pub fn build(tree: &SyntaxTree) -> Self {
        let root = tree.root();
        let mut scopes = ScopeTree {
            scopes: vec![Scope::new(ScopeKind::Module, root, None)],
            node_scope: vec![ScopeId(0); tree.len()],
        };

        // (node, enclosing scope, whether a block here reuses that scope)
        let mut stack = vec![(root, ScopeId(0), false)];
        while let Some((id, enclosing, reuse_scope)) = stack.pop() {
            let own = scopes.visit(tree, id, enclosing, reuse_scope);
            scopes.node_scope[id.index()] = own;

            let shared_body = match tree.kind(id) {
                NodeKind::FunctionDeclaration(func)
                | NodeKind::FunctionExpression(func)
                | NodeKind::ArrowFunctionExpression(func) => func.body,
                NodeKind::CatchClause { body, .. } => Some(*body),
                _ => None,
            };
            for child in tree.children(id).into_iter().rev() {
                let reuse = shared_body == Some(child)
                    && matches!(tree.kind(child), NodeKind::BlockStatement { .. });
                stack.push((child, own, reuse));
            }
        }

        scopes
    }

    /// Record the declarations made by `id` and return the scope its
    /// children live in.
    fn visit(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        enclosing: ScopeId,
        reuse_scope: bool,
    ) -> ScopeId {
        match tree.kind(id) {
            NodeKind::FunctionDeclaration(func) => {
                if let Some(name) = func.id {
                    self.bind(tree, enclosing, name, BindingKind::Function, id);
                }
                self.push(ScopeKind::Function, id, enclosing)
            }
            NodeKind::FunctionExpression(func) => {
                let scope = self.push(ScopeKind::Function, id, enclosing);
                if let Some(name) = func.id {
                    self.bind(tree, scope, name, BindingKind::Function, id);
                }
                scope
            }
            NodeKind::ArrowFunctionExpression(_) => self.push(ScopeKind::Function, id, enclosing),
            NodeKind::ClassDeclaration(class) => {
                if let Some(name) = class.id {
                    self.bind(tree, enclosing, name, BindingKind::Class, id);
                }
                self.push(ScopeKind::Class, id, enclosing)
            }
            NodeKind::ClassExpression(class) => {
                let scope = self.push(ScopeKind::Class, id, enclosing);
                if let Some(name) = class.id {
                    self.bind(tree, scope, name, BindingKind::Class, id);
                }
                scope
            }
            NodeKind::BlockStatement { .. } if !reuse_scope => {
                self.push(ScopeKind::Block, id, enclosing)
            }
            NodeKind::ForStatement { .. }
            | NodeKind::ForInStatement { .. }
            | NodeKind::ForOfStatement { .. } => self.push(ScopeKind::For, id, enclosing),
            NodeKind::SwitchStatement { .. } => self.push(ScopeKind::Switch, id, enclosing),
            NodeKind::CatchClause { param, .. } => {
                let scope = self.push(ScopeKind::Catch, id, enclosing);
                if let Some(param) = *param {
                    self.bind_pattern(tree, scope, param, BindingKind::CatchParameter, id);
                }
                scope
            }
            NodeKind::VariableDeclaration { kind, declarations } => {
                let target = match kind {
                    VarKind::Var => self.hoist_target(enclosing),
                    VarKind::Let | VarKind::Const => enclosing,
                };
                for &declarator in declarations {
                    if let NodeKind::VariableDeclarator { id: pattern, .. } = tree.kind(declarator)
                    {
                        self.bind_pattern(tree, target, *pattern, (*kind).into(), declarator);
                    }
                }
                enclosing
            }
            NodeKind::Param { pattern, .. } => {
                self.bind_pattern(tree, enclosing, *pattern, BindingKind::Parameter, id);
                enclosing
            }
            NodeKind::ImportSpecifier { local, .. } => {
                self.bind(tree, ScopeId(0), *local, BindingKind::Import, id);
                enclosing
            }
            NodeKind::TsEnum { id: name, .. } => {
                self.bind(tree, enclosing, *name, BindingKind::Enum, id);
                enclosing
            }
            _ => enclosing,
        }
    }

    fn push(&mut self, kind: ScopeKind, node: NodeId, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, node, Some(parent)));
        id
    }

    /// Nearest function or module scope, where `var` declarations land.
    fn hoist_target(&self, mut scope: ScopeId) -> ScopeId {
        loop {
            let current = &self.scopes[scope.index()];
            match (current.kind, current.parent) {
                (ScopeKind::Function | ScopeKind::Module, _) | (_, None) => return scope,
                (_, Some(parent)) => scope = parent,
            }
        }
    }

    fn bind(
        &mut self,
        tree: &SyntaxTree,
        scope: ScopeId,
        name_node: NodeId,
        kind: BindingKind,
        declaration: NodeId,
    ) {
        if let Some(name) = tree.identifier_name(name_node) {
            self.scopes[scope.index()].declare(Binding {
                name: name.to_string(),
                kind,
                node: name_node,
                declaration,
            });
        }
    }

    /// Bind every identifier a destructuring pattern introduces. Default
    /// values and computed keys are skipped.
    fn bind_pattern(
        &mut self,
        tree: &SyntaxTree,
        scope: ScopeId,
        pattern: NodeId,
        kind: BindingKind,
        declaration: NodeId,
    ) {
        let mut pending = vec![pattern];
        while let Some(node) = pending.pop() {
            match tree.kind(node) {
                NodeKind::Identifier { .. } => self.bind(tree, scope, node, kind, declaration),
                NodeKind::ObjectPattern { properties } => pending.extend(properties.iter().copied()),
                NodeKind::Property { value, .. } => pending.push(*value),
                NodeKind::ArrayPattern { elements } => {
                    pending.extend(elements.iter().flatten().copied())
                }
                NodeKind::AssignmentPattern { left, .. } => pending.push(*left),
                NodeKind::RestElement { argument } => pending.push(*argument),
                _ => {}
            }
        }
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn module_scope(&self) -> &Scope {
        &self.scopes[0]
    }

    /// Innermost scope containing `node`.
    pub fn scope_of(&self, node: NodeId) -> ScopeId {
        self.node_scope
            .get(node.index())
            .copied()
            .unwrap_or(ScopeId(0))
    }

    /// Scope chain at `node`, innermost first and ending at the module.
    pub fn chain(&self, node: NodeId) -> ScopeChain<'_> {
        let mut frames = Vec::new();
        let mut next = Some(self.scope_of(node));
        while let Some(id) = next {
            let scope = &self.scopes[id.index()];
            frames.push(scope);
            next = scope.parent;
        }
        ScopeChain { frames }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn find_identifier(tree: &SyntaxTree, name: &str, nth: usize) -> NodeId {
        tree.preorder()
            .filter(|&id| tree.identifier_name(id) == Some(name))
            .nth(nth)
            .unwrap_or_else(|| panic!("identifier {} #{} not found", name, nth))
    }

    #[test]
    fn test_var_hoists_out_of_blocks() {
        let tree = parse("function f() { if (x) { var a = 1; let b = 2; } use(a, b); }").unwrap();
        let scopes = ScopeTree::build(&tree);
        let site = find_identifier(&tree, "use", 0);
        let chain = scopes.chain(site);
        assert_eq!(chain.lookup("a").map(|b| b.kind), Some(BindingKind::Var));
        assert!(chain.lookup("b").is_none());
    }

    #[test]
    fn test_parameters_and_function_body_share_scope() {
        let tree = parse("const check = (val, ctx) => { const x = val; return x; };").unwrap();
        let scopes = ScopeTree::build(&tree);
        let site = find_identifier(&tree, "x", 1);
        let chain = scopes.chain(site);
        assert_eq!(chain.frames()[0].kind, ScopeKind::Function);
        assert_eq!(chain.lookup("val").map(|b| b.kind), Some(BindingKind::Parameter));
        assert_eq!(chain.lookup("x").map(|b| b.kind), Some(BindingKind::Const));
        assert_eq!(chain.lookup("check").map(|b| b.kind), Some(BindingKind::Const));
    }

    #[test]
    fn test_inner_declaration_shadows_outer() {
        let tree =
            parse("const roles = ['a'] as const; function f() { const roles = ['b']; g(roles); }")
                .unwrap();
        let scopes = ScopeTree::build(&tree);
        let site = find_identifier(&tree, "roles", 2);
        let binding = scopes.chain(site).lookup("roles").unwrap();
        assert_eq!(binding.node, find_identifier(&tree, "roles", 1));
        assert!(matches!(
            tree.kind(binding.declaration),
            NodeKind::VariableDeclarator { .. }
        ));
    }

    #[test]
    fn test_imports_and_destructuring() {
        let tree = parse(
            "import { z as zod } from 'zod';\nconst { a, b: [c, ...d], e = 1 } = obj;\ntry {} catch ({ message }) { log(message) }",
        )
        .unwrap();
        let scopes = ScopeTree::build(&tree);
        let module = scopes.module_scope();
        assert_eq!(module.get("zod").map(|b| b.kind), Some(BindingKind::Import));
        assert!(module.get("z").is_none());
        for name in ["a", "c", "d", "e"] {
            assert!(module.get(name).is_some(), "missing binding {}", name);
        }
        let site = find_identifier(&tree, "log", 0);
        assert_eq!(
            scopes.chain(site).lookup("message").map(|b| b.kind),
            Some(BindingKind::CatchParameter)
        );
    }

    #[test]
    fn test_synthetic_chain() {
        let mut outer = Scope::new(ScopeKind::Module, NodeId(0), None);
        outer.declare(Binding {
            name: "schema".into(),
            kind: BindingKind::Const,
            node: NodeId(1),
            declaration: NodeId(2),
        });
        let mut inner = Scope::new(ScopeKind::Block, NodeId(3), Some(ScopeId(0)));
        inner.declare(Binding {
            name: "schema".into(),
            kind: BindingKind::Let,
            node: NodeId(4),
            declaration: NodeId(5),
        });
        let chain = ScopeChain::from_frames(vec![&inner, &outer]);
        assert_eq!(chain.lookup("schema").map(|b| b.declaration), Some(NodeId(5)));
        let chain = ScopeChain::from_frames(vec![&outer]);
        assert_eq!(chain.lookup("schema").map(|b| b.declaration), Some(NodeId(2)));
        assert!(chain.lookup("missing").is_none());
    }
}
