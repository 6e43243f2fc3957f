//! Node kinds of the syntax tree.
//!
//! The shapes follow the ESTree conventions closely enough that code written
//! against "callee", "object", "arguments" and "params" reads naturally, but
//! child links are arena indices instead of boxes.

use crate::token::Span;
use serde::Serialize;

/// Index of a node in its [`SyntaxTree`](super::SyntaxTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the arena. The parent link is for navigation only; the tree
/// owns every node.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

/// How an import binding is introduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    /// `import z from "zod"`
    Default,
    /// `import * as z from "zod"`
    Namespace,
    /// `import { z } from "zod"` / `import { z as zod } from "zod"`
    Named(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    /// Raw numeric text.
    Number(String),
    Boolean(bool),
    Null,
    /// Raw regular expression text.
    RegExp(String),
}

/// Shared shape of function declarations, function expressions, arrow
/// functions and methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub id: Option<NodeId>,
    /// [`NodeKind::Param`] nodes.
    pub params: Vec<NodeId>,
    /// A `BlockStatement`, or any expression for concise arrow bodies.
    /// `None` for overload signatures and `declare function`.
    pub body: Option<NodeId>,
    pub return_type: Option<NodeId>,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: Option<NodeId>,
    pub super_class: Option<NodeId>,
    pub members: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },

    // Statements
    VariableDeclaration {
        kind: VarKind,
        declarations: Vec<NodeId>,
    },
    VariableDeclarator {
        id: NodeId,
        type_annotation: Option<NodeId>,
        init: Option<NodeId>,
    },
    FunctionDeclaration(Function),
    ClassDeclaration(Class),
    ExpressionStatement {
        expression: NodeId,
    },
    BlockStatement {
        body: Vec<NodeId>,
    },
    EmptyStatement,
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    ForStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    ForInStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    ForOfStatement {
        left: NodeId,
        right: NodeId,
        body: NodeId,
        is_await: bool,
    },
    WhileStatement {
        test: NodeId,
        body: NodeId,
    },
    DoWhileStatement {
        body: NodeId,
        test: NodeId,
    },
    SwitchStatement {
        discriminant: NodeId,
        cases: Vec<NodeId>,
    },
    SwitchCase {
        test: Option<NodeId>,
        consequent: Vec<NodeId>,
    },
    ReturnStatement {
        argument: Option<NodeId>,
    },
    ThrowStatement {
        argument: NodeId,
    },
    TryStatement {
        block: NodeId,
        handler: Option<NodeId>,
        finalizer: Option<NodeId>,
    },
    CatchClause {
        param: Option<NodeId>,
        body: NodeId,
    },
    BreakStatement {
        label: Option<String>,
    },
    ContinueStatement {
        label: Option<String>,
    },
    LabeledStatement {
        label: String,
        body: NodeId,
    },
    DebuggerStatement,

    // Modules
    ImportDeclaration {
        specifiers: Vec<NodeId>,
        source: NodeId,
        type_only: bool,
    },
    ImportSpecifier {
        kind: ImportKind,
        local: NodeId,
    },
    ExportNamedDeclaration {
        declaration: Option<NodeId>,
        specifiers: Vec<NodeId>,
        source: Option<NodeId>,
    },
    ExportSpecifier {
        local: NodeId,
        exported: String,
    },
    ExportDefaultDeclaration {
        declaration: NodeId,
    },

    // TypeScript declarations
    TsTypeAlias {
        id: NodeId,
        type_annotation: NodeId,
    },
    TsInterface {
        id: NodeId,
        body: NodeId,
    },
    TsEnum {
        id: NodeId,
        members: Vec<NodeId>,
    },
    TsEnumMember {
        id: NodeId,
        init: Option<NodeId>,
    },

    // Expressions
    Identifier {
        name: String,
    },
    PrivateName {
        name: String,
    },
    Literal(LiteralValue),
    TemplateLiteral {
        raw: String,
    },
    TaggedTemplateExpression {
        tag: NodeId,
        quasi: NodeId,
    },
    ArrayExpression {
        elements: Vec<Option<NodeId>>,
    },
    ObjectExpression {
        properties: Vec<NodeId>,
    },
    /// Object literal member or object pattern member. For shorthand
    /// properties `key` and `value` are the same node or `key` is the left
    /// side of an `AssignmentPattern` value.
    Property {
        key: NodeId,
        value: NodeId,
        kind: PropertyKind,
        computed: bool,
        shorthand: bool,
        method: bool,
    },
    SpreadElement {
        argument: NodeId,
    },
    FunctionExpression(Function),
    ArrowFunctionExpression(Function),
    ClassExpression(Class),
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
        optional: bool,
    },
    NewExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    MemberExpression {
        object: NodeId,
        property: NodeId,
        computed: bool,
        optional: bool,
    },
    UnaryExpression {
        operator: &'static str,
        argument: NodeId,
    },
    UpdateExpression {
        operator: &'static str,
        prefix: bool,
        argument: NodeId,
    },
    BinaryExpression {
        operator: &'static str,
        left: NodeId,
        right: NodeId,
    },
    LogicalExpression {
        operator: &'static str,
        left: NodeId,
        right: NodeId,
    },
    AssignmentExpression {
        operator: &'static str,
        left: NodeId,
        right: NodeId,
    },
    ConditionalExpression {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    SequenceExpression {
        expressions: Vec<NodeId>,
    },
    AwaitExpression {
        argument: NodeId,
    },
    YieldExpression {
        argument: Option<NodeId>,
        delegate: bool,
    },
    ThisExpression,
    Super,
    TsAsExpression {
        expression: NodeId,
        type_annotation: NodeId,
    },
    TsSatisfiesExpression {
        expression: NodeId,
        type_annotation: NodeId,
    },
    TsNonNullExpression {
        expression: NodeId,
    },

    /// An opaque type. `name` is set for simple references (`string`,
    /// `Foo`, `Foo.Bar`) and for the `const` of `as const`.
    TsType {
        name: Option<String>,
    },

    // Patterns
    ObjectPattern {
        properties: Vec<NodeId>,
    },
    ArrayPattern {
        elements: Vec<Option<NodeId>>,
    },
    AssignmentPattern {
        left: NodeId,
        right: NodeId,
    },
    RestElement {
        argument: NodeId,
    },
    /// A function parameter. The span covers the pattern, the type
    /// annotation and the default value.
    Param {
        pattern: NodeId,
        type_annotation: Option<NodeId>,
        default: Option<NodeId>,
        optional: bool,
    },

    // Class members
    MethodDefinition {
        key: NodeId,
        value: NodeId,
        kind: MethodKind,
        computed: bool,
        is_static: bool,
    },
    PropertyDefinition {
        key: NodeId,
        type_annotation: Option<NodeId>,
        value: Option<NodeId>,
        computed: bool,
        is_static: bool,
    },
}

impl NodeKind {
    /// Child nodes in source order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        match self {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => {
                out.extend(body.iter().copied())
            }
            NodeKind::VariableDeclaration { declarations, .. } => {
                out.extend(declarations.iter().copied())
            }
            NodeKind::VariableDeclarator {
                id,
                type_annotation,
                init,
            } => {
                out.push(*id);
                out.extend(*type_annotation);
                out.extend(*init);
            }
            NodeKind::FunctionDeclaration(func)
            | NodeKind::FunctionExpression(func)
            | NodeKind::ArrowFunctionExpression(func) => {
                out.extend(func.id);
                out.extend(func.params.iter().copied());
                out.extend(func.return_type);
                out.extend(func.body);
            }
            NodeKind::ClassDeclaration(class) | NodeKind::ClassExpression(class) => {
                out.extend(class.id);
                out.extend(class.super_class);
                out.extend(class.members.iter().copied());
            }
            NodeKind::ExpressionStatement { expression } => out.push(*expression),
            NodeKind::EmptyStatement
            | NodeKind::DebuggerStatement
            | NodeKind::BreakStatement { .. }
            | NodeKind::ContinueStatement { .. }
            | NodeKind::Identifier { .. }
            | NodeKind::PrivateName { .. }
            | NodeKind::Literal(_)
            | NodeKind::TemplateLiteral { .. }
            | NodeKind::ThisExpression
            | NodeKind::Super
            | NodeKind::TsType { .. } => {}
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                out.push(*test);
                out.push(*consequent);
                out.extend(*alternate);
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                out.extend(*init);
                out.extend(*test);
                out.extend(*update);
                out.push(*body);
            }
            NodeKind::ForInStatement { left, right, body }
            | NodeKind::ForOfStatement {
                left, right, body, ..
            } => {
                out.push(*left);
                out.push(*right);
                out.push(*body);
            }
            NodeKind::WhileStatement { test, body } => {
                out.push(*test);
                out.push(*body);
            }
            NodeKind::DoWhileStatement { body, test } => {
                out.push(*body);
                out.push(*test);
            }
            NodeKind::SwitchStatement {
                discriminant,
                cases,
            } => {
                out.push(*discriminant);
                out.extend(cases.iter().copied());
            }
            NodeKind::SwitchCase { test, consequent } => {
                out.extend(*test);
                out.extend(consequent.iter().copied());
            }
            NodeKind::ReturnStatement { argument } => out.extend(*argument),
            NodeKind::ThrowStatement { argument }
            | NodeKind::SpreadElement { argument }
            | NodeKind::AwaitExpression { argument }
            | NodeKind::RestElement { argument }
            | NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. } => out.push(*argument),
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                out.push(*block);
                out.extend(*handler);
                out.extend(*finalizer);
            }
            NodeKind::CatchClause { param, body } => {
                out.extend(*param);
                out.push(*body);
            }
            NodeKind::LabeledStatement { body, .. } => out.push(*body),
            NodeKind::ImportDeclaration {
                specifiers, source, ..
            } => {
                out.extend(specifiers.iter().copied());
                out.push(*source);
            }
            NodeKind::ImportSpecifier { local, .. } | NodeKind::ExportSpecifier { local, .. } => {
                out.push(*local)
            }
            NodeKind::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => {
                out.extend(*declaration);
                out.extend(specifiers.iter().copied());
                out.extend(*source);
            }
            NodeKind::ExportDefaultDeclaration { declaration } => out.push(*declaration),
            NodeKind::TsTypeAlias {
                id,
                type_annotation,
            } => {
                out.push(*id);
                out.push(*type_annotation);
            }
            NodeKind::TsInterface { id, body } => {
                out.push(*id);
                out.push(*body);
            }
            NodeKind::TsEnum { id, members } => {
                out.push(*id);
                out.extend(members.iter().copied());
            }
            NodeKind::TsEnumMember { id, init } => {
                out.push(*id);
                out.extend(*init);
            }
            NodeKind::TaggedTemplateExpression { tag, quasi } => {
                out.push(*tag);
                out.push(*quasi);
            }
            NodeKind::ArrayExpression { elements } | NodeKind::ArrayPattern { elements } => {
                out.extend(elements.iter().flatten().copied())
            }
            NodeKind::ObjectExpression { properties } | NodeKind::ObjectPattern { properties } => {
                out.extend(properties.iter().copied())
            }
            NodeKind::Property {
                key,
                value,
                shorthand,
                ..
            } => {
                if !shorthand {
                    out.push(*key);
                }
                out.push(*value);
            }
            NodeKind::CallExpression {
                callee, arguments, ..
            }
            | NodeKind::NewExpression { callee, arguments } => {
                out.push(*callee);
                out.extend(arguments.iter().copied());
            }
            NodeKind::MemberExpression {
                object, property, ..
            } => {
                out.push(*object);
                out.push(*property);
            }
            NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. }
            | NodeKind::AssignmentExpression { left, right, .. }
            | NodeKind::AssignmentPattern { left, right } => {
                out.push(*left);
                out.push(*right);
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                out.push(*test);
                out.push(*consequent);
                out.push(*alternate);
            }
            NodeKind::SequenceExpression { expressions } => {
                out.extend(expressions.iter().copied())
            }
            NodeKind::YieldExpression { argument, .. } => out.extend(*argument),
            NodeKind::TsAsExpression {
                expression,
                type_annotation,
            }
            | NodeKind::TsSatisfiesExpression {
                expression,
                type_annotation,
            } => {
                out.push(*expression);
                out.push(*type_annotation);
            }
            NodeKind::TsNonNullExpression { expression } => out.push(*expression),
            NodeKind::Param {
                pattern,
                type_annotation,
                default,
                ..
            } => {
                out.push(*pattern);
                out.extend(*type_annotation);
                out.extend(*default);
            }
            NodeKind::MethodDefinition { key, value, .. } => {
                out.push(*key);
                out.push(*value);
            }
            NodeKind::PropertyDefinition {
                key,
                type_annotation,
                value,
                ..
            } => {
                out.push(*key);
                out.extend(*type_annotation);
                out.extend(*value);
            }
        }
        out
    }

    /// Short name of the variant, used in debug output and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeKind::ClassDeclaration(_) => "ClassDeclaration",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::BlockStatement { .. } => "BlockStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::IfStatement { .. } => "IfStatement",
            NodeKind::ForStatement { .. } => "ForStatement",
            NodeKind::ForInStatement { .. } => "ForInStatement",
            NodeKind::ForOfStatement { .. } => "ForOfStatement",
            NodeKind::WhileStatement { .. } => "WhileStatement",
            NodeKind::DoWhileStatement { .. } => "DoWhileStatement",
            NodeKind::SwitchStatement { .. } => "SwitchStatement",
            NodeKind::SwitchCase { .. } => "SwitchCase",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::ThrowStatement { .. } => "ThrowStatement",
            NodeKind::TryStatement { .. } => "TryStatement",
            NodeKind::CatchClause { .. } => "CatchClause",
            NodeKind::BreakStatement { .. } => "BreakStatement",
            NodeKind::ContinueStatement { .. } => "ContinueStatement",
            NodeKind::LabeledStatement { .. } => "LabeledStatement",
            NodeKind::DebuggerStatement => "DebuggerStatement",
            NodeKind::ImportDeclaration { .. } => "ImportDeclaration",
            NodeKind::ImportSpecifier { .. } => "ImportSpecifier",
            NodeKind::ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
            NodeKind::ExportSpecifier { .. } => "ExportSpecifier",
            NodeKind::ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
            NodeKind::TsTypeAlias { .. } => "TsTypeAlias",
            NodeKind::TsInterface { .. } => "TsInterface",
            NodeKind::TsEnum { .. } => "TsEnum",
            NodeKind::TsEnumMember { .. } => "TsEnumMember",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::PrivateName { .. } => "PrivateName",
            NodeKind::Literal(_) => "Literal",
            NodeKind::TemplateLiteral { .. } => "TemplateLiteral",
            NodeKind::TaggedTemplateExpression { .. } => "TaggedTemplateExpression",
            NodeKind::ArrayExpression { .. } => "ArrayExpression",
            NodeKind::ObjectExpression { .. } => "ObjectExpression",
            NodeKind::Property { .. } => "Property",
            NodeKind::SpreadElement { .. } => "SpreadElement",
            NodeKind::FunctionExpression(_) => "FunctionExpression",
            NodeKind::ArrowFunctionExpression(_) => "ArrowFunctionExpression",
            NodeKind::ClassExpression(_) => "ClassExpression",
            NodeKind::CallExpression { .. } => "CallExpression",
            NodeKind::NewExpression { .. } => "NewExpression",
            NodeKind::MemberExpression { .. } => "MemberExpression",
            NodeKind::UnaryExpression { .. } => "UnaryExpression",
            NodeKind::UpdateExpression { .. } => "UpdateExpression",
            NodeKind::BinaryExpression { .. } => "BinaryExpression",
            NodeKind::LogicalExpression { .. } => "LogicalExpression",
            NodeKind::AssignmentExpression { .. } => "AssignmentExpression",
            NodeKind::ConditionalExpression { .. } => "ConditionalExpression",
            NodeKind::SequenceExpression { .. } => "SequenceExpression",
            NodeKind::AwaitExpression { .. } => "AwaitExpression",
            NodeKind::YieldExpression { .. } => "YieldExpression",
            NodeKind::ThisExpression => "ThisExpression",
            NodeKind::Super => "Super",
            NodeKind::TsAsExpression { .. } => "TsAsExpression",
            NodeKind::TsSatisfiesExpression { .. } => "TsSatisfiesExpression",
            NodeKind::TsNonNullExpression { .. } => "TsNonNullExpression",
            NodeKind::TsType { .. } => "TsType",
            NodeKind::ObjectPattern { .. } => "ObjectPattern",
            NodeKind::ArrayPattern { .. } => "ArrayPattern",
            NodeKind::AssignmentPattern { .. } => "AssignmentPattern",
            NodeKind::RestElement { .. } => "RestElement",
            NodeKind::Param { .. } => "Param",
            NodeKind::MethodDefinition { .. } => "MethodDefinition",
            NodeKind::PropertyDefinition { .. } => "PropertyDefinition",
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration(_)
                | NodeKind::FunctionExpression(_)
                | NodeKind::ArrowFunctionExpression(_)
        )
    }

    /// The function payload of declarations, expressions and arrows.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            NodeKind::FunctionDeclaration(func)
            | NodeKind::FunctionExpression(func)
            | NodeKind::ArrowFunctionExpression(func) => Some(func),
            _ => None,
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            parent: None,
        }
    }
}
