//! Statement and declaration parsing

use super::expr::{self, is_property_name_start};
use super::guards::LoopGuard;
use super::{pattern, types, ParseError, Parser};
use crate::ast::{
    Class, Function, ImportKind, LiteralValue, MethodKind, NodeId, NodeKind, VarKind,
};
use crate::token::{Span, Token};

/// Parse a statement or declaration.
pub fn parse_statement(parser: &mut Parser) -> Result<NodeId, ParseError> {
    parser.enter("statement")?;
    let result = parse_statement_inner(parser);
    parser.leave();
    result
}

fn parse_statement_inner(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    match parser.current() {
        Token::Var => parse_variable_statement(parser, VarKind::Var),
        Token::Const if matches!(parser.peek(), Token::Enum) => parse_enum(parser),
        Token::Const => parse_variable_statement(parser, VarKind::Const),
        Token::Let if starts_binding(parser.peek()) => parse_variable_statement(parser, VarKind::Let),
        Token::Function => parse_function_declaration(parser, start),
        Token::Class => parse_class(parser, false),
        Token::Enum => parse_enum(parser),
        Token::If => parse_if(parser),
        Token::For => parse_for(parser),
        Token::While => parse_while(parser),
        Token::Do => parse_do_while(parser),
        Token::Switch => parse_switch(parser),
        Token::Try => parse_try(parser),
        Token::Return => parse_return(parser),
        Token::Break | Token::Continue => parse_break_continue(parser),
        Token::Throw => parse_throw(parser),
        Token::LeftBrace => parse_block(parser),
        Token::Semicolon => {
            parser.advance();
            Ok(parser.alloc(NodeKind::EmptyStatement, start))
        }
        Token::Import if !matches!(parser.peek(), Token::LeftParen | Token::Dot) => {
            parse_import(parser)
        }
        Token::Export => parse_export(parser),
        Token::Debugger => {
            parser.advance();
            parser.consume_semicolon();
            Ok(parser.alloc(NodeKind::DebuggerStatement, start))
        }
        Token::Identifier(name) => {
            let name = name.clone();
            parse_identifier_statement(parser, &name, start)
        }
        _ => parse_expression_statement(parser),
    }
}

/// Statements introduced by contextual keywords (`async`, `type`,
/// `interface`, `declare`, ...) or labels.
fn parse_identifier_statement(
    parser: &mut Parser,
    name: &str,
    start: Span,
) -> Result<NodeId, ParseError> {
    let next_same_line = parser.peek_span(1).line == start.line;
    match name {
        "async" if matches!(parser.peek(), Token::Function) && next_same_line => {
            parse_function_declaration(parser, start)
        }
        "abstract" if matches!(parser.peek(), Token::Class) => {
            parser.advance();
            parse_class_from(parser, start, false)
        }
        "type" if matches!(parser.peek(), Token::Identifier(_)) && next_same_line => {
            parse_type_alias(parser)
        }
        "interface" if matches!(parser.peek(), Token::Identifier(_)) && next_same_line => {
            parse_interface(parser)
        }
        "declare" if next_same_line && starts_declaration(parser.peek()) => {
            parser.advance();
            parse_statement(parser)
        }
        "namespace" | "module"
            if next_same_line
                && matches!(parser.peek(), Token::Identifier(_) | Token::String(_)) =>
        {
            parse_namespace(parser)
        }
        "global" if matches!(parser.peek(), Token::LeftBrace) => parse_namespace(parser),
        _ if matches!(parser.peek(), Token::Colon) => parse_labeled(parser),
        _ => parse_expression_statement(parser),
    }
}

fn starts_binding(token: &Token) -> bool {
    matches!(
        token,
        Token::Identifier(_) | Token::LeftBrace | Token::LeftBracket | Token::Yield | Token::Await
    )
}

fn starts_declaration(token: &Token) -> bool {
    match token {
        Token::Var | Token::Let | Token::Const | Token::Function | Token::Class | Token::Enum => {
            true
        }
        Token::Identifier(name) => matches!(
            name.as_str(),
            "async" | "abstract" | "type" | "interface" | "namespace" | "module" | "global"
        ),
        _ => false,
    }
}

fn parse_expression_statement(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let expression = expr::parse_expression(parser)?;
    parser.consume_semicolon();
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::ExpressionStatement { expression }, span))
}

/// Parse a `{ ... }` block.
pub fn parse_block(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::LeftBrace)?;
    let mut body = Vec::new();
    let mut guard = LoopGuard::new("block_statements");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        body.push(parse_statement(parser)?);
    }

    parser.expect(Token::RightBrace)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::BlockStatement { body }, span))
}

// ============================================================================
// Variables
// ============================================================================

fn parse_variable_statement(parser: &mut Parser, kind: VarKind) -> Result<NodeId, ParseError> {
    let declaration = parse_variable_declaration(parser, kind)?;
    parser.consume_semicolon();
    Ok(declaration)
}

/// `let a = 1, b` without the trailing semicolon, as used in `for` heads.
fn parse_variable_declaration(parser: &mut Parser, kind: VarKind) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    parser.advance(); // var / let / const
    let mut declarations = Vec::new();
    let mut guard = LoopGuard::new("variable_declarators");

    loop {
        guard.check()?;
        declarations.push(parse_declarator(parser)?);
        if !parser.eat(&Token::Comma) {
            break;
        }
    }

    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::VariableDeclaration { kind, declarations }, span))
}

fn parse_declarator(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let id = pattern::parse_binding_pattern(parser)?;
    // Definite assignment: let x!: string
    parser.eat(&Token::Bang);
    let type_annotation = if parser.eat(&Token::Colon) {
        Some(types::parse_type_annotation(parser)?)
    } else {
        None
    };
    let init = if parser.eat(&Token::Equal) {
        Some(expr::parse_assignment(parser)?)
    } else {
        None
    };
    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::VariableDeclarator {
            id,
            type_annotation,
            init,
        },
        span,
    ))
}

// ============================================================================
// Functions
// ============================================================================

fn parse_function_declaration(parser: &mut Parser, start: Span) -> Result<NodeId, ParseError> {
    let is_async = parser.check_ident("async");
    if is_async {
        parser.advance();
    }
    parser.expect(Token::Function)?;
    let is_generator = parser.eat(&Token::Star);
    // Anonymous only under `export default`
    let id = if matches!(parser.current(), Token::Identifier(_) | Token::Yield | Token::Await) {
        Some(pattern::parse_binding_identifier(parser)?)
    } else {
        None
    };
    let function = parse_function_rest(parser, id, is_async, is_generator)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::FunctionDeclaration(function), span))
}

/// Parse everything after a function's name: type parameters, parameters,
/// return type and body. A missing body (overload signatures, `declare`)
/// is allowed.
pub fn parse_function_rest(
    parser: &mut Parser,
    id: Option<NodeId>,
    is_async: bool,
    is_generator: bool,
) -> Result<Function, ParseError> {
    if parser.check(&Token::Less) {
        types::skip_type_parameters(parser)?;
    }
    parser.expect(Token::LeftParen)?;
    let params = parse_parameters(parser)?;
    parser.expect(Token::RightParen)?;

    let return_type = if parser.eat(&Token::Colon) {
        Some(types::parse_type_annotation(parser)?)
    } else {
        None
    };

    let body = if parser.check(&Token::LeftBrace) {
        Some(parser.with_no_in(false, parse_block)?)
    } else {
        parser.consume_semicolon();
        None
    };

    Ok(Function {
        id,
        params,
        body,
        return_type,
        is_async,
        is_generator,
    })
}

const PARAMETER_MODIFIERS: &[&str] = &["public", "private", "protected", "readonly", "override"];

/// Parse a parameter list up to (not including) the closing `)`.
pub fn parse_parameters(parser: &mut Parser) -> Result<Vec<NodeId>, ParseError> {
    let mut params = Vec::new();
    let mut guard = LoopGuard::new("parameters");

    while !parser.check(&Token::RightParen) && !parser.at_eof() {
        guard.check()?;
        let start = parser.current_span();

        while PARAMETER_MODIFIERS
            .iter()
            .any(|modifier| parser.check_ident(modifier))
            && matches!(
                parser.peek(),
                Token::Identifier(_) | Token::LeftBrace | Token::LeftBracket | Token::DotDotDot
            )
        {
            parser.advance();
        }

        let pattern = if parser.check(&Token::DotDotDot) {
            pattern::parse_rest_element(parser)?
        } else {
            pattern::parse_binding_pattern(parser)?
        };
        let optional = parser.eat(&Token::Question);
        let type_annotation = if parser.eat(&Token::Colon) {
            Some(types::parse_type_annotation(parser)?)
        } else {
            None
        };
        let default = if parser.eat(&Token::Equal) {
            Some(parser.with_no_in(false, expr::parse_assignment)?)
        } else {
            None
        };

        let span = parser.finish_span(start);
        params.push(parser.alloc(
            NodeKind::Param {
                pattern,
                type_annotation,
                default,
                optional,
            },
            span,
        ));

        if !parser.check(&Token::RightParen) {
            parser.expect(Token::Comma)?;
        }
    }

    Ok(params)
}

// ============================================================================
// Classes
// ============================================================================

/// Parse a class declaration or expression starting at `class`.
pub fn parse_class(parser: &mut Parser, is_expression: bool) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    parse_class_from(parser, start, is_expression)
}

fn parse_class_from(
    parser: &mut Parser,
    start: Span,
    is_expression: bool,
) -> Result<NodeId, ParseError> {
    parser.expect(Token::Class)?;

    let id = match parser.current() {
        Token::Identifier(name) if name != "implements" => {
            Some(pattern::parse_binding_identifier(parser)?)
        }
        _ => None,
    };
    if parser.check(&Token::Less) {
        types::skip_type_parameters(parser)?;
    }

    let super_class = if parser.eat(&Token::Extends) {
        let base = expr::parse_left_hand_side(parser)?;
        if parser.check(&Token::Less) {
            types::parse_type_arguments(parser)?;
        }
        Some(base)
    } else {
        None
    };

    if parser.check_ident("implements") {
        parser.advance();
        let mut guard = LoopGuard::new("implements_clause");
        loop {
            guard.check()?;
            types::parse_type(parser)?;
            if !parser.eat(&Token::Comma) {
                break;
            }
        }
    }

    parser.expect(Token::LeftBrace)?;
    let mut members = Vec::new();
    let mut guard = LoopGuard::new("class_members");
    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        if parser.eat(&Token::Semicolon) {
            continue;
        }
        if let Some(member) = parse_class_member(parser)? {
            members.push(member);
        }
    }
    parser.expect(Token::RightBrace)?;

    let class = Class {
        id,
        super_class,
        members,
    };
    let span = parser.finish_span(start);
    let kind = if is_expression {
        NodeKind::ClassExpression(class)
    } else {
        NodeKind::ClassDeclaration(class)
    };
    Ok(parser.alloc(kind, span))
}

const MEMBER_MODIFIERS: &[&str] = &[
    "static",
    "public",
    "private",
    "protected",
    "readonly",
    "abstract",
    "override",
    "declare",
    "accessor",
];

/// Parse one class member. Index signatures produce no node.
fn parse_class_member(parser: &mut Parser) -> Result<Option<NodeId>, ParseError> {
    let start = parser.current_span();
    if parser.check(&Token::At) {
        return Err(ParseError::unsupported("decorators", start));
    }

    let mut is_static = false;
    let mut guard = LoopGuard::new("member_modifiers");
    loop {
        guard.check()?;
        let Some(modifier) = MEMBER_MODIFIERS
            .iter()
            .find(|modifier| parser.check_ident(modifier))
        else {
            break;
        };
        let static_block = *modifier == "static" && matches!(parser.peek(), Token::LeftBrace);
        if !static_block && !is_property_name_start(parser.peek()) {
            break;
        }
        is_static |= *modifier == "static";
        parser.advance();
    }

    if is_static && parser.check(&Token::LeftBrace) {
        return parse_block(parser).map(Some);
    }

    // Index signature: [key: string]: T;
    if parser.check(&Token::LeftBracket)
        && matches!(parser.peek(), Token::Identifier(_))
        && matches!(parser.peek_nth(2), Token::Colon)
    {
        types::skip_balanced(parser, Token::LeftBracket, Token::RightBracket)?;
        if parser.eat(&Token::Colon) {
            types::parse_type(parser)?;
        }
        parser.consume_semicolon();
        return Ok(None);
    }

    let mut is_async = false;
    let mut kind = MethodKind::Method;
    if parser.check_ident("async")
        && is_property_name_start(parser.peek())
        && parser.peek_span(1).line == parser.current_span().line
    {
        parser.advance();
        is_async = true;
    } else if parser.check_ident("get") && is_property_name_start(parser.peek()) {
        parser.advance();
        kind = MethodKind::Get;
    } else if parser.check_ident("set") && is_property_name_start(parser.peek()) {
        parser.advance();
        kind = MethodKind::Set;
    }
    let is_generator = parser.eat(&Token::Star);

    let (key, computed) = expr::parse_property_key(parser)?;
    if !computed && kind == MethodKind::Method && is_constructor_key(parser.node_kind(key)) {
        kind = MethodKind::Constructor;
    }

    // Optional and definite markers
    if !parser.eat(&Token::Question) {
        parser.eat(&Token::Bang);
    }

    if parser.check(&Token::LeftParen) || parser.check(&Token::Less) {
        let func_start = parser.current_span();
        let function = parse_function_rest(parser, None, is_async, is_generator)?;
        let func_span = parser.finish_span(func_start);
        let value = parser.alloc(NodeKind::FunctionExpression(function), func_span);
        let span = parser.finish_span(start);
        return Ok(Some(parser.alloc(
            NodeKind::MethodDefinition {
                key,
                value,
                kind,
                computed,
                is_static,
            },
            span,
        )));
    }

    let type_annotation = if parser.eat(&Token::Colon) {
        Some(types::parse_type_annotation(parser)?)
    } else {
        None
    };
    let value = if parser.eat(&Token::Equal) {
        Some(parser.with_no_in(false, expr::parse_assignment)?)
    } else {
        None
    };
    parser.consume_semicolon();
    let span = parser.finish_span(start);
    Ok(Some(parser.alloc(
        NodeKind::PropertyDefinition {
            key,
            type_annotation,
            value,
            computed,
            is_static,
        },
        span,
    )))
}

fn is_constructor_key(kind: &NodeKind) -> bool {
    match kind {
        NodeKind::Identifier { name } => name == "constructor",
        NodeKind::Literal(LiteralValue::String(value)) => value == "constructor",
        _ => false,
    }
}

// ============================================================================
// TypeScript Declarations
// ============================================================================

fn parse_type_alias(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    parser.advance(); // type
    let id = pattern::parse_binding_identifier(parser)?;
    if parser.check(&Token::Less) {
        types::skip_type_parameters(parser)?;
    }
    parser.expect(Token::Equal)?;
    let type_annotation = types::parse_type_annotation(parser)?;
    parser.consume_semicolon();
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::TsTypeAlias { id, type_annotation }, span))
}

fn parse_interface(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    parser.advance(); // interface
    let id = pattern::parse_binding_identifier(parser)?;
    if parser.check(&Token::Less) {
        types::skip_type_parameters(parser)?;
    }
    if parser.eat(&Token::Extends) {
        let mut guard = LoopGuard::new("interface_extends");
        loop {
            guard.check()?;
            types::parse_type(parser)?;
            if !parser.eat(&Token::Comma) {
                break;
            }
        }
    }
    let body_start = parser.current_span();
    types::skip_balanced(parser, Token::LeftBrace, Token::RightBrace)?;
    let body_span = parser.finish_span(body_start);
    let body = parser.alloc(NodeKind::TsType { name: None }, body_span);
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::TsInterface { id, body }, span))
}

fn parse_enum(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    parser.eat(&Token::Const);
    parser.expect(Token::Enum)?;
    let id = pattern::parse_binding_identifier(parser)?;
    parser.expect(Token::LeftBrace)?;

    let mut members = Vec::new();
    let mut guard = LoopGuard::new("enum_members");
    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        let member_start = parser.current_span();
        let (key, _) = expr::parse_property_key(parser)?;
        let init = if parser.eat(&Token::Equal) {
            Some(expr::parse_assignment(parser)?)
        } else {
            None
        };
        let span = parser.finish_span(member_start);
        members.push(parser.alloc(NodeKind::TsEnumMember { id: key, init }, span));
        if !parser.check(&Token::RightBrace) {
            parser.expect(Token::Comma)?;
        }
    }
    parser.expect(Token::RightBrace)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::TsEnum { id, members }, span))
}

/// `namespace A.B { ... }`, `declare module "x" { ... }` and
/// `declare global { ... }`. The body is kept as a plain block.
fn parse_namespace(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let is_global = parser.check_ident("global");
    parser.advance();
    if !is_global {
        if matches!(parser.current(), Token::String(_)) {
            parser.advance();
        } else {
            parser.expect_identifier()?;
            let mut guard = LoopGuard::new("namespace_name");
            while parser.eat(&Token::Dot) {
                guard.check()?;
                parser.expect_identifier()?;
            }
        }
    }
    if parser.check(&Token::LeftBrace) {
        return parse_block(parser);
    }
    parser.consume_semicolon();
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::EmptyStatement, span))
}

// ============================================================================
// Control Flow
// ============================================================================

fn parse_if(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::If)?;
    parser.expect(Token::LeftParen)?;
    let test = expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;
    let consequent = parse_statement(parser)?;
    let alternate = if parser.eat(&Token::Else) {
        Some(parse_statement(parser)?)
    } else {
        None
    };
    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::IfStatement {
            test,
            consequent,
            alternate,
        },
        span,
    ))
}

fn parse_for(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::For)?;
    let is_await = parser.eat(&Token::Await);
    parser.expect(Token::LeftParen)?;

    let init = match parser.current() {
        Token::Semicolon => None,
        Token::Var => Some(parser.with_no_in(true, |p| parse_variable_declaration(p, VarKind::Var))?),
        Token::Const => {
            Some(parser.with_no_in(true, |p| parse_variable_declaration(p, VarKind::Const))?)
        }
        Token::Let if starts_binding(parser.peek()) => {
            Some(parser.with_no_in(true, |p| parse_variable_declaration(p, VarKind::Let))?)
        }
        _ => Some(parser.with_no_in(true, expr::parse_expression)?),
    };

    if let Some(left) = init {
        let is_declaration = matches!(parser.node_kind(left), NodeKind::VariableDeclaration { .. });
        if parser.check_ident("of") {
            parser.advance();
            if !is_declaration {
                pattern::expression_to_pattern(parser, left)?;
            }
            let right = expr::parse_assignment(parser)?;
            parser.expect(Token::RightParen)?;
            let body = parse_statement(parser)?;
            let span = parser.finish_span(start);
            return Ok(parser.alloc(
                NodeKind::ForOfStatement {
                    left,
                    right,
                    body,
                    is_await,
                },
                span,
            ));
        }
        if parser.eat(&Token::In) {
            if !is_declaration {
                pattern::expression_to_pattern(parser, left)?;
            }
            let right = expr::parse_expression(parser)?;
            parser.expect(Token::RightParen)?;
            let body = parse_statement(parser)?;
            let span = parser.finish_span(start);
            return Ok(parser.alloc(NodeKind::ForInStatement { left, right, body }, span));
        }
    }

    parser.expect(Token::Semicolon)?;
    let test = if parser.check(&Token::Semicolon) {
        None
    } else {
        Some(expr::parse_expression(parser)?)
    };
    parser.expect(Token::Semicolon)?;
    let update = if parser.check(&Token::RightParen) {
        None
    } else {
        Some(expr::parse_expression(parser)?)
    };
    parser.expect(Token::RightParen)?;
    let body = parse_statement(parser)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::ForStatement {
            init,
            test,
            update,
            body,
        },
        span,
    ))
}

fn parse_while(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::While)?;
    parser.expect(Token::LeftParen)?;
    let test = expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;
    let body = parse_statement(parser)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::WhileStatement { test, body }, span))
}

fn parse_do_while(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::Do)?;
    let body = parse_statement(parser)?;
    parser.expect(Token::While)?;
    parser.expect(Token::LeftParen)?;
    let test = expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;
    parser.consume_semicolon();
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::DoWhileStatement { body, test }, span))
}

fn parse_switch(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::Switch)?;
    parser.expect(Token::LeftParen)?;
    let discriminant = expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;
    parser.expect(Token::LeftBrace)?;

    let mut cases = Vec::new();
    let mut guard = LoopGuard::new("switch_cases");
    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        let case_start = parser.current_span();
        let test = if parser.eat(&Token::Default) {
            None
        } else {
            parser.expect(Token::Case)?;
            Some(expr::parse_expression(parser)?)
        };
        parser.expect(Token::Colon)?;

        let mut consequent = Vec::new();
        let mut body_guard = LoopGuard::new("switch_case_body");
        while !matches!(
            parser.current(),
            Token::Case | Token::Default | Token::RightBrace | Token::Eof
        ) {
            body_guard.check()?;
            consequent.push(parse_statement(parser)?);
        }
        let span = parser.finish_span(case_start);
        cases.push(parser.alloc(NodeKind::SwitchCase { test, consequent }, span));
    }

    parser.expect(Token::RightBrace)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::SwitchStatement { discriminant, cases }, span))
}

fn parse_try(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::Try)?;
    let block = parse_block(parser)?;

    let handler = if parser.check(&Token::Catch) {
        let catch_start = parser.expect(Token::Catch)?;
        let param = if parser.eat(&Token::LeftParen) {
            let param = pattern::parse_binding_pattern(parser)?;
            if parser.eat(&Token::Colon) {
                types::parse_type(parser)?;
            }
            parser.expect(Token::RightParen)?;
            Some(param)
        } else {
            None
        };
        let body = parse_block(parser)?;
        let span = parser.finish_span(catch_start);
        Some(parser.alloc(NodeKind::CatchClause { param, body }, span))
    } else {
        None
    };

    let finalizer = if parser.eat(&Token::Finally) {
        Some(parse_block(parser)?)
    } else {
        None
    };

    if handler.is_none() && finalizer.is_none() {
        return Err(parser.unexpected_token(&[Token::Catch, Token::Finally]));
    }

    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::TryStatement {
            block,
            handler,
            finalizer,
        },
        span,
    ))
}

fn parse_return(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::Return)?;
    let argument = if parser.has_newline_before()
        || matches!(
            parser.current(),
            Token::Semicolon | Token::RightBrace | Token::Eof
        ) {
        None
    } else {
        Some(expr::parse_expression(parser)?)
    };
    parser.consume_semicolon();
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::ReturnStatement { argument }, span))
}

fn parse_break_continue(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let is_break = parser.check(&Token::Break);
    parser.advance();
    let label = match parser.current() {
        Token::Identifier(name) if !parser.has_newline_before() => {
            let name = name.clone();
            parser.advance();
            Some(name)
        }
        _ => None,
    };
    parser.consume_semicolon();
    let span = parser.finish_span(start);
    let kind = if is_break {
        NodeKind::BreakStatement { label }
    } else {
        NodeKind::ContinueStatement { label }
    };
    Ok(parser.alloc(kind, span))
}

fn parse_throw(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::Throw)?;
    let argument = expr::parse_expression(parser)?;
    parser.consume_semicolon();
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::ThrowStatement { argument }, span))
}

fn parse_labeled(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let (label, _) = parser.expect_identifier()?;
    parser.expect(Token::Colon)?;
    let body = parse_statement(parser)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::LabeledStatement { label, body }, span))
}

// ============================================================================
// Modules
// ============================================================================

fn parse_import(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::Import)?;

    // import type { A } from "x" / import type A from "x"
    let type_only = parser.check_ident("type")
        && match parser.peek() {
            Token::LeftBrace | Token::Star => true,
            Token::Identifier(name) => name != "from",
            _ => false,
        };
    if type_only {
        parser.advance();
    }

    // Side-effect import: import "polyfill"
    if matches!(parser.current(), Token::String(_)) {
        let source = parse_module_source(parser)?;
        skip_import_attributes(parser)?;
        parser.consume_semicolon();
        let span = parser.finish_span(start);
        return Ok(parser.alloc(
            NodeKind::ImportDeclaration {
                specifiers: Vec::new(),
                source,
                type_only,
            },
            span,
        ));
    }

    let mut specifiers = Vec::new();

    if matches!(parser.current(), Token::Identifier(_)) {
        let spec_start = parser.current_span();
        let local = pattern::parse_binding_identifier(parser)?;

        // import x = require("y")
        if parser.check(&Token::Equal) {
            return parse_import_equals(parser, start, local);
        }

        let span = parser.finish_span(spec_start);
        specifiers.push(parser.alloc(
            NodeKind::ImportSpecifier {
                kind: ImportKind::Default,
                local,
            },
            span,
        ));
        if !parser.eat(&Token::Comma) {
            return finish_import(parser, start, specifiers, type_only);
        }
    }

    if parser.check(&Token::Star) {
        let spec_start = parser.expect(Token::Star)?;
        if !parser.check_ident("as") {
            return Err(parser.unexpected_token(&[Token::Identifier("as".to_string())]));
        }
        parser.advance();
        let local = pattern::parse_binding_identifier(parser)?;
        let span = parser.finish_span(spec_start);
        specifiers.push(parser.alloc(
            NodeKind::ImportSpecifier {
                kind: ImportKind::Namespace,
                local,
            },
            span,
        ));
    } else {
        parser.expect(Token::LeftBrace)?;
        let mut guard = LoopGuard::new("import_specifiers");
        while !parser.check(&Token::RightBrace) && !parser.at_eof() {
            guard.check()?;
            specifiers.push(parse_named_import(parser)?);
            if !parser.check(&Token::RightBrace) {
                parser.expect(Token::Comma)?;
            }
        }
        parser.expect(Token::RightBrace)?;
    }

    finish_import(parser, start, specifiers, type_only)
}

fn finish_import(
    parser: &mut Parser,
    start: Span,
    specifiers: Vec<NodeId>,
    type_only: bool,
) -> Result<NodeId, ParseError> {
    if !parser.check_ident("from") {
        return Err(parser.unexpected_token(&[Token::Identifier("from".to_string())]));
    }
    parser.advance();
    let source = parse_module_source(parser)?;
    skip_import_attributes(parser)?;
    parser.consume_semicolon();
    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::ImportDeclaration {
            specifiers,
            source,
            type_only,
        },
        span,
    ))
}

/// `a`, `a as b`, `type a`, `"string name" as b`, `default as b`
fn parse_named_import(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    // Inline type modifier, unless `type` is itself the imported name
    if parser.check_ident("type")
        && !matches!(parser.peek(), Token::Comma | Token::RightBrace)
        && !parser.peek().is_ident("as")
    {
        parser.advance();
    }

    let name_span = parser.current_span();
    let imported = module_export_name(parser)?;
    let local = if parser.check_ident("as") {
        parser.advance();
        pattern::parse_binding_identifier(parser)?
    } else {
        parser.alloc(
            NodeKind::Identifier {
                name: imported.clone(),
            },
            name_span,
        )
    };
    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::ImportSpecifier {
            kind: ImportKind::Named(imported),
            local,
        },
        span,
    ))
}

/// Identifier, keyword or string used as an import/export name.
fn module_export_name(parser: &mut Parser) -> Result<String, ParseError> {
    let name = match parser.current() {
        Token::Identifier(name) | Token::String(name) => name.clone(),
        other => match other.keyword_text() {
            Some(kw) => kw.to_string(),
            None => return Err(parser.unexpected_token(&[Token::Identifier(String::new())])),
        },
    };
    parser.advance();
    Ok(name)
}

fn parse_module_source(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let span = parser.current_span();
    match parser.current() {
        Token::String(value) => {
            let value = value.clone();
            parser.advance();
            Ok(parser.alloc(NodeKind::Literal(LiteralValue::String(value)), span))
        }
        _ => Err(parser.unexpected_token(&[Token::String(String::new())])),
    }
}

/// `with { type: "json" }` / `assert { ... }`
fn skip_import_attributes(parser: &mut Parser) -> Result<(), ParseError> {
    let is_attributes = parser.check_ident("with")
        || (parser.check_ident("assert") && !parser.has_newline_before());
    if is_attributes && matches!(parser.peek(), Token::LeftBrace) {
        parser.advance();
        types::skip_balanced(parser, Token::LeftBrace, Token::RightBrace)?;
    }
    Ok(())
}

/// `import x = require("y")` and `import x = A.B`, kept as a `const`.
fn parse_import_equals(
    parser: &mut Parser,
    start: Span,
    local: NodeId,
) -> Result<NodeId, ParseError> {
    parser.expect(Token::Equal)?;
    let init = expr::parse_assignment(parser)?;
    parser.consume_semicolon();
    let declarator_start = parser.node_span(local);
    let declarator_span = parser.finish_span(declarator_start);
    let declarator = parser.alloc(
        NodeKind::VariableDeclarator {
            id: local,
            type_annotation: None,
            init: Some(init),
        },
        declarator_span,
    );
    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::VariableDeclaration {
            kind: VarKind::Const,
            declarations: vec![declarator],
        },
        span,
    ))
}

fn parse_export(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::Export)?;

    // export default ...
    if parser.eat(&Token::Default) {
        let declaration = match parser.current() {
            Token::Function => {
                let decl_start = parser.current_span();
                parse_function_declaration(parser, decl_start)?
            }
            Token::Class => parse_class(parser, false)?,
            Token::Identifier(name)
                if (name == "async" && matches!(parser.peek(), Token::Function))
                    || (name == "abstract" && matches!(parser.peek(), Token::Class))
                    || (name == "interface"
                        && matches!(parser.peek(), Token::Identifier(_))) =>
            {
                parse_statement(parser)?
            }
            _ => {
                let expression = expr::parse_assignment(parser)?;
                parser.consume_semicolon();
                expression
            }
        };
        let span = parser.finish_span(start);
        return Ok(parser.alloc(NodeKind::ExportDefaultDeclaration { declaration }, span));
    }

    // export = value
    if parser.eat(&Token::Equal) {
        let declaration = expr::parse_assignment(parser)?;
        parser.consume_semicolon();
        let span = parser.finish_span(start);
        return Ok(parser.alloc(NodeKind::ExportDefaultDeclaration { declaration }, span));
    }

    // export type { A } from "x"
    if parser.check_ident("type") && matches!(parser.peek(), Token::LeftBrace | Token::Star) {
        parser.advance();
    }

    // export * from "x" / export * as ns from "x"
    if parser.eat(&Token::Star) {
        let mut specifiers = Vec::new();
        if parser.check_ident("as") {
            parser.advance();
            let exported_span = parser.current_span();
            let exported = module_export_name(parser)?;
            let local = parser.alloc(
                NodeKind::Identifier {
                    name: "*".to_string(),
                },
                exported_span,
            );
            let span = parser.finish_span(exported_span);
            specifiers.push(parser.alloc(NodeKind::ExportSpecifier { local, exported }, span));
        }
        if !parser.check_ident("from") {
            return Err(parser.unexpected_token(&[Token::Identifier("from".to_string())]));
        }
        parser.advance();
        let source = parse_module_source(parser)?;
        skip_import_attributes(parser)?;
        parser.consume_semicolon();
        let span = parser.finish_span(start);
        return Ok(parser.alloc(
            NodeKind::ExportNamedDeclaration {
                declaration: None,
                specifiers,
                source: Some(source),
            },
            span,
        ));
    }

    // export { a, b as c } [from "x"]
    if parser.eat(&Token::LeftBrace) {
        let mut specifiers = Vec::new();
        let mut guard = LoopGuard::new("export_specifiers");
        while !parser.check(&Token::RightBrace) && !parser.at_eof() {
            guard.check()?;
            specifiers.push(parse_export_specifier(parser)?);
            if !parser.check(&Token::RightBrace) {
                parser.expect(Token::Comma)?;
            }
        }
        parser.expect(Token::RightBrace)?;
        let source = if parser.check_ident("from") {
            parser.advance();
            let source = parse_module_source(parser)?;
            skip_import_attributes(parser)?;
            Some(source)
        } else {
            None
        };
        parser.consume_semicolon();
        let span = parser.finish_span(start);
        return Ok(parser.alloc(
            NodeKind::ExportNamedDeclaration {
                declaration: None,
                specifiers,
                source,
            },
            span,
        ));
    }

    // export const / function / class / type / interface / enum ...
    let declaration = parse_statement(parser)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::ExportNamedDeclaration {
            declaration: Some(declaration),
            specifiers: Vec::new(),
            source: None,
        },
        span,
    ))
}

fn parse_export_specifier(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    if parser.check_ident("type")
        && !matches!(parser.peek(), Token::Comma | Token::RightBrace)
        && !parser.peek().is_ident("as")
    {
        parser.advance();
    }
    let local_span = parser.current_span();
    let local_name = module_export_name(parser)?;
    let local = parser.alloc(
        NodeKind::Identifier {
            name: local_name.clone(),
        },
        local_span,
    );
    let exported = if parser.check_ident("as") {
        parser.advance();
        module_export_name(parser)?
    } else {
        local_name
    };
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::ExportSpecifier { local, exported }, span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SyntaxTree;

    fn parse(source: &str) -> SyntaxTree {
        Parser::new(source)
            .unwrap()
            .parse()
            .unwrap_or_else(|errors| panic!("{:?} failed: {:?}", source, errors))
    }

    fn top_level(tree: &SyntaxTree) -> Vec<NodeId> {
        match tree.kind(tree.root()) {
            NodeKind::Program { body } => body.clone(),
            other => panic!("expected program, got {:?}", other),
        }
    }

    #[test]
    fn test_import_forms() {
        let tree = parse(
            r#"
            import { z } from "zod";
            import * as zod from "zod";
            import zDefault, { ZodError as ZE, type ZodType } from "zod";
            import "side-effect";
            import type { Infer } from "./types";
            "#,
        );
        let body = top_level(&tree);
        assert_eq!(body.len(), 5);
        match tree.kind(body[2]) {
            NodeKind::ImportDeclaration { specifiers, .. } => {
                assert_eq!(specifiers.len(), 3);
                assert!(matches!(
                    tree.kind(specifiers[1]),
                    NodeKind::ImportSpecifier { kind: ImportKind::Named(name), .. } if name == "ZodError"
                ));
            }
            other => panic!("expected import, got {:?}", other),
        }
        assert!(matches!(
            tree.kind(body[4]),
            NodeKind::ImportDeclaration { type_only: true, .. }
        ));
    }

    #[test]
    fn test_typescript_declarations() {
        let tree = parse(
            r#"
            type User = z.infer<typeof UserSchema>;
            interface Props extends Base<string> { name: string; onChange(v: string): void }
            const enum Color { Red = "red", Green = "green" }
            declare module "zod" { interface ZodType { custom(): void } }
            abstract class Repo<T> implements Store<T> { private items: T[] = []; abstract find(id: string): T; }
            "#,
        );
        assert_eq!(top_level(&tree).len(), 5);
    }

    #[test]
    fn test_for_variants() {
        let tree = parse(
            r#"
            for (let i = 0; i < n; i++) {}
            for (const key in obj) {}
            for (const { a, b } of items) {}
            for await (const chunk of stream) {}
            for (;;) break;
            "#,
        );
        let body = top_level(&tree);
        assert!(matches!(tree.kind(body[1]), NodeKind::ForInStatement { .. }));
        assert!(matches!(
            tree.kind(body[3]),
            NodeKind::ForOfStatement { is_await: true, .. }
        ));
    }

    #[test]
    fn test_class_members() {
        let tree = parse(
            r#"
            class Service extends Base {
                static instance?: Service;
                #secret = 1;
                [key: string]: unknown;
                static { init(); }
                constructor(private readonly schema: Schema, public name = "x") { super(); }
                get value() { return this.#secret; }
                async load<T>(id: string): Promise<T> { return await fetch(id); }
            }
            "#,
        );
        let body = top_level(&tree);
        match tree.kind(body[0]) {
            NodeKind::ClassDeclaration(class) => {
                assert_eq!(class.members.len(), 6);
                assert!(class.super_class.is_some());
            }
            other => panic!("expected class, got {:?}", other),
        }
    }

    #[test]
    fn test_exports() {
        let tree = parse(
            r#"
            export const schema = z.object({});
            export default function handler() {}
            export { a, b as c } from "./mod";
            export * from "./all";
            export type { T } from "./types";
            "#,
        );
        let body = top_level(&tree);
        assert_eq!(body.len(), 5);
        assert!(matches!(
            tree.kind(body[1]),
            NodeKind::ExportDefaultDeclaration { .. }
        ));
    }

    #[test]
    fn test_asi_and_return_newline() {
        let tree = parse("function f() {\n  return\n  1\n}\nconst a = 1\nconst b = 2");
        let body = top_level(&tree);
        assert_eq!(body.len(), 3);
        let NodeKind::FunctionDeclaration(function) = tree.kind(body[0]) else {
            panic!("expected function");
        };
        let block = function.body.unwrap();
        match tree.kind(block) {
            NodeKind::BlockStatement { body } => {
                assert_eq!(body.len(), 2);
                assert!(matches!(
                    tree.kind(body[0]),
                    NodeKind::ReturnStatement { argument: None }
                ));
            }
            other => panic!("expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_try_catch_with_typed_param() {
        let tree = parse("try { run() } catch (e: unknown) { log(e) } finally { done() }");
        let body = top_level(&tree);
        assert!(matches!(
            tree.kind(body[0]),
            NodeKind::TryStatement {
                handler: Some(_),
                finalizer: Some(_),
                ..
            }
        ));
    }
}
