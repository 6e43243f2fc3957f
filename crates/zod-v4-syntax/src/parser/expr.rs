//! Expression parsing

use super::guards::LoopGuard;
use super::precedence::{
    assignment_operator, binary_operator, get_precedence, is_logical, is_right_associative,
    unary_operator, Precedence,
};
use super::{pattern, stmt, types, ParseError, Parser};
use crate::ast::{Function, LiteralValue, NodeId, NodeKind, PropertyKind};
use crate::token::{Span, Token};

/// Parse an expression, including comma sequences.
pub fn parse_expression(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let first = parse_assignment(parser)?;
    if !parser.check(&Token::Comma) {
        return Ok(first);
    }

    let mut expressions = vec![first];
    let mut guard = LoopGuard::new("sequence_expression");
    while parser.eat(&Token::Comma) {
        guard.check()?;
        expressions.push(parse_assignment(parser)?);
    }
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::SequenceExpression { expressions }, span))
}

/// Parse an assignment expression (the `AssignmentExpression` production:
/// arrows, yield, conditionals and assignments).
pub fn parse_assignment(parser: &mut Parser) -> Result<NodeId, ParseError> {
    parser.enter("expression")?;
    let result = parse_assignment_inner(parser);
    parser.leave();
    result
}

fn parse_assignment_inner(parser: &mut Parser) -> Result<NodeId, ParseError> {
    if let Some(arrow) = try_parse_arrow(parser)? {
        return Ok(arrow);
    }

    if parser.check(&Token::Yield) {
        return parse_yield(parser);
    }

    let start = parser.current_span();
    let left = parse_conditional(parser)?;

    let Some(operator) = assignment_operator(parser.current()) else {
        return Ok(left);
    };
    if operator == "=" {
        pattern::expression_to_pattern(parser, left)?;
    }
    parser.advance();
    let right = parse_assignment(parser)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::AssignmentExpression {
            operator,
            left,
            right,
        },
        span,
    ))
}

// ============================================================================
// Arrow Functions
// ============================================================================

/// Token following the parenthesized group that starts `offset` tokens
/// ahead, or `None` if the group is unbalanced.
fn token_after_parens(parser: &Parser, offset: usize) -> Option<&Token> {
    let mut depth = 0usize;
    let mut i = offset;
    loop {
        match parser.peek_nth(i) {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(parser.peek_nth(i + 1));
                }
            }
            Token::Eof => return None,
            _ => {}
        }
        i += 1;
    }
}

fn try_parse_arrow(parser: &mut Parser) -> Result<Option<NodeId>, ParseError> {
    let start = parser.current_span();
    match parser.current() {
        // x => ...
        Token::Identifier(_) if matches!(parser.peek(), Token::Arrow) => {
            parse_arrow_function(parser, start, false).map(Some)
        }
        // async x => ... / async (x) => ...
        Token::Identifier(name) if name == "async" => match parser.peek() {
            Token::Identifier(_) if matches!(parser.peek_nth(2), Token::Arrow) => {
                parser.advance();
                parse_arrow_function(parser, start, true).map(Some)
            }
            Token::LeftParen | Token::Less => Ok(parser.try_parse(|p| {
                p.advance();
                parse_arrow_function(p, start, true)
            })),
            _ => Ok(None),
        },
        Token::LeftParen => match token_after_parens(parser, 0) {
            Some(Token::Arrow) => parse_arrow_function(parser, start, false).map(Some),
            // Return type annotation, or the `:` of a conditional
            Some(Token::Colon) => Ok(parser.try_parse(|p| parse_arrow_function(p, start, false))),
            _ => Ok(None),
        },
        // Generic arrow: <T>(x: T) => x
        Token::Less => Ok(parser.try_parse(|p| parse_arrow_function(p, start, false))),
        _ => Ok(None),
    }
}

/// Parse an arrow function after any `async` keyword has been consumed.
fn parse_arrow_function(
    parser: &mut Parser,
    start: Span,
    is_async: bool,
) -> Result<NodeId, ParseError> {
    let params = if matches!(parser.current(), Token::Identifier(_)) {
        let pattern = pattern::parse_binding_identifier(parser)?;
        let span = parser.node_span(pattern);
        vec![parser.alloc(
            NodeKind::Param {
                pattern,
                type_annotation: None,
                default: None,
                optional: false,
            },
            span,
        )]
    } else {
        if parser.check(&Token::Less) {
            types::skip_type_parameters(parser)?;
        }
        parser.expect(Token::LeftParen)?;
        let params = stmt::parse_parameters(parser)?;
        parser.expect(Token::RightParen)?;
        params
    };

    let return_type = if parser.eat(&Token::Colon) {
        Some(types::parse_type_annotation(parser)?)
    } else {
        None
    };

    parser.expect(Token::Arrow)?;

    let body = parser.with_no_in(false, |p| {
        if p.check(&Token::LeftBrace) {
            stmt::parse_block(p)
        } else {
            parse_assignment(p)
        }
    })?;

    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::ArrowFunctionExpression(Function {
            id: None,
            params,
            body: Some(body),
            return_type,
            is_async,
            is_generator: false,
        }),
        span,
    ))
}

fn parse_yield(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::Yield)?;
    let delegate = parser.eat(&Token::Star);
    let has_argument = delegate
        || !(parser.has_newline_before()
            || matches!(
                parser.current(),
                Token::RightParen
                    | Token::RightBracket
                    | Token::RightBrace
                    | Token::Comma
                    | Token::Semicolon
                    | Token::Colon
                    | Token::Eof
            ));
    let argument = if has_argument {
        Some(parse_assignment(parser)?)
    } else {
        None
    };
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::YieldExpression { argument, delegate }, span))
}

// ============================================================================
// Operators
// ============================================================================

fn parse_conditional(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let test = parse_binary(parser, Precedence::None as u8)?;
    if !parser.eat(&Token::Question) {
        return Ok(test);
    }

    let consequent = parser.with_no_in(false, parse_assignment)?;
    parser.expect(Token::Colon)?;
    let alternate = parse_assignment(parser)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::ConditionalExpression {
            test,
            consequent,
            alternate,
        },
        span,
    ))
}

/// Precedence climbing over binary operators, plus the TypeScript `as` and
/// `satisfies` operators which bind like relational operators.
fn parse_binary(parser: &mut Parser, min_prec: u8) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let mut left = parse_unary(parser)?;
    let mut guard = LoopGuard::new("binary_expression");

    loop {
        guard.check()?;

        let relational = Precedence::Relational as u8;
        if (parser.check_ident("as") || parser.check_ident("satisfies"))
            && !parser.has_newline_before()
            && relational > min_prec
        {
            let is_as = parser.check_ident("as");
            parser.advance();
            let type_annotation = if is_as && parser.check(&Token::Const) {
                types::parse_as_const(parser)?
            } else {
                types::parse_type_annotation(parser)?
            };
            let span = parser.finish_span(start);
            let kind = if is_as {
                NodeKind::TsAsExpression {
                    expression: left,
                    type_annotation,
                }
            } else {
                NodeKind::TsSatisfiesExpression {
                    expression: left,
                    type_annotation,
                }
            };
            left = parser.alloc(kind, span);
            continue;
        }

        let token = parser.current().clone();
        if matches!(token, Token::In) && parser.no_in() {
            break;
        }
        let prec = get_precedence(&token) as u8;
        if prec == 0 || prec <= min_prec {
            break;
        }
        let Some(operator) = binary_operator(&token) else {
            break;
        };
        parser.advance();

        // Left-associative operands recurse at most once per precedence
        // level; a right-associative chain (`a ** b ** c`) nests per operator.
        let right = if is_right_associative(&token) {
            parser.enter("binary expression")?;
            let right = parse_binary(parser, prec - 1);
            parser.leave();
            right?
        } else {
            parse_binary(parser, prec)?
        };
        let span = parser.finish_span(start);
        let kind = if is_logical(&token) {
            NodeKind::LogicalExpression {
                operator,
                left,
                right,
            }
        } else {
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            }
        };
        left = parser.alloc(kind, span);
    }

    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();

    if let Some(operator) = unary_operator(parser.current()) {
        parser.advance();
        let argument = parse_operand(parser)?;
        let span = parser.finish_span(start);
        return Ok(parser.alloc(NodeKind::UnaryExpression { operator, argument }, span));
    }

    match parser.current() {
        Token::PlusPlus | Token::MinusMinus => {
            let operator = if parser.check(&Token::PlusPlus) {
                "++"
            } else {
                "--"
            };
            parser.advance();
            let argument = parse_operand(parser)?;
            let span = parser.finish_span(start);
            Ok(parser.alloc(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: true,
                    argument,
                },
                span,
            ))
        }
        Token::Await => {
            parser.advance();
            let argument = parse_operand(parser)?;
            let span = parser.finish_span(start);
            Ok(parser.alloc(NodeKind::AwaitExpression { argument }, span))
        }
        Token::Less => Err(ParseError::unsupported(
            "JSX or angle-bracket type assertion",
            start,
        )
        .with_suggestion("use `expr as T` instead of `<T>expr`")),
        _ => parse_postfix(parser),
    }
}

/// Operand of a prefix operator. Each operator nests one level, so a run of
/// `!`, `-` or `await` is bounded like any other nesting.
fn parse_operand(parser: &mut Parser) -> Result<NodeId, ParseError> {
    parser.enter("unary expression")?;
    let result = parse_unary(parser);
    parser.leave();
    result
}

fn parse_postfix(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let argument = parse_left_hand_side(parser)?;

    if (parser.check(&Token::PlusPlus) || parser.check(&Token::MinusMinus))
        && !parser.has_newline_before()
    {
        let operator = if parser.check(&Token::PlusPlus) {
            "++"
        } else {
            "--"
        };
        parser.advance();
        let span = parser.finish_span(start);
        return Ok(parser.alloc(
            NodeKind::UpdateExpression {
                operator,
                prefix: false,
                argument,
            },
            span,
        ));
    }

    Ok(argument)
}

// ============================================================================
// Calls and Member Access
// ============================================================================

/// Parse a primary expression followed by any number of member accesses,
/// calls, tagged templates and non-null assertions.
pub fn parse_left_hand_side(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let mut object = if parser.check(&Token::New) {
        parse_new(parser)?
    } else {
        parse_primary(parser)?
    };
    let mut guard = LoopGuard::new("call_member_chain");

    loop {
        guard.check()?;
        object = match parser.current() {
            Token::Dot => {
                parser.advance();
                let property = parse_member_name(parser)?;
                member(parser, start, object, property, false, false)
            }
            Token::QuestionDot => {
                parser.advance();
                match parser.current() {
                    Token::LeftParen => {
                        let arguments = parse_arguments(parser)?;
                        call(parser, start, object, arguments, true)
                    }
                    Token::LeftBracket => {
                        parser.advance();
                        let property = parser.with_no_in(false, parse_expression)?;
                        parser.expect(Token::RightBracket)?;
                        member(parser, start, object, property, true, true)
                    }
                    Token::Less => {
                        types::parse_type_arguments(parser)?;
                        let arguments = parse_arguments(parser)?;
                        call(parser, start, object, arguments, true)
                    }
                    _ => {
                        let property = parse_member_name(parser)?;
                        member(parser, start, object, property, false, true)
                    }
                }
            }
            Token::LeftBracket => {
                parser.advance();
                let property = parser.with_no_in(false, parse_expression)?;
                parser.expect(Token::RightBracket)?;
                member(parser, start, object, property, true, false)
            }
            Token::LeftParen => {
                let arguments = parse_arguments(parser)?;
                call(parser, start, object, arguments, false)
            }
            Token::Template(raw) => {
                let raw = raw.clone();
                let quasi_span = parser.current_span();
                parser.advance();
                let quasi = parser.alloc(NodeKind::TemplateLiteral { raw }, quasi_span);
                let span = parser.finish_span(start);
                parser.alloc(NodeKind::TaggedTemplateExpression { tag: object, quasi }, span)
            }
            Token::Bang if !parser.has_newline_before() => {
                parser.advance();
                let span = parser.finish_span(start);
                parser.alloc(NodeKind::TsNonNullExpression { expression: object }, span)
            }
            Token::Less => {
                // f<T>(x): commit only if the type arguments are followed by a call
                let is_call = parser
                    .try_parse(|p| {
                        types::parse_type_arguments(p)?;
                        if p.check(&Token::LeftParen) {
                            Ok(())
                        } else {
                            Err(p.unexpected_token(&[Token::LeftParen]))
                        }
                    })
                    .is_some();
                if !is_call {
                    break;
                }
                let arguments = parse_arguments(parser)?;
                call(parser, start, object, arguments, false)
            }
            _ => break,
        };
    }

    Ok(object)
}

fn member(
    parser: &mut Parser,
    start: Span,
    object: NodeId,
    property: NodeId,
    computed: bool,
    optional: bool,
) -> NodeId {
    let span = parser.finish_span(start);
    parser.alloc(
        NodeKind::MemberExpression {
            object,
            property,
            computed,
            optional,
        },
        span,
    )
}

fn call(
    parser: &mut Parser,
    start: Span,
    callee: NodeId,
    arguments: Vec<NodeId>,
    optional: bool,
) -> NodeId {
    let span = parser.finish_span(start);
    parser.alloc(
        NodeKind::CallExpression {
            callee,
            arguments,
            optional,
        },
        span,
    )
}

/// Property name after `.`: identifiers, keywords and private names.
fn parse_member_name(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let span = parser.current_span();
    let kind = match parser.current() {
        Token::Identifier(name) => NodeKind::Identifier { name: name.clone() },
        Token::PrivateName(name) => NodeKind::PrivateName { name: name.clone() },
        other => match other.keyword_text() {
            Some(kw) => NodeKind::Identifier {
                name: kw.to_string(),
            },
            None => return Err(parser.unexpected_token(&[Token::Identifier(String::new())])),
        },
    };
    parser.advance();
    Ok(parser.alloc(kind, span))
}

fn parse_new(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::New)?;

    // new.target
    if parser.check(&Token::Dot) {
        let meta = parser.alloc(
            NodeKind::Identifier {
                name: "new".to_string(),
            },
            start,
        );
        parser.advance();
        let property = parse_member_name(parser)?;
        return Ok(member(parser, start, meta, property, false, false));
    }

    let callee_start = parser.current_span();
    let mut callee = if parser.check(&Token::New) {
        parser.enter("new expression")?;
        let inner = parse_new(parser);
        parser.leave();
        inner?
    } else {
        parse_primary(parser)?
    };
    let mut guard = LoopGuard::new("new_callee");
    loop {
        guard.check()?;
        callee = match parser.current() {
            Token::Dot => {
                parser.advance();
                let property = parse_member_name(parser)?;
                member(parser, callee_start, callee, property, false, false)
            }
            Token::LeftBracket => {
                parser.advance();
                let property = parser.with_no_in(false, parse_expression)?;
                parser.expect(Token::RightBracket)?;
                member(parser, callee_start, callee, property, true, false)
            }
            _ => break,
        };
    }

    if parser.check(&Token::Less) {
        types::parse_type_arguments(parser)?;
    }

    let arguments = if parser.check(&Token::LeftParen) {
        parse_arguments(parser)?
    } else {
        Vec::new()
    };
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::NewExpression { callee, arguments }, span))
}

/// Parse a parenthesized argument list.
pub fn parse_arguments(parser: &mut Parser) -> Result<Vec<NodeId>, ParseError> {
    parser.expect(Token::LeftParen)?;
    let mut arguments = Vec::new();
    let mut guard = LoopGuard::new("call_arguments");

    while !parser.check(&Token::RightParen) && !parser.at_eof() {
        guard.check()?;
        let argument = if parser.check(&Token::DotDotDot) {
            parse_spread(parser)?
        } else {
            parser.with_no_in(false, parse_assignment)?
        };
        arguments.push(argument);
        if !parser.check(&Token::RightParen) {
            parser.expect(Token::Comma)?;
        }
    }

    parser.expect(Token::RightParen)?;
    Ok(arguments)
}

fn parse_spread(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::DotDotDot)?;
    let argument = parser.with_no_in(false, parse_assignment)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::SpreadElement { argument }, span))
}

// ============================================================================
// Primary Expressions
// ============================================================================

/// Parse a primary expression (literal, identifier, grouped expression, etc.).
pub fn parse_primary(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let span = parser.current_span();
    let kind = match parser.current() {
        Token::Identifier(name) => {
            if name == "async"
                && matches!(parser.peek(), Token::Function)
                && !next_on_new_line(parser)
            {
                return parse_function_expression(parser);
            }
            NodeKind::Identifier { name: name.clone() }
        }
        Token::Number(raw) => NodeKind::Literal(LiteralValue::Number(raw.clone())),
        Token::String(value) => NodeKind::Literal(LiteralValue::String(value.clone())),
        Token::Regex(raw) => NodeKind::Literal(LiteralValue::RegExp(raw.clone())),
        Token::Template(raw) => NodeKind::TemplateLiteral { raw: raw.clone() },
        Token::True => NodeKind::Literal(LiteralValue::Boolean(true)),
        Token::False => NodeKind::Literal(LiteralValue::Boolean(false)),
        Token::Null => NodeKind::Literal(LiteralValue::Null),
        Token::This => NodeKind::ThisExpression,
        Token::Super => NodeKind::Super,
        Token::PrivateName(name) => NodeKind::PrivateName { name: name.clone() },
        // import(...) and import.meta
        Token::Import => NodeKind::Identifier {
            name: "import".to_string(),
        },
        Token::LeftParen => {
            parser.advance();
            let inner = parser.with_no_in(false, parse_expression)?;
            parser.expect(Token::RightParen)?;
            return Ok(inner);
        }
        Token::LeftBracket => return parse_array_literal(parser),
        Token::LeftBrace => return parse_object_literal(parser),
        Token::Function => return parse_function_expression(parser),
        Token::Class => return stmt::parse_class(parser, true),
        Token::At => return Err(ParseError::unsupported("decorators", span)),
        _ => return Err(parser.unexpected_token(&[])),
    };
    parser.advance();
    Ok(parser.alloc(kind, span))
}

fn next_on_new_line(parser: &Parser) -> bool {
    parser.peek_span(1).line > parser.current_span().line
}

fn parse_function_expression(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let is_async = parser.check_ident("async");
    if is_async {
        parser.advance();
    }
    parser.expect(Token::Function)?;
    let is_generator = parser.eat(&Token::Star);
    let id = if matches!(parser.current(), Token::Identifier(_)) {
        Some(pattern::parse_binding_identifier(parser)?)
    } else {
        None
    };
    let function = stmt::parse_function_rest(parser, id, is_async, is_generator)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::FunctionExpression(function), span))
}

fn parse_array_literal(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::LeftBracket)?;
    let mut elements = Vec::new();
    let mut guard = LoopGuard::new("array_literal");

    while !parser.check(&Token::RightBracket) && !parser.at_eof() {
        guard.check()?;
        if parser.eat(&Token::Comma) {
            elements.push(None);
            continue;
        }
        let element = if parser.check(&Token::DotDotDot) {
            parse_spread(parser)?
        } else {
            parser.with_no_in(false, parse_assignment)?
        };
        elements.push(Some(element));
        if !parser.check(&Token::RightBracket) {
            parser.expect(Token::Comma)?;
        }
    }

    parser.expect(Token::RightBracket)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::ArrayExpression { elements }, span))
}

fn parse_object_literal(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::LeftBrace)?;
    let mut properties = Vec::new();
    let mut guard = LoopGuard::new("object_literal");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        let property = if parser.check(&Token::DotDotDot) {
            parse_spread(parser)?
        } else {
            parser.with_no_in(false, parse_object_member)?
        };
        properties.push(property);
        if !parser.check(&Token::RightBrace) {
            parser.expect(Token::Comma)?;
        }
    }

    parser.expect(Token::RightBrace)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::ObjectExpression { properties }, span))
}

/// Whether `token` can begin a property name (used to tell `get x() {}`
/// apart from a property named `get`).
pub fn is_property_name_start(token: &Token) -> bool {
    matches!(
        token,
        Token::Identifier(_)
            | Token::String(_)
            | Token::Number(_)
            | Token::LeftBracket
            | Token::PrivateName(_)
            | Token::Star
    ) || token.keyword_text().is_some()
}

fn parse_object_member(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let mut is_async = false;
    let mut kind = PropertyKind::Init;

    if parser.check_ident("async") && is_property_name_start(parser.peek()) {
        parser.advance();
        is_async = true;
    } else if parser.check_ident("get") && is_property_name_start(parser.peek()) {
        parser.advance();
        kind = PropertyKind::Get;
    } else if parser.check_ident("set") && is_property_name_start(parser.peek()) {
        parser.advance();
        kind = PropertyKind::Set;
    }
    let is_generator = parser.eat(&Token::Star);

    let (key, computed) = parse_property_key(parser)?;

    let is_method = is_async
        || is_generator
        || kind != PropertyKind::Init
        || parser.check(&Token::LeftParen)
        || parser.check(&Token::Less);
    if is_method {
        let func_start = parser.current_span();
        let function = stmt::parse_function_rest(parser, None, is_async, is_generator)?;
        let func_span = parser.finish_span(func_start);
        let value = parser.alloc(NodeKind::FunctionExpression(function), func_span);
        let span = parser.finish_span(start);
        return Ok(parser.alloc(
            NodeKind::Property {
                key,
                value,
                kind,
                computed,
                shorthand: false,
                method: kind == PropertyKind::Init,
            },
            span,
        ));
    }

    if parser.eat(&Token::Colon) {
        let value = parse_assignment(parser)?;
        let span = parser.finish_span(start);
        return Ok(parser.alloc(
            NodeKind::Property {
                key,
                value,
                kind,
                computed,
                shorthand: false,
                method: false,
            },
            span,
        ));
    }

    if computed || !matches!(parser.node_kind(key), NodeKind::Identifier { .. }) {
        return Err(parser.unexpected_token(&[Token::Colon]));
    }

    // Shorthand `{ a }`, or `{ a = 1 }` when the object is a pattern in disguise
    let value = if parser.eat(&Token::Equal) {
        let right = parse_assignment(parser)?;
        let span = parser.finish_span(start);
        parser.alloc(NodeKind::AssignmentPattern { left: key, right }, span)
    } else {
        key
    };
    let span = parser.finish_span(start);
    Ok(parser.alloc(
        NodeKind::Property {
            key,
            value,
            kind,
            computed: false,
            shorthand: true,
            method: false,
        },
        span,
    ))
}

/// Parse an object or class member key. Returns the key node and whether it
/// was computed (`[expr]`).
pub fn parse_property_key(parser: &mut Parser) -> Result<(NodeId, bool), ParseError> {
    let span = parser.current_span();
    let kind = match parser.current() {
        Token::Identifier(name) => NodeKind::Identifier { name: name.clone() },
        Token::String(value) => NodeKind::Literal(LiteralValue::String(value.clone())),
        Token::Number(raw) => NodeKind::Literal(LiteralValue::Number(raw.clone())),
        Token::PrivateName(name) => NodeKind::PrivateName { name: name.clone() },
        Token::LeftBracket => {
            parser.advance();
            let key = parser.with_no_in(false, parse_assignment)?;
            parser.expect(Token::RightBracket)?;
            return Ok((key, true));
        }
        other => match other.keyword_text() {
            Some(kw) => NodeKind::Identifier {
                name: kw.to_string(),
            },
            None => return Err(parser.unexpected_token(&[Token::Identifier(String::new())])),
        },
    };
    parser.advance();
    Ok((parser.alloc(kind, span), false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_expr(source: &str) -> (Parser, NodeId) {
        let mut parser = Parser::new(source).unwrap();
        let id = parse_expression(&mut parser).unwrap();
        assert!(parser.at_eof(), "unparsed input in {:?}", source);
        (parser, id)
    }

    #[test]
    fn test_member_call_chain() {
        let (parser, id) = parse_expr("z.string().email()");
        match parser.node_kind(id) {
            NodeKind::CallExpression { callee, .. } => match parser.node_kind(*callee) {
                NodeKind::MemberExpression { object, .. } => {
                    assert!(matches!(
                        parser.node_kind(*object),
                        NodeKind::CallExpression { .. }
                    ));
                }
                other => panic!("expected member callee, got {:?}", other),
            },
            other => panic!("expected call, got {:?}", other),
        }
        assert_eq!(parser.node_span(id).end, 18);
    }

    #[test]
    fn test_binary_precedence() {
        let (parser, id) = parse_expr("a + b * c");
        match parser.node_kind(id) {
            NodeKind::BinaryExpression {
                operator, right, ..
            } => {
                assert_eq!(*operator, "+");
                assert!(matches!(
                    parser.node_kind(*right),
                    NodeKind::BinaryExpression { operator: "*", .. }
                ));
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_arrow_with_block_and_expression_bodies() {
        let (parser, id) = parse_expr("(val, ctx) => { ctx.addIssue() }");
        assert!(matches!(
            parser.node_kind(id),
            NodeKind::ArrowFunctionExpression(f) if f.params.len() == 2
        ));
        let (parser, id) = parse_expr("x => x > 1");
        assert!(matches!(
            parser.node_kind(id),
            NodeKind::ArrowFunctionExpression(f) if f.params.len() == 1
        ));
    }

    #[test]
    fn test_typed_arrow_and_conditional_with_parens() {
        let (parser, id) = parse_expr("(a: string): boolean => a.length > 0");
        assert!(matches!(
            parser.node_kind(id),
            NodeKind::ArrowFunctionExpression(_)
        ));
        let (parser, id) = parse_expr("ok ? (a) : b");
        assert!(matches!(
            parser.node_kind(id),
            NodeKind::ConditionalExpression { .. }
        ));
    }

    #[test]
    fn test_as_const() {
        let (parser, id) = parse_expr("['a', 'b'] as const");
        match parser.node_kind(id) {
            NodeKind::TsAsExpression {
                type_annotation, ..
            } => assert!(matches!(
                parser.node_kind(*type_annotation),
                NodeKind::TsType { name: Some(n) } if n == "const"
            )),
            other => panic!("expected as-expression, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_call_vs_comparison() {
        let (parser, id) = parse_expr("useState<string>('')");
        assert!(matches!(
            parser.node_kind(id),
            NodeKind::CallExpression { .. }
        ));
        let (parser, id) = parse_expr("i < items.length");
        assert!(matches!(
            parser.node_kind(id),
            NodeKind::BinaryExpression { operator: "<", .. }
        ));
    }

    #[test]
    fn test_object_literal_members() {
        let (parser, id) = parse_expr("({ a, b: 1, [k]: 2, get c() { return 1 }, m() {}, ...rest })");
        match parser.node_kind(id) {
            NodeKind::ObjectExpression { properties } => assert_eq!(properties.len(), 6),
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_chaining_and_non_null() {
        let (parser, id) = parse_expr("result.error?.format()!");
        assert!(matches!(
            parser.node_kind(id),
            NodeKind::TsNonNullExpression { .. }
        ));
    }

    #[test]
    fn test_keyword_member_names() {
        let (parser, id) = parse_expr("schema.default('x').catch(null)");
        assert!(matches!(
            parser.node_kind(id),
            NodeKind::CallExpression { .. }
        ));
    }
}
