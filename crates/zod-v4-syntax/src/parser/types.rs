//! TypeScript type parsing.
//!
//! Types are consumed completely but kept opaque: each annotation becomes a
//! single `TsType` node spanning its text, named when it is a simple
//! reference. Object types, tuples and mapped types are skipped as balanced
//! token groups.

use super::guards::LoopGuard;
use super::{ParseError, Parser};
use crate::ast::{NodeId, NodeKind};
use crate::token::Token;

/// Parse a type annotation (the part after `:`).
pub fn parse_type_annotation(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let name = parse_type(parser)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::TsType { name }, span))
}

/// Parse `const` after `as`, producing the `as const` marker type.
pub fn parse_as_const(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let span = parser.expect(Token::Const)?;
    Ok(parser.alloc(
        NodeKind::TsType {
            name: Some("const".to_string()),
        },
        span,
    ))
}

/// Consume a type, returning its simple name if it has one.
pub fn parse_type(parser: &mut Parser) -> Result<Option<String>, ParseError> {
    parser.enter("type")?;
    let result = parse_type_inner(parser);
    parser.leave();
    result
}

fn parse_type_inner(parser: &mut Parser) -> Result<Option<String>, ParseError> {
    // Function and constructor types
    if is_start_of_function_type(parser) {
        if parser.check_ident("abstract") {
            parser.advance();
        }
        parser.eat(&Token::New);
        if parser.check(&Token::Less) {
            skip_type_parameters(parser)?;
        }
        skip_balanced(parser, Token::LeftParen, Token::RightParen)?;
        parser.expect(Token::Arrow)?;
        parse_type(parser)?;
        return Ok(None);
    }

    let name = parse_union_type(parser)?;

    // Conditional type: A extends B ? C : D
    if parser.check(&Token::Extends) && !parser.has_newline_before() {
        parser.advance();
        parse_union_type(parser)?;
        parser.expect(Token::Question)?;
        parse_type(parser)?;
        parser.expect(Token::Colon)?;
        parse_type(parser)?;
        return Ok(None);
    }

    Ok(name)
}

fn is_start_of_function_type(parser: &Parser) -> bool {
    match parser.current() {
        Token::Less | Token::New => true,
        Token::Identifier(name) if name == "abstract" => matches!(parser.peek(), Token::New),
        Token::LeftParen => {
            // `(` starts a function type if the matching `)` is followed by `=>`
            let mut depth = 0usize;
            let mut offset = 0;
            loop {
                match parser.peek_nth(offset) {
                    Token::LeftParen => depth += 1,
                    Token::RightParen => {
                        depth -= 1;
                        if depth == 0 {
                            return matches!(parser.peek_nth(offset + 1), Token::Arrow);
                        }
                    }
                    Token::Eof => return false,
                    _ => {}
                }
                offset += 1;
            }
        }
        _ => false,
    }
}

fn parse_union_type(parser: &mut Parser) -> Result<Option<String>, ParseError> {
    // Leading separator: type A = | "a" | "b"
    let leading = parser.eat(&Token::Pipe) || parser.eat(&Token::Amp);
    let mut name = parse_postfix_type(parser)?;
    let mut guard = LoopGuard::new("union_type");

    while parser.check(&Token::Pipe) || parser.check(&Token::Amp) {
        guard.check()?;
        parser.advance();
        if is_start_of_function_type(parser) {
            parse_type(parser)?;
        } else {
            parse_postfix_type(parser)?;
        }
        name = None;
    }

    Ok(if leading { None } else { name })
}

fn parse_postfix_type(parser: &mut Parser) -> Result<Option<String>, ParseError> {
    let mut name = parse_primary_type(parser)?;
    let mut guard = LoopGuard::new("postfix_type");

    // T[] and T[K], but not across a line break
    while parser.check(&Token::LeftBracket) && !parser.has_newline_before() {
        guard.check()?;
        parser.advance();
        if !parser.check(&Token::RightBracket) {
            parse_type(parser)?;
        }
        parser.expect(Token::RightBracket)?;
        name = None;
    }

    Ok(name)
}

fn parse_primary_type(parser: &mut Parser) -> Result<Option<String>, ParseError> {
    match parser.current().clone() {
        Token::Identifier(name) => match name.as_str() {
            "keyof" | "unique" | "readonly" | "infer" | "asserts"
                if can_follow_type_operator(parser.peek()) =>
            {
                parser.advance();
                if name == "infer" {
                    parser.expect_identifier()?;
                    if parser.check(&Token::Extends) {
                        parser.advance();
                        parse_postfix_type(parser)?;
                    }
                    return Ok(None);
                }
                parse_postfix_type(parser)?;
                Ok(None)
            }
            _ => parse_type_reference(parser),
        },
        Token::Typeof => {
            parser.advance();
            if parser.check(&Token::Import) {
                skip_import_type(parser)?;
            } else {
                parse_entity_name(parser)?;
            }
            if parser.check(&Token::Less) && !parser.has_newline_before() {
                parse_type_arguments(parser)?;
            }
            Ok(None)
        }
        Token::Import => {
            skip_import_type(parser)?;
            Ok(None)
        }
        Token::Void | Token::Null | Token::This => {
            let name = parser.current().keyword_text().map(str::to_string);
            parser.advance();
            // Type predicate on `this`: this is Foo
            if parser.check_ident("is") && !parser.has_newline_before() {
                parser.advance();
                parse_type(parser)?;
                return Ok(None);
            }
            Ok(name)
        }
        Token::True | Token::False | Token::String(_) | Token::Number(_) | Token::Template(_) => {
            parser.advance();
            Ok(None)
        }
        Token::Minus => {
            parser.advance();
            parser.expect(Token::Number(String::new()))?;
            Ok(None)
        }
        Token::LeftBrace => {
            skip_balanced(parser, Token::LeftBrace, Token::RightBrace)?;
            Ok(None)
        }
        Token::LeftBracket => {
            skip_balanced(parser, Token::LeftBracket, Token::RightBracket)?;
            Ok(None)
        }
        Token::LeftParen => {
            parser.advance();
            let name = parse_type(parser)?;
            parser.expect(Token::RightParen)?;
            Ok(name)
        }
        _ => Err(parser.unexpected_token(&[])),
    }
}

fn can_follow_type_operator(token: &Token) -> bool {
    !matches!(
        token,
        Token::Comma
            | Token::RightParen
            | Token::RightBracket
            | Token::RightBrace
            | Token::Greater
            | Token::Semicolon
            | Token::Equal
            | Token::Pipe
            | Token::Amp
            | Token::Eof
    )
}

/// `Foo`, `Foo.Bar<T>`, or a type predicate `x is Foo`.
fn parse_type_reference(parser: &mut Parser) -> Result<Option<String>, ParseError> {
    let name = parse_entity_name(parser)?;

    if parser.check_ident("is") && !parser.has_newline_before() {
        parser.advance();
        parse_type(parser)?;
        return Ok(None);
    }

    if parser.check(&Token::Less) && !parser.has_newline_before() {
        parse_type_arguments(parser)?;
    }

    Ok(Some(name))
}

/// Dotted name such as `z.infer`.
fn parse_entity_name(parser: &mut Parser) -> Result<String, ParseError> {
    let (mut name, _) = parser.expect_identifier()?;
    let mut guard = LoopGuard::new("entity_name");
    while parser.check(&Token::Dot) {
        guard.check()?;
        parser.advance();
        let part = match parser.current() {
            Token::Identifier(part) => part.clone(),
            other => match other.keyword_text() {
                Some(kw) => kw.to_string(),
                None => return Err(parser.unexpected_token(&[Token::Identifier(String::new())])),
            },
        };
        parser.advance();
        name.push('.');
        name.push_str(&part);
    }
    Ok(name)
}

/// `import("module").Name`
fn skip_import_type(parser: &mut Parser) -> Result<(), ParseError> {
    parser.expect(Token::Import)?;
    skip_balanced(parser, Token::LeftParen, Token::RightParen)?;
    let mut guard = LoopGuard::new("import_type");
    while parser.eat(&Token::Dot) {
        guard.check()?;
        parser.expect_identifier()?;
    }
    if parser.check(&Token::Less) {
        parse_type_arguments(parser)?;
    }
    Ok(())
}

/// Parse `<T, U>` type arguments.
pub fn parse_type_arguments(parser: &mut Parser) -> Result<(), ParseError> {
    parser.expect(Token::Less)?;
    let mut guard = LoopGuard::new("type_arguments");
    loop {
        guard.check()?;
        parse_type(parser)?;
        if !parser.eat(&Token::Comma) {
            break;
        }
        if is_closing_angle(parser.current()) {
            break;
        }
    }
    parser.eat_closing_angle()
}

/// Skip declaration type parameters: `<T extends Foo = Bar, const U>`.
pub fn skip_type_parameters(parser: &mut Parser) -> Result<(), ParseError> {
    parser.expect(Token::Less)?;
    let mut guard = LoopGuard::new("type_parameters");
    while !is_closing_angle(parser.current()) {
        guard.check()?;
        // Modifiers
        while matches!(parser.current(), Token::Const | Token::In)
            || (parser.check_ident("out") && matches!(parser.peek(), Token::Identifier(_)))
        {
            parser.advance();
        }
        parser.expect_identifier()?;
        if parser.eat(&Token::Extends) {
            parse_type(parser)?;
        }
        if parser.eat(&Token::Equal) {
            parse_type(parser)?;
        }
        if !parser.eat(&Token::Comma) {
            break;
        }
    }
    parser.eat_closing_angle()
}

fn is_closing_angle(token: &Token) -> bool {
    matches!(
        token,
        Token::Greater
            | Token::GreaterGreater
            | Token::GreaterGreaterGreater
            | Token::GreaterEqual
            | Token::GreaterGreaterEqual
            | Token::GreaterGreaterGreaterEqual
    )
}

/// Skip a balanced `open ... close` group, starting at `open`.
pub fn skip_balanced(parser: &mut Parser, open: Token, close: Token) -> Result<(), ParseError> {
    parser.expect(open.clone())?;
    let mut depth = 1usize;
    let mut guard = LoopGuard::new("balanced_group");
    while depth > 0 {
        guard.check()?;
        if parser.at_eof() {
            return Err(parser.unexpected_token(&[close]));
        }
        if parser.check(&open) {
            depth += 1;
        } else if parser.check(&close) {
            depth -= 1;
        }
        parser.advance();
    }
    Ok(())
}
