//! Binding pattern parsing and expression-to-pattern reinterpretation.

use super::guards::LoopGuard;
use super::{expr, ParseError, Parser};
use crate::ast::{NodeId, NodeKind, PropertyKind};
use crate::token::Token;

/// Parse a binding target: identifier, object pattern or array pattern.
pub fn parse_binding_pattern(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let nested: fn(&mut Parser) -> Result<NodeId, ParseError> = match parser.current() {
        Token::LeftBrace => parse_object_pattern,
        Token::LeftBracket => parse_array_pattern,
        _ => return parse_binding_identifier(parser),
    };
    parser.enter("binding pattern")?;
    let result = nested(parser);
    parser.leave();
    result
}

/// Parse a binding identifier. `this` is accepted for TypeScript's
/// explicit `this` parameter.
pub fn parse_binding_identifier(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let span = parser.current_span();
    let name = match parser.current() {
        Token::Identifier(name) => name.clone(),
        Token::This => "this".to_string(),
        Token::Yield | Token::Await | Token::Let => parser
            .current()
            .keyword_text()
            .unwrap_or_default()
            .to_string(),
        _ => return Err(parser.unexpected_token(&[Token::Identifier(String::new())])),
    };
    parser.advance();
    Ok(parser.alloc(NodeKind::Identifier { name }, span))
}

/// Parse a binding pattern with an optional `= default`.
pub fn parse_binding_element(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let target = parse_binding_pattern(parser)?;
    if parser.eat(&Token::Equal) {
        let right = expr::parse_assignment(parser)?;
        let span = parser.finish_span(start);
        return Ok(parser.alloc(NodeKind::AssignmentPattern { left: target, right }, span));
    }
    Ok(target)
}

/// Parse `...target`.
pub fn parse_rest_element(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::DotDotDot)?;
    let argument = parse_binding_pattern(parser)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::RestElement { argument }, span))
}

fn parse_object_pattern(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::LeftBrace)?;
    let mut properties = Vec::new();
    let mut guard = LoopGuard::new("object_pattern");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        if parser.check(&Token::DotDotDot) {
            properties.push(parse_rest_element(parser)?);
        } else {
            properties.push(parse_pattern_property(parser)?);
        }
        if !parser.check(&Token::RightBrace) {
            parser.expect(Token::Comma)?;
        }
    }

    parser.expect(Token::RightBrace)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::ObjectPattern { properties }, span))
}

fn parse_pattern_property(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.current_span();
    let (key, computed) = expr::parse_property_key(parser)?;

    if parser.eat(&Token::Colon) {
        let value = parse_binding_element(parser)?;
        let span = parser.finish_span(start);
        return Ok(parser.alloc(
            NodeKind::Property {
                key,
                value,
                kind: PropertyKind::Init,
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

    // Shorthand, optionally with a default: { a = 1 }
    let value = if parser.eat(&Token::Equal) {
        let right = expr::parse_assignment(parser)?;
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
            kind: PropertyKind::Init,
            computed: false,
            shorthand: true,
            method: false,
        },
        span,
    ))
}

fn parse_array_pattern(parser: &mut Parser) -> Result<NodeId, ParseError> {
    let start = parser.expect(Token::LeftBracket)?;
    let mut elements = Vec::new();
    let mut guard = LoopGuard::new("array_pattern");

    while !parser.check(&Token::RightBracket) && !parser.at_eof() {
        guard.check()?;
        if parser.eat(&Token::Comma) {
            elements.push(None);
            continue;
        }
        let element = if parser.check(&Token::DotDotDot) {
            parse_rest_element(parser)?
        } else {
            parse_binding_element(parser)?
        };
        elements.push(Some(element));
        if !parser.check(&Token::RightBracket) {
            parser.expect(Token::Comma)?;
        }
    }

    parser.expect(Token::RightBracket)?;
    let span = parser.finish_span(start);
    Ok(parser.alloc(NodeKind::ArrayPattern { elements }, span))
}

/// Reinterpret an already parsed expression as an assignment target, as in
/// `[a, b] = [b, a]` or `for ({ x } of items)`.
pub fn expression_to_pattern(parser: &mut Parser, id: NodeId) -> Result<(), ParseError> {
    let kind = parser.node_kind(id).clone();
    match kind {
        NodeKind::Identifier { .. }
        | NodeKind::MemberExpression { .. }
        | NodeKind::ObjectPattern { .. }
        | NodeKind::ArrayPattern { .. }
        | NodeKind::AssignmentPattern { .. }
        | NodeKind::RestElement { .. }
        | NodeKind::TsNonNullExpression { .. }
        | NodeKind::TsAsExpression { .. }
        | NodeKind::TsSatisfiesExpression { .. } => Ok(()),
        NodeKind::ObjectExpression { properties } => {
            for &property in &properties {
                match parser.node_kind(property).clone() {
                    NodeKind::Property { value, .. } => expression_to_pattern(parser, value)?,
                    NodeKind::SpreadElement { argument } => {
                        expression_to_pattern(parser, argument)?;
                        parser.replace_node(property, NodeKind::RestElement { argument });
                    }
                    _ => return Err(invalid_target(parser, property)),
                }
            }
            parser.replace_node(id, NodeKind::ObjectPattern { properties });
            Ok(())
        }
        NodeKind::ArrayExpression { elements } => {
            for &element in elements.iter().flatten() {
                if let NodeKind::SpreadElement { argument } = parser.node_kind(element).clone() {
                    expression_to_pattern(parser, argument)?;
                    parser.replace_node(element, NodeKind::RestElement { argument });
                } else {
                    expression_to_pattern(parser, element)?;
                }
            }
            parser.replace_node(id, NodeKind::ArrayPattern { elements });
            Ok(())
        }
        NodeKind::AssignmentExpression {
            operator: "=",
            left,
            right,
        } => {
            expression_to_pattern(parser, left)?;
            parser.replace_node(id, NodeKind::AssignmentPattern { left, right });
            Ok(())
        }
        _ => Err(invalid_target(parser, id)),
    }
}

fn invalid_target(parser: &Parser, id: NodeId) -> ParseError {
    ParseError::invalid_syntax("invalid assignment target", parser.node_span(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_pattern_with_default_and_rest() {
        let mut parser = Parser::new("{ a, b: c = 1, ...rest }").unwrap();
        let id = parse_binding_pattern(&mut parser).unwrap();
        match parser.node_kind(id) {
            NodeKind::ObjectPattern { properties } => assert_eq!(properties.len(), 3),
            other => panic!("expected object pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_pattern_depth_is_bounded() {
        let depth = 5_000;
        let source = format!("{}a{}", "[".repeat(depth), "]".repeat(depth));
        let mut parser = Parser::new(&source).unwrap();
        let err = parse_binding_pattern(&mut parser).unwrap_err();
        assert!(matches!(err.kind, crate::ParseErrorKind::ParserLimitExceeded { .. }));
    }

    #[test]
    fn test_array_pattern_with_holes() {
        let mut parser = Parser::new("[, second, ...others]").unwrap();
        let id = parse_binding_pattern(&mut parser).unwrap();
        match parser.node_kind(id) {
            NodeKind::ArrayPattern { elements } => {
                assert_eq!(elements.len(), 3);
                assert!(elements[0].is_none());
            }
            other => panic!("expected array pattern, got {:?}", other),
        }
    }
}
