//! Parse error types and error reporting

use crate::lexer::LexError;
use crate::token::{Span, Token};
use thiserror::Error;

/// A parse error with location and contextual information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error at {}:{}: {message}", .span.line, .span.column)]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,

    /// Source location of the error
    pub span: Span,

    /// Human-readable error message
    pub message: String,

    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected token found
    UnexpectedToken { expected: Vec<Token>, found: Token },

    /// Unexpected end of file
    UnexpectedEof { expected: Vec<Token> },

    /// Invalid syntax
    InvalidSyntax { reason: String },

    /// The token stream could not be produced
    Lex(LexError),

    /// Syntax outside the supported subset (JSX, decorators)
    Unsupported { feature: String },

    /// Parser exceeded iteration/depth limit
    ParserLimitExceeded { message: String },
}

impl ParseError {
    /// Create an "unexpected token" error.
    pub fn unexpected_token(expected: Vec<Token>, found: Token, span: Span) -> Self {
        let message = match expected.as_slice() {
            [] => format!("Unexpected {}", found),
            [single] => format!("Expected {}, found {}", single, found),
            many => format!(
                "Expected one of {}, found {}",
                many.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
                found
            ),
        };

        Self {
            kind: ParseErrorKind::UnexpectedToken { expected, found },
            span,
            message,
            suggestion: None,
        }
    }

    /// Create an "unexpected EOF" error.
    pub fn unexpected_eof(expected: Vec<Token>, span: Span) -> Self {
        let message = match expected.as_slice() {
            [single] => format!("Unexpected end of file, expected {}", single),
            _ => "Unexpected end of file".to_string(),
        };

        Self {
            kind: ParseErrorKind::UnexpectedEof { expected },
            span,
            message,
            suggestion: None,
        }
    }

    /// Create an "invalid syntax" error.
    pub fn invalid_syntax(reason: impl Into<String>, span: Span) -> Self {
        let reason = reason.into();
        Self {
            message: format!("Invalid syntax: {}", reason),
            kind: ParseErrorKind::InvalidSyntax { reason },
            span,
            suggestion: None,
        }
    }

    /// Create an "unsupported syntax" error.
    pub fn unsupported(feature: impl Into<String>, span: Span) -> Self {
        let feature = feature.into();
        Self {
            message: format!("{} is not supported", feature),
            kind: ParseErrorKind::Unsupported { feature },
            span,
            suggestion: None,
        }
    }

    /// Create a "parser limit exceeded" error.
    pub fn parser_limit_exceeded(message: impl Into<String>, span: Span) -> Self {
        let message = message.into();
        Self {
            kind: ParseErrorKind::ParserLimitExceeded {
                message: message.clone(),
            },
            span,
            message: format!("Parser limit exceeded: {}", message),
            suggestion: None,
        }
    }

    /// Add a suggestion to this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            span: err.span(),
            message: err.to_string(),
            kind: ParseErrorKind::Lex(err),
            suggestion: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_message() {
        let err = ParseError::unexpected_token(
            vec![Token::RightParen],
            Token::Comma,
            Span::new(3, 4, 1, 4),
        );
        assert_eq!(err.message, "Expected ')', found ','");
        assert_eq!(err.to_string(), "Parse error at 1:4: Expected ')', found ','");
    }

    #[test]
    fn test_from_lex_error() {
        let span = Span::new(0, 1, 2, 5);
        let err = ParseError::from(LexError::UnterminatedString { span });
        assert_eq!(err.span, span);
        assert!(matches!(err.kind, ParseErrorKind::Lex(_)));
    }
}
