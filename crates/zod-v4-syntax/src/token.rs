//! Token definitions for the JavaScript/TypeScript subset.
//!
//! Tokens carry their decoded payload where the parser needs it (identifier
//! names, string values) and their raw text otherwise (numbers, templates,
//! regular expressions). Every token is paired with a [`Span`].

use serde::Serialize;
use std::fmt;

/// Source location: byte range `[start, end)` plus the 1-based line and
/// column of `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Var,
    Let,
    Const,
    Function,
    Class,
    Extends,
    If,
    Else,
    For,
    While,
    Do,
    Switch,
    Case,
    Default,
    Break,
    Continue,
    Return,
    Throw,
    Try,
    Catch,
    Finally,
    New,
    Delete,
    Typeof,
    Void,
    Instanceof,
    In,
    This,
    Super,
    Null,
    True,
    False,
    Import,
    Export,
    Yield,
    Await,
    Enum,
    Debugger,

    // Literals
    Identifier(String),
    PrivateName(String),
    Number(String),
    String(String),
    /// Raw template text including both backticks.
    Template(String),
    /// Raw regular expression text including slashes and flags.
    Regex(String),

    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    Dot,
    DotDotDot,
    Question,
    QuestionDot,
    QuestionQuestion,
    QuestionQuestionEqual,
    Colon,
    Arrow,
    At,

    // Operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    BangEqual,
    EqualEqualEqual,
    BangEqualEqual,
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    StarStarEqual,
    SlashEqual,
    PercentEqual,
    LessLess,
    GreaterGreater,
    GreaterGreaterGreater,
    LessLessEqual,
    GreaterGreaterEqual,
    GreaterGreaterGreaterEqual,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Bang,
    AmpAmp,
    PipePipe,
    AmpEqual,
    PipeEqual,
    CaretEqual,
    AmpAmpEqual,
    PipePipeEqual,

    Eof,
}

impl Token {
    /// Source text of a keyword token, if this is one.
    ///
    /// Keywords are valid property names (`schema.default()`, `{ new: 1 }`),
    /// so the parser uses this to accept them after `.` and as object keys.
    pub fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            Token::Var => "var",
            Token::Let => "let",
            Token::Const => "const",
            Token::Function => "function",
            Token::Class => "class",
            Token::Extends => "extends",
            Token::If => "if",
            Token::Else => "else",
            Token::For => "for",
            Token::While => "while",
            Token::Do => "do",
            Token::Switch => "switch",
            Token::Case => "case",
            Token::Default => "default",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Return => "return",
            Token::Throw => "throw",
            Token::Try => "try",
            Token::Catch => "catch",
            Token::Finally => "finally",
            Token::New => "new",
            Token::Delete => "delete",
            Token::Typeof => "typeof",
            Token::Void => "void",
            Token::Instanceof => "instanceof",
            Token::In => "in",
            Token::This => "this",
            Token::Super => "super",
            Token::Null => "null",
            Token::True => "true",
            Token::False => "false",
            Token::Import => "import",
            Token::Export => "export",
            Token::Yield => "yield",
            Token::Await => "await",
            Token::Enum => "enum",
            Token::Debugger => "debugger",
            _ => return None,
        };
        Some(text)
    }

    /// True if this token is the identifier `name` (used for contextual
    /// keywords such as `as`, `of`, `type`, `async`).
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, Token::Identifier(n) if n == name)
    }

    /// Whether a `/` following this token starts a regular expression
    /// rather than a division.
    pub fn allows_regex_after(&self) -> bool {
        !matches!(
            self,
            Token::Identifier(_)
                | Token::PrivateName(_)
                | Token::Number(_)
                | Token::String(_)
                | Token::Template(_)
                | Token::Regex(_)
                | Token::RightParen
                | Token::RightBracket
                | Token::RightBrace
                | Token::This
                | Token::Super
                | Token::True
                | Token::False
                | Token::Null
                | Token::PlusPlus
                | Token::MinusMinus
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kw) = self.keyword_text() {
            return write!(f, "'{}'", kw);
        }
        match self {
            Token::Identifier(name) => write!(f, "identifier '{}'", name),
            Token::PrivateName(name) => write!(f, "private name '#{}'", name),
            Token::Number(raw) => write!(f, "number {}", raw),
            Token::String(_) => write!(f, "string literal"),
            Token::Template(_) => write!(f, "template literal"),
            Token::Regex(raw) => write!(f, "regex {}", raw),
            Token::Eof => write!(f, "end of file"),
            other => write!(f, "'{}'", punctuation_text(other)),
        }
    }
}

fn punctuation_text(token: &Token) -> &'static str {
    match token {
        Token::LeftParen => "(",
        Token::RightParen => ")",
        Token::LeftBrace => "{",
        Token::RightBrace => "}",
        Token::LeftBracket => "[",
        Token::RightBracket => "]",
        Token::Semicolon => ";",
        Token::Comma => ",",
        Token::Dot => ".",
        Token::DotDotDot => "...",
        Token::Question => "?",
        Token::QuestionDot => "?.",
        Token::QuestionQuestion => "??",
        Token::QuestionQuestionEqual => "??=",
        Token::Colon => ":",
        Token::Arrow => "=>",
        Token::At => "@",
        Token::Plus => "+",
        Token::Minus => "-",
        Token::Star => "*",
        Token::StarStar => "**",
        Token::Slash => "/",
        Token::Percent => "%",
        Token::PlusPlus => "++",
        Token::MinusMinus => "--",
        Token::Less => "<",
        Token::Greater => ">",
        Token::LessEqual => "<=",
        Token::GreaterEqual => ">=",
        Token::EqualEqual => "==",
        Token::BangEqual => "!=",
        Token::EqualEqualEqual => "===",
        Token::BangEqualEqual => "!==",
        Token::Equal => "=",
        Token::PlusEqual => "+=",
        Token::MinusEqual => "-=",
        Token::StarEqual => "*=",
        Token::StarStarEqual => "**=",
        Token::SlashEqual => "/=",
        Token::PercentEqual => "%=",
        Token::LessLess => "<<",
        Token::GreaterGreater => ">>",
        Token::GreaterGreaterGreater => ">>>",
        Token::LessLessEqual => "<<=",
        Token::GreaterGreaterEqual => ">>=",
        Token::GreaterGreaterGreaterEqual => ">>>=",
        Token::Amp => "&",
        Token::Pipe => "|",
        Token::Caret => "^",
        Token::Tilde => "~",
        Token::Bang => "!",
        Token::AmpAmp => "&&",
        Token::PipePipe => "||",
        Token::AmpEqual => "&=",
        Token::PipeEqual => "|=",
        Token::CaretEqual => "^=",
        Token::AmpAmpEqual => "&&=",
        Token::PipePipeEqual => "||=",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains() {
        let outer = Span::new(0, 10, 1, 1);
        let inner = Span::new(2, 5, 1, 3);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert_eq!(inner.len(), 3);
    }

    #[test]
    fn test_keyword_text() {
        assert_eq!(Token::Default.keyword_text(), Some("default"));
        assert_eq!(Token::Identifier("x".into()).keyword_text(), None);
    }

    #[test]
    fn test_regex_context() {
        assert!(Token::LeftParen.allows_regex_after());
        assert!(Token::Equal.allows_regex_after());
        assert!(!Token::Identifier("a".into()).allows_regex_after());
        assert!(!Token::RightParen.allows_regex_after());
    }
}
