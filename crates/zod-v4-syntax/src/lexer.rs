//! Lexer for the JavaScript/TypeScript subset.
//!
//! Regular tokens are produced by logos. Whitespace, comments, template
//! literals and regular expressions are scanned by hand in the driver loop:
//! templates nest arbitrarily through `${ ... }`, and whether `/` starts a
//! regular expression depends on the previous token.

use crate::token::{Span, Token};
use logos::Logos;
use thiserror::Error;

/// Logos-based token enum for lexing.
///
/// Converted to [`Token`] after lexing.
#[derive(Logos, Debug, Clone, PartialEq)]
enum LogosToken {
    #[token("var")]
    Var,
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("function")]
    Function,
    #[token("class")]
    Class,
    #[token("extends")]
    Extends,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("throw")]
    Throw,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("new")]
    New,
    #[token("delete")]
    Delete,
    #[token("typeof")]
    Typeof,
    #[token("void")]
    Void,
    #[token("instanceof")]
    Instanceof,
    #[token("in")]
    In,
    #[token("this")]
    This,
    #[token("super")]
    Super,
    #[token("null")]
    Null,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("import")]
    Import,
    #[token("export")]
    Export,
    #[token("yield")]
    Yield,
    #[token("await")]
    Await,
    #[token("enum")]
    Enum,
    #[token("debugger")]
    Debugger,

    // Identifiers (must come after keywords)
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[regex(r"#[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice()[1..].to_string())]
    PrivateName(String),

    // Numbers keep their raw text; nothing downstream evaluates them
    #[regex(r"0[xXbBoO][0-9a-fA-F_]+n?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?n?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?", |lex| lex.slice().to_string())]
    Number(String),

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#, parse_string)]
    #[regex(r"'([^'\\\n]|\\(.|\n))*'", parse_string)]
    String(String),

    // Punctuation
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    DotDotDot,
    #[token("?")]
    Question,
    #[token("?.")]
    QuestionDot,
    #[token("??")]
    QuestionQuestion,
    #[token("??=")]
    QuestionQuestionEqual,
    #[token(":")]
    Colon,
    #[token("=>")]
    Arrow,
    #[token("@")]
    At,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("===")]
    EqualEqualEqual,
    #[token("!==")]
    BangEqualEqual,
    #[token("=")]
    Equal,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("*=")]
    StarEqual,
    #[token("**=")]
    StarStarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("%=")]
    PercentEqual,
    #[token("<<")]
    LessLess,
    #[token(">>")]
    GreaterGreater,
    #[token(">>>")]
    GreaterGreaterGreater,
    #[token("<<=")]
    LessLessEqual,
    #[token(">>=")]
    GreaterGreaterEqual,
    #[token(">>>=")]
    GreaterGreaterGreaterEqual,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("&=")]
    AmpEqual,
    #[token("|=")]
    PipeEqual,
    #[token("^=")]
    CaretEqual,
    #[token("&&=")]
    AmpAmpEqual,
    #[token("||=")]
    PipePipeEqual,
}

fn parse_string(lex: &mut logos::Lexer<'_, LogosToken>) -> String {
    let s = lex.slice();
    unescape_string(&s[1..s.len() - 1])
}

fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('0') => result.push('\0'),
            // Line continuation
            Some('\n') => {}
            Some(other) => result.push(other),
            None => break,
        }
    }

    result
}

/// Lexer error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {}:{}", .span.line, .span.column)]
    UnexpectedCharacter { ch: char, span: Span },
    #[error("Unterminated string at {}:{}", .span.line, .span.column)]
    UnterminatedString { span: Span },
    #[error("Unterminated template literal at {}:{}", .span.line, .span.column)]
    UnterminatedTemplate { span: Span },
    #[error("Unterminated regular expression at {}:{}", .span.line, .span.column)]
    UnterminatedRegex { span: Span },
    #[error("Unterminated block comment at {}:{}", .span.line, .span.column)]
    UnterminatedComment { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::UnterminatedTemplate { span }
            | LexError::UnterminatedRegex { span }
            | LexError::UnterminatedComment { span } => *span,
        }
    }
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<(Token, Span)>,
    errors: Vec<LexError>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the whole source. The token list always ends with
    /// [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<(Token, Span)>, Vec<LexError>> {
        let source = self.source;
        let bytes = source.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() {
            pos = self.skip_trivia(pos);
            if pos >= bytes.len() {
                break;
            }

            if bytes[pos] == b'`' {
                match scan_template(bytes, pos) {
                    Some(end) => {
                        let span = Span::new(pos, end, self.line, self.column);
                        self.tokens
                            .push((Token::Template(source[pos..end].to_string()), span));
                        pos = self.consume(pos, end);
                    }
                    None => {
                        self.errors.push(LexError::UnterminatedTemplate {
                            span: Span::new(pos, pos + 1, self.line, self.column),
                        });
                        pos = self.consume(pos, bytes.len());
                    }
                }
                continue;
            }

            if bytes[pos] == b'/' && self.regex_allowed() {
                match scan_regex(bytes, pos) {
                    Some(end) => {
                        let span = Span::new(pos, end, self.line, self.column);
                        self.tokens
                            .push((Token::Regex(source[pos..end].to_string()), span));
                        pos = self.consume(pos, end);
                    }
                    None => {
                        self.errors.push(LexError::UnterminatedRegex {
                            span: Span::new(pos, pos + 1, self.line, self.column),
                        });
                        pos = self.consume(pos, pos + 1);
                    }
                }
                continue;
            }

            let mut logos_lexer = LogosToken::lexer(&source[pos..]);
            let Some(token_result) = logos_lexer.next() else {
                break;
            };
            let range = logos_lexer.span();
            let abs_start = pos + range.start;
            // Always make progress, even on a zero-width error
            let abs_end = (pos + range.end).max(abs_start + 1).min(bytes.len());
            let span = Span::new(abs_start, abs_end, self.line, self.column);

            match token_result {
                Ok(logos_token) => self.tokens.push((convert_token(logos_token), span)),
                Err(_) => {
                    let ch = source[abs_start..].chars().next().unwrap_or('\0');
                    let err = if ch == '"' || ch == '\'' {
                        LexError::UnterminatedString { span }
                    } else {
                        LexError::UnexpectedCharacter { ch, span }
                    };
                    self.errors.push(err);
                }
            }

            let next = if source.is_char_boundary(abs_end) {
                abs_end
            } else {
                // Step over the whole multi-byte character
                abs_start + source[abs_start..].chars().next().map_or(1, char::len_utf8)
            };
            pos = self.consume(abs_start, next);
        }

        let eof_span = Span::new(self.source.len(), self.source.len(), self.line, self.column);
        self.tokens.push((Token::Eof, eof_span));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    fn regex_allowed(&self) -> bool {
        self.tokens
            .last()
            .map_or(true, |(token, _)| token.allows_regex_after())
    }

    /// Advance line/column over `source[from..to]` and return `to`.
    fn consume(&mut self, from: usize, to: usize) -> usize {
        let source = self.source;
        for c in source[from..to].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        to
    }

    /// Skip whitespace and comments starting at `pos`.
    fn skip_trivia(&mut self, mut pos: usize) -> usize {
        let source = self.source;
        let bytes = source.as_bytes();
        while pos < bytes.len() {
            match bytes[pos] {
                b' ' | b'\t' | b'\r' | b'\n' | 0x0c => pos = self.consume(pos, pos + 1),
                b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                    let end = source[pos..]
                        .find('\n')
                        .map_or(bytes.len(), |offset| pos + offset);
                    pos = self.consume(pos, end);
                }
                b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                    match source[pos + 2..].find("*/") {
                        Some(offset) => pos = self.consume(pos, pos + 2 + offset + 2),
                        None => {
                            self.errors.push(LexError::UnterminatedComment {
                                span: Span::new(pos, pos + 2, self.line, self.column),
                            });
                            pos = self.consume(pos, bytes.len());
                        }
                    }
                }
                _ => break,
            }
        }
        pos
    }
}

#[derive(Clone, Copy)]
enum TemplateFrame {
    /// Inside template text
    Text,
    /// Inside `${ ... }` or a brace pair nested in one
    Brace,
}

/// Scan a template literal starting at the opening backtick. Returns the
/// offset one past the closing backtick.
fn scan_template(bytes: &[u8], start: usize) -> Option<usize> {
    let mut stack = vec![TemplateFrame::Text];
    let mut i = start + 1;
    while let Some(&frame) = stack.last() {
        let byte = *bytes.get(i)?;
        match (frame, byte) {
            (TemplateFrame::Text, b'\\') => i += 2,
            (TemplateFrame::Text, b'`') | (TemplateFrame::Brace, b'}') => {
                stack.pop();
                i += 1;
            }
            (TemplateFrame::Text, b'$') if bytes.get(i + 1) == Some(&b'{') => {
                stack.push(TemplateFrame::Brace);
                i += 2;
            }
            (TemplateFrame::Brace, b'{') => {
                stack.push(TemplateFrame::Brace);
                i += 1;
            }
            (TemplateFrame::Brace, b'`') => {
                stack.push(TemplateFrame::Text);
                i += 1;
            }
            (TemplateFrame::Brace, quote @ (b'"' | b'\'')) => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    Some(i)
}

/// Scan a regular expression literal starting at its opening `/`. Returns
/// the offset one past the last flag character.
fn scan_regex(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    let mut in_class = false;
    loop {
        match *bytes.get(i)? {
            b'\n' => return None,
            b'\\' => i += 2,
            b'[' => {
                in_class = true;
                i += 1;
            }
            b']' => {
                in_class = false;
                i += 1;
            }
            b'/' if !in_class => break,
            _ => i += 1,
        }
    }
    i += 1;
    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        i += 1;
    }
    Some(i)
}

fn convert_token(logos_token: LogosToken) -> Token {
    match logos_token {
        LogosToken::Var => Token::Var,
        LogosToken::Let => Token::Let,
        LogosToken::Const => Token::Const,
        LogosToken::Function => Token::Function,
        LogosToken::Class => Token::Class,
        LogosToken::Extends => Token::Extends,
        LogosToken::If => Token::If,
        LogosToken::Else => Token::Else,
        LogosToken::For => Token::For,
        LogosToken::While => Token::While,
        LogosToken::Do => Token::Do,
        LogosToken::Switch => Token::Switch,
        LogosToken::Case => Token::Case,
        LogosToken::Default => Token::Default,
        LogosToken::Break => Token::Break,
        LogosToken::Continue => Token::Continue,
        LogosToken::Return => Token::Return,
        LogosToken::Throw => Token::Throw,
        LogosToken::Try => Token::Try,
        LogosToken::Catch => Token::Catch,
        LogosToken::Finally => Token::Finally,
        LogosToken::New => Token::New,
        LogosToken::Delete => Token::Delete,
        LogosToken::Typeof => Token::Typeof,
        LogosToken::Void => Token::Void,
        LogosToken::Instanceof => Token::Instanceof,
        LogosToken::In => Token::In,
        LogosToken::This => Token::This,
        LogosToken::Super => Token::Super,
        LogosToken::Null => Token::Null,
        LogosToken::True => Token::True,
        LogosToken::False => Token::False,
        LogosToken::Import => Token::Import,
        LogosToken::Export => Token::Export,
        LogosToken::Yield => Token::Yield,
        LogosToken::Await => Token::Await,
        LogosToken::Enum => Token::Enum,
        LogosToken::Debugger => Token::Debugger,
        LogosToken::Identifier(s) => Token::Identifier(s),
        LogosToken::PrivateName(s) => Token::PrivateName(s),
        LogosToken::Number(s) => Token::Number(s),
        LogosToken::String(s) => Token::String(s),
        LogosToken::LeftParen => Token::LeftParen,
        LogosToken::RightParen => Token::RightParen,
        LogosToken::LeftBrace => Token::LeftBrace,
        LogosToken::RightBrace => Token::RightBrace,
        LogosToken::LeftBracket => Token::LeftBracket,
        LogosToken::RightBracket => Token::RightBracket,
        LogosToken::Semicolon => Token::Semicolon,
        LogosToken::Comma => Token::Comma,
        LogosToken::Dot => Token::Dot,
        LogosToken::DotDotDot => Token::DotDotDot,
        LogosToken::Question => Token::Question,
        LogosToken::QuestionDot => Token::QuestionDot,
        LogosToken::QuestionQuestion => Token::QuestionQuestion,
        LogosToken::QuestionQuestionEqual => Token::QuestionQuestionEqual,
        LogosToken::Colon => Token::Colon,
        LogosToken::Arrow => Token::Arrow,
        LogosToken::At => Token::At,
        LogosToken::Plus => Token::Plus,
        LogosToken::Minus => Token::Minus,
        LogosToken::Star => Token::Star,
        LogosToken::StarStar => Token::StarStar,
        LogosToken::Slash => Token::Slash,
        LogosToken::Percent => Token::Percent,
        LogosToken::PlusPlus => Token::PlusPlus,
        LogosToken::MinusMinus => Token::MinusMinus,
        LogosToken::Less => Token::Less,
        LogosToken::Greater => Token::Greater,
        LogosToken::LessEqual => Token::LessEqual,
        LogosToken::GreaterEqual => Token::GreaterEqual,
        LogosToken::EqualEqual => Token::EqualEqual,
        LogosToken::BangEqual => Token::BangEqual,
        LogosToken::EqualEqualEqual => Token::EqualEqualEqual,
        LogosToken::BangEqualEqual => Token::BangEqualEqual,
        LogosToken::Equal => Token::Equal,
        LogosToken::PlusEqual => Token::PlusEqual,
        LogosToken::MinusEqual => Token::MinusEqual,
        LogosToken::StarEqual => Token::StarEqual,
        LogosToken::StarStarEqual => Token::StarStarEqual,
        LogosToken::SlashEqual => Token::SlashEqual,
        LogosToken::PercentEqual => Token::PercentEqual,
        LogosToken::LessLess => Token::LessLess,
        LogosToken::GreaterGreater => Token::GreaterGreater,
        LogosToken::GreaterGreaterGreater => Token::GreaterGreaterGreater,
        LogosToken::LessLessEqual => Token::LessLessEqual,
        LogosToken::GreaterGreaterEqual => Token::GreaterGreaterEqual,
        LogosToken::GreaterGreaterGreaterEqual => Token::GreaterGreaterGreaterEqual,
        LogosToken::Amp => Token::Amp,
        LogosToken::Pipe => Token::Pipe,
        LogosToken::Caret => Token::Caret,
        LogosToken::Tilde => Token::Tilde,
        LogosToken::Bang => Token::Bang,
        LogosToken::AmpAmp => Token::AmpAmp,
        LogosToken::PipePipe => Token::PipePipe,
        LogosToken::AmpEqual => Token::AmpEqual,
        LogosToken::PipeEqual => Token::PipeEqual,
        LogosToken::CaretEqual => Token::CaretEqual,
        LogosToken::AmpAmpEqual => Token::AmpAmpEqual,
        LogosToken::PipePipeEqual => Token::PipePipeEqual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|(tok, _)| tok)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = kinds("const schema = z");
        assert_eq!(
            tokens,
            vec![
                Token::Const,
                Token::Identifier("schema".into()),
                Token::Equal,
                Token::Identifier("z".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = kinds("a // line\n/* block\n */ b");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("a".into()),
                Token::Identifier("b".into()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let tokens = kinds(r#"'it\'s' "a\nb""#);
        assert_eq!(tokens[0], Token::String("it's".into()));
        assert_eq!(tokens[1], Token::String("a\nb".into()));
    }

    #[test]
    fn test_template_with_nested_substitution() {
        let tokens = kinds("`a ${ `b ${c}` } d` + 1");
        assert_eq!(tokens[0], Token::Template("`a ${ `b ${c}` } d`".into()));
        assert_eq!(tokens[1], Token::Plus);
    }

    #[test]
    fn test_deeply_nested_template() {
        let depth = 20_000;
        let source = format!("{}x{}", "`${".repeat(depth), "}`".repeat(depth));
        let tokens = kinds(&source);
        assert_eq!(tokens, [Token::Template(source.clone()), Token::Eof]);
    }

    #[test]
    fn test_regex_vs_division() {
        let tokens = kinds("x = /a[/]b/gi; y = a / b");
        assert_eq!(tokens[2], Token::Regex("/a[/]b/gi".into()));
        assert!(tokens.contains(&Token::Slash));
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds("1 1.5 0xff 1e10 10n .5");
        let numbers: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Number(raw) => Some(raw.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec!["1", "1.5", "0xff", "1e10", "10n", ".5"]);
    }

    #[test]
    fn test_spans_track_lines() {
        let tokens = Lexer::new("a\n  b").tokenize().unwrap();
        assert_eq!(tokens[1].1.line, 2);
        assert_eq!(tokens[1].1.column, 3);
        assert_eq!(tokens[1].1.start, 4);
    }

    #[test]
    fn test_unterminated_template() {
        let errors = Lexer::new("`abc").tokenize().unwrap_err();
        assert!(matches!(errors[0], LexError::UnterminatedTemplate { .. }));
    }

    #[test]
    fn test_unexpected_character() {
        let errors = Lexer::new("a ¤ b").tokenize().unwrap_err();
        assert!(matches!(errors[0], LexError::UnexpectedCharacter { ch: '¤', .. }));
    }
}
