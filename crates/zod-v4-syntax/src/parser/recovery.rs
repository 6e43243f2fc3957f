//! Error recovery strategies for the parser.
//!
//! After a statement fails to parse, tokens are skipped until statement
//! parsing can resume, so a single file reports all of its errors.

use super::Parser;
use crate::token::Token;

/// Synchronize to the next statement boundary.
///
/// Always consumes at least one token so the caller makes progress.
pub fn sync_to_statement_boundary(parser: &mut Parser) {
    let start = parser.position();
    while !parser.at_eof() {
        let at_start = parser.position() == start;
        match parser.current() {
            Token::Semicolon => {
                parser.advance();
                return;
            }
            Token::RightBrace if !at_start => return,
            Token::Var
            | Token::Let
            | Token::Const
            | Token::Function
            | Token::Class
            | Token::If
            | Token::For
            | Token::While
            | Token::Do
            | Token::Switch
            | Token::Try
            | Token::Return
            | Token::Throw
            | Token::Import
            | Token::Export
                if !at_start =>
            {
                return
            }
            _ => {
                parser.advance();
            }
        }
    }
}
