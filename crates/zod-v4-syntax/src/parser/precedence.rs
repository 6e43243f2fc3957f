//! Operator precedence table for expression parsing.
//!
//! Binary operators only; assignment and the conditional operator are parsed
//! by their own functions.

use crate::token::Token;

/// Operator precedence level (higher = tighter binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None = 0,
    NullCoalescing = 1,  // ??
    LogicalOr = 2,       // ||
    LogicalAnd = 3,      // &&
    BitwiseOr = 4,       // |
    BitwiseXor = 5,      // ^
    BitwiseAnd = 6,      // &
    Equality = 7,        // ==, !=, ===, !==
    Relational = 8,      // <, >, <=, >=, instanceof, in, as, satisfies
    Shift = 9,           // <<, >>, >>>
    Additive = 10,       // +, -
    Multiplicative = 11, // *, /, %
    Exponentiation = 12, // **
}

/// Precedence of a binary operator token, or `Precedence::None`.
pub fn get_precedence(token: &Token) -> Precedence {
    match token {
        Token::QuestionQuestion => Precedence::NullCoalescing,
        Token::PipePipe => Precedence::LogicalOr,
        Token::AmpAmp => Precedence::LogicalAnd,
        Token::Pipe => Precedence::BitwiseOr,
        Token::Caret => Precedence::BitwiseXor,
        Token::Amp => Precedence::BitwiseAnd,
        Token::EqualEqual | Token::BangEqual | Token::EqualEqualEqual | Token::BangEqualEqual => {
            Precedence::Equality
        }
        Token::Less
        | Token::LessEqual
        | Token::Greater
        | Token::GreaterEqual
        | Token::Instanceof
        | Token::In => Precedence::Relational,
        Token::LessLess | Token::GreaterGreater | Token::GreaterGreaterGreater => Precedence::Shift,
        Token::Plus | Token::Minus => Precedence::Additive,
        Token::Star | Token::Slash | Token::Percent => Precedence::Multiplicative,
        Token::StarStar => Precedence::Exponentiation,
        _ => Precedence::None,
    }
}

/// Check if an operator is right-associative.
pub fn is_right_associative(token: &Token) -> bool {
    matches!(token, Token::StarStar)
}

/// Logical operators produce `LogicalExpression` nodes.
pub fn is_logical(token: &Token) -> bool {
    matches!(
        token,
        Token::AmpAmp | Token::PipePipe | Token::QuestionQuestion
    )
}

/// Source text of a binary operator.
pub fn binary_operator(token: &Token) -> Option<&'static str> {
    let op = match token {
        Token::QuestionQuestion => "??",
        Token::PipePipe => "||",
        Token::AmpAmp => "&&",
        Token::Pipe => "|",
        Token::Caret => "^",
        Token::Amp => "&",
        Token::EqualEqual => "==",
        Token::BangEqual => "!=",
        Token::EqualEqualEqual => "===",
        Token::BangEqualEqual => "!==",
        Token::Less => "<",
        Token::LessEqual => "<=",
        Token::Greater => ">",
        Token::GreaterEqual => ">=",
        Token::Instanceof => "instanceof",
        Token::In => "in",
        Token::LessLess => "<<",
        Token::GreaterGreater => ">>",
        Token::GreaterGreaterGreater => ">>>",
        Token::Plus => "+",
        Token::Minus => "-",
        Token::Star => "*",
        Token::Slash => "/",
        Token::Percent => "%",
        Token::StarStar => "**",
        _ => return None,
    };
    Some(op)
}

/// Source text of an assignment operator.
pub fn assignment_operator(token: &Token) -> Option<&'static str> {
    let op = match token {
        Token::Equal => "=",
        Token::PlusEqual => "+=",
        Token::MinusEqual => "-=",
        Token::StarEqual => "*=",
        Token::StarStarEqual => "**=",
        Token::SlashEqual => "/=",
        Token::PercentEqual => "%=",
        Token::LessLessEqual => "<<=",
        Token::GreaterGreaterEqual => ">>=",
        Token::GreaterGreaterGreaterEqual => ">>>=",
        Token::AmpEqual => "&=",
        Token::PipeEqual => "|=",
        Token::CaretEqual => "^=",
        Token::AmpAmpEqual => "&&=",
        Token::PipePipeEqual => "||=",
        Token::QuestionQuestionEqual => "??=",
        _ => return None,
    };
    Some(op)
}

/// Source text of a prefix unary operator.
pub fn unary_operator(token: &Token) -> Option<&'static str> {
    let op = match token {
        Token::Bang => "!",
        Token::Tilde => "~",
        Token::Plus => "+",
        Token::Minus => "-",
        Token::Typeof => "typeof",
        Token::Void => "void",
        Token::Delete => "delete",
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(get_precedence(&Token::Star) > get_precedence(&Token::Plus));
        assert!(get_precedence(&Token::AmpAmp) > get_precedence(&Token::PipePipe));
        assert_eq!(get_precedence(&Token::Equal), Precedence::None);
    }

    #[test]
    fn test_operator_text() {
        assert_eq!(binary_operator(&Token::EqualEqualEqual), Some("==="));
        assert_eq!(assignment_operator(&Token::QuestionQuestionEqual), Some("??="));
        assert_eq!(unary_operator(&Token::Typeof), Some("typeof"));
        assert!(is_logical(&Token::QuestionQuestion));
        assert!(!is_logical(&Token::Pipe));
    }
}
