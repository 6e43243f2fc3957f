//! Parser guards to prevent infinite loops and stack overflow

use super::ParseError;
use crate::token::Span;

/// Maximum iterations for any single parser loop
const MAX_LOOP_ITERATIONS: usize = 100_000;

/// Maximum nesting depth of statements, assignment expressions, prefix
/// operators, binding patterns and types.
///
/// Every level costs several stack frames (assignment, conditional, binary,
/// unary, call/member, primary). An unoptimized build needs roughly 20 KiB
/// per level, more than a default 2 MiB thread holds at this depth, which is
/// why `parse` runs the parser on its own larger stack.
pub const MAX_PARSE_DEPTH: usize = 96;

/// Guard against infinite loops in parser
///
/// ```ignore
/// let mut guard = LoopGuard::new("call_arguments");
/// while !parser.check(&Token::RightParen) {
///     guard.check()?;
///     // ... parse an argument ...
/// }
/// ```
pub struct LoopGuard {
    name: &'static str,
    count: usize,
    max: usize,
}

impl LoopGuard {
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            count: 0,
            max: MAX_LOOP_ITERATIONS,
        }
    }

    #[inline]
    pub fn with_limit(name: &'static str, max: usize) -> Self {
        Self { name, count: 0, max }
    }

    /// Check iteration count, return error if exceeded
    #[inline]
    pub fn check(&mut self) -> Result<(), ParseError> {
        self.count += 1;
        if self.count > self.max {
            return Err(ParseError::parser_limit_exceeded(
                format!("Loop '{}' exceeded {} iterations", self.name, self.max),
                Span::default(),
            ));
        }
        Ok(())
    }
}

/// Depth counter used by the recursive entry points.
///
/// The parser increments before recursing and decrements on the way out,
/// wrapping the real work in an inner function so `?` can be used freely.
pub fn enter(depth: &mut usize, name: &'static str, span: Span) -> Result<(), ParseError> {
    if *depth >= MAX_PARSE_DEPTH {
        return Err(ParseError::parser_limit_exceeded(
            format!("Maximum nesting depth ({}) exceeded in {}", MAX_PARSE_DEPTH, name),
            span,
        ));
    }
    *depth += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_guard_under_limit() {
        let mut guard = LoopGuard::with_limit("test", 10);
        for _ in 0..10 {
            assert!(guard.check().is_ok());
        }
    }

    #[test]
    fn test_loop_guard_exceeds_limit() {
        let mut guard = LoopGuard::with_limit("test", 10);
        for _ in 0..10 {
            let _ = guard.check();
        }
        assert!(guard.check().is_err());
    }

    #[test]
    fn test_depth_limit() {
        let mut depth = MAX_PARSE_DEPTH - 1;
        assert!(enter(&mut depth, "test", Span::default()).is_ok());
        assert_eq!(depth, MAX_PARSE_DEPTH);
        assert!(enter(&mut depth, "test", Span::default()).is_err());
        assert_eq!(depth, MAX_PARSE_DEPTH);
    }
}
