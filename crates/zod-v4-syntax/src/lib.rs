//! JavaScript/TypeScript front-end for the zod v4 migration lints.
//!
//! This crate provides:
//! - **Lexer**: logos-based tokenizer with template and regex scanning
//! - **Parser**: recursive descent parser producing an arena [`SyntaxTree`]
//! - **Scopes**: lexical scope analysis over a parsed tree ([`ScopeTree`])
//!
//! # Example
//!
//! ```rust
//! use zod_v4_syntax::{parse, NodeKind, ScopeTree};
//!
//! let tree = parse("const schema = z.string().email();").unwrap();
//! let scopes = ScopeTree::build(&tree);
//! assert!(scopes.module_scope().get("schema").is_some());
//!
//! let calls = tree
//!     .preorder()
//!     .filter(|&id| matches!(tree.kind(id), NodeKind::CallExpression { .. }))
//!     .count();
//! assert_eq!(calls, 2);
//! ```

#![warn(rust_2018_idioms)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod token;

pub use ast::{
    Class, Function, ImportKind, LiteralValue, MethodKind, Node, NodeId, NodeKind, PropertyKind,
    SyntaxTree, VarKind,
};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use scope::{Binding, BindingKind, Scope, ScopeChain, ScopeId, ScopeKind, ScopeTree};
pub use token::{Span, Token};

/// Stack reserved for the parser thread.
///
/// Covers `MAX_PARSE_DEPTH` levels of the deepest production with room to
/// spare in an unoptimized build, where frames are several times larger.
const PARSER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Tokenize and parse `source` into a syntax tree.
///
/// Lexer failures are reported as [`ParseErrorKind::Lex`] errors. Parsing
/// runs on a dedicated thread with a 64 MiB stack, so the nesting limit is
/// reached before the stack runs out whichever thread `parse` is called
/// from. If that thread cannot be spawned, the current one is used.
pub fn parse(source: &str) -> Result<SyntaxTree, Vec<ParseError>> {
    std::thread::scope(|scope| {
        let spawned = std::thread::Builder::new()
            .name("zod-v4-parser".to_string())
            .stack_size(PARSER_STACK_SIZE)
            .spawn_scoped(scope, || parse_here(source));
        match spawned {
            Ok(handle) => handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic)),
            Err(_) => parse_here(source),
        }
    })
}

fn parse_here(source: &str) -> Result<SyntaxTree, Vec<ParseError>> {
    let parser = Parser::new(source)
        .map_err(|errors| errors.into_iter().map(ParseError::from).collect::<Vec<_>>())?;
    parser.parse()
}
