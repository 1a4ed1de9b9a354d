//! xexpr-core - Protocol-independent X DevAPI expression language parser.
//!
//! This crate turns textual filter/projection/sort expressions into a
//! structured, protocol-ready abstract syntax tree. It has no network or
//! serialization dependencies: a wire encoder consumes the produced AST and
//! the fluent statement-builder layer supplies the raw expression strings.
//!
//! # Main Components
//!
//! - **Lexer**: Tokenizes expression strings, matching reserved words
//!   case-insensitively
//! - **Parser**: Builds the AST with the full operator precedence chain, in
//!   document (collection) or table (relational) mode
//! - **AST**: Expression nodes with exact wire-level scalar types, plus a
//!   canonical printer
//!
//! # Example
//!
//! ```rust
//! use xexpr_core::{parse, Expr};
//!
//! let result = parse("name LIKE :pattern AND age > 18").unwrap();
//! assert_eq!(result.placeholders, vec!["pattern".to_string()]);
//! assert!(matches!(result.output, Expr::Operator(_)));
//! ```
//!
//! Parsing is a pure function of the input and options: each call owns its
//! placeholder registry, so expressions can be parsed concurrently without
//! coordination.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export main types for convenience
pub use ast::{
    DocumentPathItem, Expr, FunctionName, Identifier, Operator, Projection, Scalar,
    SortDirection, SortExpr,
};
pub use error::{ExprError, ExprResult};
pub use lexer::{Lexer, Token};
pub use parser::{
    parse, parse_projection, parse_sort, parse_with, ParseMode, ParseResult, Parser,
    ParserOptions,
};
