//! Parser for the X DevAPI expression language.
//!
//! This module converts tokenized input into the protocol-ready AST. A parse
//! is parameterized by [`ParserOptions`]: the grammar mode (document vs.
//! table), an initial placeholder list, and whether document paths must be
//! explicitly rooted at `$`. Each call owns its own placeholder registry;
//! nothing is shared across calls.

mod expressions;
mod literal;
mod path;

use serde::Serialize;

use crate::ast::{Expr, Projection, SortDirection, SortExpr};
use crate::error::{ExprError, ExprResult};
use crate::lexer::{Lexer, SpannedToken, Token};

/// Grammar variant: collection/document-oriented vs. relational/table-oriented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ParseMode {
    #[default]
    Document,
    Table,
}

/// Options controlling a single parse call
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    pub mode: ParseMode,
    /// Initial placeholder names, in positional order
    pub placeholders: Vec<String>,
    /// Require document paths to be explicitly rooted at `$`
    pub scoped: bool,
}

impl ParserOptions {
    /// Reject malformed options before any parsing starts
    fn validate(&self) -> ExprResult<()> {
        for (i, name) in self.placeholders.iter().enumerate() {
            if name.is_empty() {
                return Err(ExprError::Config(
                    "placeholder names must not be empty".to_string(),
                ));
            }
            if self.placeholders[..i].contains(name) {
                return Err(ExprError::Config(format!(
                    "duplicate placeholder name '{name}'"
                )));
            }
        }
        Ok(())
    }
}

/// Result of one parse call; immutable once produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult<T = Expr> {
    /// The original input string
    pub input: String,
    /// The parsed output
    pub output: T,
    /// Final placeholder names in positional order
    pub placeholders: Vec<String>,
}

/// Parser for X DevAPI expressions
pub struct Parser {
    pub(crate) tokens: Vec<SpannedToken>,
    pub(crate) position: usize,
    pub(crate) mode: ParseMode,
    pub(crate) scoped: bool,
    pub(crate) placeholders: Vec<String>,
}

impl Parser {
    /// Create a new parser from an input string and options
    pub fn new(input: &str, options: &ParserOptions) -> ExprResult<Self> {
        options.validate()?;
        let tokens = Lexer::new(input).tokenize()?;

        Ok(Self {
            tokens,
            position: 0,
            mode: options.mode,
            scoped: options.scoped,
            placeholders: options.placeholders.clone(),
        })
    }

    pub(crate) fn from_tokens(tokens: Vec<SpannedToken>, mode: ParseMode, scoped: bool) -> Self {
        Self {
            tokens,
            position: 0,
            mode,
            scoped,
            placeholders: Vec::new(),
        }
    }

    /// Get the current token
    pub(crate) fn current_token(&self) -> &Token {
        self.tokens
            .get(self.position)
            .map_or(&Token::Eof, |s| &s.token)
    }

    /// Peek at a token at a given offset from the current position
    pub(crate) fn peek_token(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.position + offset)
            .map_or(&Token::Eof, |s| &s.token)
    }

    /// Character position of the current token in the input
    pub(crate) fn current_offset(&self) -> usize {
        self.tokens
            .get(self.position.min(self.tokens.len().saturating_sub(1)))
            .map_or(0, |s| s.offset)
    }

    /// Advance to the next token
    pub(crate) fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Expect a specific token and advance, or return an error
    pub(crate) fn expect(&mut self, expected: Token) -> ExprResult<()> {
        if self.current_token() == &expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error_expecting(&expected.to_string()))
        }
    }

    /// Build a syntax error anchored at the current token
    pub(crate) fn error_expecting(&self, expected: &str) -> ExprError {
        ExprError::Syntax {
            position: self.current_offset(),
            expected: expected.to_string(),
            found: self.current_token().to_string(),
        }
    }

    /// Resolve a placeholder name to its stable position, registering it on
    /// first sight
    pub(crate) fn placeholder_position(&mut self, name: &str) -> u32 {
        if let Some(pos) = self.placeholders.iter().position(|p| p == name) {
            pos as u32
        } else {
            self.placeholders.push(name.to_string());
            (self.placeholders.len() - 1) as u32
        }
    }

    fn expect_end(&self) -> ExprResult<()> {
        if matches!(self.current_token(), Token::Eof) {
            Ok(())
        } else {
            Err(self.error_expecting("end of expression"))
        }
    }

    /// Parse a complete expression
    pub fn parse(&mut self) -> ExprResult<Expr> {
        let expr = self.parse_expression()?;
        self.expect_end()?;
        Ok(expr)
    }

    /// Parse a projection expression: `expr [AS alias]`
    pub fn parse_projection(&mut self) -> ExprResult<Projection> {
        let source = self.parse_expression()?;

        let alias = if matches!(self.current_token(), Token::As) {
            self.advance();
            match self.current_token() {
                Token::Identifier(name) | Token::QuotedIdentifier(name) => {
                    let name = name.clone();
                    self.advance();
                    name
                }
                _ => return Err(self.error_expecting("an alias name after AS")),
            }
        } else {
            source.to_string()
        };

        self.expect_end()?;
        Ok(Projection { source, alias })
    }

    /// Parse a sort expression: `expr [ASC|DESC]`
    pub fn parse_sort(&mut self) -> ExprResult<SortExpr> {
        let expr = self.parse_expression()?;

        let direction = match self.current_token() {
            Token::Asc => {
                self.advance();
                Some(SortDirection::Asc)
            }
            Token::Desc => {
                self.advance();
                Some(SortDirection::Desc)
            }
            _ => None,
        };

        self.expect_end()?;
        Ok(SortExpr { expr, direction })
    }
}

/// Parse an expression string with default options (document mode)
pub fn parse(input: &str) -> ExprResult<ParseResult> {
    parse_with(input, &ParserOptions::default())
}

/// Parse an expression string with explicit options
pub fn parse_with(input: &str, options: &ParserOptions) -> ExprResult<ParseResult> {
    tracing::trace!(mode = ?options.mode, len = input.len(), "parsing expression");
    let mut parser = Parser::new(input, options)?;
    let output = parser.parse()?;

    Ok(ParseResult {
        input: input.to_string(),
        output,
        placeholders: parser.placeholders,
    })
}

/// Parse a projection expression (`expr [AS alias]`); the alias defaults to
/// the canonical textual form of the expression
pub fn parse_projection(input: &str, options: &ParserOptions) -> ExprResult<ParseResult<Projection>> {
    tracing::trace!(mode = ?options.mode, len = input.len(), "parsing projection");
    let mut parser = Parser::new(input, options)?;
    let output = parser.parse_projection()?;

    Ok(ParseResult {
        input: input.to_string(),
        output,
        placeholders: parser.placeholders,
    })
}

/// Parse a sort expression (`expr [ASC|DESC]`)
pub fn parse_sort(input: &str, options: &ParserOptions) -> ExprResult<ParseResult<SortExpr>> {
    tracing::trace!(mode = ?options.mode, len = input.len(), "parsing sort expression");
    let mut parser = Parser::new(input, options)?;
    let output = parser.parse_sort()?;

    Ok(ParseResult {
        input: input.to_string(),
        output,
        placeholders: parser.placeholders,
    })
}
