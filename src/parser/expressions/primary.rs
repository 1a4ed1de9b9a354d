//! Atomic expression parsing.
//!
//! Handles:
//! - Literals: integers, floats (with sign folding), strings, booleans, null
//! - Identifiers and document paths (mode-dependent)
//! - Function calls, optionally schema-qualified
//! - Named bind placeholders (:name)
//! - JSON array and object literals
//! - Parenthesized (grouped) expressions
//! - Unary NOT and CAST

use crate::ast::{Expr, FunctionName, Scalar};
use crate::error::ExprResult;
use crate::lexer::Token;
use crate::parser::{ParseMode, Parser};

impl Parser {
    /// Parse an atomic expression (highest precedence)
    pub(super) fn parse_atomic_expression(&mut self) -> ExprResult<Expr> {
        match self.current_token() {
            Token::Not | Token::Bang => {
                self.advance();
                let operand = self.parse_atomic_expression()?;
                Ok(Expr::operator("not", vec![operand]))
            }

            Token::Plus => self.parse_signed_literal(false),
            Token::Minus => self.parse_signed_literal(true),

            Token::Integer(raw) => {
                let raw = raw.clone();
                self.advance();
                Ok(Expr::Literal(self.classify_integer(&raw, false)))
            }
            Token::Float(raw) => {
                let raw = raw.clone();
                self.advance();
                let scalar = self.classify_float(&raw, false)?;
                Ok(Expr::Literal(scalar))
            }
            Token::Str(s) => {
                let s = s.clone();
                self.advance();
                Ok(Expr::Literal(Scalar::String(s)))
            }
            Token::True => {
                self.advance();
                Ok(Expr::Literal(Scalar::Bool(true)))
            }
            Token::False => {
                self.advance();
                Ok(Expr::Literal(Scalar::Bool(false)))
            }
            Token::Null => {
                self.advance();
                Ok(Expr::Literal(Scalar::Null))
            }

            Token::Colon => self.parse_placeholder(),

            Token::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(Token::RightParen)?;
                // Grouping is transparent; no node is introduced
                Ok(expr)
            }

            Token::LeftBracket => self.parse_array_expression(),
            Token::LeftBrace => self.parse_object_expression(),
            Token::Cast => self.parse_cast_expression(),

            Token::Dollar if self.mode == ParseMode::Document => self.parse_document_field(),

            Token::Identifier(_) | Token::QuotedIdentifier(_) => {
                if self.is_function_call() {
                    self.parse_function_call()
                } else {
                    self.parse_identifier_expression()
                }
            }

            _ => Err(self.error_expecting(
                "a literal, identifier, function call, placeholder, '(', '[', '{', CAST or NOT",
            )),
        }
    }

    /// A sign directly before a numeric literal folds into the literal
    fn parse_signed_literal(&mut self, negative: bool) -> ExprResult<Expr> {
        self.advance(); // consume the sign

        match self.current_token() {
            Token::Integer(raw) => {
                let raw = raw.clone();
                self.advance();
                Ok(Expr::Literal(self.classify_integer(&raw, negative)))
            }
            Token::Float(raw) => {
                let raw = raw.clone();
                self.advance();
                let scalar = self.classify_float(&raw, negative)?;
                Ok(Expr::Literal(scalar))
            }
            _ => Err(self.error_expecting("a numeric literal after the sign")),
        }
    }

    /// `:name`, resolved to a stable position within this parse call
    fn parse_placeholder(&mut self) -> ExprResult<Expr> {
        self.advance(); // consume ':'

        match self.current_token() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                let position = self.placeholder_position(&name);
                Ok(Expr::Placeholder(position))
            }
            _ => Err(self.error_expecting("a placeholder name after ':'")),
        }
    }

    /// True when the upcoming tokens form `name(` or `schema.name(`
    fn is_function_call(&self) -> bool {
        if !matches!(self.current_token(), Token::Identifier(_)) {
            return false;
        }
        if matches!(self.peek_token(1), Token::LeftParen) {
            return true;
        }
        matches!(self.peek_token(1), Token::Dot)
            && matches!(self.peek_token(2), Token::Identifier(_))
            && matches!(self.peek_token(3), Token::LeftParen)
    }

    fn parse_function_call(&mut self) -> ExprResult<Expr> {
        let first = match self.current_token() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                name
            }
            _ => return Err(self.error_expecting("a function name")),
        };

        let name = if matches!(self.current_token(), Token::Dot) {
            self.advance();
            match self.current_token() {
                Token::Identifier(func) => {
                    let func = func.clone();
                    self.advance();
                    FunctionName {
                        schema_name: Some(first),
                        name: func,
                    }
                }
                _ => return Err(self.error_expecting("a function name after '.'")),
            }
        } else {
            FunctionName {
                schema_name: None,
                name: first,
            }
        };

        self.expect(Token::LeftParen)?;

        let mut params = Vec::new();
        if !matches!(self.current_token(), Token::RightParen) {
            loop {
                params.push(self.parse_expression()?);
                if matches!(self.current_token(), Token::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RightParen)?;

        Ok(Expr::FunctionCall { name, params })
    }

    /// JSON array literal: `[expr, ...]`, possibly empty, nesting allowed
    fn parse_array_expression(&mut self) -> ExprResult<Expr> {
        self.advance(); // consume '['

        let mut elements = Vec::new();
        if !matches!(self.current_token(), Token::RightBracket) {
            loop {
                elements.push(self.parse_expression()?);
                if matches!(self.current_token(), Token::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RightBracket)?;

        Ok(Expr::Array(elements))
    }

    /// JSON object literal: `{'key': expr, ...}`. Key order is preserved and
    /// duplicate keys are kept as written.
    fn parse_object_expression(&mut self) -> ExprResult<Expr> {
        self.advance(); // consume '{'

        let mut pairs = Vec::new();
        if !matches!(self.current_token(), Token::RightBrace) {
            loop {
                let key = match self.current_token() {
                    Token::Str(key) => {
                        let key = key.clone();
                        self.advance();
                        key
                    }
                    _ => return Err(self.error_expecting("a quoted object key")),
                };

                self.expect(Token::Colon)?;
                let value = self.parse_expression()?;
                pairs.push((key, value));

                if matches!(self.current_token(), Token::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RightBrace)?;

        Ok(Expr::Object(pairs))
    }

    /// `CAST(expr AS type)`; the target type text is carried verbatim as an
    /// octets literal
    fn parse_cast_expression(&mut self) -> ExprResult<Expr> {
        self.advance(); // consume CAST
        self.expect(Token::LeftParen)?;

        let expr = self.parse_expression()?;
        self.expect(Token::As)?;
        let type_text = self.parse_cast_type()?;
        self.expect(Token::RightParen)?;

        Ok(Expr::operator(
            "cast",
            vec![expr, Expr::Literal(Scalar::Octets(type_text))],
        ))
    }

    /// Parse a cast target type, rebuilding its canonical uppercase text
    fn parse_cast_type(&mut self) -> ExprResult<String> {
        let word = match self.current_token() {
            Token::Identifier(name) => name.to_uppercase(),
            _ => return Err(self.error_expecting("a cast target type")),
        };

        match word.as_str() {
            "SIGNED" | "UNSIGNED" => {
                self.advance();
                if let Token::Identifier(next) = self.current_token() {
                    if next.eq_ignore_ascii_case("INTEGER") {
                        self.advance();
                        return Ok(format!("{word} INTEGER"));
                    }
                }
                Ok(word)
            }
            "CHAR" | "BINARY" => {
                self.advance();
                if matches!(self.current_token(), Token::LeftParen) {
                    self.advance();
                    let len = self.cast_type_digits()?;
                    self.expect(Token::RightParen)?;
                    Ok(format!("{word}({len})"))
                } else {
                    Ok(word)
                }
            }
            "DECIMAL" => {
                self.advance();
                if matches!(self.current_token(), Token::LeftParen) {
                    self.advance();
                    let precision = self.cast_type_digits()?;
                    let text = if matches!(self.current_token(), Token::Comma) {
                        self.advance();
                        let scale = self.cast_type_digits()?;
                        format!("DECIMAL({precision},{scale})")
                    } else {
                        format!("DECIMAL({precision})")
                    };
                    self.expect(Token::RightParen)?;
                    Ok(text)
                } else {
                    Ok(word)
                }
            }
            "TIME" | "DATE" | "DATETIME" | "JSON" => {
                self.advance();
                Ok(word)
            }
            _ => Err(self.error_expecting(
                "a cast target type (SIGNED, UNSIGNED, CHAR, BINARY, DECIMAL, TIME, DATE, DATETIME or JSON)",
            )),
        }
    }

    fn cast_type_digits(&mut self) -> ExprResult<String> {
        match self.current_token() {
            Token::Integer(raw) => {
                let raw = raw.clone();
                self.advance();
                Ok(raw)
            }
            _ => Err(self.error_expecting("a length")),
        }
    }
}
