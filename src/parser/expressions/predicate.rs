//! Predicate productions: `IS`, `IN`, `LIKE`, `BETWEEN`, `REGEXP` and
//! `OVERLAPS`, each optionally negated with a leading `NOT`.
//!
//! Negation always renames the operator (`in` -> `not_in`, `between` ->
//! `between_not`, ...); it never wraps the operands. `IN` distinguishes a
//! parenthesized value list (`in`, flattened params) from a bare right-hand
//! expression (`cont_in`, containment). When no predicate form matches, the
//! production falls through to the comparison level unchanged.

use crate::ast::{Expr, Scalar};
use crate::error::ExprResult;
use crate::lexer::Token;
use crate::parser::Parser;

impl Parser {
    pub(super) fn parse_predicate_expression(&mut self) -> ExprResult<Expr> {
        let left = self.parse_comparison_expression()?;

        let negated = if matches!(self.current_token(), Token::Not)
            && matches!(
                self.peek_token(1),
                Token::In | Token::Like | Token::Between | Token::Regexp | Token::Overlaps
            ) {
            self.advance(); // consume NOT
            true
        } else {
            false
        };

        match self.current_token() {
            Token::Is if !negated => self.parse_is_predicate(left),
            Token::In => self.parse_in_predicate(left, negated),
            Token::Like => self.parse_like_predicate(left, negated),
            Token::Between => self.parse_between_predicate(left, negated),
            Token::Regexp => {
                self.advance();
                let right = self.parse_comparison_expression()?;
                Ok(Expr::operator(
                    if negated { "not_regexp" } else { "regexp" },
                    vec![left, right],
                ))
            }
            Token::Overlaps => {
                self.advance();
                let right = self.parse_comparison_expression()?;
                Ok(Expr::operator(
                    if negated { "not_overlaps" } else { "overlaps" },
                    vec![left, right],
                ))
            }
            _ => Ok(left),
        }
    }

    /// `X IS [NOT] {NULL|TRUE|FALSE}`
    fn parse_is_predicate(&mut self, left: Expr) -> ExprResult<Expr> {
        self.advance(); // consume IS

        let negated = if matches!(self.current_token(), Token::Not) {
            self.advance();
            true
        } else {
            false
        };

        let literal = match self.current_token() {
            Token::Null => Scalar::Null,
            Token::True => Scalar::Bool(true),
            Token::False => Scalar::Bool(false),
            _ => return Err(self.error_expecting("NULL, TRUE or FALSE")),
        };
        self.advance();

        Ok(Expr::operator(
            if negated { "is_not" } else { "is" },
            vec![left, Expr::Literal(literal)],
        ))
    }

    /// `X [NOT] IN (a, b, ...)` or `X [NOT] IN Y`
    fn parse_in_predicate(&mut self, left: Expr, negated: bool) -> ExprResult<Expr> {
        self.advance(); // consume IN

        if matches!(self.current_token(), Token::LeftParen) {
            self.advance();

            let mut params = vec![left];
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

            Ok(Expr::operator(
                if negated { "not_in" } else { "in" },
                params,
            ))
        } else {
            let right = self.parse_comparison_expression()?;
            Ok(Expr::operator(
                if negated { "not_cont_in" } else { "cont_in" },
                vec![left, right],
            ))
        }
    }

    /// `X [NOT] LIKE Y [ESCAPE Z]`; the escape character is a flat third
    /// parameter
    fn parse_like_predicate(&mut self, left: Expr, negated: bool) -> ExprResult<Expr> {
        self.advance(); // consume LIKE

        let pattern = self.parse_comparison_expression()?;
        let mut params = vec![left, pattern];

        if matches!(self.current_token(), Token::Escape) {
            self.advance();
            params.push(self.parse_comparison_expression()?);
        }

        Ok(Expr::operator(
            if negated { "not_like" } else { "like" },
            params,
        ))
    }

    /// `X [NOT] BETWEEN A AND B`
    fn parse_between_predicate(&mut self, left: Expr, negated: bool) -> ExprResult<Expr> {
        self.advance(); // consume BETWEEN

        let low = self.parse_comparison_expression()?;
        self.expect(Token::And)?;
        let high = self.parse_comparison_expression()?;

        Ok(Expr::operator(
            if negated { "between_not" } else { "between" },
            vec![left, low, high],
        ))
    }
}
