//! Operator precedence chain for expression parsing.
//!
//! Precedence (lowest to highest binding):
//! 1. Boolean OR: `OR`, `||`
//! 2. Boolean AND: `AND`, `&&`
//! 3. Predicates: `IS`, `IN`, `LIKE`, `BETWEEN`, `REGEXP`, `OVERLAPS`
//! 4. Comparison: `==`, `!=`, `<`, `<=`, `>`, `>=`
//! 5. Bitwise: `&`, `|`, `^`
//! 6. Shift: `<<`, `>>`
//! 7. Additive: `+`, `-`
//! 8. Multiplicative: `*`, `/`, `DIV`, `%`
//! 9. Interval arithmetic: `+ INTERVAL n UNIT`, `- INTERVAL n UNIT`
//! 10. Atomic: literals, identifiers, function calls, grouping, `NOT`, `CAST`
//!
//! Every chain folds strictly left-to-right; a production without trailing
//! operators returns its base operand unchanged.

use crate::ast::{Expr, Scalar};
use crate::error::ExprResult;
use crate::lexer::Token;
use crate::parser::Parser;

/// Interval units accepted after `INTERVAL n`
const INTERVAL_UNITS: &[&str] = &[
    "MICROSECOND",
    "SECOND",
    "MINUTE",
    "HOUR",
    "DAY",
    "WEEK",
    "MONTH",
    "QUARTER",
    "YEAR",
    "SECOND_MICROSECOND",
    "MINUTE_MICROSECOND",
    "MINUTE_SECOND",
    "HOUR_MICROSECOND",
    "HOUR_SECOND",
    "HOUR_MINUTE",
    "DAY_MICROSECOND",
    "DAY_SECOND",
    "DAY_MINUTE",
    "DAY_HOUR",
    "YEAR_MONTH",
];

impl Parser {
    /// Parse a complete expression (OR is the loosest binding)
    pub(crate) fn parse_expression(&mut self) -> ExprResult<Expr> {
        self.parse_or_expression()
    }

    fn parse_or_expression(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_and_expression()?;

        while matches!(self.current_token(), Token::Or | Token::DoublePipe) {
            self.advance();
            let right = self.parse_and_expression()?;
            left = Expr::operator("||", vec![left, right]);
        }

        Ok(left)
    }

    fn parse_and_expression(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_predicate_expression()?;

        while matches!(self.current_token(), Token::And | Token::DoubleAmpersand) {
            self.advance();
            let right = self.parse_predicate_expression()?;
            left = Expr::operator("&&", vec![left, right]);
        }

        Ok(left)
    }

    pub(super) fn parse_comparison_expression(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_bitwise_expression()?;

        loop {
            let name = match self.current_token() {
                Token::Equal => "==",
                Token::NotEqual => "!=",
                Token::LessThan => "<",
                Token::LessThanEq => "<=",
                Token::GreaterThan => ">",
                Token::GreaterThanEq => ">=",
                _ => break,
            };
            self.advance();
            let right = self.parse_bitwise_expression()?;
            left = Expr::operator(name, vec![left, right]);
        }

        Ok(left)
    }

    fn parse_bitwise_expression(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_shift_expression()?;

        loop {
            let name = match self.current_token() {
                Token::Ampersand => "&",
                Token::Pipe => "|",
                Token::Caret => "^",
                _ => break,
            };
            self.advance();
            let right = self.parse_shift_expression()?;
            left = Expr::operator(name, vec![left, right]);
        }

        Ok(left)
    }

    fn parse_shift_expression(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_additive_expression()?;

        loop {
            let name = match self.current_token() {
                Token::LeftShift => "<<",
                Token::RightShift => ">>",
                _ => break,
            };
            self.advance();
            let right = self.parse_additive_expression()?;
            left = Expr::operator(name, vec![left, right]);
        }

        Ok(left)
    }

    pub(super) fn parse_additive_expression(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_multiplicative_expression()?;

        loop {
            let name = match self.current_token() {
                Token::Plus => "+",
                Token::Minus => "-",
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative_expression()?;
            left = Expr::operator(name, vec![left, right]);
        }

        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_interval_expression()?;

        loop {
            let name = match self.current_token() {
                Token::Star => "*",
                Token::Slash => "/",
                Token::Div => "div",
                Token::Percent => "%",
                _ => break,
            };
            self.advance();
            let right = self.parse_interval_expression()?;
            left = Expr::operator(name, vec![left, right]);
        }

        Ok(left)
    }

    /// Parse date arithmetic: `atomic ((+|-) INTERVAL amount UNIT)*`.
    ///
    /// A `+`/`-` is only consumed here when INTERVAL follows; otherwise it is
    /// left for the additive level. Chained intervals nest with the earliest
    /// interval innermost.
    fn parse_interval_expression(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_atomic_expression()?;

        loop {
            let name = match (self.current_token(), self.peek_token(1)) {
                (Token::Plus, Token::Interval) => "date_add",
                (Token::Minus, Token::Interval) => "date_sub",
                _ => break,
            };
            self.advance(); // consume the sign
            self.advance(); // consume INTERVAL

            let amount = self.parse_additive_expression()?;
            let unit = self.parse_interval_unit()?;

            left = Expr::operator(
                name,
                vec![left, amount, Expr::Literal(Scalar::String(unit))],
            );
        }

        Ok(left)
    }

    /// Parse an interval unit keyword, normalized to uppercase
    fn parse_interval_unit(&mut self) -> ExprResult<String> {
        if let Token::Identifier(name) = self.current_token() {
            let upper = name.to_uppercase();
            if INTERVAL_UNITS.contains(&upper.as_str()) {
                self.advance();
                return Ok(upper);
            }
        }
        Err(self.error_expecting("an interval unit (MICROSECOND, SECOND, MINUTE, HOUR, DAY, WEEK, MONTH, QUARTER or YEAR)"))
    }
}
