//! Literal classification: choosing the exact wire type for a lexeme.
//!
//! - Float lexemes with more than 7 fractional digits become `Double`,
//!   otherwise `Float`.
//! - Integer lexemes beyond the 64-bit range fall back to a string scalar
//!   holding the decimal digits; this preserves precision and is not an
//!   error.

use crate::ast::Scalar;
use crate::error::ExprResult;
use crate::parser::Parser;

/// Fractional digits that still fit a single-precision float
const MAX_FLOAT_FRACTION_DIGITS: usize = 7;

impl Parser {
    /// Classify an integer lexeme, applying an optional leading sign
    pub(crate) fn classify_integer(&self, lexeme: &str, negative: bool) -> Scalar {
        if negative {
            let text = format!("-{lexeme}");
            match text.parse::<i64>() {
                Ok(n) => Scalar::SInt(n),
                Err(_) => Scalar::String(text),
            }
        } else {
            match lexeme.parse::<u64>() {
                Ok(n) => Scalar::UInt(n),
                Err(_) => Scalar::String(lexeme.to_string()),
            }
        }
    }

    /// Classify a float lexeme, applying an optional leading sign
    pub(crate) fn classify_float(&self, lexeme: &str, negative: bool) -> ExprResult<Scalar> {
        if fraction_digits(lexeme) > MAX_FLOAT_FRACTION_DIGITS {
            let value: f64 = lexeme
                .parse()
                .map_err(|_| self.error_expecting("a floating-point literal"))?;
            Ok(Scalar::Double(if negative { -value } else { value }))
        } else {
            let value: f32 = lexeme
                .parse()
                .map_err(|_| self.error_expecting("a floating-point literal"))?;
            Ok(Scalar::Float(if negative { -value } else { value }))
        }
    }
}

/// Count the digits between the decimal point and the exponent marker
fn fraction_digits(lexeme: &str) -> usize {
    let Some(dot) = lexeme.find('.') else {
        return 0;
    };
    lexeme[dot + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserOptions;

    fn parser() -> Parser {
        Parser::new("", &ParserOptions::default()).unwrap()
    }

    #[test]
    fn test_integer_in_range() {
        let p = parser();
        assert_eq!(p.classify_integer("42", false), Scalar::UInt(42));
        assert_eq!(p.classify_integer("42", true), Scalar::SInt(-42));
        assert_eq!(p.classify_integer("0", false), Scalar::UInt(0));
    }

    #[test]
    fn test_integer_range_boundaries() {
        let p = parser();
        assert_eq!(
            p.classify_integer("18446744073709551615", false),
            Scalar::UInt(u64::MAX)
        );
        assert_eq!(
            p.classify_integer("9223372036854775808", true),
            Scalar::SInt(i64::MIN)
        );
    }

    #[test]
    fn test_integer_overflow_falls_back_to_string() {
        let p = parser();
        assert_eq!(
            p.classify_integer("18446744073709551616", false),
            Scalar::String("18446744073709551616".to_string())
        );
        assert_eq!(
            p.classify_integer("9223372036854775809", true),
            Scalar::String("-9223372036854775809".to_string())
        );
    }

    #[test]
    fn test_float_fraction_digit_threshold() {
        let p = parser();
        // 7 fractional digits: single precision
        assert_eq!(
            p.classify_float("0.1234567", false).unwrap(),
            Scalar::Float(0.123_456_7)
        );
        // 8 fractional digits: double precision
        assert_eq!(
            p.classify_float("0.12345678", false).unwrap(),
            Scalar::Double(0.123_456_78)
        );
    }

    #[test]
    fn test_float_exponent_without_fraction() {
        let p = parser();
        assert_eq!(p.classify_float("1e3", false).unwrap(), Scalar::Float(1e3));
    }

    #[test]
    fn test_float_sign() {
        let p = parser();
        assert_eq!(
            p.classify_float("1.5", true).unwrap(),
            Scalar::Float(-1.5)
        );
    }
}
