//! `A+B` operand parser
//!
//! Operands use C `atoi` conversion, so junk around the digits is tolerated
//! rather than rejected. Only a missing operator is an error.

use crate::core::{CalcError, CalcResult, INPUT_CAPACITY};

/// A parsed `lhs+rhs` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    /// Operand before the operator
    pub lhs: i32,
    /// Operand after the operator
    pub rhs: i32,
}

impl Expression {
    /// Creates a new expression
    #[must_use]
    pub const fn new(lhs: i32, rhs: i32) -> Self {
        Self { lhs, rhs }
    }
}

/// Parser for single-operator addition lines
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    /// The only operator understood
    pub const OPERATOR: u8 = b'+';

    /// Parses raw input bytes.
    ///
    /// The first `+` within the first [`INPUT_CAPACITY`] bytes splits the
    /// operands.
    pub fn parse_bytes(input: &[u8]) -> CalcResult<Expression> {
        let scanned = &input[..input.len().min(INPUT_CAPACITY)];
        let idx = scanned
            .iter()
            .position(|&b| b == Self::OPERATOR)
            .ok_or(CalcError::MissingOperator)?;

        Ok(Expression {
            lhs: atoi(&input[..idx]),
            rhs: atoi(&input[idx + 1..]),
        })
    }

    /// Parses a string
    pub fn parse_str(input: &str) -> CalcResult<Expression> {
        Self::parse_bytes(input.as_bytes())
    }
}

const fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// C `atoi`: leading whitespace, optional sign, then digits up to the first
/// non-digit.
///
/// Accumulates in 64 bits with saturation, like `strtol`, then truncates to
/// 32 bits. No digits yields 0.
#[must_use]
pub fn atoi(bytes: &[u8]) -> i32 {
    let mut rest = bytes;
    while let [b, tail @ ..] = rest {
        if !is_c_space(*b) {
            break;
        }
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    let mut acc: i64 = 0;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i64::from(b - b'0');
        acc = acc.saturating_mul(10);
        acc = if negative {
            acc.saturating_sub(digit)
        } else {
            acc.saturating_add(digit)
        };
    }

    acc as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== atoi tests =====

    #[test]
    fn test_atoi_plain() {
        assert_eq!(atoi(b"123"), 123);
        assert_eq!(atoi(b"0"), 0);
    }

    #[test]
    fn test_atoi_signs() {
        assert_eq!(atoi(b"-42"), -42);
        assert_eq!(atoi(b"+7"), 7);
        assert_eq!(atoi(b"--7"), 0);
    }

    #[test]
    fn test_atoi_leading_whitespace() {
        assert_eq!(atoi(b" \t\x0b\x0c\r\n  15"), 15);
    }

    #[test]
    fn test_atoi_stops_at_non_digit() {
        assert_eq!(atoi(b"12abc34"), 12);
        assert_eq!(atoi(b"8\n"), 8);
        assert_eq!(atoi(b"- 3"), 0);
    }

    #[test]
    fn test_atoi_no_digits() {
        assert_eq!(atoi(b""), 0);
        assert_eq!(atoi(b"abc"), 0);
        assert_eq!(atoi(b"-"), 0);
    }

    #[test]
    fn test_atoi_truncates_to_32_bits() {
        assert_eq!(atoi(b"2147483647"), i32::MAX);
        assert_eq!(atoi(b"2147483648"), i32::MIN);
        assert_eq!(atoi(b"4294967297"), 1);
    }

    #[test]
    fn test_atoi_saturates_before_truncating() {
        // i64::MAX truncates to -1, i64::MIN to 0
        assert_eq!(atoi(b"99999999999999999999999"), -1);
        assert_eq!(atoi(b"-99999999999999999999999"), 0);
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_simple() {
        assert_eq!(Parser::parse_str("1+2"), Ok(Expression::new(1, 2)));
    }

    #[test]
    fn test_parse_with_newline() {
        assert_eq!(Parser::parse_str("40+2\n"), Ok(Expression::new(40, 2)));
    }

    #[test]
    fn test_parse_splits_on_first_operator() {
        assert_eq!(Parser::parse_str("1+2+3"), Ok(Expression::new(1, 2)));
    }

    #[test]
    fn test_parse_signed_rhs() {
        assert_eq!(Parser::parse_str("5++3"), Ok(Expression::new(5, 3)));
        assert_eq!(Parser::parse_str("5+-3"), Ok(Expression::new(5, -3)));
    }

    #[test]
    fn test_parse_empty_operands() {
        assert_eq!(Parser::parse_str("+"), Ok(Expression::new(0, 0)));
        assert_eq!(Parser::parse_str("x+y"), Ok(Expression::new(0, 0)));
    }

    #[test]
    fn test_parse_missing_operator() {
        assert_eq!(Parser::parse_str("12"), Err(CalcError::MissingOperator));
        assert_eq!(Parser::parse_str(""), Err(CalcError::MissingOperator));
    }

    #[test]
    fn test_parse_non_utf8_bytes() {
        assert_eq!(
            Parser::parse_bytes(b"\xff9+\xfe1"),
            Ok(Expression::new(0, 0))
        );
        assert_eq!(Parser::parse_bytes(b"9+1\xff"), Ok(Expression::new(9, 1)));
    }

    #[test]
    fn test_parse_operator_beyond_capacity_ignored() {
        let mut input = vec![b'1'; INPUT_CAPACITY];
        input.extend_from_slice(b"+1");
        assert_eq!(
            Parser::parse_bytes(&input),
            Err(CalcError::MissingOperator)
        );
    }

    #[test]
    fn test_parse_operator_at_last_scanned_byte() {
        let mut input = vec![b' '; INPUT_CAPACITY - 1];
        input.push(b'+');
        input.extend_from_slice(b"9");
        assert_eq!(Parser::parse_bytes(&input), Ok(Expression::new(0, 9)));
    }
}
