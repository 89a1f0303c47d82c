//! Expression evaluator and crash threshold

use crate::core::parser::{Expression, Parser};
use crate::core::{CalcError, CalcResult, CRASH_THRESHOLD};

/// Evaluator for `A+B` expressions
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    threshold: i32,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with the default crash threshold
    #[must_use]
    pub const fn new() -> Self {
        Self {
            threshold: CRASH_THRESHOLD,
        }
    }

    /// Creates an evaluator with a custom crash threshold
    #[must_use]
    pub const fn with_threshold(threshold: i32) -> Self {
        Self { threshold }
    }

    /// Returns the crash threshold
    #[must_use]
    pub const fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Adds the operands with 32-bit wraparound
    #[must_use]
    pub const fn evaluate(&self, expr: &Expression) -> i32 {
        expr.lhs.wrapping_add(expr.rhs)
    }

    /// Parses and evaluates raw input
    pub fn evaluate_bytes(&self, input: &[u8]) -> CalcResult<i32> {
        let expr = Parser::parse_bytes(input)?;
        Ok(self.evaluate(&expr))
    }

    /// Whether a result must crash the target
    #[must_use]
    pub const fn exceeds_threshold(&self, value: i32) -> bool {
        value > self.threshold
    }
}

/// Evaluates a line, reporting [`CalcError::SENTINEL`] when it has no operator
#[must_use]
pub fn job(input: &[u8]) -> i32 {
    Evaluator::new()
        .evaluate_bytes(input)
        .unwrap_or(CalcError::SENTINEL)
}
