//! Calculator core: operand parsing and evaluation

pub mod evaluator;
pub mod parser;

/// Size of the line buffer; a line holds at most `INPUT_CAPACITY - 1` bytes
pub const INPUT_CAPACITY: usize = 65536;

/// Sums strictly greater than this trip the divide-by-zero crash
pub const CRASH_THRESHOLD: i32 = 1000;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// No `+` within the scanned prefix of the input
    MissingOperator,
}

impl CalcError {
    /// Value `job` reports instead of a sum when the input has no operator
    pub const SENTINEL: i32 = -1;
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingOperator => write!(f, "Missing '+' operator"),
        }
    }
}

impl std::error::Error for CalcError {}
