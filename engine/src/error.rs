//! FILENAME: engine/src/error.rs
//! PURPOSE: Evaluation error taxonomy.
//! CONTEXT: Every failure kind is surfaced to the user identically (the
//! display shows "Error"), but the kinds stay distinguishable here so tests
//! and hosts can tell a syntax problem from a numeric one.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Malformed token stream, unknown name, or unresolvable parentheses.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A mathematically undefined operation for real-valued inputs,
    /// e.g. sqrt of a negative number or log of zero.
    #[error("domain error: {0}")]
    Domain(String),
}

impl From<parser::ParseError> for EvalError {
    fn from(err: parser::ParseError) -> Self {
        EvalError::Syntax(err.message)
    }
}
