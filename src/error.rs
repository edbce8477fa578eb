/*
    Error taxonomy
*/

use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by polynomial-number operations.
///
/// All failures are local and synchronous: the library performs no I/O,
/// so there is no transient-failure or retry semantics. Callers driving
/// the operator algebra from user input are expected to validate ranges
/// before invoking the operations that can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A leading coefficient violates the precondition of a series routine,
    /// or a transform was requested for an unsupported exponent.
    #[error("domain error in '{op}': {reason}")]
    Domain {
        /// The operation that rejected its input.
        op: &'static str,
        /// Why the input is outside the domain.
        reason: String,
    },

    /// Division by a zero polynomial number.
    #[error("division by zero")]
    DivisionByZero,

    /// The exponent rules out the requested operation: a fractional power
    /// of a PN with nonzero exponent, or an odd exponent under sqrt.
    #[error("invalid exponent {exponent} for '{op}'")]
    InvalidExponent {
        /// The rejected operation.
        op: &'static str,
        /// The offending PN exponent.
        exponent: i64,
    },

    /// Sampling or iterating a PN whose exponent is positive, which would
    /// require the leftward-infinite extension of the series.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A malformed literal; carries the offending substring.
    #[error("parse error at {input:?}: {reason}")]
    Parse {
        /// The substring that failed to parse.
        input: String,
        /// What was expected instead.
        reason: &'static str,
    },

    /// Digit backends without a compatible tolerance type cannot be
    /// compared for closeness.
    #[error("digit types cannot be compared")]
    TypeMismatch,

    /// An acknowledged capability gap, not a silent wrong answer.
    #[error("not implemented: {0}")]
    NotImplemented(String),
}
