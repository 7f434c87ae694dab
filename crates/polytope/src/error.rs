//! Error types for polytope construction and conversion.

use thiserror::Error;

/// Failure modes of construction, conversion, and minimization.
///
/// All variants are deterministic input-validity failures; nothing here is
/// transient or retryable. Operations that return an error leave the store
/// in its prior valid state.
#[derive(Debug, Error)]
pub enum PolytopeError {
    /// Conflicting or incomplete constructor arguments.
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),

    /// An operand has a dimension different from the ambient dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The half-space system has no interior (Chebyshev LP infeasible or
    /// radius non-positive); vertex enumeration cannot proceed.
    #[error("polytope is empty or has no interior")]
    EmptyPolytope,

    /// Input does not span full affine dimension, or describes an unbounded
    /// region where a bounded one is required.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

pub type Result<T> = std::result::Result<T, PolytopeError>;
