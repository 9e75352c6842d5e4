use thiserror::Error;

/// Inputs that prevent a run from starting or continuing.
///
/// Algorithmic outcomes (iteration cap, non-finite state) are not errors; they
/// are reported through [`TerminationReason`](crate::TerminationReason).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BfgsError {
    /// The starting point has no components.
    #[error("starting point must have at least one component")]
    EmptyStart,

    /// The gradient callback returned a vector of the wrong length.
    #[error("gradient has {found} components, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A configuration value is out of range.
    #[error("invalid configuration `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

pub type BfgsResult<T> = Result<T, BfgsError>;
