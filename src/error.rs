//! Structured errors surfaced at the core's API boundary.
//!
//! None of these are retried internally: a failed operation leaves the receiving
//! structure in its previous state.

/// Errors produced by the geometric-graph core.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum CoreError {
    /// Fewer than the minimum required points/vertices, a coincident vertex insertion,
    /// or a labeled image with no foreground labels.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// An edge or node operation was rejected by a graph's admissibility flags
    /// (`CHECK_ON_INSERT`, `!SELF_CONNECTED`, `!MULTI_CONNECTED`, `!CYCLIC`, `TREE`).
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// A node or color lookup by value found nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Coloring ran out of available colors for some node (non-planar input, or
    /// `ncolors` too small for the graph's structure).
    #[error("coloring exhausted: {0}")]
    Exhausted(String),

    /// A caller-supplied argument violates a documented precondition (an odd or zero
    /// `n` passed to `fourier_features`, `ncolors == 0` passed to `colorize`, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias used throughout the crate.
pub type CoreResult<T> = Result<T, CoreError>;
