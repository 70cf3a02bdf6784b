//! Error types for the comparison engine.

use crate::tree::TreeVerdict;

/// Errors that can occur during a comparison.
///
/// Inputs that differ are never an error; a comparison that gives up early
/// because of its limits is not an error either. An error here means the
/// comparator broke one of its own invariants.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A tree comparison finished unequal without rendering any divergence.
    #[error("internal comparator error: tree comparison ended {verdict} but rendered nothing")]
    NothingRendered { verdict: TreeVerdict },
}

/// Convenience alias for comparison results.
pub type DiffResult<T> = Result<T, DiffError>;
