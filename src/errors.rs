//! Shared error types used across submodules.

use thiserror::Error;

/// Top-level error type for the crate.
///
/// Every variant aborts the whole extraction; there is no partial result.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// A conductor specification cannot be meshed.
    #[error("invalid geometry for conductor {conductor}: {reason}")]
    InvalidGeometry {
        /// Index of the offending conductor (0 is the return conductor).
        conductor: usize,
        /// Human-readable cause.
        reason: String,
    },
    /// Mesh or matrix storage could not be obtained.
    #[error("cannot allocate storage for {rows}x{cols} elements")]
    AllocationFailure {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// The system cannot be inverted: an exactly zero pivot, or a geometry
    /// whose filaments have no conducting area.
    #[error("singular matrix during {stage}: {reason}")]
    SingularMatrix {
        /// Pipeline stage that hit the singularity.
        stage: &'static str,
        /// Human-readable cause.
        reason: String,
    },
    /// Raised when an input document is malformed.
    #[error("configuration error: {0}")]
    Config(String),
    /// Wraps I/O failures of the configuration and report surfaces.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, ExtractionError>;

impl ExtractionError {
    pub(crate) fn geometry(conductor: usize, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            conductor,
            reason: reason.into(),
        }
    }
}
