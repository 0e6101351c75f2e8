//! Error taxonomy for the assembly and solve pipeline.
//!
//! Every failure is deterministic input validation, so nothing here is
//! retried. Errors are raised where the violation first becomes observable:
//! grid and boundary errors at construction, matrix errors at solve time.

use crate::boundary::BoundaryError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(
        "grid {nx}x{ny} has no interior nodes, both dimensions must be at \
         least {min}",
        min = crate::grid::MIN_DIVISIONS
    )]
    InvalidGrid { nx: usize, ny: usize },

    #[error(transparent)]
    InvalidBoundary(#[from] BoundaryError),

    #[error("coefficient matrix is singular (pivot magnitude {pivot:e})")]
    SingularMatrix { pivot: f64 },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },

    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to write vtk file: {0}")]
    Vtk(#[from] vtkio::Error),
}

impl Error {
    pub(crate) fn dimension_mismatch<E: ToString, F: ToString>(
        expected: E,
        found: F,
    ) -> Self {
        Error::DimensionMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// A failure while producing one frame of a steady-state sequence.
/// Carries the frame index so callers can decide whether to skip or abort.
#[derive(thiserror::Error, Debug)]
#[error("frame {frame} failed: {source}")]
pub struct FrameError {
    pub frame: usize,
    #[source]
    pub source: Error,
}
