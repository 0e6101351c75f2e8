mod indexing;
pub use indexing::*;

pub use nalgebra::{matrix, vector, DMatrix, DVector};

/// Row, column coordinate into a row-major 2D buffer.
pub type Coord = nalgebra::Vector2<usize>;

/// Signed row, column offset of a stencil neighbor.
pub type Offset = nalgebra::Vector2<i32>;

/// One value per stencil neighbor.
pub type Values<const NEIGHBORHOOD_SIZE: usize> =
    nalgebra::SVector<f64, { NEIGHBORHOOD_SIZE }>;
