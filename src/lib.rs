//! Steady-state Laplace solver on a uniform 2D grid with constant
//! Dirichlet values on each of the four edges.
//!
//! The five-point stencil is assembled over the interior nodes into a
//! dense system `A x = b`, solved directly, and the solution is embedded
//! back into the full grid together with the boundary values.

pub mod assemble;
pub mod boundary;
pub mod cli;
pub mod csv;
pub mod error;
pub mod field;
pub mod grid;
pub mod image;
pub mod pipeline;
pub mod sequence;
pub mod solver;
pub mod stencil;
pub mod util;
pub mod vtk;
pub mod writer;

pub use assemble::{build_coefficient_matrix, build_rhs_vector, CoefficientCache};
pub use boundary::{BoundaryConditions, BoundaryError, Edge, EdgeAssignment};
pub use error::{Error, FrameError, Result};
pub use field::{reconstruct_field, Field, InteriorSolution};
pub use grid::GridSpec;
pub use pipeline::{solve_steady_state, solve_steady_state_cached, SteadyStateSolver};
pub use sequence::{generate_sequence, Frame, SteadyStateSequence};
pub use solver::{solve, FactoredSystem};
