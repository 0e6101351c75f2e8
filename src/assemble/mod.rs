//! Assembly of the linear system `A x = b` for the interior nodes.
//! The matrix only depends on the grid, the vector also on the
//! boundary values.

mod coefficient;
mod rhs;

pub use coefficient::*;
pub use rhs::*;
