use crate::grid::*;
use crate::stencil::standard_stencils::laplace_2d;
use crate::stencil::*;
use crate::util::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Assemble the matrix of a linear stencil over the interior nodes.
///
/// Rows and columns follow the solution vector ordering,
/// stencil offsets are in physical (row, column) orientation.
/// Neighbors that fall on the boundary are skipped,
/// their contribution belongs to the right hand side.
pub fn assemble_stencil_matrix<const NEIGHBORHOOD_SIZE: usize>(
    grid: &GridSpec,
    stencil: &Stencil<NEIGHBORHOOD_SIZE>,
) -> DMatrix<f64> {
    profiling::scope!("assemble_stencil_matrix");
    let n = grid.unknowns();
    let bounds = grid.interior_bounds();
    let mut matrix = DMatrix::zeros(n, n);
    for row in 0..n {
        let coord = grid.unknown_coord(row);
        for (offset, weight) in stencil.neighbors() {
            if let Some(neighbor) = offset_coord(&coord, offset, &bounds) {
                matrix[(row, grid.unknown_index(&neighbor))] += weight;
            }
        }
    }
    matrix
}

/// The five-point Laplacian over all interior nodes of `grid`.
///
/// Block tridiagonal: `nx - 1` diagonal blocks of size `ny - 1`,
/// each with -4 on the diagonal and 1 next to it,
/// and identity blocks at offset `ny - 1` coupling adjacent rows.
/// Only depends on the grid, never on boundary values.
pub fn build_coefficient_matrix(grid: &GridSpec) -> DMatrix<f64> {
    tracing::debug!(
        "building {n}x{n} coefficient matrix for grid {grid}",
        n = grid.unknowns()
    );
    assemble_stencil_matrix(grid, &laplace_2d())
}

/// Memoized coefficient matrices keyed by grid.
///
/// Matrices are handed out behind an `Arc` and never modified once built,
/// so they can be shared across threads solving different frames.
#[derive(Default)]
pub struct CoefficientCache {
    matrices: Mutex<HashMap<GridSpec, Arc<DMatrix<f64>>>>,
}

impl CoefficientCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, grid: &GridSpec) -> Arc<DMatrix<f64>> {
        let mut matrices = match self.matrices.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        matrices
            .entry(*grid)
            .or_insert_with(|| Arc::new(build_coefficient_matrix(grid)))
            .clone()
    }

    pub fn len(&self) -> usize {
        match self.matrices.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
