use crate::boundary::*;
use crate::grid::*;
use crate::util::*;

/// Boundary contributions to each interior equation, in physical
/// orientation and before the sign flip.
///
/// Edge values are added, not written: an interior corner node borders two
/// edges and receives both values.
pub fn boundary_accumulator(
    grid: &GridSpec,
    bc: &BoundaryConditions,
) -> DMatrix<f64> {
    let bounds = grid.interior_bounds();
    let (rows, cols) = (bounds[0], bounds[1]);
    let mut acc = DMatrix::zeros(rows, cols);
    for v in acc.row_mut(0).iter_mut() {
        *v += bc.top();
    }
    for v in acc.row_mut(rows - 1).iter_mut() {
        *v += bc.bottom();
    }
    for v in acc.column_mut(0).iter_mut() {
        *v += bc.left();
    }
    for v in acc.column_mut(cols - 1).iter_mut() {
        *v += bc.right();
    }
    acc
}

/// Right hand side of the interior system.
///
/// Boundary neighbors move to the right hand side with a flipped sign.
/// The accumulator rows are flipped so the vector is ordered bottom row
/// first, matching the coefficient matrix.
pub fn build_rhs_vector(
    grid: &GridSpec,
    bc: &BoundaryConditions,
) -> DVector<f64> {
    profiling::scope!("build_rhs_vector");
    let acc = boundary_accumulator(grid, bc);
    DVector::from_fn(grid.unknowns(), |k, _| {
        let coord = grid.unknown_coord(k);
        -acc[(coord[0], coord[1])]
    })
}
