//! Solved interior values and the full field including the boundary.

use crate::boundary::*;
use crate::error::*;
use crate::grid::*;
use crate::stencil::*;
use crate::util::*;

/// Interior values in physical orientation, row 0 next to the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct InteriorSolution {
    values: DMatrix<f64>,
}

impl InteriorSolution {
    /// Reshape a solution vector (bottom row first) into the interior grid.
    pub fn from_solution_vector(
        grid: &GridSpec,
        solution: &DVector<f64>,
    ) -> Result<Self> {
        if solution.len() != grid.unknowns() {
            return Err(Error::dimension_mismatch(
                format!("{} interior values for grid {grid}", grid.unknowns()),
                solution.len(),
            ));
        }
        let bounds = grid.interior_bounds();
        let values = DMatrix::from_fn(bounds[0], bounds[1], |r, c| {
            solution[grid.unknown_index(&vector![r, c])]
        });
        Ok(InteriorSolution { values })
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn get(&self, coord: &Coord) -> f64 {
        self.values[(coord[0], coord[1])]
    }
}

impl std::fmt::Display for InteriorSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.values)
    }
}

/// Full `(nx + 1) x (ny + 1)` grid, boundary rows and columns included.
/// Row 0 is the top edge, column 0 the left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    values: DMatrix<f64>,
}

impl Field {
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn into_values(self) -> DMatrix<f64> {
        self.values
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    /// Exclusive bounds, `(rows, cols)`.
    pub fn bounds(&self) -> Coord {
        vector![self.rows(), self.cols()]
    }

    pub fn get(&self, coord: &Coord) -> f64 {
        self.values[(coord[0], coord[1])]
    }

    /// Smallest and largest value in the field.
    pub fn range(&self) -> (f64, f64) {
        (self.values.min(), self.values.max())
    }

    /// Largest magnitude of `stencil` applied at any interior node.
    /// For the Laplace stencil this is zero up to rounding
    /// for a solved field.
    pub fn stencil_residual<const NEIGHBORHOOD_SIZE: usize>(
        &self,
        stencil: &Stencil<NEIGHBORHOOD_SIZE>,
    ) -> f64 {
        let bounds = self.bounds();
        let mut worst: f64 = 0.0;
        for r in 1..bounds[0] - 1 {
            for c in 1..bounds[1] - 1 {
                let coord = vector![r, c];
                let mut args = Values::<NEIGHBORHOOD_SIZE>::zeros();
                for (i, offset) in stencil.offsets().iter().enumerate() {
                    if let Some(n) = offset_coord(&coord, offset, &bounds) {
                        args[i] = self.get(&n);
                    }
                }
                worst = worst.max(stencil.apply(&args).abs());
            }
        }
        worst
    }
}

/// Embed the interior solution and the boundary values into a full grid.
///
/// Edges are written top, bottom, left, right, so the four corner cells
/// hold the left and right values.
pub fn reconstruct_field(
    interior: &InteriorSolution,
    grid: &GridSpec,
    bc: &BoundaryConditions,
) -> Result<Field> {
    let interior_bounds = grid.interior_bounds();
    let shape = interior.values().shape();
    if shape != (interior_bounds[0], interior_bounds[1]) {
        return Err(Error::dimension_mismatch(
            format!("{}x{} interior", interior_bounds[0], interior_bounds[1]),
            format!("{}x{} interior", shape.0, shape.1),
        ));
    }

    let bounds = grid.full_bounds();
    let (rows, cols) = (bounds[0], bounds[1]);
    let mut values = DMatrix::zeros(rows, cols);
    for edge in Edge::ALL {
        let v = bc.get(edge);
        match edge {
            Edge::Top => values.row_mut(0).fill(v),
            Edge::Bottom => values.row_mut(rows - 1).fill(v),
            Edge::Left => values.column_mut(0).fill(v),
            Edge::Right => values.column_mut(cols - 1).fill(v),
        }
    }
    values
        .view_mut((1, 1), (rows - 2, cols - 2))
        .copy_from(interior.values());
    Ok(Field { values })
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn border_coords(bounds: Coord) -> impl Iterator<Item = Coord> {
        coord_iter(bounds).filter(move |c| {
            c[0] == 0 || c[1] == 0 || c[0] == bounds[0] - 1 || c[1] == bounds[1] - 1
        })
    }

    #[test]
    fn reshape_flips_rows() {
        let g = GridSpec::new(4, 3).unwrap();
        // 3x2 interior, stored bottom row first.
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let interior = InteriorSolution::from_solution_vector(&g, &x).unwrap();
        let expected = DMatrix::from_row_slice(3, 2, &[5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
        assert_eq!(interior.values(), &expected);

        let short = DVector::from_vec(vec![1.0, 2.0]);
        assert!(matches!(
            InteriorSolution::from_solution_vector(&g, &short),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn reconstruct_layout() {
        let g = GridSpec::new(4, 3).unwrap();
        let bc = BoundaryConditions::new(1.0, 2.0, 3.0, 4.0).unwrap();
        let x = DVector::from_vec(vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        let interior = InteriorSolution::from_solution_vector(&g, &x).unwrap();
        let field = reconstruct_field(&interior, &g, &bc).unwrap();
        #[rustfmt::skip]
        let expected = DMatrix::from_row_slice(5, 4, &[
            3.0,  1.0,  1.0, 4.0,
            3.0, 14.0, 15.0, 4.0,
            3.0, 12.0, 13.0, 4.0,
            3.0, 10.0, 11.0, 4.0,
            3.0,  2.0,  2.0, 4.0,
        ]);
        assert_eq!(field.values(), &expected);
        assert_eq!(field.bounds(), g.full_bounds());
    }

    #[test]
    fn border_reproduces_boundary_values() {
        let g = GridSpec::new(5, 7).unwrap();
        for (t, b, l, r) in [
            (100.0, 0.0, 50.0, 50.0),
            (-1.5, 2.25, 0.0, 1e6),
            (7.0, 7.0, 7.0, 7.0),
        ] {
            let bc = BoundaryConditions::new(t, b, l, r).unwrap();
            let x = DVector::from_element(g.unknowns(), 123.0);
            let interior = InteriorSolution::from_solution_vector(&g, &x).unwrap();
            let field = reconstruct_field(&interior, &g, &bc).unwrap();
            let bounds = field.bounds();
            for c in border_coords(bounds) {
                let expected = if c[1] == 0 {
                    l
                } else if c[1] == bounds[1] - 1 {
                    r
                } else if c[0] == 0 {
                    t
                } else {
                    b
                };
                assert_eq!(field.get(&c), expected, "{:?}", c);
            }
        }
    }

    #[test]
    fn rejects_wrong_interior_shape() {
        let g = GridSpec::new(4, 4).unwrap();
        let other = GridSpec::new(5, 4).unwrap();
        let bc = BoundaryConditions::uniform(0.0).unwrap();
        let x = DVector::zeros(other.unknowns());
        let interior = InteriorSolution::from_solution_vector(&other, &x).unwrap();
        assert!(matches!(
            reconstruct_field(&interior, &g, &bc),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn residual_of_linear_field() {
        // Linear fields are harmonic.
        let g = GridSpec::new(4, 5).unwrap();
        let bc = BoundaryConditions::uniform(0.0).unwrap();
        let x = DVector::zeros(g.unknowns());
        let interior = InteriorSolution::from_solution_vector(&g, &x).unwrap();
        let mut field = reconstruct_field(&interior, &g, &bc).unwrap();
        field.values = DMatrix::from_fn(5, 6, |r, c| 2.0 * r as f64 - c as f64);
        let stencil = crate::stencil::standard_stencils::laplace_2d();
        assert_approx_eq!(f64, field.stencil_residual(&stencil), 0.0);

        field.values[(2, 2)] += 1.0;
        assert_approx_eq!(f64, field.stencil_residual(&stencil), 4.0);
    }
}
