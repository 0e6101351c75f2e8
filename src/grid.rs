use crate::error::*;
use crate::util::*;

/// Smallest number of divisions per axis that leaves an interior node.
pub const MIN_DIVISIONS: usize = 3;

/// Uniform rectangular grid with `nx` divisions along the row axis
/// (top to bottom) and `ny` divisions along the column axis (left to right).
///
/// The full grid has `(nx + 1) x (ny + 1)` nodes, the outermost ring
/// being the boundary. The remaining `(nx - 1) x (ny - 1)` nodes are
/// the unknowns of the linear system.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridSpec {
    nx: usize,
    ny: usize,
}

impl std::fmt::Display for GridSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.nx, self.ny)
    }
}

impl GridSpec {
    pub fn new(nx: usize, ny: usize) -> Result<Self> {
        if nx < MIN_DIVISIONS || ny < MIN_DIVISIONS {
            return Err(Error::InvalidGrid { nx, ny });
        }
        Ok(GridSpec { nx, ny })
    }

    pub fn square(n: usize) -> Result<Self> {
        Self::new(n, n)
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Exclusive bounds of the interior, `(nx - 1, ny - 1)`.
    pub fn interior_bounds(&self) -> Coord {
        vector![self.nx - 1, self.ny - 1]
    }

    /// Exclusive bounds of the full grid, `(nx + 1, ny + 1)`.
    pub fn full_bounds(&self) -> Coord {
        vector![self.nx + 1, self.ny + 1]
    }

    /// Number of unknowns in the linear system.
    pub fn unknowns(&self) -> usize {
        buffer_size(&self.interior_bounds())
    }

    /// Position in the solution vector of the interior node at `coord`.
    ///
    /// `coord` is in physical orientation, row 0 being adjacent to the top
    /// edge. The solution vector is ordered bottom row first, so rows are
    /// flipped before flattening.
    pub fn unknown_index(&self, coord: &Coord) -> usize {
        let bounds = self.interior_bounds();
        coord_to_linear(&flip_rows(coord, &bounds), &bounds)
    }

    /// Inverse of [`GridSpec::unknown_index`].
    pub fn unknown_coord(&self, index: usize) -> Coord {
        let bounds = self.interior_bounds();
        flip_rows(&linear_to_coord(index, &bounds), &bounds)
    }
}
