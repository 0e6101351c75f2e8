use crate::assemble::*;
use crate::boundary::*;
use crate::error::*;
use crate::field::*;
use crate::grid::*;
use crate::solver::*;
use crate::util::DMatrix;

/// Steady-state solver for one grid.
///
/// The coefficient matrix is assembled and factored once,
/// after which any number of boundary sets can be solved.
/// Read-only after construction, so it can be shared across threads.
pub struct SteadyStateSolver {
    grid: GridSpec,
    system: FactoredSystem,
}

impl SteadyStateSolver {
    pub fn new(grid: GridSpec) -> Result<Self> {
        Self::factor(grid, build_coefficient_matrix(&grid))
    }

    /// Use an already built coefficient matrix.
    /// The factorization works on its own copy.
    pub fn from_matrix(grid: GridSpec, matrix: &DMatrix<f64>) -> Result<Self> {
        Self::factor(grid, matrix.clone())
    }

    /// Build from the matrix memoized in `cache`,
    /// assembling it first if this grid was never seen.
    pub fn with_cache(grid: GridSpec, cache: &CoefficientCache) -> Result<Self> {
        Self::from_matrix(grid, &cache.get(&grid))
    }

    fn factor(grid: GridSpec, matrix: DMatrix<f64>) -> Result<Self> {
        if matrix.nrows() != grid.unknowns() {
            return Err(Error::dimension_mismatch(
                format!("{n}x{n} matrix for grid {grid}", n = grid.unknowns()),
                format!("{}x{} matrix", matrix.nrows(), matrix.ncols()),
            ));
        }
        let system = FactoredSystem::new(matrix)?;
        Ok(SteadyStateSolver { grid, system })
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Interior values for one boundary set.
    pub fn solve_interior(
        &self,
        bc: &BoundaryConditions,
    ) -> Result<InteriorSolution> {
        let rhs = build_rhs_vector(&self.grid, bc);
        let x = self.system.solve(&rhs)?;
        InteriorSolution::from_solution_vector(&self.grid, &x)
    }

    pub fn solve(&self, bc: &BoundaryConditions) -> Result<Field> {
        profiling::scope!("SteadyStateSolver::solve");
        let interior = self.solve_interior(bc)?;
        reconstruct_field(&interior, &self.grid, bc)
    }
}

/// Assemble, solve and reconstruct in one call.
pub fn solve_steady_state(
    grid: &GridSpec,
    bc: &BoundaryConditions,
) -> Result<Field> {
    SteadyStateSolver::new(*grid)?.solve(bc)
}

/// [`solve_steady_state`] reusing the coefficient matrix of earlier
/// calls on the same grid.
pub fn solve_steady_state_cached(
    grid: &GridSpec,
    bc: &BoundaryConditions,
    cache: &CoefficientCache,
) -> Result<Field> {
    SteadyStateSolver::with_cache(*grid, cache)?.solve(bc)
}
