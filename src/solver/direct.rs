//! Dense direct solves of the interior system.
//! Grids in this domain are small, so an LU factorization with partial
//! pivoting is used as is, without iterative refinement or sparsity.

use crate::error::*;
use crate::util::*;
use nalgebra::linalg::LU;
use nalgebra::Dyn;

/// Smallest pivot magnitude accepted, relative to the largest pivot
/// and scaled by the matrix dimension.
fn pivot_tolerance(max_pivot: f64, n: usize) -> f64 {
    max_pivot * n as f64 * f64::EPSILON
}

fn check_square(matrix: &DMatrix<f64>) -> Result<usize> {
    let (rows, cols) = matrix.shape();
    if rows != cols || rows == 0 {
        return Err(Error::dimension_mismatch(
            "non-empty square matrix",
            format!("{rows}x{cols} matrix"),
        ));
    }
    Ok(rows)
}

fn check_rhs(n: usize, rhs: &DVector<f64>) -> Result<()> {
    if rhs.len() != n {
        return Err(Error::dimension_mismatch(
            format!("vector of length {n}"),
            format!("vector of length {}", rhs.len()),
        ));
    }
    Ok(())
}

/// LU factorization of a coefficient matrix,
/// reusable for any number of right hand sides.
pub struct FactoredSystem {
    lu: LU<f64, Dyn, Dyn>,
    n: usize,
}

impl FactoredSystem {
    pub fn new(matrix: DMatrix<f64>) -> Result<Self> {
        profiling::scope!("FactoredSystem::new");
        let n = check_square(&matrix)?;
        let lu = matrix.lu();

        let pivots = lu.u().diagonal().abs();
        let max_pivot = pivots.max();
        let min_pivot = pivots.min();
        // NaN pivots fail this comparison too.
        if !(min_pivot > pivot_tolerance(max_pivot, n)) {
            tracing::warn!(
                "rejecting singular {n}x{n} matrix, pivots in [{min_pivot:e}, {max_pivot:e}]"
            );
            return Err(Error::SingularMatrix { pivot: min_pivot });
        }

        tracing::debug!("factored {n}x{n} matrix");
        Ok(FactoredSystem { lu, n })
    }

    /// Number of unknowns.
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>> {
        profiling::scope!("FactoredSystem::solve");
        check_rhs(self.n, rhs)?;
        let x = self
            .lu
            .solve(rhs)
            .ok_or(Error::SingularMatrix { pivot: 0.0 })?;
        if x.iter().any(|v| !v.is_finite()) {
            return Err(Error::SingularMatrix { pivot: 0.0 });
        }
        Ok(x)
    }
}

/// Solve `matrix * x = rhs`.
pub fn solve(matrix: &DMatrix<f64>, rhs: &DVector<f64>) -> Result<DVector<f64>> {
    let n = check_square(matrix)?;
    check_rhs(n, rhs)?;
    FactoredSystem::new(matrix.clone())?.solve(rhs)
}
