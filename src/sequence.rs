//! A time ordered series of independent steady-state solves.
//!
//! Frame `s` scales every initial edge value by `cos(s)`, `s` being the
//! integer frame index taken as radians. Nothing but the boundary values
//! changes between frames, so the factored coefficient matrix is built once
//! and shared read-only by every frame.

use crate::boundary::*;
use crate::error::*;
use crate::field::*;
use crate::grid::*;
use crate::pipeline::*;
use rayon::prelude::*;

/// One solved frame of a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub bc: BoundaryConditions,
    pub field: Field,
}

/// Boundary values used for frame `index`.
pub fn frame_boundary(
    initial: &BoundaryConditions,
    index: usize,
) -> BoundaryConditions {
    initial.scaled((index as f64).cos())
}

/// Lazy, finite iterator over the frames of a steady-state sequence.
/// Each frame is solved when requested; iteration does not restart.
pub struct SteadyStateSequence {
    solver: SteadyStateSolver,
    initial: BoundaryConditions,
    frames: usize,
    next: usize,
}

impl SteadyStateSequence {
    pub fn new(
        grid: GridSpec,
        initial: BoundaryConditions,
        frames: usize,
    ) -> Result<Self> {
        let solver = SteadyStateSolver::new(grid)?;
        Ok(Self::with_solver(solver, initial, frames))
    }

    pub fn with_solver(
        solver: SteadyStateSolver,
        initial: BoundaryConditions,
        frames: usize,
    ) -> Self {
        tracing::info!(
            "steady-state sequence: {frames} frames on grid {}",
            solver.grid()
        );
        SteadyStateSequence {
            solver,
            initial,
            frames,
            next: 0,
        }
    }

    pub fn grid(&self) -> &GridSpec {
        self.solver.grid()
    }

    /// Total number of frames, including those already produced.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    fn solve_frame(&self, index: usize) -> std::result::Result<Frame, FrameError> {
        profiling::scope!("solve_frame");
        let bc = frame_boundary(&self.initial, index);
        tracing::debug!("solving frame {index}, {bc:?}");
        let field = self
            .solver
            .solve(&bc)
            .map_err(|source| FrameError { frame: index, source })?;
        Ok(Frame { index, bc, field })
    }

    /// Solve every remaining frame in parallel on the rayon pool and hand
    /// each one to `op` as soon as it is solved. No frame outlives its call
    /// to `op`, and frames arrive in no particular order.
    ///
    /// Stops at the first failing frame, either in the solve or in `op`.
    pub fn par_for_each_frame<F>(
        self,
        op: F,
    ) -> std::result::Result<(), FrameError>
    where
        F: Fn(Frame) -> Result<()> + Sync + Send,
    {
        let this = &self;
        (self.next..self.frames)
            .into_par_iter()
            .try_for_each(|index| {
                let frame = this.solve_frame(index)?;
                op(frame).map_err(|source| FrameError { frame: index, source })
            })
    }
}

impl Iterator for SteadyStateSequence {
    type Item = std::result::Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.frames {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.solve_frame(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frames - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SteadyStateSequence {}

impl std::iter::FusedIterator for SteadyStateSequence {}

/// Sequence of `frames` steady-state fields for a sinusoidally varying
/// boundary.
pub fn generate_sequence(
    grid: GridSpec,
    initial: BoundaryConditions,
    frames: usize,
) -> Result<SteadyStateSequence> {
    SteadyStateSequence::new(grid, initial, frames)
}
