use crate::boundary::*;
use crate::csv::*;
use crate::error::Result;
use crate::grid::*;
use crate::image::*;
use crate::pipeline::*;
use crate::sequence::*;
use crate::vtk::*;
use crate::writer::*;
use clap::Parser;
use std::path::PathBuf;

/// laplace2d steady-state heat executable
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Grid divisions along the vertical axis, at least 3.
    #[arg(long)]
    pub nx: usize,

    /// Grid divisions along the horizontal axis, at least 3.
    #[arg(long)]
    pub ny: usize,

    /// Boundary values, one per edge: top, bottom, left, right.
    #[arg(long, value_name = "KEY=VALUE", num_args = 1.., required = true)]
    pub bc: Vec<EdgeAssignment>,

    /// Directory for output files, will be created.
    /// WARNING, if this directory
    /// already exists, current contents will be removed.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Write a color mapped image of the field.
    #[arg(short, long, requires("output_dir"))]
    pub plot: bool,

    /// Write the field as comma separated values.
    #[arg(long, requires("output_dir"))]
    pub csv: bool,

    /// Write the field as a vtk unstructured grid.
    #[arg(long, requires("output_dir"))]
    pub vtk: bool,

    /// How many animation frames to write, boundary values are
    /// scaled by cos(frame) for each one.
    #[arg(short, long, default_value = "0", requires("output_dir"))]
    pub frames: usize,

    /// Image pixels per grid node.
    #[arg(long, default_value = "8")]
    pub pixels_per_node: u32,

    /// The number of threads to use for frame generation.
    #[arg(short, long, default_value = "1")]
    pub threads: usize,

    /// Log debug output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn cli_setup() -> Self {
        let args = Args::parse();

        let level = if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init();

        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .thread_name(|i| format!("rayon_thread_{}", i))
            .build_global()
        {
            tracing::warn!("could not configure thread pool: {e}");
        }

        args
    }

    pub fn grid_spec(&self) -> Result<GridSpec> {
        GridSpec::new(self.nx, self.ny)
    }

    pub fn boundary_conditions(&self) -> Result<BoundaryConditions> {
        Ok(BoundaryConditions::from_assignments(self.bc.iter().copied())?)
    }

    /// Writers selected for the solved field.
    pub fn field_writers(&self) -> Vec<Box<dyn FieldWriter>> {
        let mut writers: Vec<Box<dyn FieldWriter>> = Vec::new();
        if self.plot {
            writers.push(Box::new(PngWriter::new(self.pixels_per_node)));
        }
        if self.csv {
            writers.push(Box::new(CsvWriter));
        }
        if self.vtk {
            writers.push(Box::new(VtkWriter));
        }
        writers
    }

    /// Frame renderer with one color scale for the whole animation.
    /// Frame values never leave `[-m, m]`, `m` being the largest
    /// initial edge magnitude.
    pub fn frame_writer(&self, initial: &BoundaryConditions) -> PngWriter {
        let (lo, hi) = initial.range();
        let m = lo.abs().max(hi.abs());
        let writer = PngWriter::new(self.pixels_per_node);
        if m > 0.0 {
            writer.with_range(-m, m)
        } else {
            writer
        }
    }

    pub fn run(&self) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let grid = self.grid_spec()?;
        let bc = self.boundary_conditions()?;
        tracing::info!("solving grid {grid} with {bc:?}");

        let solver = SteadyStateSolver::new(grid)?;
        let interior = solver.solve_interior(&bc)?;
        println!("{interior}");

        let Some(output_dir) = &self.output_dir else {
            return Ok(());
        };
        let output = OutputDir::create(output_dir)?;

        let field = crate::field::reconstruct_field(&interior, &grid, &bc)?;
        for writer in self.field_writers() {
            let path = output.field_path(writer.as_ref());
            writer.write_field(&field, &path)?;
            println!("Wrote: {:?}", path);
        }

        if self.frames > 0 {
            self.write_frames(solver, bc, &output)?;
        }
        Ok(())
    }

    fn write_frames(
        &self,
        solver: SteadyStateSolver,
        initial: BoundaryConditions,
        output: &OutputDir,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        profiling::scope!("write_frames");
        let writer = self.frame_writer(&initial);
        let sequence =
            SteadyStateSequence::with_solver(solver, initial, self.frames);

        let write = |frame: Frame| -> Result<()> {
            let path = output.frame_path(&writer, frame.index);
            writer.write_field(&frame.field, &path)
        };

        if self.threads > 1 {
            sequence.par_for_each_frame(write)?;
        } else {
            for frame in sequence {
                write(frame?)?;
            }
        }
        println!("Wrote {} frames to {:?}", self.frames, output.root());
        Ok(())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::error::FrameError;

    #[test]
    fn parse_args() {
        let args = Args::try_parse_from([
            "laplace2d",
            "--nx",
            "5",
            "--ny",
            "4",
            "--bc",
            "top=100",
            "buttom=0",
            "left=50",
            "right=50",
        ])
        .unwrap();
        assert_eq!(args.grid_spec().unwrap(), GridSpec::new(5, 4).unwrap());
        let bc = args.boundary_conditions().unwrap();
        assert_eq!(bc, BoundaryConditions::new(100.0, 0.0, 50.0, 50.0).unwrap());
        assert!(args.field_writers().is_empty());
        assert_eq!(args.frames, 0);
    }

    #[test]
    fn missing_edge_is_an_error() {
        let args = Args::try_parse_from([
            "laplace2d", "--nx", "5", "--ny", "5", "--bc", "top=1", "left=2",
            "right=3",
        ])
        .unwrap();
        assert!(matches!(
            args.boundary_conditions(),
            Err(crate::error::Error::InvalidBoundary(
                BoundaryError::MissingEdge(Edge::Bottom)
            ))
        ));
    }

    #[test]
    fn rejects_bad_input() {
        // Malformed pair.
        assert!(Args::try_parse_from([
            "laplace2d", "--nx", "5", "--ny", "5", "--bc", "top"
        ])
        .is_err());
        // Negative sizes are not coerced.
        assert!(Args::try_parse_from([
            "laplace2d", "--nx", "-5", "--ny", "5", "--bc", "top=1"
        ])
        .is_err());
        // Plot needs an output directory.
        assert!(Args::try_parse_from([
            "laplace2d", "--nx", "5", "--ny", "5", "--bc", "top=1", "--plot"
        ])
        .is_err());
    }

    #[test]
    fn small_grid_is_an_error() {
        let args = Args::try_parse_from([
            "laplace2d", "--nx", "2", "--ny", "5", "--bc", "top=1",
        ])
        .unwrap();
        assert!(matches!(
            args.grid_spec(),
            Err(crate::error::Error::InvalidGrid { nx: 2, ny: 5 })
        ));
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("laplace2d_cli_test_{name}"))
    }

    fn frame_args(dir: &std::path::Path, threads: &str) -> Args {
        Args::try_parse_from([
            "laplace2d",
            "--nx",
            "4",
            "--ny",
            "5",
            "--bc",
            "top=1",
            "bottom=0",
            "left=0",
            "right=0",
            "--frames",
            "6",
            "--threads",
            threads,
            "--output-dir",
            dir.to_str().unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn parallel_frames_are_written() {
        let dir = scratch_dir("parallel_frames");
        let args = frame_args(&dir, "3");
        args.run().unwrap();
        for i in 0..6 {
            assert!(dir.join(format!("frame_{:04}.png", i)).exists());
        }
        assert!(!dir.join("frame_0006.png").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn parallel_frames_stop_on_write_error() {
        let dir = scratch_dir("parallel_frames_error");
        let args = frame_args(&dir, "3");
        let output = OutputDir::create(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        let solver = SteadyStateSolver::new(args.grid_spec().unwrap()).unwrap();
        let initial = args.boundary_conditions().unwrap();
        let err = args.write_frames(solver, initial, &output).unwrap_err();
        let frame_err = err.downcast_ref::<FrameError>().unwrap();
        assert!(matches!(
            frame_err.source,
            crate::error::Error::Image(_) | crate::error::Error::Io(_)
        ));
        assert!(!dir.exists());
    }

    #[test]
    fn frame_writer_range() {
        let args = Args::try_parse_from([
            "laplace2d", "--nx", "3", "--ny", "3", "--bc", "top=1",
        ])
        .unwrap();
        let bc = BoundaryConditions::new(10.0, -30.0, 0.0, 5.0).unwrap();
        let field = solve_steady_state(&args.grid_spec().unwrap(), &bc).unwrap();
        let img = args.frame_writer(&bc).render(&field);
        // Zero maps to the middle of the fixed [-30, 30] scale.
        let mid = colorous::TURBO.eval_continuous(0.5).as_array();
        let corner = img.get_pixel(0, 0).0;
        let left_edge = field.values()[(0, 0)];
        assert_eq!(left_edge, 0.0);
        assert_eq!(corner, mid);
    }
}
