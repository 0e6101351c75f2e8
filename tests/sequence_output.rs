use float_cmp::assert_approx_eq;
use laplace2d::csv::*;
use laplace2d::image::*;
use laplace2d::vtk::*;
use laplace2d::writer::*;
use laplace2d::*;

fn scratch_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("laplace2d_test_{name}"))
}

#[test]
fn sequence_frames_scale_with_cosine() {
    let grid = GridSpec::new(6, 6).unwrap();
    let initial = BoundaryConditions::new(100.0, 0.0, 50.0, 50.0).unwrap();
    let frames: Vec<Frame> = generate_sequence(grid, initial, 6)
        .unwrap()
        .collect::<std::result::Result<_, FrameError>>()
        .unwrap();
    assert_eq!(frames.len(), 6);

    let base = solve_steady_state(&grid, &initial).unwrap();
    assert_eq!(frames[0].field, base);
    for frame in frames.iter() {
        let factor = (frame.index as f64).cos();
        let center = field_center(&frame.field);
        assert_approx_eq!(
            f64,
            center,
            field_center(&base) * factor,
            epsilon = 1e-9
        );
    }
}

fn field_center(field: &Field) -> f64 {
    field.values()[(field.rows() / 2, field.cols() / 2)]
}

#[test]
fn writes_every_format() {
    let dir = scratch_dir("formats");
    let output = OutputDir::create(&dir).unwrap();
    let grid = GridSpec::new(5, 7).unwrap();
    let bc = BoundaryConditions::new(1.0, 0.0, 0.5, 0.5).unwrap();
    let field = solve_steady_state(&grid, &bc).unwrap();

    let writers: Vec<Box<dyn FieldWriter>> = vec![
        Box::new(PngWriter::new(4)),
        Box::new(CsvWriter),
        Box::new(VtkWriter),
    ];
    for writer in writers.iter() {
        let path = output.field_path(writer.as_ref());
        writer.write_field(&field, &path).unwrap();
        assert!(path.exists(), "{:?} missing", path);
    }

    let img = ::image::open(dir.join("field.png")).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (8 * 4, 6 * 4));

    let text = std::fs::read_to_string(dir.join("field.csv")).unwrap();
    assert_eq!(text.lines().count(), 6);
    assert!(text.lines().all(|l| l.split(", ").count() == 8));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn output_dir_is_recreated() {
    let dir = scratch_dir("recreate");
    let output = OutputDir::create(&dir).unwrap();
    std::fs::write(dir.join("stale.txt"), "old").unwrap();
    let output_again = OutputDir::create(&dir).unwrap();
    assert!(!dir.join("stale.txt").exists());
    assert_eq!(output.root(), output_again.root());
    assert_eq!(
        output.frame_path(&PngWriter::default(), 7),
        dir.join("frame_0007.png")
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn frames_written_in_parallel() {
    let dir = scratch_dir("frames");
    let output = OutputDir::create(&dir).unwrap();
    let grid = GridSpec::new(4, 4).unwrap();
    let initial = BoundaryConditions::new(1.0, -1.0, 0.0, 0.0).unwrap();
    let writer = PngWriter::new(2).with_range(-1.0, 1.0);

    generate_sequence(grid, initial, 5)
        .unwrap()
        .par_for_each_frame(|frame| {
            writer.write_field(&frame.field, &output.frame_path(&writer, frame.index))
        })
        .unwrap();
    for i in 0..5 {
        assert!(dir.join(format!("frame_{:04}.png", i)).exists());
    }
    assert!(!dir.join("frame_0005.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}
