use crate::error::*;
use crate::field::*;
use crate::writer::*;
use std::io::prelude::*;
use std::path::Path;

/// Comma separated values, one line per grid row, top edge first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

pub fn write_csv<W: Write>(field: &Field, output: &mut W) -> Result<()> {
    for row in field.values().row_iter() {
        let mut values = row.iter();
        if let Some(r) = values.next() {
            write!(output, "{r}")?;
        }
        for r in values {
            write!(output, ", {r}")?;
        }
        writeln!(output)?;
    }
    Ok(())
}

impl FieldWriter for CsvWriter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write_field(&self, field: &Field, path: &Path) -> Result<()> {
        tracing::debug!("writing csv {:?}", path);
        let mut output = std::io::BufWriter::new(std::fs::File::create(path)?);
        write_csv(field, &mut output)?;
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::boundary::*;
    use crate::grid::*;
    use crate::pipeline::*;

    #[test]
    fn csv_rows() {
        let g = GridSpec::square(3).unwrap();
        let bc = BoundaryConditions::new(100.0, 0.0, 50.0, 50.0).unwrap();
        let field = solve_steady_state(&g, &bc).unwrap();
        let mut buffer = Vec::new();
        write_csv(&field, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "50, 100, 100, 50");
        assert_eq!(lines[3], "50, 0, 0, 50");
        for (line, expected) in [(lines[1], 62.5), (lines[2], 37.5)] {
            let row: Vec<f64> =
                line.split(", ").map(|s| s.parse().unwrap()).collect();
            assert_eq!(row.len(), 4);
            assert_eq!(row[0], 50.0);
            assert!((row[1] - expected).abs() < 1e-9);
            assert!((row[2] - expected).abs() < 1e-9);
        }
    }
}
