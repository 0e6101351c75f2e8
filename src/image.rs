use crate::error::*;
use crate::field::*;
use crate::writer::*;
use std::path::Path;

/// Map a value onto [0, 1] given a range, degenerate ranges map to 0.5.
pub fn normalize(v: f64, (lo, hi): (f64, f64)) -> f64 {
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() {
        return 0.5;
    }
    ((v - lo) / span).clamp(0.0, 1.0)
}

/// Color mapped PNG rendering of a field.
///
/// Row 0 of the field (the top edge) is the top row of the image.
/// Each grid node becomes a `pixels_per_node` square.
#[derive(Debug, Clone)]
pub struct PngWriter {
    pixels_per_node: u32,
    range: Option<(f64, f64)>,
}

impl PngWriter {
    pub fn new(pixels_per_node: u32) -> Self {
        PngWriter {
            pixels_per_node: pixels_per_node.max(1),
            range: None,
        }
    }

    /// Use a fixed color range instead of each field's own min and max,
    /// so that frames of an animation share one scale.
    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.range = Some((lo, hi));
        self
    }

    pub fn render(&self, field: &Field) -> ::image::RgbImage {
        profiling::scope!("PngWriter::render");
        let range = self.range.unwrap_or_else(|| field.range());
        let gradient = colorous::TURBO;
        let s = self.pixels_per_node;
        let mut img = ::image::RgbImage::new(
            field.cols() as u32 * s,
            field.rows() as u32 * s,
        );
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let r = (y / s) as usize;
            let c = (x / s) as usize;
            let v = field.values()[(r, c)];
            let color = gradient.eval_continuous(normalize(v, range));
            *pixel = ::image::Rgb(color.as_array());
        }
        img
    }
}

impl Default for PngWriter {
    fn default() -> Self {
        Self::new(1)
    }
}

impl FieldWriter for PngWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn write_field(&self, field: &Field, path: &Path) -> Result<()> {
        tracing::debug!("writing image {:?}", path);
        self.render(field).save(path)?;
        Ok(())
    }
}
