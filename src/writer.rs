use crate::error::*;
use crate::field::*;
use std::path::Path;

/// Consumer of full fields, e.g. a renderer or an exporter.
///
/// Every call receives one complete field and acquires whatever file or
/// drawing surface it needs, releasing it before returning.
/// Writers never see the solve pipeline.
pub trait FieldWriter: Send + Sync {
    /// File extension of the written format, without the dot.
    fn extension(&self) -> &'static str;

    fn write_field(&self, field: &Field, path: &Path) -> Result<()>;
}

/// Output directory holding `field.*` and numbered animation frames.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: std::path::PathBuf,
}

impl OutputDir {
    /// Create `root`, removing any previous contents.
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if root.exists() {
            tracing::warn!("removing existing output directory {:?}", root);
            std::fs::remove_dir_all(&root)?;
        }
        std::fs::create_dir_all(&root)?;
        Ok(OutputDir { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn field_path(&self, writer: &dyn FieldWriter) -> std::path::PathBuf {
        self.root.join(format!("field.{}", writer.extension()))
    }

    pub fn frame_path(
        &self,
        writer: &dyn FieldWriter,
        i: usize,
    ) -> std::path::PathBuf {
        self.root
            .join(format!("frame_{:04}.{}", i, writer.extension()))
    }
}
