//! External tools: capability probing and the LaTeX build tool.

mod latexmk;
mod probe;

pub use latexmk::Latexmk;
pub use probe::{ToolRequirement, normalize_version, probe, probe_all};

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Builds PDFs from generated LaTeX files.
pub trait BuildTool {
    /// Build a PDF for `tex` into `output_dir`.
    fn build_pdf(&self, tex: &Path, output_dir: &Path) -> Result<()>;

    /// Remove intermediate build files of every file in `artifacts`.
    fn clean(&self, artifacts: &[PathBuf], output_dir: &Path) -> Result<()>;
}
