//! Batch conversion pipeline.

mod discovery;
mod driver;
mod options;

pub use discovery::{Discovery, discover, plan};
pub use driver::{Driver, RunSummary, latex_path};
pub use options::{ConverterSelection, LayoutOptions, Options};
