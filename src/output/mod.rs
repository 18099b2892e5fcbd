//! Run output: progress reporting.

pub mod progress;

pub use progress::{
    BarReporter, LineReporter, ProgressCounter, ProgressReporter, SilentReporter, format_progress,
};
