//! Discovery of input files and planning of the work total.

use crate::convert::SourceFormat;
use crate::error::{Error, Result};
use crate::pipeline::ConverterSelection;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Input files found for one run, each list sorted by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// `.bml` inputs.
    pub bml_files: Vec<PathBuf>,
    /// `.bss` inputs.
    pub bss_files: Vec<PathBuf>,
}

impl Discovery {
    /// Number of matching files across both formats.
    pub fn file_count(&self) -> usize {
        self.bml_files.len() + self.bss_files.len()
    }

    /// Planned number of work units for `selection`.
    pub fn total_units(&self, selection: &ConverterSelection) -> usize {
        selection.count_for(SourceFormat::Bml) * self.bml_files.len()
            + selection.count_for(SourceFormat::Bss) * self.bss_files.len()
    }
}

/// List the immediate regular files of `input_dir` that some selected
/// converter consumes.
///
/// A format with no selected converter yields an empty list without
/// looking at its files.
pub fn discover(input_dir: &Path, selection: &ConverterSelection) -> Result<Discovery> {
    if !input_dir.is_dir() {
        return Err(Error::InputDirNotFound {
            path: input_dir.to_path_buf(),
        });
    }

    let want_bml = selection.count_for(SourceFormat::Bml) > 0;
    let want_bss = selection.count_for(SourceFormat::Bss) > 0;
    let mut discovery = Discovery::default();
    if !want_bml && !want_bss {
        return Ok(discovery);
    }

    let read_error = |e: std::io::Error| Error::InputDirRead {
        path: input_dir.to_path_buf(),
        source: e,
    };

    for entry in std::fs::read_dir(input_dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();

        // Follows symlinks, like a plain stat
        if !path.is_file() {
            continue;
        }

        if want_bml && SourceFormat::Bml.matches(&path) {
            discovery.bml_files.push(path);
        } else if want_bss && SourceFormat::Bss.matches(&path) {
            discovery.bss_files.push(path);
        }
    }

    discovery.bml_files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    discovery.bss_files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(
        "Discovered {} BML and {} BSS file(s) in {}",
        discovery.bml_files.len(),
        discovery.bss_files.len(),
        input_dir.display()
    );

    Ok(discovery)
}

/// Discover inputs and reject a run with no work.
pub fn plan(input_dir: &Path, selection: &ConverterSelection) -> Result<Discovery> {
    let discovery = discover(input_dir, selection)?;
    if discovery.total_units(selection) == 0 {
        return Err(Error::NothingToConvert {
            files: discovery.file_count(),
            converters: selection.count(),
        });
    }
    Ok(discovery)
}
