//! PDF builds through `latexmk`.

use super::BuildTool;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// `latexmk` invoked as a subprocess.
#[derive(Debug, Clone)]
pub struct Latexmk {
    program: String,
}

impl Latexmk {
    /// Use the given executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments of the build step for one LaTeX file.
    pub fn build_args(tex: &Path, output_dir: &Path) -> Vec<OsString> {
        vec![
            OsString::from("-quiet"),
            OsString::from("-pdf"),
            output_dir_arg(output_dir),
            tex.as_os_str().to_os_string(),
        ]
    }

    /// Arguments of the cleanup step for all built files.
    pub fn clean_args(artifacts: &[PathBuf], output_dir: &Path) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("-c"),
            OsString::from("-f"),
            output_dir_arg(output_dir),
        ];
        args.extend(artifacts.iter().map(|p| p.as_os_str().to_os_string()));
        args
    }

    fn run(&self, args: &[OsString]) -> Result<()> {
        let joined = args
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!("Running {} {}", self.program, joined);

        // Tool chatter goes to stderr, stdout carries progress lines
        let status = Command::new(&self.program)
            .args(args)
            .stdout(std::io::stderr())
            .status()
            .map_err(|e| Error::ToolSpawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(Error::ToolFailed {
                program: self.program.clone(),
                args: joined,
                status,
            });
        }
        Ok(())
    }
}

impl Default for Latexmk {
    fn default() -> Self {
        Self::new(crate::constants::latex::PROGRAM)
    }
}

impl BuildTool for Latexmk {
    fn build_pdf(&self, tex: &Path, output_dir: &Path) -> Result<()> {
        info!("Building PDF from {}", tex.display());
        self.run(&Self::build_args(tex, output_dir))
    }

    fn clean(&self, artifacts: &[PathBuf], output_dir: &Path) -> Result<()> {
        info!("Cleaning up after {} LaTeX file(s)", artifacts.len());
        self.run(&Self::clean_args(artifacts, output_dir))
    }
}

fn output_dir_arg(output_dir: &Path) -> OsString {
    let mut arg = OsString::from("-output-directory=");
    arg.push(output_dir.as_os_str());
    arg
}
