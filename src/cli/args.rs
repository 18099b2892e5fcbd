//! CLI argument definitions.

use crate::cli::validators::{parse_indentation, parse_verbose};
use crate::config::{CleanupPolicy, DefaultsConfig, ProgressMode};
use crate::pipeline::Options;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Run the various BML converters over a directory.
#[derive(Debug, Parser)]
#[command(name = "bml-converter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory with BML/BSS file(s).
    #[arg(help_heading = "File options")]
    pub input_dir: Option<PathBuf>,

    /// Output directory.
    #[arg(help_heading = "File options")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "BML_CONVERTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Conversion options.
    #[command(flatten)]
    pub convert: ConvertArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show program information.
    About,
    /// Check whether the LaTeX build tool is usable for PDF output.
    Probe,
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for a conversion run.
///
/// Converter flags left unset fall back to `[defaults]` in the config file.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConvertArgs {
    /// BML => HTML.
    #[arg(long, help_heading = "Generate options", overrides_with = "no_bml2html")]
    pub bml2html: bool,

    /// Do not generate HTML.
    #[arg(long, help_heading = "Generate options", overrides_with = "bml2html")]
    pub no_bml2html: bool,

    /// BML => LaTeX.
    #[arg(long, help_heading = "Generate options")]
    pub bml2latex: bool,

    /// BML => LaTeX => PDF (needs latexmk).
    #[arg(long, help_heading = "Generate options")]
    pub bml2pdf: bool,

    /// BML => BSS.
    #[arg(long, help_heading = "Generate options")]
    pub bml2bss: bool,

    /// BSS => BML.
    #[arg(long, help_heading = "Generate options")]
    pub bss2bml: bool,

    /// Show simple bidding table (no tree).
    #[arg(long, help_heading = "Layout options")]
    pub no_tree: bool,

    /// The indentation of a bidtable (1-9).
    #[arg(long, value_parser = parse_indentation, help_heading = "Layout options")]
    pub indentation: Option<u8>,

    /// Only reference (do not include) bml.css/bml.tex in HTML/LaTeX output files.
    #[arg(long, help_heading = "Other options")]
    pub no_include_external_files: bool,

    /// Output verbosity (0-2).
    #[arg(long, value_parser = parse_verbose, help_heading = "Other options")]
    pub verbose: Option<u8>,

    /// How progress is shown.
    #[arg(long, value_enum, help_heading = "Other options")]
    pub progress: Option<ProgressMode>,

    /// When LaTeX build intermediates are removed.
    #[arg(long, value_enum, help_heading = "Other options")]
    pub cleanup: Option<CleanupPolicy>,
}

impl ConvertArgs {
    /// Apply the command line on top of options seeded from the config.
    ///
    /// Converter flags add to the configured converters; `--no-bml2html`
    /// removes HTML output.
    pub fn apply_to(&self, options: &mut Options) {
        let selection = &mut options.selection;
        selection.bml2html = (selection.bml2html || self.bml2html) && !self.no_bml2html;
        selection.bml2latex |= self.bml2latex;
        selection.bml2pdf |= self.bml2pdf;
        selection.bml2bss |= self.bml2bss;
        selection.bss2bml |= self.bss2bml;

        if self.no_tree {
            options.layout.tree = false;
        }
        if let Some(indentation) = self.indentation {
            options.layout.indentation = indentation;
        }
        if self.no_include_external_files {
            options.layout.include_external_files = false;
        }
        if let Some(verbose) = self.verbose {
            options.verbose = verbose;
        }
    }
}
