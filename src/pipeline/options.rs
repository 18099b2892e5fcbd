//! Run options passed explicitly into the driver.

use crate::config::DefaultsConfig;
use crate::constants::DEFAULT_INDENTATION;
use crate::convert::{ConverterKind, SourceFormat};
use std::path::PathBuf;

/// Which converters the user asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConverterSelection {
    /// BML to HTML.
    pub bml2html: bool,
    /// BML to LaTeX.
    pub bml2latex: bool,
    /// BML to LaTeX, then build a PDF from it.
    pub bml2pdf: bool,
    /// BML to BSS.
    pub bml2bss: bool,
    /// BSS to BML.
    pub bss2bml: bool,
}

impl ConverterSelection {
    /// Selection with exactly the listed converters enabled.
    pub fn from_kinds(kinds: &[ConverterKind]) -> Self {
        let mut selection = Self::default();
        for kind in kinds {
            selection.set(*kind, true);
        }
        selection
    }

    /// Enable or disable one converter.
    pub fn set(&mut self, kind: ConverterKind, enabled: bool) {
        match kind {
            ConverterKind::BmlToBss => self.bml2bss = enabled,
            ConverterKind::BmlToHtml => self.bml2html = enabled,
            ConverterKind::BmlToLatex => self.bml2latex = enabled,
            ConverterKind::BssToBml => self.bss2bml = enabled,
        }
    }

    /// Whether `kind` runs. LaTeX runs for both `bml2latex` and `bml2pdf`.
    pub const fn is_selected(&self, kind: ConverterKind) -> bool {
        match kind {
            ConverterKind::BmlToBss => self.bml2bss,
            ConverterKind::BmlToHtml => self.bml2html,
            ConverterKind::BmlToLatex => self.bml2latex || self.bml2pdf,
            ConverterKind::BssToBml => self.bss2bml,
        }
    }

    /// Selected converters consuming `format`, in dispatch order.
    pub fn selected_for(&self, format: SourceFormat) -> Vec<ConverterKind> {
        ConverterKind::consuming(format)
            .iter()
            .copied()
            .filter(|kind| self.is_selected(*kind))
            .collect()
    }

    /// Number of selected converters consuming `format`.
    pub fn count_for(&self, format: SourceFormat) -> usize {
        self.selected_for(format).len()
    }

    /// Number of selected converters overall.
    pub fn count(&self) -> usize {
        self.count_for(SourceFormat::Bml) + self.count_for(SourceFormat::Bss)
    }

    /// Whether generated LaTeX should be built into PDF.
    pub const fn wants_pdf(&self) -> bool {
        self.bml2pdf
    }
}

/// Output layout flags forwarded to the converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Render bidding as a tree (false: simple table).
    pub tree: bool,
    /// Bidtable indentation (1-9).
    pub indentation: u8,
    /// Inline `bml.css`/`bml.tex` instead of only referencing them.
    pub include_external_files: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            tree: true,
            indentation: DEFAULT_INDENTATION,
            include_external_files: true,
        }
    }
}

/// Complete option set for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Directory holding the BML/BSS files.
    pub input_dir: PathBuf,
    /// Directory outputs are written to.
    pub output_dir: PathBuf,
    /// Converters to run.
    pub selection: ConverterSelection,
    /// Layout flags.
    pub layout: LayoutOptions,
    /// Verbosity level (0-2).
    pub verbose: u8,
}

impl Options {
    /// Options seeded from config defaults, to be overridden by the CLI.
    pub fn from_defaults(
        input_dir: PathBuf,
        output_dir: PathBuf,
        defaults: &DefaultsConfig,
    ) -> Self {
        let mut selection = ConverterSelection::from_kinds(&defaults.converters);
        selection.bml2pdf = defaults.pdf;

        Self {
            input_dir,
            output_dir,
            selection,
            layout: LayoutOptions {
                tree: defaults.tree,
                indentation: defaults.indentation,
                include_external_files: defaults.include_external_files,
            },
            verbose: defaults.verbose,
        }
    }
}
