//! Configuration type definitions.

use crate::constants::{DEFAULT_INDENTATION, latex};
use crate::convert::ConverterKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default run options.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// LaTeX build tool settings.
    #[serde(default)]
    pub latex: LatexConfig,

    /// Command lines of the external converter programs, keyed by
    /// converter name (`bml2html`, ...).
    #[serde(default)]
    pub converters: BTreeMap<String, CommandConfig>,
}

impl Config {
    /// Command for `kind`: the configured one, or the built-in default.
    pub fn converter_command(&self, kind: ConverterKind) -> CommandConfig {
        self.converters
            .get(kind.name())
            .cloned()
            .unwrap_or_else(|| CommandConfig::default_for(kind))
    }

    /// Default configuration with every converter command spelled out.
    pub fn template() -> Self {
        let mut config = Self::default();
        for kind in ConverterKind::ALL {
            config
                .converters
                .insert(kind.name().to_string(), CommandConfig::default_for(kind));
        }
        config
    }
}

/// Default run settings, overridable from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Converters enabled when none are given on the command line.
    pub converters: Vec<ConverterKind>,

    /// Build PDFs from the LaTeX output.
    pub pdf: bool,

    /// Render bidding as a tree.
    pub tree: bool,

    /// Bidtable indentation (1-9).
    pub indentation: u8,

    /// Include `bml.css`/`bml.tex` in the output instead of referencing them.
    pub include_external_files: bool,

    /// Verbosity level (0-2).
    pub verbose: u8,

    /// How progress is shown.
    pub progress: ProgressMode,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            converters: vec![ConverterKind::BmlToHtml],
            pdf: false,
            tree: true,
            indentation: DEFAULT_INDENTATION,
            include_external_files: true,
            verbose: 0,
            progress: ProgressMode::Line,
        }
    }
}

/// LaTeX build tool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatexConfig {
    /// Build tool executable.
    pub program: String,

    /// Flag printing the tool's version.
    pub version_flag: String,

    /// Lowest accepted version.
    pub min_version: String,

    /// Regex extracting the version from the tool's output.
    pub version_pattern: String,

    /// When intermediate build files are removed.
    pub cleanup: CleanupPolicy,
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            program: latex::PROGRAM.to_string(),
            version_flag: latex::VERSION_FLAG.to_string(),
            min_version: latex::MIN_VERSION.to_string(),
            version_pattern: latex::VERSION_PATTERN.to_string(),
            cleanup: CleanupPolicy::default(),
        }
    }
}

/// External program implementing one converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Executable.
    pub program: String,

    /// Argument templates; see [`crate::convert::expand_template`].
    #[serde(default)]
    pub args: Vec<String>,

    /// Pipe the source text to the program's stdin.
    #[serde(default)]
    pub stdin: bool,
}

impl CommandConfig {
    /// Built-in command for `kind`: a program named after the converter,
    /// called with the input file and output directory.
    pub fn default_for(kind: ConverterKind) -> Self {
        Self {
            program: kind.name().to_string(),
            args: vec!["{input}".to_string(), "{output_dir}".to_string()],
            stdin: false,
        }
    }
}

/// When LaTeX build intermediates are cleaned.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupPolicy {
    /// Only after every file converted and built successfully.
    #[default]
    OnSuccess,
    /// Also after a failure, for the files built so far.
    Always,
    /// Keep all intermediates.
    Never,
}

impl std::fmt::Display for CleanupPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnSuccess => write!(f, "on-success"),
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

/// How progress is shown.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProgressMode {
    /// `progress: N/M` lines on stdout.
    #[default]
    Line,
    /// Interactive bar on stderr.
    Bar,
    /// No progress output.
    None,
}
