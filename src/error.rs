//! Error types for bml-converter.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Result type alias for bml-converter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for bml-converter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Input directory does not exist.
    #[error("input directory does not exist: {path}")]
    InputDirNotFound {
        /// The missing directory.
        path: PathBuf,
    },

    /// Failed to list the input directory.
    #[error("failed to read input directory '{path}'")]
    InputDirRead {
        /// The input directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Nothing selected or nothing found.
    #[error(
        "number of files to process ({files}) and number of converters to launch ({converters}) must be at least 1"
    )]
    NothingToConvert {
        /// Matching input files found.
        files: usize,
        /// Converters selected.
        converters: usize,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a source document.
    #[error("failed to read source file '{path}'")]
    SourceRead {
        /// Path to the source file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A selected converter has no implementation registered.
    #[error("no converter registered for '{name}'")]
    ConverterNotRegistered {
        /// Converter name (e.g. `bml2html`).
        name: &'static str,
    },

    /// Failed to start a converter program.
    #[error("failed to start converter '{program}'")]
    ConverterSpawn {
        /// Converter program.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Converter program exited unsuccessfully.
    #[error("converter {converter} failed on '{input}' ({status})")]
    ConverterFailed {
        /// Converter name.
        converter: &'static str,
        /// Input file being converted.
        input: PathBuf,
        /// Exit status of the program.
        status: ExitStatus,
    },

    /// Failed to start an external tool.
    #[error("failed to start '{program}'")]
    ToolSpawn {
        /// Tool executable.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// External tool exited unsuccessfully.
    #[error("'{program} {args}' failed ({status})")]
    ToolFailed {
        /// Tool executable.
        program: String,
        /// Arguments, space separated.
        args: String,
        /// Exit status of the tool.
        status: ExitStatus,
    },

    /// Version probe exited unsuccessfully.
    #[error("version check '{program} {flag}' failed ({status})")]
    ProbeFailed {
        /// Tool executable.
        program: String,
        /// Version flag passed.
        flag: String,
        /// Exit status of the tool.
        status: ExitStatus,
    },

    /// Version pattern is not a valid regular expression.
    #[error("invalid version pattern '{pattern}'")]
    InvalidVersionPattern {
        /// The pattern.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// Version requirement could not be parsed.
    #[error("invalid version '{value}'")]
    InvalidVersion {
        /// The rejected value.
        value: String,
        /// Underlying semver error.
        #[source]
        source: semver::Error,
    },

    /// More work units completed than were planned.
    #[error("progress overflow: unit {completed} of {total}")]
    ProgressOverflow {
        /// Units completed including the offending one.
        completed: usize,
        /// Planned total.
        total: usize,
    },
}
