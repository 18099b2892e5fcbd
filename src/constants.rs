//! Application-wide constants.
//!
//! Release metadata, default option values and the build tool defaults all
//! live here so the CLI, config and driver agree on them.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "bml-converter";

/// About-box metadata.
pub mod about {
    /// Human readable title.
    pub const TITLE: &str = "BML Converter";
    /// Crate version.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    /// Short description.
    pub const DESCRIPTION: &str = "Run the various BML converters";
    /// Author.
    pub const AUTHOR: &str = "Gert-Jan Paulissen";
    /// Contact address.
    pub const EMAIL: &str = "gert.jan.paulissen@gmail.com";
    /// License name.
    pub const LICENSE: &str = "MIT License";
    /// Copyright line.
    pub const COPYRIGHT: &str = "Copyright (c) 2021 Gert-Jan Paulissen";
    /// Project website.
    pub const URL: &str = "https://github.com/gpaulissen/bml-converter";
    /// Documentation site.
    pub const HELP_URL: &str = "https://gpaulissen.github.io/bml-converter";
}

/// Default bidtable indentation.
pub const DEFAULT_INDENTATION: u8 = 4;

/// Allowed bidtable indentation range (inclusive).
pub const INDENTATION_RANGE: std::ops::RangeInclusive<u8> = 1..=9;

/// Highest supported verbosity level.
pub const MAX_VERBOSE: u8 = 2;

/// Source file extensions (without the dot).
pub mod source_extensions {
    /// Bidding markup language.
    pub const BML: &str = "bml";
    /// Bridge system serialization.
    pub const BSS: &str = "bss";
}

/// Output file extensions by converter (without the dot).
pub mod output_extensions {
    /// HTML output.
    pub const HTML: &str = "html";
    /// LaTeX output.
    pub const LATEX: &str = "tex";
    /// BSS output.
    pub const BSS: &str = "bss";
    /// BML output.
    pub const BML: &str = "bml";
}

/// External LaTeX build tool defaults.
pub mod latex {
    /// Build tool executable.
    pub const PROGRAM: &str = "latexmk";
    /// Flag that makes the tool print its version.
    pub const VERSION_FLAG: &str = "-v";
    /// Lowest accepted tool version.
    pub const MIN_VERSION: &str = "4.0.0";
    /// Regex extracting the version from the version banner.
    ///
    /// `latexmk -v` prints e.g. `Latexmk, John Collins, 7 Jan. 2023. Version 4.79`.
    pub const VERSION_PATTERN: &str = r"Version\s+(\d+(?:\.\d+)*)";
}

/// Prefix of every progress line on stdout.
pub const PROGRESS_PREFIX: &str = "progress: ";
