//! Converter identities and source formats.

use crate::constants::{output_extensions, source_extensions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input format consumed by a converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Bidding markup language (`.bml`).
    Bml,
    /// Bridge system serialization (`.bss`).
    Bss,
}

impl SourceFormat {
    /// File extension without the leading dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Bml => source_extensions::BML,
            Self::Bss => source_extensions::BSS,
        }
    }

    /// Check whether a file name carries this format's suffix.
    ///
    /// Matching is on the exact, case-sensitive suffix of the file name.
    pub fn matches(self, path: &Path) -> bool {
        // Compare raw bytes so non-UTF-8 names are still classified
        path.file_name().is_some_and(|name| {
            let name = name.as_encoded_bytes();
            let ext = self.extension().as_bytes();
            name.len() > ext.len()
                && name.ends_with(ext)
                && name[name.len() - ext.len() - 1] == b'.'
        })
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// The four converters the launcher can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConverterKind {
    /// BML to BSS.
    #[serde(rename = "bml2bss")]
    BmlToBss,
    /// BML to HTML.
    #[serde(rename = "bml2html")]
    BmlToHtml,
    /// BML to LaTeX.
    #[serde(rename = "bml2latex")]
    BmlToLatex,
    /// BSS to BML.
    #[serde(rename = "bss2bml")]
    BssToBml,
}

impl ConverterKind {
    /// BML-consuming converters in dispatch order.
    pub const BML_ORDER: [Self; 3] = [Self::BmlToBss, Self::BmlToHtml, Self::BmlToLatex];

    /// BSS-consuming converters in dispatch order.
    pub const BSS_ORDER: [Self; 1] = [Self::BssToBml];

    /// Every converter.
    pub const ALL: [Self; 4] = [
        Self::BmlToBss,
        Self::BmlToHtml,
        Self::BmlToLatex,
        Self::BssToBml,
    ];

    /// Stable name used on the command line and in config.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BmlToBss => "bml2bss",
            Self::BmlToHtml => "bml2html",
            Self::BmlToLatex => "bml2latex",
            Self::BssToBml => "bss2bml",
        }
    }

    /// Format this converter reads.
    pub const fn source(self) -> SourceFormat {
        match self {
            Self::BmlToBss | Self::BmlToHtml | Self::BmlToLatex => SourceFormat::Bml,
            Self::BssToBml => SourceFormat::Bss,
        }
    }

    /// Extension of the file this converter writes.
    pub const fn output_extension(self) -> &'static str {
        match self {
            Self::BmlToBss => output_extensions::BSS,
            Self::BmlToHtml => output_extensions::HTML,
            Self::BmlToLatex => output_extensions::LATEX,
            Self::BssToBml => output_extensions::BML,
        }
    }

    /// Converters consuming `format`, in dispatch order.
    pub const fn consuming(format: SourceFormat) -> &'static [Self] {
        match format {
            SourceFormat::Bml => &Self::BML_ORDER,
            SourceFormat::Bss => &Self::BSS_ORDER,
        }
    }
}

impl std::fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ConverterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bml2bss" => Ok(Self::BmlToBss),
            "bml2html" => Ok(Self::BmlToHtml),
            "bml2latex" => Ok(Self::BmlToLatex),
            "bss2bml" => Ok(Self::BssToBml),
            other => Err(format!("unknown converter: {other}")),
        }
    }
}
