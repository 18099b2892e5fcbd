//! Converter handlers the driver dispatches to.
//!
//! A converter turns one input file into one output file in the output
//! directory. BML converters thread a [`ParsedContent`] handle through
//! successive calls for the same input so the file is parsed once.

mod command;
mod content;
mod kind;
mod registry;

pub use command::{CommandConverter, expand_template};
pub use content::{ParsedContent, SourceDocument};
pub use kind::{ConverterKind, SourceFormat};
pub use registry::ConverterRegistry;

use crate::error::Result;
use crate::pipeline::LayoutOptions;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Everything a converter needs to know about one work unit.
#[derive(Debug, Clone, Copy)]
pub struct ConvertRequest<'a> {
    /// Input file.
    pub input: &'a Path,
    /// Directory outputs are written to.
    pub output_dir: &'a Path,
    /// Layout flags.
    pub layout: &'a LayoutOptions,
    /// Verbosity level (0-2).
    pub verbose: u8,
}

impl ConvertRequest<'_> {
    /// File name of the input without directory and extension.
    pub fn stem(&self) -> OsString {
        input_stem(self.input)
    }

    /// Path the given converter is expected to write for this input.
    pub fn expected_output(&self, kind: ConverterKind) -> PathBuf {
        output_path(self.input, self.output_dir, kind.output_extension())
    }
}

/// Outcome of one converter call.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    /// Files written.
    pub outputs: Vec<PathBuf>,
    /// Parse result to hand to the next converter for the same input.
    pub content: Option<ParsedContent>,
}

/// A single converter.
pub trait Converter {
    /// Which converter this is.
    fn kind(&self) -> ConverterKind;

    /// Convert `request.input`, reusing `content` if an earlier converter
    /// already parsed it.
    fn convert(
        &self,
        request: &ConvertRequest<'_>,
        content: Option<ParsedContent>,
    ) -> Result<Conversion>;
}

/// Base name of a file: directory and extension stripped.
pub fn input_stem(path: &Path) -> OsString {
    path.file_stem()
        .map_or_else(|| OsString::from("output"), OsStr::to_os_string)
}

/// `<output_dir>/<stem of input>.<extension>`, byte for byte.
pub fn output_path(input: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    let mut name = input_stem(input);
    name.push(".");
    name.push(extension);
    output_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_output_path() {
        let layout = LayoutOptions::default();
        let request = ConvertRequest {
            input: Path::new("/in/acol.bml"),
            output_dir: Path::new("/out"),
            layout: &layout,
            verbose: 0,
        };
        assert_eq!(
            request.expected_output(ConverterKind::BmlToLatex),
            PathBuf::from("/out/acol.tex")
        );
        assert_eq!(
            request.expected_output(ConverterKind::BmlToHtml),
            PathBuf::from("/out/acol.html")
        );
    }

    #[test]
    fn test_input_stem_unicode() {
        assert_eq!(input_stem(Path::new("/x/sæf.bss")), "sæf");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_are_kept_verbatim() {
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"/in/sys\xff.bml"));
        assert_eq!(input_stem(input).as_bytes(), b"sys\xff");
        assert_eq!(
            output_path(input, Path::new("/out"), "tex").as_os_str().as_bytes(),
            b"/out/sys\xff.tex"
        );
    }
}
