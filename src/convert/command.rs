//! Converters backed by external command-line programs.

use super::{
    Conversion, ConvertRequest, Converter, ConverterKind, ParsedContent, SourceDocument,
    SourceFormat,
};
use crate::config::CommandConfig;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs a configured program for one converter kind.
///
/// The source document is read once per input and carried in the
/// [`ParsedContent`] handle; with `stdin = true` it is piped to the program
/// instead of letting the program open the file itself.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    kind: ConverterKind,
    command: CommandConfig,
}

impl CommandConverter {
    /// Create a converter running `command` for `kind`.
    pub const fn new(kind: ConverterKind, command: CommandConfig) -> Self {
        Self { kind, command }
    }

    fn source_text(
        &self,
        request: &ConvertRequest<'_>,
        content: Option<&ParsedContent>,
    ) -> Result<String> {
        if let Some(doc) = content.and_then(ParsedContent::downcast_ref::<SourceDocument>) {
            return Ok(doc.text.clone());
        }
        Ok(SourceDocument::load(request.input)?.text)
    }
}

impl Converter for CommandConverter {
    fn kind(&self) -> ConverterKind {
        self.kind
    }

    fn convert(
        &self,
        request: &ConvertRequest<'_>,
        content: Option<ParsedContent>,
    ) -> Result<Conversion> {
        let content = match (self.kind.source(), content) {
            (_, Some(content)) => Some(content),
            (SourceFormat::Bml, None) => {
                Some(ParsedContent::new(SourceDocument::load(request.input)?))
            }
            (SourceFormat::Bss, None) => None,
        };

        let args: Vec<OsString> = self
            .command
            .args
            .iter()
            .map(|arg| expand_template(arg, request))
            .collect();

        debug!(
            "Running {} {}",
            self.command.program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let mut cmd = Command::new(&self.command.program);
        // Child stdout must not interleave with the progress stream
        cmd.args(&args).stdout(std::io::stderr());

        let status = if self.command.stdin {
            let text = self.source_text(request, content.as_ref())?;
            let mut child = cmd
                .stdin(Stdio::piped())
                .spawn()
                .map_err(|e| Error::ConverterSpawn {
                    program: self.command.program.clone(),
                    source: e,
                })?;
            let written = child
                .stdin
                .take()
                .map_or(Ok(()), |mut stdin| stdin.write_all(text.as_bytes()));
            // stdin is closed here, so the child sees EOF and can be reaped
            let status = child.wait()?;
            // A program that ignores stdin may exit before reading it
            if let Err(e) = written
                && e.kind() != ErrorKind::BrokenPipe
            {
                return Err(e.into());
            }
            status
        } else {
            cmd.status().map_err(|e| Error::ConverterSpawn {
                program: self.command.program.clone(),
                source: e,
            })?
        };

        if !status.success() {
            return Err(Error::ConverterFailed {
                converter: self.kind.name(),
                input: request.input.to_path_buf(),
                status,
            });
        }

        Ok(Conversion {
            outputs: vec![request.expected_output(self.kind)],
            content,
        })
    }
}

/// Substitute the `{placeholder}` fields of one argument template.
///
/// Supported: `{input}`, `{output_dir}`, `{stem}`, `{indentation}`,
/// `{tree}`, `{include_external_files}`, `{verbose}`. Paths are inserted
/// as raw OS strings. Unknown fields are left as written.
pub fn expand_template(template: &str, request: &ConvertRequest<'_>) -> OsString {
    let mut expanded = OsString::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        expanded.push(&rest[..open]);
        let tail = &rest[open..];
        let value = tail
            .find('}')
            .and_then(|close| placeholder(&tail[1..close], request).map(|v| (close, v)));
        match value {
            Some((close, value)) => {
                expanded.push(value);
                rest = &tail[close + 1..];
            }
            None => {
                expanded.push("{");
                rest = &tail[1..];
            }
        }
    }
    expanded.push(rest);
    expanded
}

fn placeholder(name: &str, request: &ConvertRequest<'_>) -> Option<OsString> {
    let value = match name {
        "input" => request.input.as_os_str().to_os_string(),
        "output_dir" => request.output_dir.as_os_str().to_os_string(),
        "stem" => request.stem(),
        "indentation" => request.layout.indentation.to_string().into(),
        "tree" => request.layout.tree.to_string().into(),
        "include_external_files" => request.layout.include_external_files.to_string().into(),
        "verbose" => request.verbose.to_string().into(),
        _ => return None,
    };
    Some(value)
}
