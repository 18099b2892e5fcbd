//! Batch conversion driver.
//!
//! Runs every selected converter over every discovered input, strictly
//! sequentially: BML files first (all BML converters per file, sharing one
//! parsed-content handle), then BSS files. When PDF output is requested the
//! LaTeX unit of each file also runs the build tool, and one cleanup call
//! covers every built file at the end.

use crate::config::CleanupPolicy;
use crate::convert::{
    ConvertRequest, Converter, ConverterKind, ConverterRegistry, ParsedContent, SourceFormat,
    output_path,
};
use crate::constants::output_extensions;
use crate::error::{Error, Result};
use crate::output::{ProgressCounter, ProgressReporter};
use crate::pipeline::{Discovery, Options, plan};
use crate::toolchain::BuildTool;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a finished run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// BML inputs processed.
    pub bml_files: usize,
    /// BSS inputs processed.
    pub bss_files: usize,
    /// Work units completed.
    pub units: usize,
    /// Files written by converters, in order.
    pub outputs: Vec<PathBuf>,
    /// PDFs built.
    pub pdfs_built: usize,
    /// LaTeX files passed to the cleanup step (0 if it did not run).
    pub cleaned: usize,
}

struct PdfBuild<'a> {
    tool: &'a dyn BuildTool,
    cleanup: CleanupPolicy,
}

/// Mutable state owned by one run.
struct RunState {
    counter: ProgressCounter,
    artifacts: Vec<PathBuf>,
    summary: RunSummary,
}

/// Sequential converter dispatch over one input directory.
pub struct Driver<'a> {
    options: &'a Options,
    converters: &'a ConverterRegistry,
    pdf: Option<PdfBuild<'a>>,
}

impl<'a> Driver<'a> {
    /// Driver for `options`, looking converters up in `converters`.
    pub const fn new(options: &'a Options, converters: &'a ConverterRegistry) -> Self {
        Self {
            options,
            converters,
            pdf: None,
        }
    }

    /// Build a PDF from each generated LaTeX file with `tool`.
    ///
    /// Only takes effect when the options ask for PDF output.
    #[must_use]
    pub fn with_pdf_builder(mut self, tool: &'a dyn BuildTool, cleanup: CleanupPolicy) -> Self {
        self.pdf = Some(PdfBuild { tool, cleanup });
        self
    }

    fn pdf_build(&self) -> Option<&PdfBuild<'a>> {
        self.pdf
            .as_ref()
            .filter(|_| self.options.selection.wants_pdf())
    }

    /// Execute the run.
    ///
    /// Nothing is written before the plan validates. The first failing unit
    /// stops the run.
    pub fn run(&self, reporter: &mut dyn ProgressReporter) -> Result<RunSummary> {
        let selection = &self.options.selection;
        let discovery = plan(&self.options.input_dir, selection)?;

        let bml_converters = self.resolve(SourceFormat::Bml)?;
        let bss_converters = self.resolve(SourceFormat::Bss)?;

        let output_dir = &self.options.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: output_dir.clone(),
            source: e,
        })?;

        let total = discovery.total_units(selection);
        info!(
            "Converting {} BML and {} BSS file(s): {} unit(s)",
            discovery.bml_files.len(),
            discovery.bss_files.len(),
            total
        );

        let mut state = RunState {
            counter: ProgressCounter::new(total),
            artifacts: Vec::new(),
            summary: RunSummary {
                bml_files: discovery.bml_files.len(),
                bss_files: discovery.bss_files.len(),
                ..RunSummary::default()
            },
        };

        reporter.start(total);
        let result = self.convert_all(
            &discovery,
            &bml_converters,
            &bss_converters,
            &mut state,
            reporter,
        );
        let result = self.finish_pdf(result, &mut state);
        reporter.finish();
        result?;

        state.summary.units = state.counter.completed();
        Ok(state.summary)
    }

    /// Selected converters for `format`, in dispatch order.
    fn resolve(&self, format: SourceFormat) -> Result<Vec<&'a dyn Converter>> {
        self.options
            .selection
            .selected_for(format)
            .into_iter()
            .map(|kind| self.converters.get(kind))
            .collect()
    }

    fn convert_all(
        &self,
        discovery: &Discovery,
        bml_converters: &[&dyn Converter],
        bss_converters: &[&dyn Converter],
        state: &mut RunState,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<()> {
        if !bml_converters.is_empty() {
            for input in &discovery.bml_files {
                info!("Converting {}", input.display());
                // Parsed on first use, then shared by the remaining converters
                let mut content: Option<ParsedContent> = None;
                for converter in bml_converters {
                    content = self.convert_one(*converter, input, content, state)?;
                    Self::advance(state, reporter)?;
                }
            }
        }

        if !bss_converters.is_empty() {
            for input in &discovery.bss_files {
                info!("Converting {}", input.display());
                for converter in bss_converters {
                    self.convert_one(*converter, input, None, state)?;
                    Self::advance(state, reporter)?;
                }
            }
        }

        Ok(())
    }

    fn convert_one(
        &self,
        converter: &dyn Converter,
        input: &Path,
        content: Option<ParsedContent>,
        state: &mut RunState,
    ) -> Result<Option<ParsedContent>> {
        let kind = converter.kind();
        let request = ConvertRequest {
            input,
            output_dir: &self.options.output_dir,
            layout: &self.options.layout,
            verbose: self.options.verbose,
        };

        debug!(
            "{kind}: {} (content {})",
            input.display(),
            if content.is_some() { "reused" } else { "new" }
        );
        let conversion = converter.convert(&request, content)?;
        state.summary.outputs.extend(conversion.outputs);

        if kind == ConverterKind::BmlToLatex
            && let Some(pdf) = self.pdf_build()
        {
            let tex = latex_path(input, &self.options.output_dir);
            state.artifacts.push(tex.clone());
            pdf.tool.build_pdf(&tex, &self.options.output_dir)?;
            state.summary.pdfs_built += 1;
        }

        Ok(conversion.content)
    }

    fn advance(state: &mut RunState, reporter: &mut dyn ProgressReporter) -> Result<()> {
        let current = state.counter.advance()?;
        reporter.report(current, state.counter.total())
    }

    /// Run the batched cleanup step according to the cleanup policy.
    fn finish_pdf(&self, result: Result<()>, state: &mut RunState) -> Result<()> {
        let Some(pdf) = self.pdf_build() else {
            return result;
        };
        if state.artifacts.is_empty() {
            return result;
        }

        let run_cleanup = match pdf.cleanup {
            CleanupPolicy::Never => false,
            CleanupPolicy::OnSuccess => result.is_ok(),
            CleanupPolicy::Always => true,
        };
        if !run_cleanup {
            if result.is_err() {
                debug!(
                    "Leaving intermediates of {} LaTeX file(s) in place",
                    state.artifacts.len()
                );
            }
            return result;
        }

        let cleaned = pdf.tool.clean(&state.artifacts, &self.options.output_dir);
        match (result, cleaned) {
            (Ok(()), Ok(())) => {
                state.summary.cleaned = state.artifacts.len();
                Ok(())
            }
            (Ok(()), Err(e)) => Err(e),
            (Err(e), Ok(())) => {
                state.summary.cleaned = state.artifacts.len();
                Err(e)
            }
            (Err(e), Err(clean_err)) => {
                warn!("Cleanup after failed run also failed: {clean_err}");
                Err(e)
            }
        }
    }
}

/// LaTeX file a BML input is expected to produce in `output_dir`.
pub fn latex_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_path(input, output_dir, output_extensions::LATEX)
}
