//! BML Converter - batch driver for the BML converters.
//!
//! Runs the BML → HTML/LaTeX/BSS and BSS → BML converters over every
//! source file of a directory, optionally building PDFs from the LaTeX
//! output, and reports progress on stdout.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod toolchain;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, ConvertArgs};
use config::{
    Config, ProgressMode, latex_requirement, load_config, resolve_config_path, save_config,
    validate_config,
};
use convert::ConverterRegistry;
use output::{BarReporter, LineReporter, ProgressReporter, SilentReporter};
use pipeline::{Driver, Options};
use std::path::Path;
use toolchain::Latexmk;
use tracing::{debug, info, warn};

pub use error::{Error, Result};

/// Main entry point for the bml-converter CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    if let Some(command) = cli.command {
        init_logging(cli.convert.verbose.unwrap_or(0));
        return handle_command(command, config_path);
    }

    // Show help if no directories provided
    let (Some(input_dir), Some(output_dir)) = (cli.input_dir.clone(), cli.output_dir.clone())
    else {
        if cli.input_dir.is_some() {
            return Err(Error::ConfigValidation {
                message: "an output directory is required".to_string(),
            });
        }
        cli::help::print_usage_help();
        return Ok(());
    };

    let config = load_config(config_path)?;
    validate_config(&config)?;

    let mut options = Options::from_defaults(input_dir, output_dir, &config.defaults);
    cli.convert.apply_to(&mut options);
    init_logging(options.verbose);
    debug!("Run options: {options:?}");

    convert_directory(&mut options, &cli.convert, &config)
}

/// Initialize logging for the given verbosity (0-2).
///
/// `RUST_LOG` takes precedence. Logs go to stderr so stdout only carries
/// the progress stream.
fn init_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Handle subcommands.
fn handle_command(command: Command, config_path: Option<&Path>) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, config_path),
        Command::About => {
            cli::help::print_about();
            Ok(())
        }
        Command::Probe => handle_probe_command(config_path),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = resolve_config_path(config_path)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::template(), &path)?;
                println!("Created configuration file: {}", path.display());
                println!("\nEdit the [converters] section to point at your converter programs.");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = resolve_config_path(config_path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_probe_command(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let requirement = latex_requirement(&config)?;
    let usable = toolchain::probe(&requirement)?;

    println!("Build tool: {}", requirement.program);
    println!("Required version: >= {}", requirement.min_version);
    println!(
        "PDF output: {}",
        if usable { "available" } else { "not available" }
    );
    Ok(())
}

/// Convert every source file of `options.input_dir`.
fn convert_directory(options: &mut Options, args: &ConvertArgs, config: &Config) -> Result<()> {
    if options.selection.bml2pdf && !pdf_capability(config)? {
        warn!(
            "{} (>= {}) not found: generating LaTeX without PDF",
            config.latex.program, config.latex.min_version
        );
        options.selection.bml2latex = true;
        options.selection.bml2pdf = false;
    }

    let registry = ConverterRegistry::from_config(config);
    let latexmk = Latexmk::new(config.latex.program.clone());
    let cleanup = args.cleanup.unwrap_or(config.latex.cleanup);
    let driver = Driver::new(options, &registry).with_pdf_builder(&latexmk, cleanup);

    let mut reporter = make_reporter(args.progress.unwrap_or(config.defaults.progress));
    let summary = driver.run(reporter.as_mut())?;

    info!(
        "Done: {} unit(s) over {} BML and {} BSS file(s), {} output(s), {} PDF(s)",
        summary.units,
        summary.bml_files,
        summary.bss_files,
        summary.outputs.len(),
        summary.pdfs_built
    );
    for output in &summary.outputs {
        debug!("Wrote {}", output.display());
    }
    Ok(())
}

/// Whether the configured build tool can produce PDFs.
fn pdf_capability(config: &Config) -> Result<bool> {
    let requirement = latex_requirement(config)?;
    let usable = toolchain::probe(&requirement)?;
    debug!(
        "Probed {} {}: {}",
        requirement.program,
        requirement.version_flag,
        if usable { "usable" } else { "absent" }
    );
    Ok(usable)
}

fn make_reporter(mode: ProgressMode) -> Box<dyn ProgressReporter> {
    match mode {
        ProgressMode::Line => Box::new(LineReporter::stdout()),
        ProgressMode::Bar => Box::new(BarReporter::new()),
        ProgressMode::None => Box::new(SilentReporter),
    }
}
