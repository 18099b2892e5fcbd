//! Configuration validation.

use crate::config::Config;
use crate::constants::{INDENTATION_RANGE, MAX_VERBOSE};
use crate::convert::ConverterKind;
use crate::error::{Error, Result};
use crate::toolchain::ToolRequirement;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_defaults(config)?;
    validate_converters(config)?;
    latex_requirement(config)?;
    Ok(())
}

/// Validate default settings.
fn validate_defaults(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    if !INDENTATION_RANGE.contains(&defaults.indentation) {
        return Err(Error::ConfigValidation {
            message: format!(
                "indentation must be between {} and {}, got {}",
                INDENTATION_RANGE.start(),
                INDENTATION_RANGE.end(),
                defaults.indentation
            ),
        });
    }

    if defaults.verbose > MAX_VERBOSE {
        return Err(Error::ConfigValidation {
            message: format!(
                "verbose must be between 0 and {MAX_VERBOSE}, got {}",
                defaults.verbose
            ),
        });
    }

    Ok(())
}

/// Validate converter command entries.
///
/// Keys must be spelled exactly like a converter name, since commands are
/// looked up by that name.
fn validate_converters(config: &Config) -> Result<()> {
    for (name, command) in &config.converters {
        if !ConverterKind::ALL.iter().any(|kind| kind.name() == name) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "unknown converter '{name}' (expected one of: {})",
                    ConverterKind::ALL.map(ConverterKind::name).join(", ")
                ),
            });
        }

        if command.program.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: format!("converter '{name}' has an empty program"),
            });
        }
    }

    Ok(())
}

/// Build the LaTeX tool requirement, validating its settings.
pub fn latex_requirement(config: &Config) -> Result<ToolRequirement> {
    let latex = &config.latex;
    if latex.program.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "latex.program must not be empty".to_string(),
        });
    }

    ToolRequirement::new(
        latex.program.clone(),
        latex.version_flag.clone(),
        &latex.min_version,
        &latex.version_pattern,
    )
}
