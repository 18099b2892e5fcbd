//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

use crate::constants::{INDENTATION_RANGE, MAX_VERBOSE};

/// Parse and validate a bounded integer value.
///
/// # Arguments
///
/// * `s` - The string to parse
/// * `min` - Minimum allowed value (inclusive)
/// * `max` - Maximum allowed value (inclusive)
/// * `name` - Name of the parameter for error messages
pub fn parse_bounded_int(s: &str, min: u8, max: u8, name: &str) -> Result<u8, String> {
    let value: u8 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(min..=max).contains(&value) {
        return Err(format!("{name} must be between {min} and {max}, got {value}"));
    }

    Ok(value)
}

/// Parse and validate bidtable indentation (1-9).
pub fn parse_indentation(s: &str) -> Result<u8, String> {
    parse_bounded_int(
        s,
        *INDENTATION_RANGE.start(),
        *INDENTATION_RANGE.end(),
        "indentation",
    )
}

/// Parse and validate verbosity (0-2).
pub fn parse_verbose(s: &str) -> Result<u8, String> {
    parse_bounded_int(s, 0, MAX_VERBOSE, "verbose")
}
