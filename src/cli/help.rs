//! Help and about text.

#![allow(clippy::print_stdout)]

use crate::constants::about;

/// Print a short usage reminder.
pub fn print_usage_help() {
    println!("Usage: bml-converter <INPUT_DIR> <OUTPUT_DIR> [OPTIONS]");
    println!();
    println!("Example: bml-converter systems/ out/ --bml2html --bml2pdf");
    println!();
    println!("Run 'bml-converter -h' for all options or 'bml-converter config init' to");
    println!("create a configuration file with the converter commands.");
}

/// Lines shown by the `about` command.
pub fn about_lines() -> Vec<String> {
    vec![
        format!("{} {}", about::TITLE, about::VERSION),
        about::DESCRIPTION.to_string(),
        format!("Author: {} <{}>", about::AUTHOR, about::EMAIL),
        format!("License: {}", about::LICENSE),
        about::COPYRIGHT.to_string(),
        format!("Website: {}", about::URL),
        format!("Documentation: {}", about::HELP_URL),
    ]
}

/// Print program information.
pub fn print_about() {
    for line in about_lines() {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_lines_cover_metadata() {
        let text = about_lines().join("\n");
        for field in [
            about::TITLE,
            about::VERSION,
            about::AUTHOR,
            about::EMAIL,
            about::LICENSE,
            about::COPYRIGHT,
            about::URL,
            about::HELP_URL,
        ] {
            assert!(!field.is_empty());
            assert!(text.contains(field), "about text lacks '{field}'");
        }
    }
}
