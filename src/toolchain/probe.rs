//! Detection of optional external tools by version.

use crate::error::{Error, Result};
use regex::Regex;
use semver::Version;
use std::io::ErrorKind;
use std::process::Command;
use tracing::debug;

/// One tool to probe.
#[derive(Debug, Clone)]
pub struct ToolRequirement {
    /// Executable name or path.
    pub program: String,
    /// Flag that prints the version.
    pub version_flag: String,
    /// Lowest acceptable version.
    pub min_version: Version,
    /// Pattern locating the version in the tool's output. The first
    /// capture group is used if there is one, otherwise the whole match.
    pub version_pattern: Regex,
}

impl ToolRequirement {
    /// Build a requirement from unparsed config values.
    pub fn new(
        program: impl Into<String>,
        version_flag: impl Into<String>,
        min_version: &str,
        version_pattern: &str,
    ) -> Result<Self> {
        let min_version = normalize_version(min_version)
            .ok_or_else(|| Error::ConfigValidation {
                message: format!("'{min_version}' is not a version number"),
            })
            .and_then(|v| {
                Version::parse(&v).map_err(|e| Error::InvalidVersion {
                    value: min_version.to_string(),
                    source: e,
                })
            })?;
        let version_pattern =
            Regex::new(version_pattern).map_err(|e| Error::InvalidVersionPattern {
                pattern: version_pattern.to_string(),
                source: e,
            })?;

        Ok(Self {
            program: program.into(),
            version_flag: version_flag.into(),
            min_version,
            version_pattern,
        })
    }

    /// Check a version banner against this requirement.
    ///
    /// Anything that cannot be extracted or parsed counts as "not satisfied".
    pub fn is_satisfied_by(&self, banner: &str) -> bool {
        let Some(found) = self.version_pattern.captures(banner).and_then(|caps| {
            caps.get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str().to_string())
        }) else {
            debug!("No version found in output of {}", self.program);
            return false;
        };

        match normalize_version(&found).map(|v| Version::parse(&v)) {
            Some(Ok(version)) => {
                debug!(
                    "{} version {} (need >= {})",
                    self.program, version, self.min_version
                );
                version >= self.min_version
            }
            Some(Err(e)) => {
                debug!("Unparseable {} version '{found}': {e}", self.program);
                false
            }
            None => {
                debug!("Unparseable {} version '{found}'", self.program);
                false
            }
        }
    }
}

/// Run the tool's version command and decide whether it is usable.
///
/// A tool that is not installed is reported as absent. A tool that runs
/// but exits non-zero is an error.
pub fn probe(requirement: &ToolRequirement) -> Result<bool> {
    let output = match Command::new(&requirement.program)
        .arg(&requirement.version_flag)
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} is not installed", requirement.program);
            return Ok(false);
        }
        Err(e) => {
            return Err(Error::ToolSpawn {
                program: requirement.program.clone(),
                source: e,
            });
        }
    };

    if !output.status.success() {
        return Err(Error::ProbeFailed {
            program: requirement.program.clone(),
            flag: requirement.version_flag.clone(),
            status: output.status,
        });
    }

    let mut banner = String::from_utf8_lossy(&output.stdout).into_owned();
    banner.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(requirement.is_satisfied_by(&banner))
}

/// Probe several tools in order.
pub fn probe_all(requirements: &[ToolRequirement]) -> Result<Vec<bool>> {
    requirements.iter().map(probe).collect()
}

/// Pad a dotted numeric version to `major.minor.patch`.
///
/// Returns `None` for empty input, non-numeric parts, or more than three parts.
pub fn normalize_version(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.trim().split('.').collect();
    if parts.len() > 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let mut numbers: Vec<u64> = parts
        .iter()
        .map(|p| p.parse::<u64>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    numbers.resize(3, 0);
    Some(format!("{}.{}.{}", numbers[0], numbers[1], numbers[2]))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::constants::latex;

    fn requirement(min: &str) -> ToolRequirement {
        ToolRequirement::new("latexmk", "-v", min, latex::VERSION_PATTERN).unwrap()
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("4.79").as_deref(), Some("4.79.0"));
        assert_eq!(normalize_version("4").as_deref(), Some("4.0.0"));
        assert_eq!(normalize_version("4.2.1").as_deref(), Some("4.2.1"));
        assert_eq!(normalize_version("04.02").as_deref(), Some("4.2.0"));
        assert!(normalize_version("").is_none());
        assert!(normalize_version("4.x").is_none());
        assert!(normalize_version("1.2.3.4").is_none());
        assert!(normalize_version("4..1").is_none());
    }

    #[test]
    fn test_version_comparison() {
        let req = requirement("4.0.0");
        assert!(req.is_satisfied_by("Version 4.2.1"));
        assert!(req.is_satisfied_by("Version 4.0"));
        assert!(!req.is_satisfied_by("Version 3.9.9"));
    }

    #[test]
    fn test_latexmk_banner() {
        let req = requirement("4.70");
        assert!(req.is_satisfied_by("Latexmk, John Collins, 7 Jan. 2023. Version 4.79\n"));
        assert!(!req.is_satisfied_by("Latexmk, John Collins, 1 Jan. 2015. Version 4.41\n"));
    }

    #[test]
    fn test_unmatched_banner_is_not_satisfied() {
        let req = requirement("4.0.0");
        assert!(!req.is_satisfied_by("latexmk: command not understood"));
    }

    #[test]
    fn test_pattern_without_group_uses_whole_match() {
        let req = ToolRequirement::new("tool", "--version", "1.2.0", r"\d+\.\d+\.\d+").unwrap();
        assert!(req.is_satisfied_by("tool 1.10.0 (built today)"));
    }

    #[test]
    fn test_invalid_requirement() {
        assert!(matches!(
            ToolRequirement::new("t", "-v", "4.0.0", "Version (unclosed"),
            Err(Error::InvalidVersionPattern { .. })
        ));
        assert!(ToolRequirement::new("t", "-v", "four", latex::VERSION_PATTERN).is_err());
    }

    #[test]
    fn test_probe_not_installed() {
        let req = ToolRequirement::new(
            "definitely-not-a-real-latexmk-binary",
            "-v",
            "4.0.0",
            latex::VERSION_PATTERN,
        )
        .unwrap();
        assert!(!probe(&req).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_nonzero_exit_is_error() {
        let req = ToolRequirement::new("false", "-v", "4.0.0", latex::VERSION_PATTERN).unwrap();
        assert!(matches!(probe(&req), Err(Error::ProbeFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_unmatched_output_is_absent() {
        // `echo -v` succeeds and prints nothing version-like
        let req = ToolRequirement::new("echo", "-v", "4.0.0", latex::VERSION_PATTERN).unwrap();
        assert!(!probe(&req).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_all_in_order() {
        let present = ToolRequirement::new("echo", "Version 5.1", "4.0.0", latex::VERSION_PATTERN)
            .unwrap();
        let old = ToolRequirement::new("echo", "Version 3.9.9", "4.0.0", latex::VERSION_PATTERN)
            .unwrap();
        assert_eq!(probe_all(&[present, old]).unwrap(), vec![true, false]);
    }
}
