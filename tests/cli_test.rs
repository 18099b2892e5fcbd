//! Integration tests for the bml-converter binary.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_about_shows_metadata() {
    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.arg("about");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("BML Converter"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("MIT License"));
}

#[test]
fn test_no_arguments_prints_usage() {
    let mut cmd = cargo_bin_cmd!("bml-converter");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage: bml-converter"));
}

#[test]
fn test_input_dir_without_output_dir_fails() {
    let input = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.arg(input.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("an output directory is required"));
}

#[test]
fn test_invalid_indentation_is_rejected() {
    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.args(["in", "out", "--indentation", "12"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("indentation must be between 1 and 9"));
}

#[test]
fn test_config_path_honours_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.arg("config").arg("path").arg("--config").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_writes_loadable_template() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.env("BML_CONVERTER_CONFIG", &path).args(["config", "init"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[converters.bml2html]"));
    assert!(contents.contains("latexmk"));

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.env("BML_CONVERTER_CONFIG", &path).args(["config", "show"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("BmlToHtml"));

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.env("BML_CONVERTER_CONFIG", &path).args(["config", "init"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.arg(input.path())
        .arg(dir.path().join("out"))
        .arg("--config")
        .arg(dir.path().join("missing.toml"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_nothing_to_convert_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    std::fs::write(input.path().join("readme.txt"), "no sources").unwrap();
    let output = dir.path().join("out");
    let config = write_config(dir.path(), "");

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.arg(input.path())
        .arg(&output)
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("must be at least 1"));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_dir_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.arg(dir.path().join("nope"))
        .arg(dir.path().join("out"))
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("input directory does not exist"));
}

#[cfg(unix)]
const SHELL_CONVERTERS: &str = r#"
[converters.bml2html]
program = "sh"
args = ["-c", 'echo "$3" > "$1/$2.html"', "sh", "{output_dir}", "{stem}", "{indentation}"]

[converters.bml2bss]
program = "sh"
args = ["-c", 'cat > "$1/$2.bss"', "sh", "{output_dir}", "{stem}"]
stdin = true

[converters.bml2latex]
program = "sh"
args = ["-c", 'touch "$1/$2.tex"', "sh", "{output_dir}", "{stem}"]

[converters.bss2bml]
program = "sh"
args = ["-c", 'touch "$1/$2.bml"', "sh", "{output_dir}", "{stem}"]
"#;

#[cfg(unix)]
#[test]
fn test_full_run_with_command_converters() {
    let dir = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    std::fs::write(input.path().join("b.bml"), "1C 2+!c\n").unwrap();
    std::fs::write(input.path().join("a.bml"), "1D 2+!d\n").unwrap();
    std::fs::write(input.path().join("c.bss"), "bss\n").unwrap();
    let output = dir.path().join("out");
    let config = write_config(dir.path(), SHELL_CONVERTERS);

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.env_remove("RUST_LOG")
        .arg(input.path())
        .arg(&output)
        .args(["--bml2bss", "--bss2bml", "--indentation", "6", "--config"])
        .arg(&config);

    // html + bss for two BML files, bml for one BSS file
    cmd.assert().success().stdout(
        "progress: 1/5\nprogress: 2/5\nprogress: 3/5\nprogress: 4/5\nprogress: 5/5\n",
    );

    assert_eq!(
        std::fs::read_to_string(output.join("a.html")).unwrap(),
        "6\n"
    );
    assert_eq!(
        std::fs::read_to_string(output.join("b.bss")).unwrap(),
        "1C 2+!c\n"
    );
    assert!(output.join("c.bml").exists());
    assert!(!output.join("a.tex").exists());
}

#[cfg(unix)]
#[test]
fn test_pdf_falls_back_to_latex_without_build_tool() {
    let dir = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    std::fs::write(input.path().join("a.bml"), "1C\n").unwrap();
    let output = dir.path().join("out");
    let config = write_config(
        dir.path(),
        &format!(
            "[latex]\nprogram = \"bml-converter-no-such-latexmk\"\n{SHELL_CONVERTERS}"
        ),
    );

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.env_remove("RUST_LOG")
        .arg(input.path())
        .arg(&output)
        .args(["--no-bml2html", "--bml2pdf", "--config"])
        .arg(&config);

    cmd.assert()
        .success()
        .stdout("progress: 1/1\n")
        .stderr(predicate::str::contains("generating LaTeX without PDF"));
    assert!(output.join("a.tex").exists());
}

#[cfg(unix)]
#[test]
fn test_failing_converter_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    std::fs::write(input.path().join("a.bml"), "1C\n").unwrap();
    let config = write_config(
        dir.path(),
        "[converters.bml2html]\nprogram = \"false\"\n",
    );

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.arg(input.path())
        .arg(dir.path().join("out"))
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("converter bml2html failed"));
}

/// Write an executable stand-in for latexmk into `dir`.
///
/// It answers `-v` with a version banner and appends every other
/// invocation's arguments to `latexmk.log` in `dir`.
#[cfg(unix)]
fn fake_latexmk(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("latexmk");
    let log = dir.join("latexmk.log");
    std::fs::write(
        &script,
        format!(
            "#!/bin/sh\n\
             if [ \"$1\" = \"-v\" ]; then\n\
             \techo 'Latexmk, John Collins, 7 Jan. 2023. Version 4.79'\n\
             \texit 0\n\
             fi\n\
             echo \"$*\" >> '{}'\n\
             echo 'Latexmk: all targets up-to-date'\n",
            log.display()
        ),
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[cfg(unix)]
#[test]
fn test_pdf_run_builds_each_file_then_cleans_once() {
    let dir = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    std::fs::write(input.path().join("b.bml"), "1C\n").unwrap();
    std::fs::write(input.path().join("a.bml"), "1D\n").unwrap();
    let output = dir.path().join("out");
    let latexmk = fake_latexmk(dir.path());
    let config = write_config(
        dir.path(),
        &format!(
            "[latex]\nprogram = '{}'\n{SHELL_CONVERTERS}",
            latexmk.display()
        ),
    );

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.env_remove("RUST_LOG")
        .arg(input.path())
        .arg(&output)
        .args(["--no-bml2html", "--bml2pdf", "--config"])
        .arg(&config);

    // Build tool chatter goes to stderr, stdout only carries progress
    cmd.assert()
        .success()
        .stdout("progress: 1/2\nprogress: 2/2\n")
        .stderr(predicate::str::contains("all targets up-to-date"));

    let out = output.display();
    let log = std::fs::read_to_string(dir.path().join("latexmk.log")).unwrap();
    assert_eq!(
        log.lines().collect::<Vec<_>>(),
        vec![
            format!("-quiet -pdf -output-directory={out} {out}/a.tex"),
            format!("-quiet -pdf -output-directory={out} {out}/b.tex"),
            format!("-c -f -output-directory={out} {out}/a.tex {out}/b.tex"),
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_probe_reports_usable_build_tool() {
    let dir = TempDir::new().unwrap();
    let latexmk = fake_latexmk(dir.path());
    let config = write_config(
        dir.path(),
        &format!("[latex]\nprogram = '{}'\n", latexmk.display()),
    );

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.arg("probe").arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Build tool: {}",
            latexmk.display()
        )))
        .stdout(predicate::str::contains("Required version: >= 4.0.0"))
        .stdout(predicate::str::contains("PDF output: available"));
    assert!(!dir.path().join("latexmk.log").exists());
}

#[cfg(unix)]
#[test]
fn test_probe_reports_too_old_build_tool() {
    let dir = TempDir::new().unwrap();
    let latexmk = fake_latexmk(dir.path());
    let config = write_config(
        dir.path(),
        &format!(
            "[latex]\nprogram = '{}'\nmin_version = \"5\"\n",
            latexmk.display()
        ),
    );

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.arg("probe").arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PDF output: not available"));
}

#[test]
fn test_probe_reports_missing_build_tool() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "[latex]\nprogram = \"bml-converter-no-such-latexmk\"\n",
    );

    let mut cmd = cargo_bin_cmd!("bml-converter");
    cmd.arg("probe").arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Build tool: bml-converter-no-such-latexmk"))
        .stdout(predicate::str::contains("PDF output: not available"));
}
