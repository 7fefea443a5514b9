use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn braincrap(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_braincrap"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_missing_include_exits_with_one_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("main.bc");
    let output = temp_dir.path().join("out.c");
    let missing = temp_dir.path().join("missing.bc");
    fs::write(&input, format!("+\n${}\n", missing.display())).unwrap();

    let result = braincrap(&["-o", output.to_str().unwrap(), input.to_str().unwrap()]);
    assert_eq!(result.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&result.stderr),
        format!(
            "braincrap:{}: Unable to include file '{}'\n",
            input.display(),
            missing.display()
        )
    );
    assert!(!output.exists());
}

#[test]
fn test_successful_run_writes_program() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("main.bc");
    let output = temp_dir.path().join("out.bf");
    fs::write(&input, "#Z[-]\nZ+.").unwrap();

    let result = braincrap(&[
        "--target",
        "bf",
        "--out",
        output.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);
    assert_eq!(result.status.code(), Some(0));
    assert!(result.stderr.is_empty());
    assert_eq!(fs::read_to_string(&output).unwrap(), "[-]+.");
}

#[test]
fn test_argument_errors_exit_with_one() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("main.bc");
    fs::write(&input, "+").unwrap();
    let input = input.to_str().unwrap();

    assert_eq!(braincrap(&["-t", "js", input]).status.code(), Some(1));
    assert_eq!(braincrap(&["--bogus", input]).status.code(), Some(1));
    assert_eq!(braincrap(&[input, "-o"]).status.code(), Some(1));
}

#[test]
fn test_missing_input_file_exits_with_one() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("absent.bc");
    let output = temp_dir.path().join("out.c");

    let result = braincrap(&["-o", output.to_str().unwrap(), input.to_str().unwrap()]);
    assert_eq!(result.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&result.stderr),
        format!("braincrap: Unable to open file '{}'\n", input.display())
    );
}

#[test]
fn test_no_arguments_shows_help() {
    let result = braincrap(&[]);
    assert_eq!(result.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&result.stdout).contains("Usage:"));
}

#[test]
fn test_help_and_version_exit_zero() {
    let result = braincrap(&["--help"]);
    assert_eq!(result.status.code(), Some(0));

    for flag in ["-v", "--version", "--ver"] {
        let result = braincrap(&[flag]);
        assert_eq!(result.status.code(), Some(0), "{flag}");
        let stdout = String::from_utf8_lossy(&result.stdout);
        assert!(stdout.starts_with("Braincrap v"), "{flag}: {stdout}");
    }
}
