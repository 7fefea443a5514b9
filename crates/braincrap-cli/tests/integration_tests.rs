use std::fs;
use std::path::PathBuf;

use braincrap_cli::{compile, CleanupPolicy, CompileOptions, DriverError};
use braincrap_core::{BraincrapError, Target};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn setup(source: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("main.bc");
    let output = temp_dir.path().join("bc.out");
    fs::write(&input, source).unwrap();
    (temp_dir, input, output)
}

#[test]
fn test_c_program() {
    let (_temp_dir, input, output) = setup("#P++\nP[->+<]");
    compile(&CompileOptions::new(&input, &output, Target::C)).unwrap();

    let expected = format!(
        "{}*p+=2;w{{*p-=1;p+=1;f;*p+=1;p-=1;f;}}{}",
        Target::C.header(),
        Target::C.footer()
    );
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
}

#[test]
fn test_c0_program() {
    let (_temp_dir, input, output) = setup(",[.,]");
    compile(&CompileOptions::new(&input, &output, Target::C0)).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("#include <stdio.h>\n"));
    assert!(text.ends_with("int main(){t=malloc(1);p=t;f();while(*p){e();f();}free(t);exit(0);}"));
}

#[test]
fn test_bf_program_has_no_boilerplate() {
    let (_temp_dir, input, output) = setup("; cat\n,[.,] done\n");
    compile(&CompileOptions::new(&input, &output, Target::Bf)).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), ",[.,]");
}

#[test]
fn test_missing_top_level_include_removes_output() {
    let (temp_dir, input, output) = setup("");
    let missing = temp_dir.path().join("nope.bc");
    fs::write(&input, format!("+\n${}\n", missing.display())).unwrap();

    let err = compile(&CompileOptions::new(&input, &output, Target::C)).unwrap_err();
    assert!(matches!(
        err,
        DriverError::Translate(BraincrapError::IncludeNotFound { .. })
    ));
    assert!(!output.exists());

    let diagnostic = err.diagnostic("braincrap");
    assert_eq!(
        diagnostic,
        format!(
            "braincrap:{}: Unable to include file '{}'",
            input.display(),
            missing.display()
        )
    );
}

#[test]
fn test_self_including_input_removes_output() {
    let (_temp_dir, input, output) = setup("");
    fs::write(&input, format!("+\n${}\n", input.display())).unwrap();

    let err = compile(&CompileOptions::new(&input, &output, Target::C)).unwrap_err();
    assert!(matches!(
        err,
        DriverError::Translate(BraincrapError::IncludeCycle { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_top_level_bracket_error_removes_output() {
    let (_temp_dir, input, output) = setup("+[");
    let err = compile(&CompileOptions::new(&input, &output, Target::C0)).unwrap_err();
    assert!(matches!(
        err,
        DriverError::Translate(BraincrapError::UnmatchedOpenBracket { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_nested_error_keeps_output_by_default() {
    let (temp_dir, input, output) = setup("");
    let lib = temp_dir.path().join("lib.bc");
    fs::write(&lib, "]").unwrap();
    fs::write(&input, format!("${}\n", lib.display())).unwrap();

    let err = compile(&CompileOptions::new(&input, &output, Target::C)).unwrap_err();
    assert!(matches!(
        err,
        DriverError::Translate(BraincrapError::UnmatchedCloseBracket { .. })
    ));
    // The partial program is left behind.
    assert_eq!(fs::read_to_string(&output).unwrap(), Target::C.header());
}

#[test]
fn test_nested_error_with_cleanup_always() {
    let (temp_dir, input, output) = setup("");
    let lib = temp_dir.path().join("lib.bc");
    fs::write(&lib, "#]\n").unwrap();
    fs::write(&input, format!("${}\n", lib.display())).unwrap();

    let mut options = CompileOptions::new(&input, &output, Target::C);
    options.cleanup = CleanupPolicy::Always;
    let err = compile(&options).unwrap_err();
    assert!(matches!(
        err,
        DriverError::Translate(BraincrapError::InvalidMacroChar { name: ']', .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("absent.bc");
    let output = temp_dir.path().join("bc.out");

    let err = compile(&CompileOptions::new(&input, &output, Target::C)).unwrap_err();
    assert!(matches!(err, DriverError::OpenInput { .. }));
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output() {
    let (temp_dir, input, _output) = setup("+");
    let output = temp_dir.path().join("no_such_dir").join("bc.out");

    let err = compile(&CompileOptions::new(&input, &output, Target::C)).unwrap_err();
    assert!(matches!(err, DriverError::CreateOutput { .. }));
    assert!(err.diagnostic("braincrap").starts_with("braincrap: Unable to open file"));
}

#[test]
fn test_options_from_command_line() {
    let (_temp_dir, input, output) = setup("#S[-]\nS+");
    let matches = braincrap_cli::command()
        .try_get_matches_from([
            "braincrap",
            "-t",
            "bf",
            "-o",
            output.to_str().unwrap(),
            input.to_str().unwrap(),
        ])
        .unwrap();
    let options = braincrap_cli::options_from_matches(&matches).unwrap();
    compile(&options).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "[-]+");
}
