//! `run_file` against program trees on disk.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use xs_eval::{buffer_handler, buffer_reporter, RuntimeError, Severity};
use xsi::{load_program, run_file, ProgramFileError, RunError, RunOptions, EXIT_FATAL, EXIT_USAGE};

fn program_file(json: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

struct Outcome {
    result: Result<(), RunError>,
    output: String,
    reports: Vec<xs_eval::Report>,
}

fn run(options: &RunOptions) -> Outcome {
    let output = buffer_handler();
    let reporter = buffer_reporter();
    let result = run_file(options, Arc::clone(&output), Arc::clone(&reporter));
    Outcome {
        result,
        output: output.output(),
        reports: reporter.reports(),
    }
}

fn run_path(path: &Path) -> Outcome {
    run(&RunOptions::new(path))
}

const REPEAT_SHOW: &str = r#"{
    "subroutines": [
        { "name": "Main",
          "instructions": [
              {"string": "Core"}, {"call": "Include"},
              {"int": 2}, {"code": "Loop"}, {"call": "Repeat"}
          ],
          "children": [
              { "name": "Loop",
                "instructions": [ {"string": "tick"}, {"call": "Core.Show"} ] }
          ] }
    ]
}"#;

#[test]
fn runs_a_program_file() {
    let file = program_file(REPEAT_SHOW);
    let outcome = run_path(file.path());
    assert!(outcome.result.is_ok());
    assert_eq!(outcome.output, "tick\ntick\n");
    assert!(outcome.reports.is_empty());
}

#[test]
fn preincluded_libraries_are_loaded_before_main() {
    let file = program_file(
        r#"{ "subroutines": [ { "name": "Main",
              "instructions": [ {"int": 5}, {"call": "Show"} ] } ] }"#,
    );
    let options = RunOptions {
        includes: vec!["Core".to_string()],
        ..RunOptions::new(file.path())
    };

    let outcome = run(&options);
    assert!(outcome.result.is_ok());
    assert_eq!(outcome.output, "5\n");
}

#[test]
fn missing_main_is_a_fatal_exit() {
    let file = program_file(r#"{ "subroutines": [ { "name": "Start" } ] }"#);
    let outcome = run_path(file.path());

    let Err(err) = outcome.result else {
        panic!("expected the run to fail");
    };
    assert_eq!(err.exit_code(), EXIT_FATAL);
    assert!(matches!(err, RunError::Runtime(RuntimeError::MissingMain { .. })));
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.reports[0].severity, Severity::Fatal);
}

#[test]
fn failed_preinclude_is_reported() {
    let file = program_file(r#"{ "subroutines": [ { "name": "Main" } ] }"#);
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions {
        lib_dir: Some(dir.path().to_path_buf()),
        includes: vec!["Absent".to_string()],
        ..RunOptions::new(file.path())
    };

    let outcome = run(&options);
    let Err(err) = outcome.result else {
        panic!("expected the include to fail");
    };
    assert_eq!(err.exit_code(), EXIT_FATAL);
    assert!(matches!(
        err,
        RunError::Runtime(RuntimeError::PluginLoad { ref name, .. }) if name == "Absent"
    ));
    assert_eq!(outcome.reports.len(), 1);
}

#[test]
fn unreadable_file_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let outcome = run_path(&missing);
    let Err(err) = outcome.result else {
        panic!("expected a read error");
    };
    assert_eq!(err.exit_code(), EXIT_USAGE);
    assert!(matches!(err, RunError::Program(ProgramFileError::Read { .. })));
    assert!(outcome.reports.is_empty());
}

#[test]
fn malformed_program_is_a_parse_error() {
    let file = program_file(r#"{ "subroutines": [ { "name": "Main", "instructions": [ {"goto": 1} ] } ] }"#);
    let err = load_program(file.path()).err();
    assert!(matches!(err, Some(ProgramFileError::Parse { .. })));
    assert!(err.is_some_and(|err| err.to_string().contains("not a valid program tree")));
}

#[test]
fn program_tree_keeps_nesting() {
    let file = program_file(REPEAT_SHOW);
    let registry = load_program(file.path()).unwrap();
    let paths: Vec<String> = registry.iter().map(|(id, _)| registry.path(id)).collect();
    assert_eq!(paths, vec!["<root>", "Main", "Main.Loop"]);
}
