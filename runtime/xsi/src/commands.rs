//! The `run` command.

use std::path::PathBuf;

use xs_eval::{
    LoaderConfig, ModuleLoader, Runtime, RuntimeError, Severity, SharedPrintHandler,
    SharedReporter,
};

use crate::program::{load_program, ProgramFileError};

/// Exit status when the run stops on a fatal runtime error.
pub const EXIT_FATAL: i32 = 1;
/// Exit status for bad arguments or an unreadable program file.
pub const EXIT_USAGE: i32 = 2;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("missing program file")]
    MissingProgram,

    #[error("option '{0}' needs a value")]
    MissingValue(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Options of `xs run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub program: PathBuf,
    /// Overrides `XS_LIB_DIR` and the working-directory default.
    pub lib_dir: Option<PathBuf>,
    /// Libraries loaded before `Main` starts, in order.
    pub includes: Vec<String>,
}

impl RunOptions {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        RunOptions {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Parse the arguments following `run`.
    ///
    /// `--lib-dir <dir>` and `--include <name>` also accept the
    /// `--opt=value` form.
    pub fn parse(args: &[String]) -> Result<Self, UsageError> {
        let mut program = None;
        let mut lib_dir = None;
        let mut includes = Vec::new();

        let mut args = args.iter();
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
                _ => (arg.as_str(), None),
            };
            match flag {
                "--lib-dir" | "--include" => {
                    let value = match inline {
                        Some(value) => value,
                        None => args
                            .next()
                            .cloned()
                            .ok_or_else(|| UsageError::MissingValue(flag.to_string()))?,
                    };
                    if flag == "--lib-dir" {
                        lib_dir = Some(PathBuf::from(value));
                    } else {
                        includes.push(value);
                    }
                }
                _ if flag.starts_with('-') => return Err(UsageError::UnknownOption(arg.clone())),
                _ if program.is_none() => program = Some(PathBuf::from(arg)),
                _ => return Err(UsageError::UnexpectedArgument(arg.clone())),
            }
        }

        Ok(RunOptions {
            program: program.ok_or(UsageError::MissingProgram)?,
            lib_dir,
            includes,
        })
    }

    /// Loader configuration: environment first, then `--lib-dir`.
    pub fn loader_config(&self) -> LoaderConfig {
        let config = LoaderConfig::from_env();
        match &self.lib_dir {
            Some(dir) => config.library_dir(dir),
            None => config,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Program(#[from] ProgramFileError),

    /// Already reported through the run's reporter.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Program(_) => EXIT_USAGE,
            RunError::Runtime(_) => EXIT_FATAL,
        }
    }
}

/// Load the program, pre-include libraries and run `Main`.
///
/// `Core` is registered statically, so scripts can `Include` it without a
/// native library on disk.
#[tracing::instrument(level = "debug", skip_all, fields(program = %options.program.display()))]
pub fn run_file(
    options: &RunOptions,
    print_handler: SharedPrintHandler,
    reporter: SharedReporter,
) -> Result<(), RunError> {
    let registry = load_program(&options.program)?;
    tracing::debug!(subroutines = registry.len(), "program loaded");

    let mut loader = ModuleLoader::with_config(options.loader_config());
    xs_core::register(&mut loader);
    for name in &options.includes {
        if let Err(err) = loader.load(name) {
            reporter.report(Severity::Fatal, &err);
            return Err(err.into());
        }
    }

    let mut runtime = Runtime::new(registry)
        .with_loader(loader)
        .with_print_handler(print_handler)
        .with_reporter(reporter);
    runtime.interpret()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parses_program_and_options() {
        let options = RunOptions::parse(&args(&[
            "--include",
            "Core",
            "main.json",
            "--lib-dir=plugins",
            "--include=Math",
        ]));
        assert_eq!(
            options,
            Ok(RunOptions {
                program: PathBuf::from("main.json"),
                lib_dir: Some(PathBuf::from("plugins")),
                includes: vec!["Core".to_string(), "Math".to_string()],
            })
        );
    }

    #[test]
    fn program_is_required() {
        assert_eq!(
            RunOptions::parse(&args(&["--include", "Core"])),
            Err(UsageError::MissingProgram)
        );
    }

    #[test]
    fn option_without_value() {
        assert_eq!(
            RunOptions::parse(&args(&["main.json", "--lib-dir"])),
            Err(UsageError::MissingValue("--lib-dir".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_options_and_extra_arguments() {
        assert_eq!(
            RunOptions::parse(&args(&["main.json", "--fast"])),
            Err(UsageError::UnknownOption("--fast".to_string()))
        );
        assert_eq!(
            RunOptions::parse(&args(&["main.json", "other.json"])),
            Err(UsageError::UnexpectedArgument("other.json".to_string()))
        );
    }

    #[test]
    fn lib_dir_overrides_the_environment() {
        let options = RunOptions {
            lib_dir: Some(PathBuf::from("/opt/xs")),
            ..RunOptions::new("main.json")
        };
        assert_eq!(options.loader_config().library_dir, PathBuf::from("/opt/xs"));
    }
}
