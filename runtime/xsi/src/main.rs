//! xs command-line runner.

use std::path::Path;

use xs_eval::{stderr_reporter, stdout_handler};
use xsi::{run_file, RunError, RunOptions, EXIT_USAGE};

fn main() {
    xsi::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(EXIT_USAGE);
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let options = match RunOptions::parse(&args[2..]) {
                Ok(options) => options,
                Err(err) => {
                    eprintln!("error: {err}");
                    eprintln!("Usage: xs run <program.json> [--lib-dir <dir>] [--include <name>]...");
                    std::process::exit(EXIT_USAGE);
                }
            };
            run(&options);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("xs {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare program path runs it with default options.
            if Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            {
                run(&RunOptions::new(command));
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(EXIT_USAGE);
            }
        }
    }
}

fn run(options: &RunOptions) {
    match run_file(options, stdout_handler(), stderr_reporter()) {
        Ok(()) => {}
        Err(err) => {
            // Runtime errors were reported when the run stopped.
            if let RunError::Program(program) = &err {
                eprintln!("error: {program}");
            }
            std::process::exit(err.exit_code());
        }
    }
}

fn print_usage() {
    println!("xs - stack-based script runner");
    println!();
    println!("Usage: xs <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <program.json>   Run a program tree");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --lib-dir <dir>      Directory plugins are loaded from (default: $XS_LIB_DIR or .)");
    println!("  --include <name>     Load a library before Main starts (repeatable)");
    println!();
    println!("Environment:");
    println!("  XS_LIB_DIR           Default plugin directory");
    println!("  RUST_LOG             Enable runtime tracing, e.g. RUST_LOG=xs_eval=debug");
    println!();
    println!("Exit status:");
    println!("  0  success");
    println!("  1  the run stopped on a fatal error");
    println!("  2  bad arguments or unreadable program file");
}
