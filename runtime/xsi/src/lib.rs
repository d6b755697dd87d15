//! xs runner library.
//!
//! The `xs` binary is a thin argument parser over this crate:
//! - `program`: reading a JSON program tree into a registry
//! - `commands`: the `run` command and its options
//! - `init_tracing`: `RUST_LOG`-driven diagnostics

pub mod commands;
pub mod program;

use std::sync::Once;

pub use commands::{run_file, RunError, RunOptions, UsageError, EXIT_FATAL, EXIT_USAGE};
pub use program::{load_program, ProgramFileError};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber once.
///
/// Nothing is installed unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=xs_eval=debug xs run program.json`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .with(filter)
                .init();
        }
    });
}
