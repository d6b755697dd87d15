//! xs Eval - the reentrant runtime for xs programs.
//!
//! This crate executes a [`Registry`](xs_ir::Registry) of subroutines:
//!
//! - `resolve`: lexical, segment-by-segment resolution of dotted call names
//! - `Interpreter`: walks instructions, pushes literals, runs calls
//! - `ModuleLoader`: loads plugins by name and dispatches calls into them
//! - `SharedData`: the view a plugin call gets, enough to re-enter the
//!   interpreter on the same stack
//! - `Stack`: the operand stack shared by a whole run
//!
//! # Plugins
//!
//! Plugins implement [`Plugin`]. They are either statically linked and
//! registered with [`ModuleLoader::register_static`], or built as native
//! libraries with [`export_plugin!`] and mapped on `Include`.

pub mod errors;
pub mod interpreter;
pub mod loader;
mod print_handler;
mod reporter;
pub mod resolve;
mod runtime;
mod shared;
mod stack;
mod value_stack;

pub use errors::{RuntimeError, RuntimeResult};
pub use interpreter::{Interpreter, InterpreterBuilder, EXCLUDE, INCLUDE};
pub use loader::{LoaderConfig, ModuleLoader, Plugin, PluginFactory};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use reporter::{
    buffer_reporter, silent_reporter, stderr_reporter, Report, Reporter, Severity, SharedReporter,
};
pub use resolve::{find_child, find_subroutine, resolve_call, split_call};
pub use runtime::Runtime;
pub use shared::SharedData;
pub use stack::ensure_sufficient_stack;
pub use value_stack::Stack;

pub use xs_ir;
