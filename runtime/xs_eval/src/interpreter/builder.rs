//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use xs_ir::{Registry, SubroutineId};

use super::Interpreter;
use crate::loader::ModuleLoader;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::reporter::{stderr_reporter, SharedReporter};
use crate::value_stack::Stack;

/// Builder for creating Interpreter instances.
///
/// The registry, stack and loader are borrowed for the interpreter's
/// lifetime. Without an explicit [`entry`](Self::entry) the interpreter
/// starts at `Main` under the root.
pub struct InterpreterBuilder<'a> {
    registry: &'a Registry,
    stack: &'a mut Stack,
    loader: &'a mut ModuleLoader,
    entry: Option<SubroutineId>,
    print_handler: Option<SharedPrintHandler>,
    reporter: Option<SharedReporter>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(registry: &'a Registry, stack: &'a mut Stack, loader: &'a mut ModuleLoader) -> Self {
        Self {
            registry,
            stack,
            loader,
            entry: None,
            print_handler: None,
            reporter: None,
        }
    }

    /// Start at `entry` instead of `Main`.
    #[must_use]
    pub fn entry(mut self, entry: SubroutineId) -> Self {
        self.entry = Some(entry);
        self
    }

    /// Set the handler program output goes to. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the handler diagnostics go to. Default is stderr.
    #[must_use]
    pub fn reporter(mut self, reporter: SharedReporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            registry: self.registry,
            stack: self.stack,
            loader: self.loader,
            entry: self.entry,
            scope: self.entry.unwrap_or_else(|| self.registry.root()),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            reporter: self.reporter.unwrap_or_else(stderr_reporter),
        }
    }
}
