//! Owned state for one run.
//!
//! [`Interpreter`] only borrows; `Runtime` owns what it borrows so callers
//! such as the CLI can set up a run in one place and inspect the stack and
//! loader afterwards.

use xs_ir::Registry;

use crate::errors::RuntimeResult;
use crate::interpreter::InterpreterBuilder;
use crate::loader::ModuleLoader;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::reporter::{stderr_reporter, SharedReporter};
use crate::value_stack::Stack;

pub struct Runtime {
    registry: Registry,
    loader: ModuleLoader,
    stack: Stack,
    print_handler: SharedPrintHandler,
    reporter: SharedReporter,
}

impl Runtime {
    pub fn new(registry: Registry) -> Self {
        Runtime {
            registry,
            loader: ModuleLoader::new(),
            stack: Stack::new(),
            print_handler: stdout_handler(),
            reporter: stderr_reporter(),
        }
    }

    #[must_use]
    pub fn with_loader(mut self, loader: ModuleLoader) -> Self {
        self.loader = loader;
        self
    }

    #[must_use]
    pub fn with_print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = handler;
        self
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: SharedReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn loader(&self) -> &ModuleLoader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut ModuleLoader {
        &mut self.loader
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Run `Main`. A fatal error is reported, then returned.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn interpret(&mut self) -> RuntimeResult {
        InterpreterBuilder::new(&self.registry, &mut self.stack, &mut self.loader)
            .print_handler(self.print_handler.clone())
            .reporter(self.reporter.clone())
            .build()
            .interpret()
    }
}
