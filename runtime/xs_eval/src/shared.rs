//! The view handed to every plugin call.
//!
//! `SharedData` is built fresh for each dispatch. It lends the plugin the
//! run's registry, the caller's scope, the loader and the output handlers,
//! which is everything a plugin needs to re-enter the interpreter: resolve
//! a subroutine name the way the caller would, then run it with
//! [`SharedData::run`] on the same stack.

use std::sync::Arc;

use xs_ir::{Registry, SubroutineId};

use crate::errors::RuntimeResult;
use crate::interpreter::InterpreterBuilder;
use crate::loader::ModuleLoader;
use crate::print_handler::SharedPrintHandler;
use crate::reporter::SharedReporter;
use crate::resolve::resolve_call;
use crate::value_stack::Stack;

pub struct SharedData<'a> {
    registry: &'a Registry,
    current: SubroutineId,
    loader: &'a mut ModuleLoader,
    print_handler: &'a SharedPrintHandler,
    reporter: &'a SharedReporter,
}

impl<'a> SharedData<'a> {
    pub fn new(
        registry: &'a Registry,
        current: SubroutineId,
        loader: &'a mut ModuleLoader,
        print_handler: &'a SharedPrintHandler,
        reporter: &'a SharedReporter,
    ) -> Self {
        SharedData {
            registry,
            current,
            loader,
            print_handler,
            reporter,
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Scope of the instruction that made this call.
    pub fn current(&self) -> SubroutineId {
        self.current
    }

    pub fn loader(&self) -> &ModuleLoader {
        &*self.loader
    }

    pub fn loader_mut(&mut self) -> &mut ModuleLoader {
        &mut *self.loader
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        self.print_handler
    }

    pub fn reporter(&self) -> &SharedReporter {
        self.reporter
    }

    /// Resolve a (possibly dotted) subroutine name from the caller's scope.
    pub fn resolve(&self, name: &str) -> RuntimeResult<SubroutineId> {
        resolve_call(self.registry, name, self.current)
    }

    /// Invoke `entry` of the loaded `library`.
    ///
    /// Fails with `UnknownEntry` if `library` is not loaded; `entry` itself
    /// is left to the plugin.
    #[tracing::instrument(level = "debug", skip(self, stack))]
    pub fn call(&mut self, library: &str, entry: &str, stack: &mut Stack) -> RuntimeResult {
        let plugin = self.loader.plugin(library, entry)?;
        plugin.invoke(entry, stack, self)
    }

    /// Invoke an undotted call `name`, see [`ModuleLoader::resolve_bare`].
    #[tracing::instrument(level = "debug", skip(self, stack))]
    pub fn call_bare(&mut self, name: &str, stack: &mut Stack) -> RuntimeResult {
        let plugin = self.loader.resolve_bare(name)?;
        plugin.invoke(name, stack, self)
    }

    /// Run `subroutine` in a new interpreter sharing this run's registry,
    /// loader, handlers and `stack`.
    ///
    /// Fatal errors are returned without being reported, so they unwind to
    /// the outermost `interpret()`.
    pub fn run(&mut self, stack: &mut Stack, subroutine: SubroutineId) -> RuntimeResult {
        InterpreterBuilder::new(self.registry, stack, &mut *self.loader)
            .entry(subroutine)
            .print_handler(Arc::clone(self.print_handler))
            .reporter(Arc::clone(self.reporter))
            .build()
            .run()
    }
}
