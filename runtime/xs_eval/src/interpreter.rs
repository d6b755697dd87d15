//! The reentrant interpreter.
//!
//! An [`Interpreter`] walks one subroutine's instructions against a current
//! scope. Literals are pushed on the shared stack; calls are resolved
//! lexically from the current scope and executed in place, with the scope
//! switched to the callee for the duration of the call. A call that names
//! no visible subroutine goes to the plugin loader.
//!
//! # Reentrancy
//!
//! Plugins run subroutines of their own (`Repeat`, `If`) by building a
//! nested interpreter through [`SharedData::run`](crate::SharedData::run).
//! The nested interpreter borrows the same registry, stack, loader and
//! handlers, so everything it does is visible to the caller when it
//! returns.
//!
//! # Errors
//!
//! Recoverable errors raised by a plugin call are reported where the call
//! was dispatched and execution moves on to the next instruction. Everything
//! else unwinds through every nested interpreter; only the outermost
//! [`Interpreter::interpret`] reports it.

mod builder;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use xs_ir::{Instruction, Registry, SubroutineId, ENTRY_NAME};

use crate::errors::{RuntimeError, RuntimeResult};
use crate::loader::ModuleLoader;
use crate::print_handler::SharedPrintHandler;
use crate::reporter::{Severity, SharedReporter};
use crate::resolve::{find_child, resolve_call, split_call};
use crate::shared::SharedData;
use crate::stack::ensure_sufficient_stack;
use crate::value_stack::Stack;

/// Loads the library named by the text on top of the stack.
pub const INCLUDE: &str = "Include";
/// Unloads the library named by the text on top of the stack.
pub const EXCLUDE: &str = "Exclude";

pub struct Interpreter<'a> {
    registry: &'a Registry,
    stack: &'a mut Stack,
    loader: &'a mut ModuleLoader,
    /// Explicit starting subroutine; `Main` under the root when `None`.
    entry: Option<SubroutineId>,
    /// Scope calls are resolved from.
    scope: SubroutineId,
    print_handler: SharedPrintHandler,
    reporter: SharedReporter,
}

impl<'a> Interpreter<'a> {
    /// Interpreter running `Main` with stdout and stderr handlers.
    pub fn new(registry: &'a Registry, stack: &'a mut Stack, loader: &'a mut ModuleLoader) -> Self {
        InterpreterBuilder::new(registry, stack, loader).build()
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn scope(&self) -> SubroutineId {
        self.scope
    }

    pub fn stack(&self) -> &Stack {
        &*self.stack
    }

    pub fn loader(&self) -> &ModuleLoader {
        &*self.loader
    }

    /// Run the program, reporting a fatal error before returning it.
    ///
    /// This is the outermost entry point. Nested interpreters use
    /// [`run`](Self::run) so an error is reported once.
    pub fn interpret(&mut self) -> RuntimeResult {
        let result = self.run();
        if let Err(err) = &result {
            self.reporter.report(Severity::Fatal, err);
        }
        result
    }

    /// Run the entry subroutine without reporting errors.
    pub fn run(&mut self) -> RuntimeResult {
        let entry = match self.entry {
            Some(entry) => {
                if self.registry.get(entry).is_none() {
                    return Err(RuntimeError::InvalidRegistry {
                        message: format!("entry {entry:?} is out of bounds"),
                    });
                }
                entry
            }
            None => self.find_main()?,
        };
        self.enter(entry)
    }

    /// The root's direct child called `Main`.
    fn find_main(&self) -> RuntimeResult<SubroutineId> {
        let root = self.registry.root();
        match self.registry.get(root) {
            None => {
                return Err(RuntimeError::InvalidRegistry {
                    message: "registry has no root".to_string(),
                })
            }
            Some(sub) if sub.has_parent() => {
                return Err(RuntimeError::InvalidRegistry {
                    message: format!("root `{}` has a parent", sub.name()),
                })
            }
            Some(_) => {}
        }
        find_child(self.registry, root, ENTRY_NAME)
            .map_err(|_| RuntimeError::MissingMain { entry: ENTRY_NAME })
    }

    /// Execute `target` with the scope switched to it, restoring the
    /// caller's scope afterwards.
    fn enter(&mut self, target: SubroutineId) -> RuntimeResult {
        let mut scoped = self.scoped(target);
        ensure_sufficient_stack(|| scoped.execute(target))
    }

    /// Execute the instructions of `subroutine` in order.
    fn execute(&mut self, subroutine: SubroutineId) -> RuntimeResult {
        let registry = self.registry;
        for instruction in registry[subroutine].instructions() {
            self.execute_instruction(instruction)?;
        }
        Ok(())
    }

    fn execute_instruction(&mut self, instruction: &Instruction) -> RuntimeResult {
        tracing::trace!(scope = ?self.scope, %instruction, "execute");
        match instruction {
            Instruction::Call(name) => self.execute_call(name),
            Instruction::Undefined => {
                debug_assert!(
                    false,
                    "undefined instruction in `{}`",
                    self.registry.path(self.scope)
                );
                Ok(())
            }
            Instruction::Char(_)
            | Instruction::Int(_)
            | Instruction::Double(_)
            | Instruction::Str(_)
            | Instruction::Code(_) => {
                if let Some(value) = instruction.literal() {
                    self.stack.push(value);
                }
                Ok(())
            }
        }
    }

    /// Run the subroutine `name` resolves to, or hand it to the loader.
    pub fn execute_call(&mut self, name: &str) -> RuntimeResult {
        match resolve_call(self.registry, name, self.scope) {
            Ok(target) => self.enter(target),
            Err(err) => {
                tracing::trace!(name, "not a user subroutine: {err}");
                self.execute_lib_call(name)
            }
        }
    }

    /// Handle `Include`/`Exclude` or dispatch `name` to a plugin.
    pub fn execute_lib_call(&mut self, name: &str) -> RuntimeResult {
        match name {
            INCLUDE => {
                let library = self.stack.pop_text(INCLUDE)?;
                self.loader.load(&library)
            }
            EXCLUDE => {
                let library = self.stack.pop_text(EXCLUDE)?;
                self.loader.unload(&library)
            }
            _ => match self.dispatch(name) {
                Err(err) if err.is_recoverable() => {
                    self.reporter.report(Severity::Recovered, &err);
                    Ok(())
                }
                result => result,
            },
        }
    }

    fn dispatch(&mut self, name: &str) -> RuntimeResult {
        let mut data = SharedData::new(
            self.registry,
            self.scope,
            &mut *self.loader,
            &self.print_handler,
            &self.reporter,
        );
        let stack = &mut *self.stack;
        if name.contains(xs_ir::CALL_SEPARATOR) {
            let (library, entry) = split_call(name);
            data.call(library, entry, stack)
        } else {
            data.call_bare(name, stack)
        }
    }
}
