//! RAII guard for the interpreter's current scope.
//!
//! [`Interpreter::scoped`] switches the scope to a callee and hands back a
//! [`ScopedInterpreter`]; dropping the guard restores the caller's scope,
//! on the error path and during unwinding as well.

use std::mem;
use std::ops::{Deref, DerefMut};

use xs_ir::SubroutineId;

use super::Interpreter;

/// Access the interpreter through this guard; it implements `Deref` and
/// `DerefMut`. The caller's scope is restored on drop.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
    caller: SubroutineId,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.scope = self.caller;
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Make `scope` current until the returned guard is dropped.
    pub fn scoped(&mut self, scope: SubroutineId) -> ScopedInterpreter<'_, 'a> {
        let caller = mem::replace(&mut self.scope, scope);
        ScopedInterpreter {
            interpreter: self,
            caller,
        }
    }
}
