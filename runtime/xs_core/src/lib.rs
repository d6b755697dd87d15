//! The `Core` plugin: output and control flow for xs programs.
//!
//! | Entry    | Operands (top first) | Effect                                    |
//! |----------|----------------------|-------------------------------------------|
//! | `Show`   | value                | prints the value on its own line          |
//! | `Pop`    | value                | discards the value                        |
//! | `If`     | text, integer        | runs the named subroutine when non-zero   |
//! | `Repeat` | text, integer        | runs the named subroutine that many times |
//!
//! A program pushes the integer first and the name last:
//! `0 "Loop" Repeat`. `If` and `Repeat` always consume both operands; on a
//! kind mismatch the stack is left as it was. The subroutine name is
//! resolved from the caller's scope, dotted names included, and runs in a
//! nested interpreter on the same stack.
//!
//! Statically linked hosts call [`register`]; with the `export` feature the
//! cdylib exports the native plugin symbols as well.

use std::sync::Arc;

use xs_eval::errors::unknown_operation;
use xs_eval::xs_ir::Value;
use xs_eval::{ModuleLoader, Plugin, RuntimeResult, SharedData, Stack};

/// Library name scripts `Include`.
pub const NAME: &str = "Core";

pub const SHOW: &str = "Show";
pub const POP: &str = "Pop";
pub const IF: &str = "If";
pub const REPEAT: &str = "Repeat";

const ENTRIES: [&str; 4] = [SHOW, POP, IF, REPEAT];

#[derive(Copy, Clone, Debug, Default)]
pub struct CorePlugin;

impl CorePlugin {
    fn show(stack: &mut Stack, data: &SharedData<'_>) -> RuntimeResult {
        let value = stack.pop_value(SHOW)?;
        data.print_handler().println(&value.to_string());
        Ok(())
    }

    fn pop(stack: &mut Stack) -> RuntimeResult {
        stack.pop_value(POP).map(drop)
    }

    fn if_(stack: &mut Stack, data: &mut SharedData<'_>) -> RuntimeResult {
        let (condition, name) = pop_control_operands(stack, IF)?;
        if condition == 0 {
            return Ok(());
        }
        let target = data.resolve(&name)?;
        data.run(stack, target)
    }

    fn repeat(stack: &mut Stack, data: &mut SharedData<'_>) -> RuntimeResult {
        let (count, name) = pop_control_operands(stack, REPEAT)?;
        if count <= 0 {
            return Ok(());
        }
        let target = data.resolve(&name)?;
        tracing::debug!(%name, count, "repeat");
        for _ in 0..count {
            data.run(stack, target)?;
        }
        Ok(())
    }
}

/// Pop the subroutine name on top, then the integer under it.
fn pop_control_operands(stack: &mut Stack, operation: &str) -> RuntimeResult<(i64, Arc<str>)> {
    stack.require(operation, 2)?;
    let name = stack.pop_text(operation)?;
    match stack.pop_int(operation) {
        Ok(n) => Ok((n, name)),
        Err(err) => {
            stack.push(Value::Text(name));
            Err(err)
        }
    }
}

impl Plugin for CorePlugin {
    fn invoke(&self, entry: &str, stack: &mut Stack, data: &mut SharedData<'_>) -> RuntimeResult {
        match entry {
            SHOW => Self::show(stack, data),
            POP => Self::pop(stack),
            IF => Self::if_(stack, data),
            REPEAT => Self::repeat(stack, data),
            _ => Err(unknown_operation(NAME, entry)),
        }
    }

    fn provides(&self, entry: &str) -> bool {
        ENTRIES.contains(&entry)
    }
}

/// Make `Core` loadable by `Include` without a native library.
pub fn register(loader: &mut ModuleLoader) {
    loader.register_static(NAME, || Arc::new(CorePlugin));
}

#[cfg(feature = "export")]
xs_eval::export_plugin!(CorePlugin, CorePlugin);
