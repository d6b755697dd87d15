//! The shared operand stack.
//!
//! One `Stack` exists per run. It is threaded as `&mut Stack` through the
//! interpreter, every plugin call and every nested interpreter a plugin
//! spawns; it is never global. Callees are trusted to leave it balanced
//! according to their documented arity.
//!
//! The typed `pop_*` helpers are what plugins use to take operands: they
//! turn an empty stack into `StackUnderflow` and a kind mismatch into
//! `Type`, both recoverable at the dispatch boundary.

use std::sync::Arc;

use xs_ir::Value;

use crate::errors::{stack_underflow, wrong_operand, RuntimeResult};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Value> {
        self.values.pop()
    }

    #[inline]
    pub fn peek(&self) -> Option<&Value> {
        self.values.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Values bottom to top.
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Fail with `StackUnderflow` unless at least `needed` values are present.
    ///
    /// Plugins taking several operands check up front so a short stack is
    /// left untouched.
    pub fn require(&self, operation: &str, needed: usize) -> RuntimeResult {
        if self.values.len() < needed {
            return Err(stack_underflow(operation, needed, self.values.len()));
        }
        Ok(())
    }

    /// Pop any value.
    pub fn pop_value(&mut self, operation: &str) -> RuntimeResult<Value> {
        self.values
            .pop()
            .ok_or_else(|| stack_underflow(operation, 1, 0))
    }

    /// Pop an integer. A value of another kind is left on the stack.
    pub fn pop_int(&mut self, operation: &str) -> RuntimeResult<i64> {
        match self.values.last() {
            None => Err(stack_underflow(operation, 1, 0)),
            Some(Value::Int(n)) => {
                let n = *n;
                self.values.pop();
                Ok(n)
            }
            Some(other) => Err(wrong_operand(operation, "integer", other.kind_name())),
        }
    }

    /// Pop a text value. A value of another kind is left on the stack.
    pub fn pop_text(&mut self, operation: &str) -> RuntimeResult<Arc<str>> {
        match self.values.pop() {
            None => Err(stack_underflow(operation, 1, 0)),
            Some(Value::Text(s)) => Ok(s),
            Some(other) => {
                let found = other.kind_name();
                self.values.push(other);
                Err(wrong_operand(operation, "text", found))
            }
        }
    }
}

#[cfg(test)]
mod tests;
