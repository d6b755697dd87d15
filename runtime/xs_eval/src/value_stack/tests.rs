use super::*;
use crate::errors::RuntimeError;
use pretty_assertions::assert_eq;

#[test]
fn lifo_order() {
    let mut stack = Stack::new();
    stack.push(1_i64);
    stack.push("two");
    stack.push('3');
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.peek(), Some(&Value::Char('3')));
    assert_eq!(stack.pop(), Some(Value::Char('3')));
    assert_eq!(stack.pop(), Some(Value::text("two")));
    assert_eq!(stack.pop(), Some(Value::Int(1)));
    assert!(stack.is_empty());
    assert_eq!(stack.pop(), None);
}

#[test]
fn pop_int_takes_integer() {
    let mut stack = Stack::new();
    stack.push(5_i64);
    assert_eq!(stack.pop_int("Repeat"), Ok(5));
    assert!(stack.is_empty());
}

#[test]
fn pop_int_on_empty_is_underflow() {
    let mut stack = Stack::new();
    assert_eq!(
        stack.pop_int("Repeat"),
        Err(RuntimeError::StackUnderflow {
            operation: "Repeat".into(),
            needed: 1,
            available: 0
        })
    );
}

#[test]
fn pop_int_keeps_mismatched_value() {
    let mut stack = Stack::new();
    stack.push("Loop");
    let err = stack.pop_int("If");
    assert_eq!(
        err,
        Err(RuntimeError::Type {
            operation: "If".into(),
            expected: "integer",
            found: "text"
        })
    );
    assert_eq!(stack.as_slice(), &[Value::text("Loop")]);
}

#[test]
fn pop_text_keeps_mismatched_value() {
    let mut stack = Stack::new();
    stack.push(2.5_f64);
    assert!(matches!(
        stack.pop_text("Include"),
        Err(RuntimeError::Type { found: "real", .. })
    ));
    assert_eq!(stack.len(), 1);
}

#[test]
fn pop_text_returns_shared_text() {
    let mut stack = Stack::new();
    stack.push("Core");
    assert_eq!(stack.pop_text("Include").as_deref(), Ok("Core"));
}

#[test]
fn require_reports_available_count() {
    let mut stack = Stack::new();
    stack.push(1_i64);
    assert_eq!(stack.require("Add", 1), Ok(()));
    assert_eq!(
        stack.require("Add", 2),
        Err(RuntimeError::StackUnderflow {
            operation: "Add".into(),
            needed: 2,
            available: 1
        })
    );
}

#[test]
fn pop_value_underflow() {
    let mut stack = Stack::new();
    assert!(matches!(
        stack.pop_value("Show"),
        Err(RuntimeError::StackUnderflow { needed: 1, .. })
    ));
}
