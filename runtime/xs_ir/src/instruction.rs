//! Instructions: the atomic unit of execution.

use std::fmt;
use std::sync::Arc;

use crate::Value;

/// Discriminant of an [`Instruction`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Undefined,
    CharLit,
    IntLit,
    DoubleLit,
    StringLit,
    CodeLit,
    Call,
}

impl InstructionKind {
    /// Label used when rendering an instruction, e.g. `(Integer)3`.
    pub fn label(self) -> &'static str {
        match self {
            InstructionKind::Undefined => "Undefined",
            InstructionKind::CharLit => "Character",
            InstructionKind::IntLit => "Integer",
            InstructionKind::DoubleLit => "Real",
            InstructionKind::StringLit => "String",
            InstructionKind::CodeLit => "Code",
            InstructionKind::Call => "Call",
        }
    }
}

/// A literal or a call reference. Immutable once built.
///
/// `Call` carries a dotted name (`"Core.Show"`) that is resolved at
/// execution time and never pushed as a value. `Code` carries text naming
/// a subroutine; it is pushed as a text value like `Str`.
///
/// `Undefined` only exists as the `Default`; executing it violates an
/// interpreter invariant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Instruction {
    #[default]
    Undefined,
    Char(char),
    Int(i64),
    Double(f64),
    #[cfg_attr(feature = "serde", serde(rename = "string"))]
    Str(Arc<str>),
    Code(Arc<str>),
    Call(Arc<str>),
}

impl Instruction {
    /// A string literal.
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Instruction::Str(s.into())
    }

    /// A code literal naming a subroutine.
    pub fn code(s: impl Into<Arc<str>>) -> Self {
        Instruction::Code(s.into())
    }

    /// A call to a (possibly dotted) name.
    pub fn call(name: impl Into<Arc<str>>) -> Self {
        Instruction::Call(name.into())
    }

    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::Undefined => InstructionKind::Undefined,
            Instruction::Char(_) => InstructionKind::CharLit,
            Instruction::Int(_) => InstructionKind::IntLit,
            Instruction::Double(_) => InstructionKind::DoubleLit,
            Instruction::Str(_) => InstructionKind::StringLit,
            Instruction::Code(_) => InstructionKind::CodeLit,
            Instruction::Call(_) => InstructionKind::Call,
        }
    }

    /// The value this instruction pushes, or `None` for calls and `Undefined`.
    pub fn literal(&self) -> Option<Value> {
        match self {
            Instruction::Char(c) => Some(Value::Char(*c)),
            Instruction::Int(n) => Some(Value::Int(*n)),
            Instruction::Double(x) => Some(Value::Real(*x)),
            Instruction::Str(s) | Instruction::Code(s) => Some(Value::Text(Arc::clone(s))),
            Instruction::Undefined | Instruction::Call(_) => None,
        }
    }

    pub fn call_name(&self) -> Option<&str> {
        match self {
            Instruction::Call(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.kind().label())?;
        match self {
            Instruction::Undefined => Ok(()),
            Instruction::Char(c) => write!(f, "{c}"),
            Instruction::Int(n) => write!(f, "{n}"),
            Instruction::Double(x) => write!(f, "{x}"),
            Instruction::Str(s) | Instruction::Code(s) | Instruction::Call(s) => f.write_str(s),
        }
    }
}

impl From<Value> for Instruction {
    fn from(value: Value) -> Self {
        match value {
            Value::Char(c) => Instruction::Char(c),
            Value::Int(n) => Instruction::Int(n),
            Value::Real(x) => Instruction::Double(x),
            Value::Text(s) => Instruction::Str(s),
        }
    }
}

#[cfg(test)]
mod tests;
