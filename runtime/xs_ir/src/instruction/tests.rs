use super::*;
use pretty_assertions::assert_eq;

#[test]
fn default_is_undefined() {
    assert_eq!(Instruction::default().kind(), InstructionKind::Undefined);
    assert_eq!(Instruction::default().literal(), None);
}

#[test]
fn kinds() {
    assert_eq!(Instruction::Char('a').kind(), InstructionKind::CharLit);
    assert_eq!(Instruction::Int(1).kind(), InstructionKind::IntLit);
    assert_eq!(Instruction::Double(1.0).kind(), InstructionKind::DoubleLit);
    assert_eq!(Instruction::string("s").kind(), InstructionKind::StringLit);
    assert_eq!(Instruction::code("Loop").kind(), InstructionKind::CodeLit);
    assert_eq!(Instruction::call("Core.Show").kind(), InstructionKind::Call);
}

#[test]
fn calls_are_never_literals() {
    let call = Instruction::call("Add");
    assert_eq!(call.literal(), None);
    assert_eq!(call.call_name(), Some("Add"));
    assert_eq!(Instruction::Int(3).call_name(), None);
}

#[test]
fn code_literal_pushes_text() {
    assert_eq!(Instruction::code("Loop").literal(), Some(Value::text("Loop")));
    assert_eq!(Instruction::string("Loop").literal(), Some(Value::text("Loop")));
}

#[test]
fn display_prefixes_kind() {
    assert_eq!(Instruction::Int(3).to_string(), "(Integer)3");
    assert_eq!(Instruction::Char('q').to_string(), "(Character)q");
    assert_eq!(Instruction::Double(1.5).to_string(), "(Real)1.5");
    assert_eq!(Instruction::string("hi").to_string(), "(String)hi");
    assert_eq!(Instruction::call("Core.Show").to_string(), "(Call)Core.Show");
    assert_eq!(Instruction::Undefined.to_string(), "(Undefined)");
}

#[test]
fn from_value_round_trips_literal() {
    for value in [
        Value::Char('z'),
        Value::Int(-1),
        Value::Real(3.25),
        Value::text("word"),
    ] {
        assert_eq!(Instruction::from(value.clone()).literal(), Some(value));
    }
}
