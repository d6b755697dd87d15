use super::*;
use pretty_assertions::assert_eq;

#[test]
fn display_matches_literal_kind() {
    assert_eq!(Value::Char('x').to_string(), "x");
    assert_eq!(Value::Int(-42).to_string(), "-42");
    assert_eq!(Value::Real(7.0).to_string(), "7");
    assert_eq!(Value::Real(0.5).to_string(), "0.5");
    assert_eq!(Value::text("hello").to_string(), "hello");
}

#[test]
fn kind_names() {
    assert_eq!(Value::Char('a').kind_name(), "character");
    assert_eq!(Value::Int(1).kind_name(), "integer");
    assert_eq!(Value::Real(1.5).kind_name(), "real");
    assert_eq!(Value::text("s").kind_name(), "text");
}

#[test]
fn accessors_only_match_their_kind() {
    assert_eq!(Value::Int(3).as_int(), Some(3));
    assert_eq!(Value::text("3").as_int(), None);
    assert_eq!(Value::text("Loop").as_text().map(|s| &**s), Some("Loop"));
    assert_eq!(Value::Char('L').as_text(), None);
}

#[test]
fn text_clone_shares_storage() {
    let a = Value::text("shared");
    let b = a.clone();
    match (&a, &b) {
        (Value::Text(x), Value::Text(y)) => assert!(Arc::ptr_eq(x, y)),
        _ => panic!("expected text values"),
    }
}

#[test]
fn conversions() {
    assert_eq!(Value::from('c'), Value::Char('c'));
    assert_eq!(Value::from(9_i64), Value::Int(9));
    assert_eq!(Value::from(2.5_f64), Value::Real(2.5));
    assert_eq!(Value::from("t"), Value::text("t"));
    assert_eq!(Value::from(String::from("t")), Value::text("t"));
}
