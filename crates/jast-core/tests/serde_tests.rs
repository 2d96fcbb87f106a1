//! serde integration: `Value` through `serde_json` and back.

use jast_core::{decode, encode, Field, JastError, Unencodable, Value};
use serde_json::json;

#[test]
fn serialize_matches_encode() {
    let value = Value::object([
        Field::new("i", 1),
        Field::new("d", 1.0),
        Field::new("a", Value::array([Value::Null, Value::from("s")])),
    ]);
    assert_eq!(serde_json::to_string(&value).unwrap(), encode(&value).unwrap());
}

#[test]
fn serialize_nothing_fails() {
    assert!(serde_json::to_string(&Value::Nothing).is_err());
    assert!(serde_json::to_string(&Value::array([Value::Nothing])).is_err());
}

#[test]
fn serialize_non_finite_fails() {
    assert!(serde_json::to_string(&Value::Double(f64::NAN)).is_err());
}

#[test]
fn deserialize_keeps_number_kinds() {
    let value: Value = serde_json::from_str("[0, 1, 1.0, -3, 1e2]").unwrap();
    assert_eq!(
        value,
        Value::array([
            Value::Int(0),
            Value::Int(1),
            Value::Double(1.0),
            Value::Int(-3),
            Value::Double(100.0),
        ])
    );
}

#[test]
fn deserialize_u64_beyond_i64_is_double() {
    let value: Value = serde_json::from_str("18446744073709551615").unwrap();
    assert_eq!(value, Value::Double(18446744073709551615.0));
}

#[test]
fn deserialize_keeps_order_and_duplicates() {
    let value: Value = serde_json::from_str(r#"{"b":1,"a":2,"b":3}"#).unwrap();
    assert_eq!(value, decode(r#"{"b":1,"a":2,"b":3}"#).unwrap());
}

#[test]
fn deserialize_from_serde_json_value() {
    let value: Value = serde_json::from_value(json!({"x": [true, null]})).unwrap();
    assert_eq!(
        value,
        Value::object([Field::new("x", Value::array([Value::Bool(true), Value::Null]))])
    );
}

#[test]
fn from_serde_json_value_preserves_order() {
    let value = Value::from(json!({"z": 1, "a": 2.5, "m": "s"}));
    assert_eq!(encode(&value).unwrap(), r#"{"z":1,"a":2.5,"m":"s"}"#);
}

#[test]
fn try_into_serde_json_value() {
    let value = Value::object([Field::new("n", 1), Field::new("list", Value::array([2.5]))]);
    let converted = serde_json::Value::try_from(value).unwrap();
    assert_eq!(converted, json!({"n": 1, "list": [2.5]}));
}

#[test]
fn try_into_serde_json_collapses_duplicates_last_wins() {
    let value = Value::object([("k", 1), ("other", 0), ("k", 2)]);
    let converted = serde_json::Value::try_from(value).unwrap();
    assert_eq!(converted, json!({"k": 2, "other": 0}));
}

#[test]
fn try_into_serde_json_rejects_unencodable() {
    assert_eq!(
        serde_json::Value::try_from(Value::Nothing),
        Err(JastError::UnencodableValue(Unencodable::Nothing))
    );
    assert!(serde_json::Value::try_from(Value::array([f64::INFINITY])).is_err());
}
