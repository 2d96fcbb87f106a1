//! Nesting limit: deep input fails deterministically instead of overflowing
//! the stack.

use jast_core::{
    decode, decode_lenient, Decoder, JastError, Mode, Value, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING,
};

fn nested_arrays(depth: usize) -> String {
    format!("{}{}", "[".repeat(depth), "]".repeat(depth))
}

fn nested_objects(depth: usize) -> String {
    format!("{}null{}", r#"{"k":"#.repeat(depth), "}".repeat(depth))
}

#[test]
fn nesting_at_the_limit_decodes() {
    let value = decode(&nested_arrays(DEFAULT_MAX_DEPTH)).unwrap();
    let mut depth = 0;
    let mut cursor = &value;
    while let Some(items) = cursor.as_array() {
        depth += 1;
        match items.first() {
            Some(inner) => cursor = inner,
            None => break,
        }
    }
    assert_eq!(depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn nesting_past_the_limit_fails() {
    let err = decode(&nested_arrays(DEFAULT_MAX_DEPTH + 1)).unwrap_err();
    assert_eq!(
        err,
        JastError::DepthExceeded {
            limit: DEFAULT_MAX_DEPTH,
            line: 1,
            column: DEFAULT_MAX_DEPTH + 1,
        }
    );
    assert!(err.is_decode_error());
}

#[test]
fn thousands_of_unclosed_brackets_fail_cleanly() {
    let json = "[".repeat(100_000);
    assert!(matches!(
        decode(&json),
        Err(JastError::DepthExceeded { .. })
    ));
    assert_eq!(decode_lenient(&json), Value::Nothing);
}

#[test]
fn deep_but_balanced_input_fails_cleanly() {
    let json = nested_arrays(50_000);
    assert!(matches!(
        decode(&json),
        Err(JastError::DepthExceeded { .. })
    ));
    assert_eq!(decode_lenient(&json), Value::Nothing);
}

#[test]
fn objects_count_toward_depth() {
    let decoder = Decoder::new().with_max_depth(3);
    assert!(decoder.decode(&nested_objects(3)).is_ok());
    assert!(matches!(
        decoder.decode(&nested_objects(4)),
        Err(JastError::DepthExceeded { limit: 3, .. })
    ));
}

#[test]
fn mixed_containers_count_toward_depth() {
    let decoder = Decoder::new().with_max_depth(2);
    assert!(decoder.decode(r#"[{"a":1}]"#).is_ok());
    assert!(decoder.decode(r#"[{"a":[]}]"#).is_err());
}

#[test]
fn sibling_containers_do_not_accumulate_depth() {
    let decoder = Decoder::new().with_max_depth(1);
    assert!(decoder.decode("[1,2,3]").is_ok());
    assert!(decoder.decode(r#"{"a":1,"b":2}"#).is_ok());
    assert!(decoder.decode("[[]]").is_err());
}

#[test]
fn zero_depth_admits_scalars_only() {
    let decoder = Decoder::new().with_max_depth(0);
    assert_eq!(decoder.decode("42").unwrap(), Value::Int(42));
    assert!(decoder.decode("[]").is_err());
    assert!(decoder.decode("{}").is_err());
}

#[test]
fn lenient_depth_overflow_is_nothing() {
    let decoder = Decoder::new().with_mode(Mode::Lenient).with_max_depth(4);
    assert_eq!(decoder.decode(&nested_arrays(5)).unwrap(), Value::Nothing);
    assert_ne!(decoder.decode(&nested_arrays(4)).unwrap(), Value::Nothing);
}

#[test]
fn huge_requested_limit_is_clamped() {
    let decoder = Decoder::new()
        .with_mode(Mode::Lenient)
        .with_max_depth(usize::MAX);
    assert_eq!(decoder.max_depth(), MAX_DEPTH_CEILING);
    assert_eq!(decoder.decode(&"[".repeat(1_000_000)).unwrap(), Value::Nothing);
    assert_eq!(
        decoder.decode(&nested_arrays(1_000_000)).unwrap(),
        Value::Nothing
    );
}

#[test]
fn nesting_at_the_ceiling_decodes() {
    let decoder = Decoder::new().with_max_depth(MAX_DEPTH_CEILING);
    assert!(decoder.decode(&nested_arrays(MAX_DEPTH_CEILING)).is_ok());
    assert!(matches!(
        decoder.decode(&nested_arrays(MAX_DEPTH_CEILING + 1)),
        Err(JastError::DepthExceeded { limit: MAX_DEPTH_CEILING, .. })
    ));
}
