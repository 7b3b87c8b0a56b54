//! Whether a context value counts as "present".

use serde_json::Value;

/// Null, `false`, zero, and empty strings/arrays/objects are absent.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness() {
        assert!(is_present(&json!("x")));
        assert!(is_present(&json!(3)));
        assert!(is_present(&json!([0])));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!(0.0)));
        assert!(!is_present(&json!(false)));
        assert!(!is_present(&json!({})));
        assert!(!is_present(&Value::Null));
    }
}
