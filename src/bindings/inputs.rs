//! Typed access to the current widget values of a request

use serde_json::Value;
use std::collections::HashMap;

use super::error::{BindingError, BindingResult};
use crate::layout::PropId;

/// Current values of the declared inputs and states
#[derive(Debug, Clone, Copy)]
pub struct Inputs<'a> {
    values: &'a HashMap<PropId, Value>,
}

impl<'a> Inputs<'a> {
    pub fn new(values: &'a HashMap<PropId, Value>) -> Self {
        Self { values }
    }

    /// Raw value; JSON `null` counts as absent
    pub fn get(&self, prop: &PropId) -> Option<&'a Value> {
        self.values.get(prop).filter(|v| !v.is_null())
    }

    /// Click counter. Absent means no clicks yet.
    pub fn count(&self, prop: &PropId) -> BindingResult<u64> {
        match self.get(prop) {
            None => Ok(0),
            Some(value) => value.as_u64().ok_or_else(|| BindingError::InvalidValue {
                prop: prop.clone(),
                reason: format!("expected a non-negative integer, got {}", value),
            }),
        }
    }

    /// Optional text value
    pub fn text(&self, prop: &PropId) -> BindingResult<Option<&'a str>> {
        match self.get(prop) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(BindingError::InvalidValue {
                prop: prop.clone(),
                reason: format!("expected a string, got {}", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prop(s: &str) -> PropId {
        s.parse().unwrap()
    }

    #[test]
    fn test_count_defaults_to_zero() {
        let values = HashMap::from([(prop("b.n_clicks"), Value::Null)]);
        let inputs = Inputs::new(&values);
        assert_eq!(inputs.count(&prop("b.n_clicks")).unwrap(), 0);
        assert_eq!(inputs.count(&prop("other.n_clicks")).unwrap(), 0);
    }

    #[test]
    fn test_count_rejects_negative_and_strings() {
        let values = HashMap::from([
            (prop("a.n_clicks"), json!(-1)),
            (prop("b.n_clicks"), json!("3")),
        ]);
        let inputs = Inputs::new(&values);
        assert!(inputs.count(&prop("a.n_clicks")).is_err());
        assert!(inputs.count(&prop("b.n_clicks")).is_err());
    }

    #[test]
    fn test_text() {
        let values = HashMap::from([
            (prop("i.value"), json!("hello")),
            (prop("k.value"), json!(12)),
        ]);
        let inputs = Inputs::new(&values);
        assert_eq!(inputs.text(&prop("i.value")).unwrap(), Some("hello"));
        assert_eq!(inputs.text(&prop("j.value")).unwrap(), None);
        assert!(matches!(
            inputs.text(&prop("k.value")),
            Err(BindingError::InvalidValue { .. })
        ));
    }
}
