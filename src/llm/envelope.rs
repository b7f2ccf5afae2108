//! Model server response envelope

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response body of the model server.
///
/// The shape is not fixed: any JSON object is accepted and the generated text
/// is looked up by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    /// Extract the generated text.
    ///
    /// `response` wins when it is set to a non-empty value, then `output`.
    /// Without either, the whole envelope is returned as JSON text, keys in
    /// the order the server sent them.
    pub fn summary(&self) -> String {
        ["response", "output"]
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| is_truthy(value))
            .map(render)
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Null, false, zero and empty containers do not count as generated text.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn response_field_is_preferred() {
        let env = envelope(json!({"response": "A", "output": "B"}));
        assert_eq!(env.summary(), "A");
    }

    #[test]
    fn output_is_used_without_response() {
        assert_eq!(envelope(json!({"output": "B"})).summary(), "B");
    }

    #[test]
    fn empty_or_null_response_falls_through_to_output() {
        assert_eq!(envelope(json!({"response": "", "output": "B"})).summary(), "B");
        assert_eq!(envelope(json!({"response": null, "output": "B"})).summary(), "B");
    }

    #[test]
    fn missing_keys_stringify_the_envelope() {
        assert_eq!(envelope(json!({"foo": "bar"})).summary(), r#"{"foo":"bar"}"#);
    }

    #[test]
    fn empty_output_also_falls_back_to_stringification() {
        let env = envelope(json!({"response": "", "output": ""}));
        assert_eq!(env.summary(), r#"{"response":"","output":""}"#);
    }

    #[test]
    fn stringification_keeps_received_key_order() {
        let env: Envelope =
            serde_json::from_str(r#"{"model":"llama3.2","done":true,"response":""}"#).unwrap();
        assert_eq!(env.summary(), r#"{"model":"llama3.2","done":true,"response":""}"#);
    }

    #[test]
    fn non_string_values_render_as_json() {
        assert_eq!(envelope(json!({"response": ["a", "b"]})).summary(), r#"["a","b"]"#);
        assert_eq!(
            envelope(json!({"response": false, "output": 0})).summary(),
            r#"{"response":false,"output":0}"#
        );
    }

    #[test]
    fn response_text_is_not_trimmed() {
        let env = envelope(json!({"response": "- Greeting\n- Test statement\n"}));
        assert_eq!(env.summary(), "- Greeting\n- Test statement\n");
    }

    #[test]
    fn non_object_bodies_do_not_parse() {
        assert!(serde_json::from_str::<Envelope>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Envelope>("\"text\"").is_err());
    }
}
