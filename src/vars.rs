//! Bulk-assignment sources and their normalization into the variable store.
//!
//! [`VarSource`] is the tagged union of every shape accepted by
//! [`TemplateContext::merge_from`](crate::TemplateContext::merge_from):
//! ready mappings, arbitrary JSON values, objects exposing the
//! [`Serializable`] or [`Mappable`] capability, and serde-captured plain
//! data objects. Normalization applies the coercion rules in a fixed
//! precedence order and fails without side effects when a source does not
//! reduce to a mapping.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Named key/value mapping owned by a rendering context.
///
/// Keys are case-sensitive; later assignment of an existing key overwrites
/// its value. Insertion order is preserved for introspection.
pub type VariableStore = Map<String, Value>;

/// Key under which a [`Serializable`] source that does not produce a
/// mapping is stored as a single variable.
pub const OBJECT_SINGLE_VAR: &str = "object_single_var";

/// Capability for objects that serialize themselves into a JSON-compatible
/// value (mapping, sequence, or scalar).
pub trait Serializable {
    fn serialize(&self) -> Value;
}

/// Capability for objects that convert themselves into a mapping of
/// template variables. The conversion must produce a JSON object; anything
/// else is an inconsistent implementation and is rejected at merge time.
pub trait Mappable {
    fn to_mapping(&self) -> Value;
}

/// A bulk-assignment source accepted by
/// [`TemplateContext::merge_from`](crate::TemplateContext::merge_from).
///
/// Variants are normalized in declaration order: ready mappings first, then
/// serializable objects, then plain field-bearing objects, then mappable
/// objects.
pub enum VarSource {
    /// A ready name-to-value mapping, merged as-is.
    Map(VariableStore),
    /// An arbitrary JSON value. Must be an object to merge.
    Value(Value),
    /// An object exposing JSON serialization. A non-mapping result is
    /// stored as a single variable under [`OBJECT_SINGLE_VAR`].
    Serializable(Box<dyn Serializable>),
    /// The serde-captured public fields of a plain data object, built with
    /// [`VarSource::fields`].
    Fields(Value),
    /// An object exposing an explicit mapping conversion.
    Mappable(Box<dyn Mappable>),
}

impl VarSource {
    /// An empty source; merging it is a no-op.
    pub fn empty() -> Self {
        VarSource::Map(VariableStore::new())
    }

    /// Capture the public fields of a plain data object through serde.
    pub fn fields<T: Serialize>(value: &T) -> Result<Self> {
        Ok(VarSource::Fields(serde_json::to_value(value)?))
    }

    /// Wrap an object exposing the [`Serializable`] capability.
    pub fn serializable(value: impl Serializable + 'static) -> Self {
        VarSource::Serializable(Box::new(value))
    }

    /// Wrap an object exposing the [`Mappable`] capability.
    pub fn mappable(value: impl Mappable + 'static) -> Self {
        VarSource::Mappable(Box::new(value))
    }

    /// Coerce the source into a mapping, applying the coercion rules in
    /// precedence order. Failing sources produce [`Error::InvalidInput`]
    /// with a message naming the violated expectation.
    pub(crate) fn normalize(self) -> Result<VariableStore> {
        match self {
            VarSource::Map(map) => Ok(map),
            VarSource::Value(Value::Object(map)) => Ok(map),
            VarSource::Value(other) => Err(Error::invalid_input(format!(
                "merge_from() expects a mapping or an object. {} was provided.",
                json_type_name(&other)
            ))),
            VarSource::Serializable(source) => match source.serialize() {
                Value::Object(map) => Ok(map),
                single => {
                    let mut map = VariableStore::new();
                    map.insert(OBJECT_SINGLE_VAR.to_string(), single);
                    Ok(map)
                }
            },
            VarSource::Fields(Value::Object(map)) => Ok(map),
            VarSource::Fields(_) => Err(Error::invalid_input(
                "merge_from() expects the passed object to implement Serializable, \
                 implement Mappable, or serialize to a plain mapping of public fields.",
            )),
            VarSource::Mappable(source) => match source.to_mapping() {
                Value::Object(map) => Ok(map),
                _ => Err(Error::invalid_input(
                    "merge_from() expects the passed object's to_mapping() to return a mapping.",
                )),
            },
        }
    }
}

impl Default for VarSource {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<VariableStore> for VarSource {
    fn from(map: VariableStore) -> Self {
        VarSource::Map(map)
    }
}

impl From<Value> for VarSource {
    fn from(value: Value) -> Self {
        VarSource::Value(value)
    }
}

impl From<std::collections::HashMap<String, Value>> for VarSource {
    fn from(map: std::collections::HashMap<String, Value>) -> Self {
        VarSource::Map(map.into_iter().collect())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Greeting {
        message: String,
        lucky_numbers: Vec<u64>,
    }

    impl Serializable for Greeting {
        fn serialize(&self) -> Value {
            json!({
                "message": self.message,
                "luckyNumbers": self.lucky_numbers,
            })
        }
    }

    struct ScalarGreeting(String);

    impl Serializable for ScalarGreeting {
        fn serialize(&self) -> Value {
            Value::String(self.0.clone())
        }
    }

    struct Exported {
        label: String,
    }

    impl Mappable for Exported {
        fn to_mapping(&self) -> Value {
            json!({ "label": self.label })
        }
    }

    struct BrokenExport;

    impl Mappable for BrokenExport {
        fn to_mapping(&self) -> Value {
            Value::String("not a mapping".into())
        }
    }

    #[test]
    fn test_normalize_value_object_used_as_is() {
        let source = VarSource::from(json!({"a": 1, "b": 2}));
        let map = source.normalize().unwrap();
        assert_eq!(map.get("a"), Some(&json!(1)));
        assert_eq!(map.get("b"), Some(&json!(2)));
    }

    #[test]
    fn test_normalize_rejects_scalar_value() {
        let err = VarSource::from(json!(42)).normalize().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input: merge_from() expects a mapping or an object. number was provided."
        );
    }

    #[test]
    fn test_normalize_rejects_array_value() {
        let err = VarSource::from(json!([1, 3, 5])).normalize().unwrap_err();
        assert!(err.to_string().contains("array was provided"));
    }

    #[test]
    fn test_normalize_serializable_mapping() {
        let source = VarSource::serializable(Greeting {
            message: "Hello world!".into(),
            lucky_numbers: vec![1, 3, 5],
        });
        let map = source.normalize().unwrap();
        assert_eq!(map.get("message"), Some(&json!("Hello world!")));
        assert_eq!(map.get("luckyNumbers"), Some(&json!([1, 3, 5])));
    }

    #[test]
    fn test_normalize_serializable_scalar_wrapped_under_sentinel() {
        let source = VarSource::serializable(ScalarGreeting("Hello world!".into()));
        let map = source.normalize().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(OBJECT_SINGLE_VAR), Some(&json!("Hello world!")));
    }

    #[test]
    fn test_normalize_fields_object() {
        #[derive(serde::Serialize)]
        struct Payload {
            message: String,
            n: Vec<u64>,
        }

        let source = VarSource::fields(&Payload {
            message: "hi".into(),
            n: vec![1, 3, 5],
        })
        .unwrap();
        let map = source.normalize().unwrap();
        assert_eq!(map.get("message"), Some(&json!("hi")));
        assert_eq!(map.get("n"), Some(&json!([1, 3, 5])));
    }

    #[test]
    fn test_normalize_fields_non_mapping_names_accepted_shapes() {
        let source = VarSource::fields(&7u8).unwrap();
        let err = source.normalize().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Serializable"));
        assert!(message.contains("Mappable"));
        assert!(message.contains("plain mapping of public fields"));
    }

    #[test]
    fn test_normalize_mappable_mapping() {
        let source = VarSource::mappable(Exported {
            label: "home".into(),
        });
        let map = source.normalize().unwrap();
        assert_eq!(map.get("label"), Some(&json!("home")));
    }

    #[test]
    fn test_normalize_mappable_non_mapping_fails() {
        let err = VarSource::mappable(BrokenExport).normalize().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input: merge_from() expects the passed object's to_mapping() to return a mapping."
        );
    }

    #[test]
    fn test_from_hash_map() {
        let mut map = std::collections::HashMap::new();
        map.insert("k".to_string(), json!("v"));
        let normalized = VarSource::from(map).normalize().unwrap();
        assert_eq!(normalized.get("k"), Some(&json!("v")));
    }
}
