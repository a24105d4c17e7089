//! JSON visitor state shared between hooks and the serializer.

use serde_json::{Map, Value};

/// Per-object visitor handle.
///
/// Hooks record translated property values here; the serializer overlays
/// them on the object's JSON representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonVisitor {
    translations: Map<String, Value>,
}

impl JsonVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the translated value of a property.
    pub fn set_translation(&mut self, property: impl Into<String>, value: Value) {
        self.translations.insert(property.into(), value);
    }

    pub fn translation(&self, property: &str) -> Option<&Value> {
        self.translations.get(property)
    }

    pub fn translations(&self) -> &Map<String, Value> {
        &self.translations
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// Replace translated properties in `value`. Only properties already present
    /// on a JSON object are replaced; other values are left as they are.
    pub fn apply(&self, value: &mut Value) {
        let Value::Object(object) = value else {
            return;
        };

        for (property, translated) in &self.translations {
            if let Some(slot) = object.get_mut(property) {
                *slot = translated.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_replaces_existing_properties() {
        let mut visitor = JsonVisitor::new();
        visitor.set_translation("status", json!("brouillon"));

        let mut value = json!({ "id": 1, "status": "draft" });
        visitor.apply(&mut value);

        assert_eq!(value, json!({ "id": 1, "status": "brouillon" }));
    }

    #[test]
    fn test_apply_does_not_add_properties() {
        let mut visitor = JsonVisitor::new();
        visitor.set_translation("missing", json!("x"));

        let mut value = json!({ "id": 1 });
        visitor.apply(&mut value);

        assert_eq!(value, json!({ "id": 1 }));
    }

    #[test]
    fn test_apply_ignores_non_objects() {
        let mut visitor = JsonVisitor::new();
        visitor.set_translation("status", json!("brouillon"));

        let mut value = json!(["draft"]);
        visitor.apply(&mut value);

        assert_eq!(value, json!(["draft"]));
    }

    #[test]
    fn test_translation_lookup() {
        let mut visitor = JsonVisitor::new();
        assert!(visitor.is_empty());

        visitor.set_translation("status", json!("borrador"));
        assert_eq!(visitor.translation("status"), Some(&json!("borrador")));
        assert_eq!(visitor.translations().len(), 1);
    }
}
