// Structural base shared by every composite node

use serde_json::{Map, Value};

/// An open, URI-tagged side-channel entry attached to an element.
///
/// The body is kept opaque: whatever object members accompanied the `url`
/// (typically a `value[x]` field, possibly nested `extension` arrays) are
/// carried through unchanged and re-emitted verbatim on export.
#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
    pub url: String,
    pub value: Map<String, Value>,
}

impl Extension {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            value: Map::new(),
        }
    }

    /// Parse an extension from its wire object form
    pub fn from_wire(object: &Map<String, Value>) -> Result<Self, String> {
        let url = match object.get("url") {
            Some(Value::String(url)) if !url.is_empty() => url.clone(),
            Some(other) => return Err(format!("extension url must be a string, got {other}")),
            None => return Err("extension is missing its url".to_string()),
        };

        let mut value = object.clone();
        value.remove("url");
        Ok(Self { url, value })
    }

    /// Export back to the wire object form, url first
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("url".to_string(), Value::String(self.url.clone()));
        for (key, entry) in &self.value {
            object.insert(key.clone(), entry.clone());
        }
        object
    }
}

/// The structural base every composite node inherits: an optional internal
/// identifier and an ordered sequence of extensions.
///
/// Identity and extensions are orthogonal to payload fields; composites carry
/// them without redeclaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub id: Option<String>,
    pub extensions: Vec<Extension>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Whether neither identity nor extensions are present
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.extensions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extension_wire_round_trip() {
        let wire = json!({
            "url": "http://example.org/fhir/StructureDefinition/recorded-by",
            "valueString": "device-7"
        });
        let object = wire.as_object().unwrap();

        let extension = Extension::from_wire(object).unwrap();
        assert_eq!(
            extension.url,
            "http://example.org/fhir/StructureDefinition/recorded-by"
        );
        assert_eq!(extension.value.get("valueString"), Some(&json!("device-7")));
        assert_eq!(Value::Object(extension.to_wire()), wire);
    }

    #[test]
    fn extension_requires_url() {
        let object = json!({"valueString": "x"});
        assert!(Extension::from_wire(object.as_object().unwrap()).is_err());

        let object = json!({"url": 42});
        assert!(Extension::from_wire(object.as_object().unwrap()).is_err());
    }

    #[test]
    fn element_is_empty() {
        assert!(Element::new().is_empty());
        assert!(!Element::new().with_id("e1").is_empty());
    }
}
