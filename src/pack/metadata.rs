// pack.mcmeta parsing and rewriting

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Shown when a pack has no (or an empty) description
pub const NO_DESCRIPTION: &str = "(no description)";

/// Why a metadata document was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataIssue {
    /// Not JSON at all
    Malformed,
    /// JSON, but without a `pack` object
    MissingPack,
}

/// Decoded pack.mcmeta document
///
/// Only `pack.pack_format` and `pack.description` are ever touched; every
/// other key (and key order) survives a rewrite.
#[derive(Debug, Clone)]
pub struct PackMetadata {
    root: Map<String, Value>,
}

impl PackMetadata {
    pub fn parse(text: &str) -> Result<Self, MetadataIssue> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let value: Value = serde_json::from_str(text).map_err(|_| MetadataIssue::Malformed)?;

        match value {
            Value::Object(root) if root.get("pack").is_some_and(Value::is_object) => {
                Ok(Self { root })
            }
            _ => Err(MetadataIssue::MissingPack),
        }
    }

    fn pack(&self) -> &Map<String, Value> {
        // parse() guarantees `pack` is an object
        match self.root.get("pack") {
            Some(Value::Object(pack)) => pack,
            _ => unreachable!("pack.mcmeta validated without a pack object"),
        }
    }

    fn pack_mut(&mut self) -> &mut Map<String, Value> {
        match self.root.get_mut("pack") {
            Some(Value::Object(pack)) => pack,
            _ => unreachable!("pack.mcmeta validated without a pack object"),
        }
    }

    /// Current `pack_format`, when it is an integer
    pub fn pack_format(&self) -> Option<i64> {
        self.pack().get("pack_format").and_then(Value::as_i64)
    }

    /// Current description for display; rich-text values are stringified
    pub fn description_text(&self) -> String {
        match self.pack().get("description") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => NO_DESCRIPTION.to_string(),
            Some(Value::String(s)) if s.is_empty() => NO_DESCRIPTION.to_string(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => NO_DESCRIPTION.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn set_pack_format(&mut self, format: u32) {
        self.pack_mut()
            .insert("pack_format".to_string(), Value::from(format));
    }

    pub fn clear_description(&mut self) {
        self.pack_mut()
            .insert("description".to_string(), Value::String(String::new()));
    }

    /// Serialize with 4-space indentation
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        self.root.serialize(&mut serializer)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_rewrite() {
        let mut meta =
            PackMetadata::parse(r#"{"pack":{"pack_format":5,"description":"Hi"}}"#).unwrap();
        assert_eq!(meta.pack_format(), Some(5));
        assert_eq!(meta.description_text(), "Hi");

        meta.set_pack_format(48);
        meta.clear_description();

        let text = String::from_utf8(meta.to_pretty_json().unwrap()).unwrap();
        assert_eq!(
            text,
            "{\n    \"pack\": {\n        \"pack_format\": 48,\n        \"description\": \"\"\n    }\n}"
        );
    }

    #[test]
    fn test_preserves_other_keys_in_order() {
        let mut meta = PackMetadata::parse(
            r#"{"pack":{"description":"d","pack_format":7,"supported_formats":[7,8]},"filter":{"block":[]}}"#,
        )
        .unwrap();
        meta.set_pack_format(9);

        let value: Value = serde_json::from_slice(&meta.to_pretty_json().unwrap()).unwrap();
        let keys: Vec<_> = value["pack"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["description", "pack_format", "supported_formats"]);
        assert_eq!(value["pack"]["description"], "d");
        assert_eq!(value["pack"]["pack_format"], 9);
        assert!(value["filter"].is_object());
    }

    #[test]
    fn test_structured_description() {
        let meta =
            PackMetadata::parse(r#"{"pack":{"pack_format":15,"description":{"text":"Hi","color":"gold"}}}"#)
                .unwrap();
        assert_eq!(meta.description_text(), r#"{"text":"Hi","color":"gold"}"#);
    }

    #[test]
    fn test_missing_description_and_format() {
        let meta = PackMetadata::parse(r#"{"pack":{}}"#).unwrap();
        assert_eq!(meta.description_text(), NO_DESCRIPTION);
        assert_eq!(meta.pack_format(), None);

        let meta = PackMetadata::parse(r#"{"pack":{"description":""}}"#).unwrap();
        assert_eq!(meta.description_text(), NO_DESCRIPTION);
    }

    #[test]
    fn test_falsy_description() {
        for desc in ["false", "0", "0.0", "null"] {
            let meta =
                PackMetadata::parse(&format!(r#"{{"pack":{{"description":{}}}}}"#, desc)).unwrap();
            assert_eq!(meta.description_text(), NO_DESCRIPTION, "description {}", desc);
        }

        let meta = PackMetadata::parse(r#"{"pack":{"description":true}}"#).unwrap();
        assert_eq!(meta.description_text(), "true");
        let meta = PackMetadata::parse(r#"{"pack":{"description":7}}"#).unwrap();
        assert_eq!(meta.description_text(), "7");
    }

    #[test]
    fn test_rejects_invalid_documents() {
        assert_eq!(
            PackMetadata::parse("{pack: 5").unwrap_err(),
            MetadataIssue::Malformed
        );
        assert_eq!(
            PackMetadata::parse(r#"{"meta":{}}"#).unwrap_err(),
            MetadataIssue::MissingPack
        );
        assert_eq!(
            PackMetadata::parse(r#"{"pack":5}"#).unwrap_err(),
            MetadataIssue::MissingPack
        );
        assert_eq!(
            PackMetadata::parse("[1,2]").unwrap_err(),
            MetadataIssue::MissingPack
        );
    }

    #[test]
    fn test_tolerates_byte_order_mark() {
        let meta = PackMetadata::parse("\u{feff}{\"pack\":{\"pack_format\":3}}").unwrap();
        assert_eq!(meta.pack_format(), Some(3));
    }
}
