//! Wire-format negotiation and serialization.
//!
//! # Design
//! The supported representations form a closed enum checked exhaustively,
//! rather than string comparisons scattered through handlers. Negotiation
//! is an exact, case-insensitive match on the `Accept` value; anything
//! unrecognized (including an absent header) falls back to pretty JSON so
//! `curl` without headers stays readable.

use serde::Serialize;
use thiserror::Error;

use crate::tree::Value;

/// Failures while turning a tree into wire bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("property-list encoding failed: {0}")]
    Plist(#[from] plist::Error),

    /// The tree contains a value the chosen format cannot express.
    #[error("{0}")]
    Unrepresentable(&'static str),
}

/// A client-selectable response representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// Apple property list, XML encoding.
    XmlPlist,
    /// Apple property list, binary encoding.
    BinaryPlist,
    /// Minified JSON, sorted keys, trailing newline.
    CompactJson,
    /// 4-space-indented JSON, sorted keys, trailing newline.
    PrettyJson,
}

impl WireFormat {
    /// Select a format from the raw `Accept` header value.
    pub fn negotiate(accept: Option<&str>) -> Self {
        match accept.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("application/x-plist") => WireFormat::XmlPlist,
            Some("application/x-plist.binary") => WireFormat::BinaryPlist,
            Some("application/json") => WireFormat::CompactJson,
            _ => WireFormat::PrettyJson,
        }
    }

    /// The `Content-Type` this format is served under.
    ///
    /// There is no registered media type for property lists; the
    /// `application/x-plist` pair mirrors what plist-consuming clients
    /// conventionally send.
    pub fn content_type(self) -> &'static str {
        match self {
            WireFormat::XmlPlist => "application/x-plist",
            WireFormat::BinaryPlist => "application/x-plist.binary",
            WireFormat::CompactJson | WireFormat::PrettyJson => "application/json",
        }
    }

    /// Serialize a tree to bytes in this format.
    pub fn render(self, tree: &Value) -> Result<Vec<u8>, RenderError> {
        match self {
            WireFormat::CompactJson => {
                let mut buf = serde_json::to_vec(tree)?;
                buf.push(b'\n');
                Ok(buf)
            }
            WireFormat::PrettyJson => {
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
                tree.serialize(&mut serializer)?;
                buf.push(b'\n');
                Ok(buf)
            }
            WireFormat::XmlPlist => {
                let mut buf = Vec::new();
                to_plist(tree)?.to_writer_xml(&mut buf)?;
                Ok(buf)
            }
            WireFormat::BinaryPlist => {
                let mut buf = Vec::new();
                to_plist(tree)?.to_writer_binary(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

/// Convert a tree into the property-list data model.
///
/// Property lists have no null; a `Value::Null` reaching this point is an
/// adapter defect and fails the render rather than dropping data silently.
fn to_plist(tree: &Value) -> Result<plist::Value, RenderError> {
    match tree {
        Value::Null => Err(RenderError::Unrepresentable(
            "null has no property-list encoding",
        )),
        Value::Bool(b) => Ok(plist::Value::Boolean(*b)),
        Value::Int(n) => Ok(plist::Value::Integer((*n).into())),
        Value::UInt(n) => Ok(plist::Value::Integer((*n).into())),
        Value::Float(n) => Ok(plist::Value::Real(*n)),
        Value::String(s) => Ok(plist::Value::String(s.clone())),
        Value::Array(items) => Ok(plist::Value::Array(
            items.iter().map(to_plist).collect::<Result<Vec<_>, _>>()?,
        )),
        Value::Dict(entries) => {
            let mut dict = plist::Dictionary::new();
            for (key, value) in entries {
                dict.insert(key.clone(), to_plist(value)?);
            }
            Ok(plist::Value::Dictionary(dict))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::Dict(vec![
            ("b".to_string(), Value::UInt(2)),
            ("a".to_string(), Value::String("one".to_string())),
        ])
    }

    #[test]
    fn negotiation_matches_documented_table() {
        assert_eq!(WireFormat::negotiate(Some("application/x-plist")), WireFormat::XmlPlist);
        assert_eq!(
            WireFormat::negotiate(Some("application/x-plist.binary")),
            WireFormat::BinaryPlist
        );
        assert_eq!(WireFormat::negotiate(Some("application/json")), WireFormat::CompactJson);
        assert_eq!(WireFormat::negotiate(Some("*/*")), WireFormat::PrettyJson);
        assert_eq!(WireFormat::negotiate(Some("text/html")), WireFormat::PrettyJson);
        assert_eq!(WireFormat::negotiate(None), WireFormat::PrettyJson);
    }

    #[test]
    fn negotiation_is_case_insensitive() {
        assert_eq!(WireFormat::negotiate(Some("Application/JSON")), WireFormat::CompactJson);
        assert_eq!(WireFormat::negotiate(Some("APPLICATION/X-PLIST")), WireFormat::XmlPlist);
    }

    #[test]
    fn compact_json_is_minified_sorted_with_trailing_newline() {
        let bytes = WireFormat::CompactJson.render(&sample()).unwrap();
        assert_eq!(bytes, b"{\"a\":\"one\",\"b\":2}\n");
    }

    #[test]
    fn pretty_json_uses_four_space_indent_and_trailing_newline() {
        let bytes = WireFormat::PrettyJson.render(&sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "{\n    \"a\": \"one\",\n    \"b\": 2\n}\n");
    }

    #[test]
    fn xml_plist_roundtrips_and_preserves_insertion_order() {
        let bytes = WireFormat::XmlPlist.render(&sample()).unwrap();
        let decoded = plist::Value::from_reader_xml(bytes.as_slice()).unwrap();
        let dict = decoded.as_dictionary().unwrap();
        let keys: Vec<&str> = dict.keys().map(String::as_str).collect();
        // Insertion order, not sorted order.
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(dict.get("a").and_then(plist::Value::as_string), Some("one"));
    }

    #[test]
    fn binary_plist_roundtrips() {
        let bytes = WireFormat::BinaryPlist.render(&sample()).unwrap();
        let decoded = plist::Value::from_reader(std::io::Cursor::new(bytes)).unwrap();
        let dict = decoded.as_dictionary().unwrap();
        assert_eq!(dict.get("b").and_then(plist::Value::as_unsigned_integer), Some(2));
    }

    #[test]
    fn null_is_not_representable_as_plist() {
        let tree = Value::Dict(vec![("token".to_string(), Value::Null)]);
        let err = WireFormat::XmlPlist.render(&tree).unwrap_err();
        assert!(matches!(err, RenderError::Unrepresentable(_)));
        // JSON has no such restriction.
        assert!(WireFormat::CompactJson.render(&tree).is_ok());
    }
}
