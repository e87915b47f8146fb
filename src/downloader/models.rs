use serde::Deserialize;
use serde_json::{Map, Value};

/// One entry of a contents-API directory listing.
#[derive(Debug, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    // "dir" | "file"
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Raw content of a file; `null` for directories.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    pub fn is_file(&self) -> bool {
        self.kind.as_deref() == Some("file")
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Repository path of the entry, falling back to its bare name.
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }
}

/// Decoded body of a tree request.
#[derive(Debug)]
pub enum TreePayload {
    /// A directory listing.
    Listing(Vec<ContentEntry>),
    /// A compatibility-data document keyed by nested path segments.
    CompatData(Map<String, Value>),
}

impl TreePayload {
    pub fn parse(body: &str) -> super::Result<Self> {
        match serde_json::from_str::<Value>(body)? {
            Value::Array(entries) => {
                let entries = entries
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<Vec<ContentEntry>, _>>()?;
                Ok(TreePayload::Listing(entries))
            }
            Value::Object(document) => Ok(TreePayload::CompatData(document)),
            other => Err(super::DownloadError::UnexpectedPayload(format!(
                "expected a listing or a compatibility document, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Top-level container of the flat index.
#[derive(Debug, Deserialize)]
pub struct FlatDocument {
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// Identifier as it appears on the wire, either numeric or textual.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    pub fn key(&self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.clone(),
        }
    }
}

/// Parent reference: a bare id, or an embedded record carrying one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawParent {
    Id(RawId),
    Record { id: RawId },
}

impl RawParent {
    pub fn key(&self) -> String {
        match self {
            RawParent::Id(id) | RawParent::Record { id } => id.key(),
        }
    }
}

/// Item as served by the flat index. Unknown fields (timestamps and the
/// like) are ignored by serde.
#[derive(Debug, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<RawId>,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type")]
    pub type_code: u64,
    #[serde(default)]
    pub parent: Option<RawParent>,
    pub breadcrumbs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_body_is_a_listing() {
        let payload = TreePayload::parse(r#"[{"name": "api", "path": "api", "type": "dir"}]"#).unwrap();
        let TreePayload::Listing(entries) = payload else {
            panic!("expected listing");
        };
        assert_eq!(entries[0].name, "api");
        assert_eq!(entries[0].path(), "api");
    }

    #[test]
    fn object_body_is_compat_data() {
        let payload = TreePayload::parse(r#"{"api": {"fetch": {"__compat": {}}}}"#).unwrap();
        assert!(matches!(payload, TreePayload::CompatData(_)));
    }

    #[test]
    fn scalar_body_is_rejected() {
        let err = TreePayload::parse("42").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected payload: expected a listing or a compatibility document, got a number"
        );
    }

    #[test]
    fn parent_reference_accepts_id_or_record() {
        let bare: RawParent = serde_json::from_str("7").unwrap();
        let record: RawParent = serde_json::from_str(r#"{"id": "abc", "name": "x"}"#).unwrap();
        assert_eq!(bare.key(), "7");
        assert_eq!(record.key(), "abc");
    }
}
