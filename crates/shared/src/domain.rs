use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Opaque workflow identifier as issued by the backend.
///
/// The backend may send either a JSON string (UUIDs) or a number; both are
/// kept as their textual form and displayed verbatim. An identifier is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WorkflowId(String);

impl WorkflowId {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for WorkflowId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for WorkflowId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        let raw = match RawId::deserialize(deserializer)? {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        };
        WorkflowId::new(raw).ok_or_else(|| de::Error::custom("workflow id must not be empty"))
    }
}

/// Version label of a workflow definition: an integer revision, a free-form
/// tag, or whatever other JSON value the backend put there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionTag {
    Number(serde_json::Number),
    Tag(String),
    Other(Value),
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionTag::Number(number) => write!(f, "{number}"),
            VersionTag::Tag(tag) => f.write_str(tag),
            VersionTag::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for VersionTag {
    fn from(value: i64) -> Self {
        VersionTag::Number(value.into())
    }
}

impl From<Value> for VersionTag {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(number) => VersionTag::Number(number),
            Value::String(tag) => VersionTag::Tag(tag),
            other => VersionTag::Other(other),
        }
    }
}

/// One catalog entry, decoded leniently: a missing, null or unusable `id`
/// leaves the entry without a detail link, and display fields of any other
/// type are shown as their JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct WorkflowSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<WorkflowId>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionTag>,
}

impl WorkflowSummary {
    /// Reads a catalog body. A JSON array is taken entry by entry; a paginated
    /// object carrying a `results` array is unwrapped; any other value yields
    /// an empty catalog.
    pub fn list_from_value(body: Value) -> Vec<Self> {
        let entries = match body {
            Value::Array(entries) => entries,
            Value::Object(mut fields) => match fields.remove("results") {
                Some(Value::Array(entries)) => entries,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        entries.into_iter().map(Self::from).collect()
    }
}

impl From<Value> for WorkflowSummary {
    fn from(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Self {
                    id: None,
                    description: other.to_string(),
                    version: None,
                }
            }
        };

        let id = match fields.remove("id") {
            Some(Value::String(text)) => WorkflowId::new(text),
            Some(Value::Number(number)) => WorkflowId::new(number.to_string()),
            _ => None,
        };
        let description = match fields.remove("description") {
            Some(Value::String(text)) => text,
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        };
        let version = fields
            .remove("version")
            .filter(|value| !value.is_null())
            .map(VersionTag::from);

        Self {
            id,
            description,
            version,
        }
    }
}

/// Step listing for one workflow, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepPayload(pub serde_json::Value);

impl StepPayload {
    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}
