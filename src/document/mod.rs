//! The strict, externally-consumed Flow Document model.
//!
//! Field order in the serialized document is schema-significant: the root must
//! serialize as `version, data_api_version, routing_model, screens`, and each
//! node's `type` tag must come first. Struct declaration order carries that
//! contract, and loose `serde_json::Value` maps keep insertion order through
//! the `preserve_order` feature.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flow schema version written into every compiled document.
pub const FLOW_VERSION: &str = "7.1";

/// Data API version hoisted to the root when any action resolves to
/// `data_exchange`.
pub const DATA_API_VERSION: &str = "3.0";

/// The only layout the target schema currently supports.
pub const LAYOUT_TYPE: &str = "SingleColumnLayout";

/// A complete Flow Document, ready for submission to the messaging platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowDocument {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_model: Option<Value>,
    pub screens: Vec<TargetScreen>,
}

impl FlowDocument {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// True when any action, on any screen, resolves to `data_exchange`.
    ///
    /// Both the compiler (root hoisting) and the validator (the iff check on
    /// `data_api_version`/`routing_model`) derive their answer from here.
    pub fn resolves_data_exchange(&self) -> bool {
        self.screens.iter().any(TargetScreen::resolves_data_exchange)
    }
}

/// One screen of a Flow Document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetScreen {
    pub id: String,
    pub title: String,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<IndexMap<String, DataModelEntry>>,
}

impl TargetScreen {
    pub fn resolves_data_exchange(&self) -> bool {
        self.layout
            .children
            .iter()
            .any(TargetNode::resolves_data_exchange)
    }
}

/// The layout wrapper around a screen's children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    #[serde(rename = "type")]
    pub layout_type: String,
    pub children: Vec<TargetNode>,
}

impl Layout {
    pub fn new(children: Vec<TargetNode>) -> Self {
        Self {
            layout_type: LAYOUT_TYPE.to_string(),
            children,
        }
    }
}

/// A single schema node: a PascalCase `type` tag plus exactly the fields the
/// component spec mandates for that kind.
///
/// Fields stay loose (`Value`s) on purpose: the validator must be able to
/// inspect documents that a strict per-kind struct would refuse to
/// deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetNode {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl TargetNode {
    pub fn new(node_type: &str) -> Self {
        Self {
            node_type: node_type.to_string(),
            fields: serde_json::Map::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }

    /// The action object attached to this node, if any, together with the
    /// slot key it sits under.
    pub fn action(&self) -> Option<(&str, &Value)> {
        for key in ["on-click-action", "on-select-action"] {
            if let Some(value) = self.fields.get(key) {
                return Some((key, value));
            }
        }
        None
    }

    fn resolves_data_exchange(&self) -> bool {
        fields_resolve_data_exchange(&self.fields)
    }
}

/// Whether a node's field map carries a `data_exchange` action, either in one
/// of the two action slots or on a node nested in a container branch.
///
/// Only those positions count: action-shaped data inside a payload must not
/// force root hoisting.
fn fields_resolve_data_exchange(fields: &serde_json::Map<String, Value>) -> bool {
    for slot in ["on-click-action", "on-select-action"] {
        if let Some(action) = fields.get(slot)
            && action.get("name").and_then(Value::as_str) == Some("data_exchange")
        {
            return true;
        }
    }
    for branch in ["then", "else"] {
        if let Some(items) = fields.get(branch).and_then(Value::as_array)
            && items.iter().any(value_resolves_data_exchange)
        {
            return true;
        }
    }
    if let Some(cases) = fields.get("cases").and_then(Value::as_object) {
        return cases.values().any(|items| {
            items
                .as_array()
                .is_some_and(|items| items.iter().any(value_resolves_data_exchange))
        });
    }
    false
}

fn value_resolves_data_exchange(value: &Value) -> bool {
    value.as_object().is_some_and(fields_resolve_data_exchange)
}

/// A named, screen-scoped data declaration referenced by selection components.
///
/// The `__example__` array doubles as the live option list and must always be
/// serialized, even when empty; the downstream schema rejects a missing key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataModelEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,
    #[serde(rename = "__example__", default)]
    pub example: Vec<OptionItem>,
}

/// One selectable choice of a data-source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionItem {
    pub id: String,
    pub title: String,
}

/// Renders the reference string a node stores in place of its option list.
pub fn data_source_ref(name: &str) -> String {
    format!("${{data.{}}}", name)
}

/// Extracts the data-source name from a `${data.<name>}` reference.
pub fn parse_data_source_ref(reference: &str) -> Option<&str> {
    let name = reference.strip_prefix("${data.")?.strip_suffix('}')?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}
