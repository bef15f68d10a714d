//! The loosely-typed editor model produced and consumed by the visual flow
//! designer.
//!
//! Components are intentionally a free-form field bag: every kind's property
//! form reads and writes a different set of keys, and the compiler, not this
//! module, decides which of them survive into the target document.

use crate::document::DataModelEntry;
use crate::error::CompileError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete flow as the designer stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorModel {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub screens: Vec<EditorScreen>,
}

impl EditorModel {
    pub fn from_json(input: &str) -> Result<Self, CompileError> {
        serde_json::from_str(input).map_err(|e| CompileError::ModelParseError(e.to_string()))
    }
}

/// One screen of the editor model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorScreen {
    pub id: String,
    pub title: String,
    pub data: ScreenData,
}

/// The editable content of a screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub body: String,
    pub footer: EditorFooter,
    #[serde(default)]
    pub actions: Vec<EditorComponent>,
    /// Persisted data-source definitions keyed by name, so a reloaded flow
    /// keeps the option lists edited in earlier sessions.
    #[serde(
        default,
        rename = "dataModel",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub data_model: IndexMap<String, DataModelEntry>,
}

/// The screen's footer button and its terminal action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorFooter {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionDescriptor>,
}

/// One widget placed on a screen: a kind tag, a free-form field bag, and an
/// optional attached action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorComponent {
    pub kind: String,
    #[serde(default)]
    pub data: serde_json::Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionDescriptor>,
}

impl EditorComponent {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            data: serde_json::Map::new(),
            action: None,
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

/// The editor's internal action vocabulary, renamed to the target vocabulary
/// during compilation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Submit,
    Navigate,
    Url,
}

/// An action attached to a component or footer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionDescriptor {
    pub kind: ActionKind,
    /// Target screen id for `navigate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Target URL for `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ActionDescriptor {
    pub fn submit() -> Self {
        Self {
            kind: ActionKind::Submit,
            next: None,
            payload: None,
            endpoint: None,
        }
    }

    pub fn navigate(next: &str) -> Self {
        Self {
            kind: ActionKind::Navigate,
            next: Some(next.to_string()),
            payload: None,
            endpoint: None,
        }
    }

    pub fn url(endpoint: &str) -> Self {
        Self {
            kind: ActionKind::Url,
            next: None,
            payload: None,
            endpoint: Some(endpoint.to_string()),
        }
    }
}
