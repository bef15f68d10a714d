//! The reverse compiler: recovers an editable screen model from a Flow
//! Document.
//!
//! The inverse of the forward mapping, with one deliberate asymmetry: option
//! lists live in the screen's `data` map, not in the nodes, so selection
//! components are rehydrated by dereferencing their `${data.<name>}` string.
//! Node types the editor does not know are silently dropped; that is accepted,
//! forward-only data loss.

use crate::document::{FlowDocument, TargetNode, TargetScreen, parse_data_source_ref};
use crate::editor::{
    ActionDescriptor, ActionKind, EditorComponent, EditorFooter, EditorScreen, ScreenData,
};
use crate::registry::{ComponentKind, Registry, editor_field_name};
use indexmap::IndexMap;
use serde_json::{Value, json};

/// Recovers every screen of a document, in order.
pub fn parse_document(document: &FlowDocument) -> Vec<EditorScreen> {
    document.screens.iter().map(parse_screen).collect()
}

/// Recovers one editor screen from a target screen.
pub fn parse_screen(screen: &TargetScreen) -> EditorScreen {
    let registry = Registry::global();

    let mut header = None;
    let mut body = String::new();
    let mut body_seen = false;
    let mut footer = EditorFooter {
        label: String::new(),
        action: None,
    };
    let mut actions = Vec::new();

    for node in &screen.layout.children {
        let Some(spec) = registry.lookup_target_type(&node.node_type) else {
            continue;
        };
        match spec.kind {
            // A heading ahead of the body is the screen header; later
            // headings are ordinary components.
            ComponentKind::TextHeading if !body_seen && header.is_none() && actions.is_empty() => {
                header = node_text(node);
            }
            ComponentKind::TextBody if !body_seen => {
                body_seen = true;
                body = node_text(node).unwrap_or_default();
            }
            ComponentKind::Footer => {
                footer.label = node
                    .get("label")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                footer.action = node.action().and_then(|(_, value)| reverse_action(value));
            }
            _ => {
                if let Some(component) = reverse_component(node, screen.data.as_ref(), registry) {
                    actions.push(component);
                }
            }
        }
    }

    EditorScreen {
        id: screen.id.clone(),
        title: screen.title.clone(),
        data: ScreenData {
            header,
            body,
            footer,
            actions,
            data_model: screen.data.clone().unwrap_or_default(),
        },
    }
}

fn node_text(node: &TargetNode) -> Option<String> {
    node.get("text").and_then(Value::as_str).map(str::to_string)
}

/// Rebuilds one editor component from a target node. `None` for node types
/// absent from the reverse mapping.
fn reverse_component(
    node: &TargetNode,
    data: Option<&IndexMap<String, crate::document::DataModelEntry>>,
    registry: &Registry,
) -> Option<EditorComponent> {
    let spec = registry.lookup_target_type(&node.node_type)?;
    let mut component = EditorComponent::new(spec.kind.editor_kind());

    for (key, value) in &node.fields {
        match key.as_str() {
            "on-click-action" | "on-select-action" => {
                component.action = reverse_action(value);
            }
            "data-source" => {
                let Some(name) = value.as_str().and_then(parse_data_source_ref) else {
                    continue;
                };
                component.data.insert("data_source".to_string(), json!(name));
                if let Some(entry) = data.and_then(|map| map.get(name))
                    && let Ok(options) = serde_json::to_value(&entry.example)
                {
                    component.data.insert("options".to_string(), options);
                }
            }
            "then" | "else" if spec.kind == ComponentKind::If => {
                if let Some(children) = reverse_branch(value, data, registry) {
                    component.data.insert(key.clone(), children);
                }
            }
            "cases" if spec.kind == ComponentKind::Switch => {
                if let Some(map) = value.as_object() {
                    let mut cases = serde_json::Map::new();
                    for (case, items) in map {
                        if let Some(children) = reverse_branch(items, data, registry) {
                            cases.insert(case.clone(), children);
                        }
                    }
                    component
                        .data
                        .insert("cases".to_string(), Value::Object(cases));
                }
            }
            _ => {
                component
                    .data
                    .insert(editor_field_name(key), value.clone());
            }
        }
    }

    Some(component)
}

/// One container branch: an array of target nodes back into an array of
/// editor components. Unparseable entries are dropped.
fn reverse_branch(
    value: &Value,
    data: Option<&IndexMap<String, crate::document::DataModelEntry>>,
    registry: &Registry,
) -> Option<Value> {
    let items = value.as_array()?;
    let mut children = Vec::with_capacity(items.len());
    for item in items {
        let Ok(node) = serde_json::from_value::<TargetNode>(item.clone()) else {
            continue;
        };
        if let Some(component) = reverse_component(&node, data, registry)
            && let Ok(value) = serde_json::to_value(&component)
        {
            children.push(value);
        }
    }
    Some(Value::Array(children))
}

/// Maps the target action vocabulary back to the editor's: `complete` and
/// `data_exchange` collapse to `submit`, `navigate` keeps its name with
/// `next.name` extracted, `open_url` becomes `url` with the URL as endpoint.
fn reverse_action(value: &Value) -> Option<ActionDescriptor> {
    let name = value.get("name").and_then(Value::as_str)?;
    let payload = value
        .get("payload")
        .filter(|p| !p.as_object().is_some_and(|m| m.is_empty()))
        .cloned();

    match name {
        "complete" | "data_exchange" => Some(ActionDescriptor {
            kind: ActionKind::Submit,
            next: None,
            payload,
            endpoint: None,
        }),
        "navigate" => Some(ActionDescriptor {
            kind: ActionKind::Navigate,
            next: value
                .get("next")
                .and_then(|n| n.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string),
            payload,
            endpoint: None,
        }),
        "open_url" => Some(ActionDescriptor {
            kind: ActionKind::Url,
            next: None,
            payload,
            endpoint: value
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
        }),
        _ => None,
    }
}
