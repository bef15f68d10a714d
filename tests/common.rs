//! Common test utilities for building editor models and Flow Documents.
use flowdoc::prelude::*;
use serde_json::{Value, json};

/// A component with the given kind and field bag.
#[allow(dead_code)]
pub fn component(kind: &str, data: Value) -> EditorComponent {
    EditorComponent {
        kind: kind.to_string(),
        data: data.as_object().cloned().unwrap_or_default(),
        action: None,
    }
}

/// A screen with a plain body, a `Done` footer and the given components.
#[allow(dead_code)]
pub fn screen(id: &str, title: &str, actions: Vec<EditorComponent>) -> EditorScreen {
    EditorScreen {
        id: id.to_string(),
        title: title.to_string(),
        data: ScreenData {
            header: None,
            body: "Body text".to_string(),
            footer: EditorFooter {
                label: "Done".to_string(),
                action: None,
            },
            actions,
            data_model: Default::default(),
        },
    }
}

/// A named model wrapping the given screens.
#[allow(dead_code)]
pub fn model(screens: Vec<EditorScreen>) -> EditorModel {
    EditorModel {
        name: "test_flow".to_string(),
        categories: vec!["OTHER".to_string()],
        screens,
    }
}

/// A dropdown with a label and inline `{id, title}` options.
#[allow(dead_code)]
pub fn dropdown(label: &str, options: &[(&str, &str)]) -> EditorComponent {
    let options: Vec<Value> = options
        .iter()
        .map(|(id, title)| json!({ "id": id, "title": title }))
        .collect();
    component("dropdown", json!({ "label": label, "options": options }))
}

#[allow(dead_code)]
pub fn compile(model: &EditorModel) -> CompilationOutput {
    Compiler::new(model).generate().expect("compilation failed")
}

/// Deserializes a hand-written document literal.
#[allow(dead_code)]
pub fn doc_from_json(value: Value) -> FlowDocument {
    serde_json::from_value(value).expect("invalid document literal")
}

/// The `type` tags of a screen's children, in order.
#[allow(dead_code)]
pub fn child_types(screen: &TargetScreen) -> Vec<&str> {
    screen
        .layout
        .children
        .iter()
        .map(|node| node.node_type.as_str())
        .collect()
}

/// Finds the first child of the given type.
#[allow(dead_code)]
pub fn child<'a>(screen: &'a TargetScreen, node_type: &str) -> &'a TargetNode {
    screen
        .layout
        .children
        .iter()
        .find(|node| node.node_type == node_type)
        .unwrap_or_else(|| panic!("no {} child on screen {}", node_type, screen.id))
}
