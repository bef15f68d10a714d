//! Tests for recovering an editor model from a Flow Document.
mod common;
use common::*;
use flowdoc::prelude::*;
use flowdoc::reverse;
use serde_json::{Value, json};

#[test]
fn test_round_trip_preserves_screen_content() {
    let mut source = screen(
        "RATE",
        "Rate us",
        vec![dropdown("Score", &[("good", "Good"), ("bad", "Bad")])],
    );
    source.data.header = Some("Feedback".to_string());
    source.data.body = "How did we do?".to_string();
    source.data.footer.label = "Send".to_string();

    let output = compile(&model(vec![source]));
    let recovered = reverse::parse_document(&output.document);
    assert_eq!(recovered.len(), 1);

    let screen = &recovered[0];
    assert_eq!(screen.id, "RATE");
    assert_eq!(screen.title, "Rate us");
    assert_eq!(screen.data.header.as_deref(), Some("Feedback"));
    assert_eq!(screen.data.body, "How did we do?");
    assert_eq!(screen.data.footer.label, "Send");

    // The option list comes back from the screen's data declaration, not the
    // node itself.
    let selector = &screen.data.actions[0];
    assert_eq!(selector.kind, "dropdown");
    assert_eq!(selector.field_str("data_source"), Some("dropdown_Score"));
    assert_eq!(
        selector.field("options"),
        Some(&json!([
            { "id": "good", "title": "Good" },
            { "id": "bad", "title": "Bad" },
        ]))
    );

    // The persisted data model mirrors the document's declarations.
    assert_eq!(
        screen.data.data_model.get("dropdown_Score").map(|e| &e.example),
        output.document.screens[0]
            .data
            .as_ref()
            .unwrap()
            .get("dropdown_Score")
            .map(|e| &e.example)
    );
}

#[test]
fn test_action_vocabulary_reverses() {
    let mut link = component("embedded_link", json!({ "text": "Terms" }));
    link.action = Some(ActionDescriptor::url("https://example.com/terms"));
    let mut consent = component("opt_in", json!({ "name": "consent", "label": "I agree" }));
    consent.action = Some(ActionDescriptor::navigate("DETAILS"));

    let output = compile(&model(vec![screen("S", "S", vec![link, consent])]));
    let recovered = reverse::parse_screen(&output.document.screens[0]);

    let link = &recovered.data.actions[0];
    let action = link.action.as_ref().unwrap();
    assert_eq!(action.kind, ActionKind::Url);
    assert_eq!(action.endpoint.as_deref(), Some("https://example.com/terms"));

    let consent = &recovered.data.actions[1];
    let action = consent.action.as_ref().unwrap();
    assert_eq!(action.kind, ActionKind::Navigate);
    assert_eq!(action.next.as_deref(), Some("DETAILS"));

    // The compiled footer's complete action collapses back to submit.
    let footer_action = recovered.data.footer.action.as_ref().unwrap();
    assert_eq!(footer_action.kind, ActionKind::Submit);
    assert_eq!(footer_action.payload, None);
}

#[test]
fn test_unknown_node_types_are_dropped() {
    let document = doc_from_json(json!({
        "version": "7.1",
        "screens": [{
            "id": "S",
            "title": "S",
            "layout": {
                "type": "SingleColumnLayout",
                "children": [
                    { "type": "TextBody", "text": "Body text" },
                    { "type": "VideoPlayer", "src": "clip.mp4" },
                    { "type": "TextInput", "name": "email", "label": "Email" },
                    { "type": "Footer", "label": "Done",
                      "on-click-action": { "name": "complete", "payload": {} } },
                ],
            },
            "terminal": true,
        }],
    }));

    let screen = reverse::parse_screen(&document.screens[0]);
    assert_eq!(screen.data.body, "Body text");
    assert_eq!(screen.data.actions.len(), 1);
    assert_eq!(screen.data.actions[0].kind, "text_input");
}

#[test]
fn test_kebab_fields_become_snake_case() {
    let input = component(
        "text_input",
        json!({ "name": "email", "label": "Email", "input_type": "email", "helper_text": "work email" }),
    );
    let output = compile(&model(vec![screen("S", "S", vec![input])]));
    let recovered = reverse::parse_screen(&output.document.screens[0]);

    let field = &recovered.data.actions[0];
    assert_eq!(field.field_str("input_type"), Some("email"));
    assert_eq!(field.field_str("helper_text"), Some("work email"));
    assert_eq!(field.field("input-type"), None);
}

#[test]
fn test_container_branches_reverse_recursively() {
    let branch = component(
        "if",
        json!({
            "condition": "${form.extra} == true",
            "then": [
                { "kind": "text_area", "data": { "name": "notes", "label": "Notes" } },
            ],
        }),
    );
    let output = compile(&model(vec![screen("S", "S", vec![branch])]));
    let recovered = reverse::parse_screen(&output.document.screens[0]);

    let container = &recovered.data.actions[0];
    assert_eq!(container.kind, "if");
    assert_eq!(container.field_str("condition"), Some("${form.extra} == true"));

    let then = container.field("then").and_then(Value::as_array).unwrap();
    assert_eq!(then.len(), 1);
    assert_eq!(then[0]["kind"], json!("text_area"));
    assert_eq!(then[0]["data"]["name"], json!("notes"));
}

#[test]
fn test_later_headings_stay_components() {
    let output = compile(&model(vec![screen(
        "S",
        "S",
        vec![component("heading", json!({ "text": "Section two" }))],
    )]));
    // No screen header was set, and the component heading sits after the
    // body, so it must not be promoted.
    let recovered = reverse::parse_screen(&output.document.screens[0]);
    assert_eq!(recovered.data.header, None);
    assert_eq!(recovered.data.actions.len(), 1);
    assert_eq!(recovered.data.actions[0].kind, "heading");
}
