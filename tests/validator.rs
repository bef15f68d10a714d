//! Tests for the exhaustive, non-throwing document validator.
mod common;
use common::*;
use flowdoc::prelude::*;
use serde_json::json;

fn valid_screen_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": id,
        "layout": {
            "type": "SingleColumnLayout",
            "children": [
                { "type": "TextBody", "text": "Body text" },
                { "type": "Footer", "label": "Done",
                  "on-click-action": { "name": "complete", "payload": {} } },
            ],
        },
        "terminal": true,
    })
}

#[test]
fn test_compiled_document_is_valid() {
    let mut selector = dropdown("Score", &[("a", "A")]);
    selector.action = Some(ActionDescriptor::submit());
    let mut upload_screen = screen(
        "UPLOAD",
        "Upload",
        vec![component("photo_picker", json!({ "name": "proof", "label": "Proof" }))],
    );
    upload_screen.data.header = Some("Almost done".to_string());

    let output = compile(&model(vec![screen("S", "S", vec![selector]), upload_screen]));
    let report = validate(&output.document);
    assert!(report.valid, "unexpected errors: {:?}", report.errors);
    assert!(report.errors.is_empty());
}

#[test]
fn test_missing_body_is_reported_and_fixable() {
    let mut document = doc_from_json(json!({
        "version": "7.1",
        "screens": [
            valid_screen_json("FIRST"),
            {
                "id": "SECOND",
                "title": "Second",
                "layout": {
                    "type": "SingleColumnLayout",
                    "children": [
                        // No TextBody, and an input missing its label.
                        { "type": "TextInput", "name": "email" },
                        { "type": "Footer", "label": "Done",
                          "on-click-action": { "name": "complete", "payload": {} } },
                    ],
                },
                "terminal": true,
            },
        ],
    }));

    let report = validate(&document);
    assert!(!report.valid);
    let body_error = report
        .errors
        .iter()
        .find(|e| e.contains("TextBody"))
        .expect("missing TextBody error");
    assert!(body_error.contains("Screen 1"));
    let label_error = report
        .errors
        .iter()
        .find(|e| e.contains("'label'"))
        .expect("missing label error")
        .clone();

    // Adding the body removes that error and leaves the other untouched.
    document.screens[1].layout.children.insert(
        0,
        serde_json::from_value(json!({ "type": "TextBody", "text": "Body" })).unwrap(),
    );
    let report = validate(&document);
    assert!(!report.valid);
    assert!(report.errors.iter().all(|e| !e.contains("TextBody")));
    assert!(report.errors.contains(&label_error));
}

#[test]
fn test_footer_must_complete() {
    let document = doc_from_json(json!({
        "version": "7.1",
        "screens": [{
            "id": "S",
            "title": "S",
            "layout": {
                "type": "SingleColumnLayout",
                "children": [
                    { "type": "TextBody", "text": "Body" },
                    { "type": "Footer", "label": "Next",
                      "on-click-action": {
                          "name": "navigate",
                          "next": { "name": "OTHER", "type": "screen" },
                      } },
                ],
            },
            "terminal": true,
        }],
    }));

    let report = validate(&document);
    assert_eq!(report.errors.len(), 1, "errors: {:?}", report.errors);
    let error = &report.errors[0];
    assert!(error.contains("Footer"));
    assert!(error.contains("'navigate'"));
    assert!(error.contains("allowed: complete"));
}

#[test]
fn test_upload_widgets_are_exclusive() {
    fn upload(node_type: &str, name: &str) -> serde_json::Value {
        json!({ "type": node_type, "name": name, "label": name })
    }
    let document = doc_from_json(json!({
        "version": "7.1",
        "screens": [{
            "id": "S",
            "title": "S",
            "layout": {
                "type": "SingleColumnLayout",
                "children": [
                    { "type": "TextBody", "text": "Body" },
                    upload("PhotoPicker", "photos"),
                    upload("DocumentPicker", "papers"),
                    { "type": "Footer", "label": "Done",
                      "on-click-action": { "name": "complete", "payload": {} } },
                ],
            },
            "terminal": true,
        }],
    }));

    let report = validate(&document);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("cannot share a screen"))
    );
}

#[test]
fn test_upload_bounds_must_be_ordered() {
    let document = doc_from_json(json!({
        "version": "7.1",
        "screens": [{
            "id": "S",
            "title": "S",
            "layout": {
                "type": "SingleColumnLayout",
                "children": [
                    { "type": "TextBody", "text": "Body" },
                    { "type": "PhotoPicker", "name": "proof", "label": "Proof",
                      "min-uploaded-photos": 5, "max-uploaded-photos": 2 },
                    { "type": "Footer", "label": "Done",
                      "on-click-action": { "name": "complete", "payload": {} } },
                ],
            },
            "terminal": true,
        }],
    }));

    let report = validate(&document);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("'min-uploaded-photos' (5) must not exceed"))
    );
}

#[test]
fn test_upload_requires_terminal_screen() {
    let mut value = valid_screen_json("S");
    value["layout"]["children"]
        .as_array_mut()
        .unwrap()
        .insert(1, json!({ "type": "PhotoPicker", "name": "proof", "label": "Proof" }));
    value.as_object_mut().unwrap().remove("terminal");
    let document = doc_from_json(json!({ "version": "7.1", "screens": [value] }));

    let report = validate(&document);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("requires terminal"))
    );
}

#[test]
fn test_unknown_kind_lists_supported_types() {
    let mut value = valid_screen_json("S");
    value["layout"]["children"]
        .as_array_mut()
        .unwrap()
        .insert(1, json!({ "type": "VideoPlayer", "src": "clip.mp4" }));
    let document = doc_from_json(json!({ "version": "7.1", "screens": [value] }));

    let report = validate(&document);
    let error = report
        .errors
        .iter()
        .find(|e| e.contains("VideoPlayer"))
        .expect("unknown kind error");
    assert!(error.contains("Dropdown"));
    assert!(error.contains("TextBody"));
}

#[test]
fn test_identifier_format_is_checked() {
    let mut value = valid_screen_json("S");
    value["layout"]["children"]
        .as_array_mut()
        .unwrap()
        .insert(1, json!({ "type": "TextInput", "name": "user name!", "label": "User" }));
    let document = doc_from_json(json!({ "version": "7.1", "screens": [value] }));

    let report = validate(&document);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("'user name!'") && e.contains("letters and underscores"))
    );
}

#[test]
fn test_identifier_must_be_a_string() {
    let mut value = valid_screen_json("S");
    value["layout"]["children"]
        .as_array_mut()
        .unwrap()
        .insert(1, json!({ "type": "TextInput", "name": 42, "label": "User" }));
    let document = doc_from_json(json!({ "version": "7.1", "screens": [value] }));

    let report = validate(&document);
    assert!(!report.valid);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("'42'") && e.contains("letters and underscores"))
    );
}

#[test]
fn test_data_source_reference_rules() {
    let mut value = valid_screen_json("S");
    {
        let children = value["layout"]["children"].as_array_mut().unwrap();
        children.insert(
            1,
            json!({ "type": "Dropdown", "name": "bare", "label": "Bare",
                    "data-source": "states" }),
        );
        children.insert(
            2,
            json!({ "type": "Dropdown", "name": "dangling", "label": "Dangling",
                    "data-source": "${data.missing}" }),
        );
    }
    let document = doc_from_json(json!({ "version": "7.1", "screens": [value] }));

    let report = validate(&document);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("'states'") && e.contains("${data.<name>}"))
    );
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("no data declaration named 'missing'"))
    );
}

#[test]
fn test_forbidden_field_is_reported() {
    let mut value = valid_screen_json("S");
    value["layout"]["children"].as_array_mut().unwrap()[0]
        .as_object_mut()
        .unwrap()
        .insert("label".to_string(), json!("not allowed on text"));
    let document = doc_from_json(json!({ "version": "7.1", "screens": [value] }));

    let report = validate(&document);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("TextBody") && e.contains("must not carry field 'label'"))
    );
}

#[test]
fn test_navigate_next_must_be_screen_object() {
    let mut value = valid_screen_json("S");
    value["layout"]["children"]
        .as_array_mut()
        .unwrap()
        .insert(1, json!({ "type": "EmbeddedLink", "text": "More",
                           "on-click-action": { "name": "navigate", "next": "OTHER" } }));
    let document = doc_from_json(json!({ "version": "7.1", "screens": [value] }));

    let report = validate(&document);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("'next'") && e.contains("type: \"screen\""))
    );
}

#[test]
fn test_root_hoisting_must_match_usage() {
    // data_exchange used, root fields missing.
    let mut value = valid_screen_json("S");
    value["layout"]["children"]
        .as_array_mut()
        .unwrap()
        .insert(1, json!({ "type": "EmbeddedLink", "text": "Send",
                           "on-click-action": { "name": "data_exchange", "payload": {} } }));
    let document = doc_from_json(json!({ "version": "7.1", "screens": [value] }));
    let report = validate(&document);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("missing") && e.contains("data_api_version"))
    );

    // Root fields present, nothing uses data_exchange.
    let document = doc_from_json(json!({
        "version": "7.1",
        "data_api_version": "3.0",
        "routing_model": {},
        "screens": [valid_screen_json("S")],
    }));
    let report = validate(&document);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("no action resolves to 'data_exchange'"))
    );
}

#[test]
fn test_parse_failure_is_a_single_error() {
    let report = validate_json("{ this is not json");
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("Failed to parse Flow Document JSON"));
}

#[test]
fn test_nested_branch_nodes_are_validated() {
    let mut value = valid_screen_json("S");
    value["layout"]["children"].as_array_mut().unwrap().insert(
        1,
        json!({
            "type": "If",
            "condition": "${form.x} == 1",
            "then": [
                // Missing its label.
                { "type": "TextInput", "name": "email" },
            ],
        }),
    );
    let document = doc_from_json(json!({ "version": "7.1", "screens": [value] }));

    let report = validate(&document);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.contains("TextInput") && e.contains("'label'"))
    );
}
