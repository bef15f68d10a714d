//! The structural validator: the gate a caller consults before submitting a
//! document to the remote platform.
//!
//! Strict but non-throwing. Every rule is re-derived from the registry, every
//! violation is collected, and a single call surfaces the complete defect
//! list. The one short-circuit is a JSON parse failure on string input, which
//! is reported as a single top-level error.

use crate::document::{
    DataModelEntry, FlowDocument, TargetNode, TargetScreen, parse_data_source_ref,
};
use crate::error::ValidationError;
use crate::registry::{ComponentKind, ComponentSpec, Registry, is_valid_identifier};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

/// The outcome of one validation pass.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Validates a raw JSON string. A parse failure is the single error for that
/// call; this function never panics.
pub fn validate_json(input: &str) -> ValidationReport {
    match FlowDocument::from_json(input) {
        Ok(document) => validate(&document),
        Err(e) => ValidationReport {
            valid: false,
            errors: vec![ValidationError::DocumentParseFailure(e.to_string()).to_string()],
        },
    }
}

/// Validates a parsed document against the registry, accumulating every
/// violation.
pub fn validate(document: &FlowDocument) -> ValidationReport {
    let registry = Registry::global();
    let mut errors = Vec::new();

    if document.version.trim().is_empty() {
        errors.push(ValidationError::DocumentConstraintViolation {
            message: "version must not be empty".to_string(),
        });
    }

    for (index, screen) in document.screens.iter().enumerate() {
        validate_screen(index, screen, registry, &mut errors);
    }
    validate_root_hoisting(document, &mut errors);

    ValidationReport {
        valid: errors.is_empty(),
        errors: errors.iter().map(ToString::to_string).collect(),
    }
}

/// `data_api_version`/`routing_model` must be present iff some resolved
/// action anywhere in the document is `data_exchange`.
fn validate_root_hoisting(document: &FlowDocument, errors: &mut Vec<ValidationError>) {
    let uses = document.resolves_data_exchange();
    let hoisted = document.data_api_version.is_some() && document.routing_model.is_some();
    let partially = document.data_api_version.is_some() || document.routing_model.is_some();

    if uses && !hoisted {
        errors.push(ValidationError::DocumentConstraintViolation {
            message: "an action resolves to 'data_exchange' but the root is missing \
                      data_api_version and routing_model"
                .to_string(),
        });
    } else if !uses && partially {
        errors.push(ValidationError::DocumentConstraintViolation {
            message: "the root carries data_api_version/routing_model but no action resolves \
                      to 'data_exchange'"
                .to_string(),
        });
    }
}

fn validate_screen(
    index: usize,
    screen: &TargetScreen,
    registry: &Registry,
    errors: &mut Vec<ValidationError>,
) {
    let mut body_count = 0usize;
    let mut footer_count = 0usize;
    let mut photo_count = 0usize;
    let mut document_count = 0usize;
    let mut needs_terminal = false;

    for node in &screen.layout.children {
        match registry.lookup_target_type(&node.node_type).map(|s| s.kind) {
            Some(ComponentKind::TextBody) => body_count += 1,
            Some(ComponentKind::Footer) => footer_count += 1,
            Some(ComponentKind::PhotoPicker) => photo_count += 1,
            Some(ComponentKind::DocumentPicker) => document_count += 1,
            _ => {}
        }
        needs_terminal |= validate_node(index, screen, node, registry, errors);
    }

    if body_count != 1 {
        errors.push(ValidationError::StructuralConstraintViolation {
            screen: index,
            message: format!("expected exactly one TextBody component, found {}", body_count),
        });
    }
    if footer_count != 1 {
        errors.push(ValidationError::StructuralConstraintViolation {
            screen: index,
            message: format!("expected exactly one Footer component, found {}", footer_count),
        });
    }
    if photo_count > 1 {
        errors.push(ValidationError::StructuralConstraintViolation {
            screen: index,
            message: format!("at most one PhotoPicker is allowed, found {}", photo_count),
        });
    }
    if document_count > 1 {
        errors.push(ValidationError::StructuralConstraintViolation {
            screen: index,
            message: format!(
                "at most one DocumentPicker is allowed, found {}",
                document_count
            ),
        });
    }
    if photo_count > 0 && document_count > 0 {
        errors.push(ValidationError::StructuralConstraintViolation {
            screen: index,
            message: "PhotoPicker and DocumentPicker cannot share a screen".to_string(),
        });
    }
    if needs_terminal && screen.terminal != Some(true) {
        errors.push(ValidationError::StructuralConstraintViolation {
            screen: index,
            message: "screen contains a component that requires terminal = true".to_string(),
        });
    }
}

/// Checks one node against its spec. Returns whether the node (or a nested
/// one) requires the screen to be terminal.
fn validate_node(
    screen_index: usize,
    screen: &TargetScreen,
    node: &TargetNode,
    registry: &Registry,
    errors: &mut Vec<ValidationError>,
) -> bool {
    let Some(spec) = registry.lookup_target_type(&node.node_type) else {
        errors.push(ValidationError::UnknownComponentKind {
            screen: screen_index,
            kind: node.node_type.clone(),
            supported: registry.supported_types().iter().join(", "),
        });
        return false;
    };
    let component = spec.kind.target_type().to_string();
    let mut needs_terminal = spec.requires_terminal;

    // Field membership: present ⊆ required ∪ optional, disjoint from
    // forbidden; every required field present and non-empty.
    for field in node.fields.keys() {
        if spec.forbids_field(field) || !spec.permits_field(field) {
            errors.push(ValidationError::ForbiddenFieldPresent {
                screen: screen_index,
                component: component.clone(),
                field: field.clone(),
            });
        }
    }
    for field in spec.required_fields {
        let missing = match node.get(field) {
            None => true,
            Some(value) => value_is_empty(value),
        };
        if missing {
            errors.push(ValidationError::MissingRequiredField {
                screen: screen_index,
                component: component.clone(),
                field: (*field).to_string(),
            });
        }
    }

    // A present identifier must be a string matching the identifier rule; a
    // number or object under `name`/`id` is rejected, not skipped.
    if let Some(field) = spec.identifier_field()
        && let Some(value) = node.get(field)
        && !value.as_str().is_some_and(is_valid_identifier)
    {
        errors.push(ValidationError::InvalidIdentifierFormat {
            screen: screen_index,
            component: component.clone(),
            value: match value.as_str() {
                Some(s) => s.to_string(),
                None => value.to_string(),
            },
        });
    }

    // An action under the wrong slot key is already flagged by the field
    // membership check above.
    if let Some(field) = spec.action_field()
        && let Some(action) = node.get(field)
    {
        validate_action(screen_index, &component, spec, action, errors);
    }

    if node.fields.contains_key("data-source") {
        validate_data_source(
            screen_index,
            &component,
            node.get("data-source"),
            screen.data.as_ref(),
            errors,
        );
    }

    if let Some((min_field, max_field)) = spec.count_bounds {
        let min = node.get(min_field).and_then(Value::as_i64);
        let max = node.get(max_field).and_then(Value::as_i64);
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            errors.push(ValidationError::StructuralConstraintViolation {
                screen: screen_index,
                message: format!(
                    "'{}' ({}) must not exceed '{}' ({})",
                    min_field, min, max_field, max
                ),
            });
        }
    }

    // Container branches hold whole child nodes; per-node rules recurse into
    // them, screen-level counting rules do not.
    match spec.kind {
        ComponentKind::If => {
            for branch in ["then", "else"] {
                if let Some(value) = node.get(branch) {
                    needs_terminal |= validate_branch(
                        screen_index,
                        screen,
                        &component,
                        branch,
                        value,
                        registry,
                        errors,
                    );
                }
            }
        }
        ComponentKind::Switch => {
            if let Some(cases) = node.get("cases") {
                match cases.as_object() {
                    Some(map) => {
                        for (case, value) in map {
                            needs_terminal |= validate_branch(
                                screen_index,
                                screen,
                                &component,
                                case,
                                value,
                                registry,
                                errors,
                            );
                        }
                    }
                    None => errors.push(ValidationError::StructuralConstraintViolation {
                        screen: screen_index,
                        message: "'Switch' field 'cases' must be an object of node lists"
                            .to_string(),
                    }),
                }
            }
        }
        _ => {}
    }

    needs_terminal
}

fn validate_branch(
    screen_index: usize,
    screen: &TargetScreen,
    component: &str,
    branch: &str,
    value: &Value,
    registry: &Registry,
    errors: &mut Vec<ValidationError>,
) -> bool {
    let Some(items) = value.as_array() else {
        errors.push(ValidationError::StructuralConstraintViolation {
            screen: screen_index,
            message: format!("'{}' branch '{}' must be a list of nodes", component, branch),
        });
        return false;
    };

    let mut needs_terminal = false;
    for item in items {
        match serde_json::from_value::<TargetNode>(item.clone()) {
            Ok(node) => {
                needs_terminal |= validate_node(screen_index, screen, &node, registry, errors);
            }
            Err(_) => errors.push(ValidationError::StructuralConstraintViolation {
                screen: screen_index,
                message: format!(
                    "'{}' branch '{}' contains an entry that is not a typed node",
                    component, branch
                ),
            }),
        }
    }
    needs_terminal
}

fn validate_action(
    screen_index: usize,
    component: &str,
    spec: &ComponentSpec,
    action: &Value,
    errors: &mut Vec<ValidationError>,
) {
    let Some(map) = action.as_object() else {
        errors.push(ValidationError::StructuralConstraintViolation {
            screen: screen_index,
            message: format!("'{}' action must be an object with a 'name'", component),
        });
        return;
    };

    let Some(name) = map.get("name").and_then(Value::as_str) else {
        errors.push(ValidationError::StructuralConstraintViolation {
            screen: screen_index,
            message: format!("'{}' action is missing a string 'name'", component),
        });
        return;
    };

    if !spec.allows_action(name) {
        errors.push(ValidationError::InvalidActionName {
            screen: screen_index,
            component: component.to_string(),
            name: name.to_string(),
            allowed: spec.allowed_actions.iter().map(|a| a.as_str()).join(", "),
        });
    }

    match name {
        "navigate" => {
            // next must be an object {name, type: "screen"}, never a bare
            // string.
            let next_ok = map.get("next").and_then(Value::as_object).is_some_and(|n| {
                n.get("type").and_then(Value::as_str) == Some("screen")
                    && n.get("name").and_then(Value::as_str).is_some()
            });
            if !next_ok {
                errors.push(ValidationError::StructuralConstraintViolation {
                    screen: screen_index,
                    message: format!(
                        "'{}' 'navigate' action requires 'next' to be an object \
                         {{name, type: \"screen\"}}",
                        component
                    ),
                });
            }
        }
        "open_url" => {
            if map.get("url").and_then(Value::as_str).is_none() {
                errors.push(ValidationError::StructuralConstraintViolation {
                    screen: screen_index,
                    message: format!("'{}' 'open_url' action requires a 'url' string", component),
                });
            }
        }
        _ => {}
    }
}

fn validate_data_source(
    screen_index: usize,
    component: &str,
    value: Option<&Value>,
    data: Option<&IndexMap<String, DataModelEntry>>,
    errors: &mut Vec<ValidationError>,
) {
    let raw = value.and_then(Value::as_str).unwrap_or_default();
    let Some(name) = parse_data_source_ref(raw) else {
        errors.push(ValidationError::InvalidDataSourceFormat {
            screen: screen_index,
            component: component.to_string(),
            value: raw.to_string(),
            reason: "expected a reference of the form ${data.<name>}".to_string(),
        });
        return;
    };

    if data.and_then(|map| map.get(name)).is_none() {
        errors.push(ValidationError::InvalidDataSourceFormat {
            screen: screen_index,
            component: component.to_string(),
            value: raw.to_string(),
            reason: format!("no data declaration named '{}' on this screen", name),
        });
    }
}

/// "Non-empty" for required fields: null, empty strings, empty arrays and
/// empty objects all count as missing.
fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
