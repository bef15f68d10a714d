//! Per-kind conversion of one editor component into one target node.
//!
//! The mapping is pure and registry-driven: the spec's field lists decide
//! which bag entries survive, snake_case bag keys become the target's
//! kebab-case spellings, and the editor's action vocabulary is renamed to the
//! target's.

use super::DataSourceAccumulator;
use crate::document::{OptionItem, TargetNode, data_source_ref};
use crate::editor::{ActionDescriptor, ActionKind, EditorComponent};
use crate::error::CompileWarning;
use crate::registry::{ComponentKind, ComponentSpec, Registry, clean_identifier, editor_field_name};
use serde_json::{Value, json};

pub(super) struct Converted {
    pub node: TargetNode,
    /// True when this node, or any node in a nested branch, forces the
    /// enclosing screen to be terminal.
    pub requires_terminal: bool,
}

/// Converts a single component. Unknown kinds emit a warning and yield `None`
/// so the rest of the screen keeps compiling.
pub(super) fn convert_component(
    component: &EditorComponent,
    screen_id: &str,
    registry: &Registry,
    sources: &mut DataSourceAccumulator,
    warnings: &mut Vec<CompileWarning>,
) -> Option<Converted> {
    let Some(spec) = registry.lookup_editor_kind(&component.kind) else {
        warnings.push(CompileWarning::UnknownComponentKind {
            screen_id: screen_id.to_string(),
            kind: component.kind.clone(),
        });
        return None;
    };

    let mut node = TargetNode::new(spec.kind.target_type());
    let mut requires_terminal = spec.requires_terminal;

    if let Some(field) = spec.identifier_field() {
        node.set(field, json!(identifier_for(component, spec)));
    }

    for field in spec
        .required_fields
        .iter()
        .chain(spec.optional_fields.iter())
    {
        match *field {
            f if Some(f) == spec.identifier_field() => {}
            "data-source" => {
                let options = component
                    .field("options")
                    .and_then(|v| serde_json::from_value::<Vec<OptionItem>>(v.clone()).ok());
                let name = sources.register(
                    spec,
                    component.field_str("data_source"),
                    &identifier_for(component, spec),
                    options,
                );
                node.set("data-source", json!(data_source_ref(&name)));
            }
            "on-click-action" | "on-select-action" => {
                if let Some(descriptor) = &component.action {
                    node.set(field, action_value(descriptor));
                }
            }
            "then" | "else" if spec.kind == ComponentKind::If => {
                if let Some(children) = convert_branch(
                    component,
                    field,
                    screen_id,
                    registry,
                    sources,
                    warnings,
                    &mut requires_terminal,
                ) {
                    node.set(field, children);
                }
            }
            "cases" if spec.kind == ComponentKind::Switch => {
                if let Some(cases) = convert_cases(
                    component,
                    screen_id,
                    registry,
                    sources,
                    warnings,
                    &mut requires_terminal,
                ) {
                    node.set("cases", cases);
                }
            }
            _ => {
                if let Some(value) = component.field(&editor_field_name(field)) {
                    node.set(field, value.clone());
                }
            }
        }
    }

    Some(Converted {
        node,
        requires_terminal,
    })
}

/// The target action object for an editor action descriptor: `submit` becomes
/// `data_exchange`, `navigate` keeps its name with `next` reshaped to a
/// screen reference, `url` becomes `open_url` with `endpoint` renamed.
pub(super) fn action_value(descriptor: &ActionDescriptor) -> Value {
    match descriptor.kind {
        ActionKind::Submit => json!({
            "name": "data_exchange",
            "payload": descriptor.payload.clone().unwrap_or_else(|| json!({})),
        }),
        ActionKind::Navigate => {
            let mut action = json!({
                "name": "navigate",
                "next": {
                    "name": descriptor.next.clone().unwrap_or_default(),
                    "type": "screen",
                },
            });
            if let Some(payload) = &descriptor.payload {
                action["payload"] = payload.clone();
            }
            action
        }
        ActionKind::Url => json!({
            "name": "open_url",
            "url": descriptor.endpoint.clone().unwrap_or_default(),
        }),
    }
}

/// The identifier written into `name`/`id` fields: the bag's own identifier
/// if present, else the label or title, all run through the cleaning
/// transform; the editor kind tag is the last resort.
fn identifier_for(component: &EditorComponent, spec: &ComponentSpec) -> String {
    let raw = spec
        .identifier_field()
        .and_then(|f| component.field_str(&editor_field_name(f)))
        .or_else(|| component.field_str("label"))
        .or_else(|| component.field_str("title"))
        .unwrap_or_default();
    let cleaned = clean_identifier(raw);
    if cleaned.is_empty() {
        spec.kind.editor_kind().to_string()
    } else {
        cleaned
    }
}

/// One `then`/`else` branch of an `if` component: an array of nested editor
/// components, converted recursively.
fn convert_branch(
    component: &EditorComponent,
    branch: &str,
    screen_id: &str,
    registry: &Registry,
    sources: &mut DataSourceAccumulator,
    warnings: &mut Vec<CompileWarning>,
    requires_terminal: &mut bool,
) -> Option<Value> {
    let value = component.field(branch)?;
    let Some(items) = value.as_array() else {
        warnings.push(CompileWarning::MalformedBranch {
            screen_id: screen_id.to_string(),
            kind: component.kind.clone(),
            branch: branch.to_string(),
        });
        return None;
    };
    Some(Value::Array(convert_nested(
        items,
        &component.kind,
        branch,
        screen_id,
        registry,
        sources,
        warnings,
        requires_terminal,
    )))
}

/// The `cases` map of a `switch` component: each case value is a branch.
fn convert_cases(
    component: &EditorComponent,
    screen_id: &str,
    registry: &Registry,
    sources: &mut DataSourceAccumulator,
    warnings: &mut Vec<CompileWarning>,
    requires_terminal: &mut bool,
) -> Option<Value> {
    let value = component.field("cases")?;
    let Some(map) = value.as_object() else {
        warnings.push(CompileWarning::MalformedBranch {
            screen_id: screen_id.to_string(),
            kind: component.kind.clone(),
            branch: "cases".to_string(),
        });
        return None;
    };

    let mut cases = serde_json::Map::new();
    for (case, items) in map {
        match items.as_array() {
            Some(items) => {
                cases.insert(
                    case.clone(),
                    Value::Array(convert_nested(
                        items,
                        &component.kind,
                        case,
                        screen_id,
                        registry,
                        sources,
                        warnings,
                        requires_terminal,
                    )),
                );
            }
            None => warnings.push(CompileWarning::MalformedBranch {
                screen_id: screen_id.to_string(),
                kind: component.kind.clone(),
                branch: case.clone(),
            }),
        }
    }
    Some(Value::Object(cases))
}

#[allow(clippy::too_many_arguments)]
fn convert_nested(
    items: &[Value],
    kind: &str,
    branch: &str,
    screen_id: &str,
    registry: &Registry,
    sources: &mut DataSourceAccumulator,
    warnings: &mut Vec<CompileWarning>,
    requires_terminal: &mut bool,
) -> Vec<Value> {
    let mut children = Vec::with_capacity(items.len());
    for item in items {
        let Ok(nested) = serde_json::from_value::<EditorComponent>(item.clone()) else {
            warnings.push(CompileWarning::MalformedBranch {
                screen_id: screen_id.to_string(),
                kind: kind.to_string(),
                branch: branch.to_string(),
            });
            continue;
        };
        if let Some(converted) = convert_component(&nested, screen_id, registry, sources, warnings)
        {
            *requires_terminal |= converted.requires_terminal;
            if let Ok(value) = serde_json::to_value(&converted.node) {
                children.push(value);
            }
        }
    }
    children
}

