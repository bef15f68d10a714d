//! The forward compiler: editor model in, Flow Document out.
//!
//! Compilation is a pure function over the model. It never mutates its input,
//! and every per-kind decision is a registry lookup; the only state threaded
//! through a screen is the local data-source accumulator.

use crate::document::{
    DATA_API_VERSION, DataModelEntry, FLOW_VERSION, FlowDocument, Layout, OptionItem, TargetNode,
    TargetScreen,
};
use crate::editor::{ActionKind, EditorFooter, EditorModel, EditorScreen};
use crate::error::{CompileError, CompileWarning};
use crate::registry::{ComponentKind, ComponentSpec, Registry, clean_identifier};
use indexmap::IndexMap;
use serde_json::json;

mod convert;

/// The result of one `generate` call: the document plus every non-fatal
/// diagnostic collected along the way.
pub struct CompilationOutput {
    pub document: FlowDocument,
    pub warnings: Vec<CompileWarning>,
}

pub struct Compiler<'a> {
    model: &'a EditorModel,
    registry: &'static Registry,
}

impl<'a> Compiler<'a> {
    pub fn new(model: &'a EditorModel) -> Self {
        Self {
            model,
            registry: Registry::global(),
        }
    }

    /// Compiles the whole model. Unknown component kinds degrade to warnings;
    /// a missing model name is the one fatal precondition.
    pub fn generate(&self) -> Result<CompilationOutput, CompileError> {
        if self.model.name.trim().is_empty() {
            return Err(CompileError::MissingDocumentName);
        }

        let mut warnings = Vec::new();
        let mut screens = Vec::with_capacity(self.model.screens.len());
        for screen in &self.model.screens {
            screens.push(self.generate_screen(screen, &mut warnings));
        }

        // Root hoisting: data_api_version and routing_model appear iff some
        // resolved action anywhere in the document is data_exchange.
        let uses_data_exchange = screens.iter().any(TargetScreen::resolves_data_exchange);
        let document = FlowDocument {
            version: FLOW_VERSION.to_string(),
            data_api_version: uses_data_exchange.then(|| DATA_API_VERSION.to_string()),
            routing_model: uses_data_exchange.then(|| json!({})),
            screens,
        };

        Ok(CompilationOutput { document, warnings })
    }

    /// Assembles one screen: optional heading, mandatory body, converted
    /// components in original order, mandatory footer.
    fn generate_screen(
        &self,
        screen: &EditorScreen,
        warnings: &mut Vec<CompileWarning>,
    ) -> TargetScreen {
        let mut sources = DataSourceAccumulator::new(&screen.data.data_model);
        let mut children = Vec::with_capacity(screen.data.actions.len() + 3);
        let mut requires_terminal = false;

        if let Some(header) = &screen.data.header
            && !header.trim().is_empty()
        {
            children.push(text_node(ComponentKind::TextHeading, header));
        }
        children.push(text_node(ComponentKind::TextBody, &screen.data.body));

        for component in &screen.data.actions {
            if let Some(converted) = convert::convert_component(
                component,
                &screen.id,
                self.registry,
                &mut sources,
                warnings,
            ) {
                requires_terminal |= converted.requires_terminal;
                children.push(converted.node);
            }
        }

        let (footer, footer_completes) = footer_node(&screen.data.footer);
        children.push(footer);

        let terminal = requires_terminal || footer_completes;
        let data = sources.into_entries();
        TargetScreen {
            id: screen.id.clone(),
            title: screen.title.clone(),
            layout: Layout::new(children),
            terminal: terminal.then_some(true),
            data: (!data.is_empty()).then_some(data),
        }
    }
}

fn text_node(kind: ComponentKind, text: &str) -> TargetNode {
    let mut node = TargetNode::new(kind.target_type());
    node.set("text", json!(text));
    node
}

/// Builds the footer node. A `submit` (or absent) footer action becomes the
/// terminal `complete` action; `navigate`/`url` footers keep their vocabulary.
fn footer_node(footer: &EditorFooter) -> (TargetNode, bool) {
    let mut node = TargetNode::new(ComponentKind::Footer.target_type());
    node.set("label", json!(footer.label));

    let action = match &footer.action {
        Some(descriptor) if descriptor.kind != ActionKind::Submit => {
            convert::action_value(descriptor)
        }
        other => {
            let payload = other
                .as_ref()
                .and_then(|d| d.payload.clone())
                .unwrap_or_else(|| json!({}));
            json!({ "name": "complete", "payload": payload })
        }
    };
    let completes = action.get("name").and_then(|n| n.as_str()) == Some("complete");
    node.set("on-click-action", action);
    (node, completes)
}

/// The per-screen name→declaration accumulator for data-sources.
///
/// Lives for one `generate_screen` call so repeated compilations, including
/// concurrent ones over unrelated models, never share state.
pub(crate) struct DataSourceAccumulator<'a> {
    persisted: &'a IndexMap<String, DataModelEntry>,
    entries: IndexMap<String, DataModelEntry>,
}

impl<'a> DataSourceAccumulator<'a> {
    pub(crate) fn new(persisted: &'a IndexMap<String, DataModelEntry>) -> Self {
        Self {
            persisted,
            entries: IndexMap::new(),
        }
    }

    /// Resolves the component's data-source name and records its declaration.
    ///
    /// An explicit name always wins and merges into an existing declaration of
    /// the same name. Synthesized names (`<kind>_<cleaned identifier>`) are
    /// kept collision-free with a numeric suffix. Option precedence: freshly
    /// edited options, then the persisted example array, then empty.
    pub(crate) fn register(
        &mut self,
        spec: &ComponentSpec,
        requested: Option<&str>,
        identifier: &str,
        options: Option<Vec<OptionItem>>,
    ) -> String {
        let name = match requested {
            Some(explicit) => explicit.to_string(),
            None => {
                let cleaned = clean_identifier(identifier);
                let base = if cleaned.is_empty() {
                    spec.kind.editor_kind().to_string()
                } else {
                    format!("{}_{}", spec.kind.editor_kind(), cleaned)
                };
                let mut candidate = base.clone();
                let mut suffix = 2;
                while self.entries.contains_key(&candidate) {
                    candidate = format!("{}_{}", base, suffix);
                    suffix += 1;
                }
                candidate
            }
        };

        let example = options
            .or_else(|| self.persisted.get(&name).map(|e| e.example.clone()))
            .unwrap_or_default();

        match self.entries.get_mut(&name) {
            Some(entry) => {
                if !example.is_empty() {
                    entry.example = example;
                }
            }
            None => {
                // data_model_template is always Some for kinds that reach here
                let mut entry = spec
                    .data_model_template()
                    .unwrap_or_else(|| DataModelEntry {
                        entry_type: "array".to_string(),
                        items: None,
                        example: Vec::new(),
                    });
                entry.example = example;
                self.entries.insert(name.clone(), entry);
            }
        }
        name
    }

    pub(crate) fn into_entries(self) -> IndexMap<String, DataModelEntry> {
        self.entries
    }
}
