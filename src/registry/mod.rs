//! The component spec registry: the single authoritative table of structural
//! contracts, one per component kind.
//!
//! The forward compiler, the reverse compiler and the validator all delegate
//! their per-kind decisions to lookups here; none of them carries a second
//! copy of these rules.

use crate::document::DataModelEntry;
use ahash::AHashMap;
use serde_json::json;
use std::sync::LazyLock;

mod table;

/// Every component kind the flow schema supports, closed and exhaustive.
///
/// Each kind carries two names: the snake_case tag the editor model uses and
/// the PascalCase `type` tag of the target schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    TextHeading,
    TextSubheading,
    TextBody,
    TextCaption,
    RichText,
    TextInput,
    TextArea,
    DatePicker,
    CalendarPicker,
    Dropdown,
    CheckboxGroup,
    RadioButtonsGroup,
    ChipsSelector,
    Image,
    ImageCarousel,
    PhotoPicker,
    DocumentPicker,
    Footer,
    EmbeddedLink,
    OptIn,
    If,
    Switch,
    NavigationList,
}

impl ComponentKind {
    pub const ALL: &'static [ComponentKind] = &[
        ComponentKind::TextHeading,
        ComponentKind::TextSubheading,
        ComponentKind::TextBody,
        ComponentKind::TextCaption,
        ComponentKind::RichText,
        ComponentKind::TextInput,
        ComponentKind::TextArea,
        ComponentKind::DatePicker,
        ComponentKind::CalendarPicker,
        ComponentKind::Dropdown,
        ComponentKind::CheckboxGroup,
        ComponentKind::RadioButtonsGroup,
        ComponentKind::ChipsSelector,
        ComponentKind::Image,
        ComponentKind::ImageCarousel,
        ComponentKind::PhotoPicker,
        ComponentKind::DocumentPicker,
        ComponentKind::Footer,
        ComponentKind::EmbeddedLink,
        ComponentKind::OptIn,
        ComponentKind::If,
        ComponentKind::Switch,
        ComponentKind::NavigationList,
    ];

    /// The snake_case tag used by the editor model.
    pub fn editor_kind(&self) -> &'static str {
        match self {
            ComponentKind::TextHeading => "heading",
            ComponentKind::TextSubheading => "subheading",
            ComponentKind::TextBody => "body",
            ComponentKind::TextCaption => "caption",
            ComponentKind::RichText => "rich_text",
            ComponentKind::TextInput => "text_input",
            ComponentKind::TextArea => "text_area",
            ComponentKind::DatePicker => "date_picker",
            ComponentKind::CalendarPicker => "calendar_picker",
            ComponentKind::Dropdown => "dropdown",
            ComponentKind::CheckboxGroup => "checkbox_group",
            ComponentKind::RadioButtonsGroup => "radio_group",
            ComponentKind::ChipsSelector => "chips",
            ComponentKind::Image => "image",
            ComponentKind::ImageCarousel => "image_carousel",
            ComponentKind::PhotoPicker => "photo_picker",
            ComponentKind::DocumentPicker => "document_picker",
            ComponentKind::Footer => "footer",
            ComponentKind::EmbeddedLink => "embedded_link",
            ComponentKind::OptIn => "opt_in",
            ComponentKind::If => "if",
            ComponentKind::Switch => "switch",
            ComponentKind::NavigationList => "navigation_list",
        }
    }

    /// The PascalCase `type` tag of the target schema.
    pub fn target_type(&self) -> &'static str {
        match self {
            ComponentKind::TextHeading => "TextHeading",
            ComponentKind::TextSubheading => "TextSubheading",
            ComponentKind::TextBody => "TextBody",
            ComponentKind::TextCaption => "TextCaption",
            ComponentKind::RichText => "RichText",
            ComponentKind::TextInput => "TextInput",
            ComponentKind::TextArea => "TextArea",
            ComponentKind::DatePicker => "DatePicker",
            ComponentKind::CalendarPicker => "CalendarPicker",
            ComponentKind::Dropdown => "Dropdown",
            ComponentKind::CheckboxGroup => "CheckboxGroup",
            ComponentKind::RadioButtonsGroup => "RadioButtonsGroup",
            ComponentKind::ChipsSelector => "ChipsSelector",
            ComponentKind::Image => "Image",
            ComponentKind::ImageCarousel => "ImageCarousel",
            ComponentKind::PhotoPicker => "PhotoPicker",
            ComponentKind::DocumentPicker => "DocumentPicker",
            ComponentKind::Footer => "Footer",
            ComponentKind::EmbeddedLink => "EmbeddedLink",
            ComponentKind::OptIn => "OptIn",
            ComponentKind::If => "If",
            ComponentKind::Switch => "Switch",
            ComponentKind::NavigationList => "NavigationList",
        }
    }
}

/// Which identifier field a kind carries, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    None,
    Id,
    Name,
}

impl IdentifierKind {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            IdentifierKind::None => None,
            IdentifierKind::Id => Some("id"),
            IdentifierKind::Name => Some("name"),
        }
    }
}

/// Which action slot a kind exposes, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSlot {
    None,
    OnClick,
    OnSelect,
}

impl ActionSlot {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ActionSlot::None => None,
            ActionSlot::OnClick => Some("on-click-action"),
            ActionSlot::OnSelect => Some("on-select-action"),
        }
    }
}

/// The target schema's action vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionName {
    Complete,
    DataExchange,
    Navigate,
    OpenUrl,
}

impl ActionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionName::Complete => "complete",
            ActionName::DataExchange => "data_exchange",
            ActionName::Navigate => "navigate",
            ActionName::OpenUrl => "open_url",
        }
    }
}

/// The structural contract of one component kind.
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    pub kind: ComponentKind,
    pub identifier: IdentifierKind,
    pub required_fields: &'static [&'static str],
    pub optional_fields: &'static [&'static str],
    pub forbidden_fields: &'static [&'static str],
    pub action_slot: ActionSlot,
    pub allowed_actions: &'static [ActionName],
    pub requires_terminal: bool,
    pub requires_data_model: bool,
    /// A `(min, max)` field pair that must satisfy `min <= max` when both are
    /// present (upload counts, selection counts).
    pub count_bounds: Option<(&'static str, &'static str)>,
}

impl ComponentSpec {
    /// True when the field belongs to `required ∪ optional`.
    pub fn permits_field(&self, field: &str) -> bool {
        self.required_fields.contains(&field) || self.optional_fields.contains(&field)
    }

    pub fn forbids_field(&self, field: &str) -> bool {
        self.forbidden_fields.contains(&field)
    }

    pub fn identifier_field(&self) -> Option<&'static str> {
        self.identifier.field()
    }

    pub fn action_field(&self) -> Option<&'static str> {
        self.action_slot.field()
    }

    pub fn allows_action(&self, name: &str) -> bool {
        self.allowed_actions.iter().any(|a| a.as_str() == name)
    }

    /// The data declaration a selection kind needs when no options have been
    /// edited yet: an array of `{id, title}` objects with an empty example.
    pub fn data_model_template(&self) -> Option<DataModelEntry> {
        if !self.requires_data_model {
            return None;
        }
        Some(DataModelEntry {
            entry_type: "array".to_string(),
            items: Some(json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "title": { "type": "string" },
                },
            })),
            example: Vec::new(),
        })
    }
}

/// The process-global, read-only spec table.
///
/// Initialized once and only ever read afterwards, so unsynchronized
/// concurrent lookups from any number of call sites are safe.
pub struct Registry {
    specs: AHashMap<ComponentKind, ComponentSpec>,
    editor_index: AHashMap<&'static str, ComponentKind>,
    target_index: AHashMap<&'static str, ComponentKind>,
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::with_default_specs);

impl Registry {
    pub fn global() -> &'static Registry {
        &REGISTRY
    }

    fn with_default_specs() -> Self {
        let mut specs = AHashMap::new();
        for spec in table::build_specs() {
            specs.insert(spec.kind, spec);
        }
        let mut editor_index = AHashMap::new();
        let mut target_index = AHashMap::new();
        for kind in ComponentKind::ALL {
            editor_index.insert(kind.editor_kind(), *kind);
            target_index.insert(kind.target_type(), *kind);
        }
        Self {
            specs,
            editor_index,
            target_index,
        }
    }

    pub fn lookup(&self, kind: ComponentKind) -> Option<&ComponentSpec> {
        self.specs.get(&kind)
    }

    pub fn lookup_editor_kind(&self, tag: &str) -> Option<&ComponentSpec> {
        self.editor_index.get(tag).and_then(|kind| self.lookup(*kind))
    }

    pub fn lookup_target_type(&self, tag: &str) -> Option<&ComponentSpec> {
        self.target_index.get(tag).and_then(|kind| self.lookup(*kind))
    }

    /// All supported target `type` tags, sorted for stable error messages.
    pub fn supported_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = ComponentKind::ALL.iter().map(|k| k.target_type()).collect();
        types.sort_unstable();
        types
    }
}

/// The deterministic identifier cleaning transform: strip everything that is
/// not an ASCII letter or underscore, collapse runs of underscores, and strip
/// them from both ends. The result is either empty or matches `^[A-Za-z_]+$`.
pub fn clean_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.chars() {
        if c.is_ascii_alphabetic() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c);
        } else if c == '_' {
            pending_separator = true;
        }
    }
    out
}

/// The editor model's snake_case spelling of a target field name
/// (`input-type` → `input_type`). The rename is mechanical in both
/// directions, so both compilers share it.
pub fn editor_field_name(target_field: &str) -> String {
    target_field.replace('-', "_")
}

/// Whether an identifier already satisfies `^[A-Za-z_]+$`.
pub fn is_valid_identifier(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic() || c == '_')
}
