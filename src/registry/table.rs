//! The spec table itself, one entry per component kind.
//!
//! Field names are the target schema's kebab-case spellings. The editor model
//! stores the same fields under their snake_case names; the compilers rename
//! mechanically between the two.

use super::{ActionName, ActionSlot, ComponentKind, ComponentSpec, IdentifierKind};

/// Master macro declaring the whole table. Adding or removing a supported
/// kind is one localized, type-checked entry here.
macro_rules! component_specs {
    ( $( $kind:ident => {
            identifier: $ident:ident,
            required: [ $($req:literal),* $(,)? ],
            optional: [ $($opt:literal),* $(,)? ],
            forbidden: [ $($forb:literal),* $(,)? ],
            actions: ($slot:ident, [ $($act:ident),* $(,)? ]),
            terminal: $term:literal,
            data_model: $dm:literal,
            bounds: $bounds:expr $(,)?
        } ),* $(,)? ) => {
        pub(super) fn build_specs() -> Vec<ComponentSpec> {
            vec![
                $( ComponentSpec {
                    kind: ComponentKind::$kind,
                    identifier: IdentifierKind::$ident,
                    required_fields: &[ $($req),* ],
                    optional_fields: &[ $($opt),* ],
                    forbidden_fields: &[ $($forb),* ],
                    action_slot: ActionSlot::$slot,
                    allowed_actions: &[ $(ActionName::$act),* ],
                    requires_terminal: $term,
                    requires_data_model: $dm,
                    count_bounds: $bounds,
                }, )*
            ]
        }
    };
}

component_specs! {
    // Text
    TextHeading => {
        identifier: None,
        required: ["text"],
        optional: ["visible"],
        forbidden: ["label", "name"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    TextSubheading => {
        identifier: None,
        required: ["text"],
        optional: ["visible"],
        forbidden: ["label", "name"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    TextBody => {
        identifier: None,
        required: ["text"],
        optional: ["visible", "markdown", "font-weight", "strikethrough"],
        forbidden: ["label", "name"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    TextCaption => {
        identifier: None,
        required: ["text"],
        optional: ["visible", "font-weight", "strikethrough"],
        forbidden: ["label", "name"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    RichText => {
        identifier: None,
        required: ["text"],
        optional: ["visible"],
        forbidden: ["label", "name"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },

    // Input
    TextInput => {
        identifier: Name,
        required: ["name", "label"],
        optional: ["input-type", "required", "helper-text", "min-chars", "max-chars", "visible"],
        forbidden: ["text", "data-source"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: Some(("min-chars", "max-chars")),
    },
    TextArea => {
        identifier: Name,
        required: ["name", "label"],
        optional: ["required", "helper-text", "max-length", "visible"],
        forbidden: ["text", "data-source"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    DatePicker => {
        identifier: Name,
        required: ["name", "label"],
        optional: ["min-date", "max-date", "unavailable-dates", "helper-text", "required", "visible"],
        forbidden: ["text", "data-source"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    CalendarPicker => {
        identifier: Name,
        required: ["name", "label"],
        optional: ["mode", "min-date", "max-date", "helper-text", "required", "visible"],
        forbidden: ["text", "data-source"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },

    // Selection (all of these reference a screen-scoped data-source)
    Dropdown => {
        identifier: Name,
        required: ["name", "label", "data-source"],
        optional: ["required", "visible", "on-select-action"],
        forbidden: ["text"],
        actions: (OnSelect, [DataExchange]),
        terminal: false,
        data_model: true,
        bounds: None,
    },
    CheckboxGroup => {
        identifier: Name,
        required: ["name", "data-source"],
        optional: ["label", "description", "min-selected-items", "max-selected-items", "required", "visible", "on-select-action"],
        forbidden: ["text"],
        actions: (OnSelect, [DataExchange]),
        terminal: false,
        data_model: true,
        bounds: Some(("min-selected-items", "max-selected-items")),
    },
    RadioButtonsGroup => {
        identifier: Name,
        required: ["name", "data-source"],
        optional: ["label", "description", "required", "visible", "on-select-action"],
        forbidden: ["text"],
        actions: (OnSelect, [DataExchange]),
        terminal: false,
        data_model: true,
        bounds: None,
    },
    ChipsSelector => {
        identifier: Name,
        required: ["name", "label", "data-source"],
        optional: ["description", "min-selected-items", "max-selected-items", "visible", "on-select-action"],
        forbidden: ["text"],
        actions: (OnSelect, [DataExchange]),
        terminal: false,
        data_model: true,
        bounds: Some(("min-selected-items", "max-selected-items")),
    },

    // Media
    Image => {
        identifier: None,
        required: ["src"],
        optional: ["width", "height", "scale-type", "aspect-ratio", "alt-text"],
        forbidden: ["label", "name"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    ImageCarousel => {
        identifier: Id,
        required: ["id", "images"],
        optional: ["scale-type", "aspect-ratio"],
        forbidden: ["label", "name", "src"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },

    // Uploads: payloads can only be submitted from a terminal screen, and a
    // screen never carries more than one upload widget.
    PhotoPicker => {
        identifier: Name,
        required: ["name", "label"],
        optional: ["description", "photo-source", "min-uploaded-photos", "max-uploaded-photos", "max-file-size-kb", "visible"],
        forbidden: ["text", "data-source"],
        actions: (None, []),
        terminal: true,
        data_model: false,
        bounds: Some(("min-uploaded-photos", "max-uploaded-photos")),
    },
    DocumentPicker => {
        identifier: Name,
        required: ["name", "label"],
        optional: ["description", "allowed-mime-types", "min-uploaded-documents", "max-uploaded-documents", "max-file-size-kb", "visible"],
        forbidden: ["text", "data-source"],
        actions: (None, []),
        terminal: true,
        data_model: false,
        bounds: Some(("min-uploaded-documents", "max-uploaded-documents")),
    },

    // Buttons and links
    Footer => {
        identifier: None,
        required: ["label", "on-click-action"],
        optional: ["left-caption", "center-caption", "right-caption", "enabled"],
        forbidden: ["text", "name"],
        actions: (OnClick, [Complete]),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    EmbeddedLink => {
        identifier: None,
        required: ["text", "on-click-action"],
        optional: ["visible"],
        forbidden: ["label", "name"],
        actions: (OnClick, [OpenUrl, Navigate, DataExchange]),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    OptIn => {
        identifier: Name,
        required: ["name", "label"],
        optional: ["required", "visible", "on-click-action"],
        forbidden: ["text", "data-source"],
        actions: (OnClick, [OpenUrl, Navigate]),
        terminal: false,
        data_model: false,
        bounds: None,
    },

    // Logic and containers
    If => {
        identifier: None,
        required: ["condition", "then"],
        optional: ["else"],
        forbidden: ["name", "label", "text"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    Switch => {
        identifier: None,
        required: ["value", "cases"],
        optional: [],
        forbidden: ["name", "label", "text"],
        actions: (None, []),
        terminal: false,
        data_model: false,
        bounds: None,
    },
    NavigationList => {
        identifier: Id,
        required: ["id", "list-items"],
        optional: ["label", "on-click-action"],
        forbidden: ["text", "data-source"],
        actions: (OnClick, [Navigate, DataExchange]),
        terminal: false,
        data_model: false,
        bounds: None,
    },
}
