//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the flowdoc crate so callers
//! can bring the whole compile/validate/reverse surface in with one `use`.

// Compilation surface
pub use crate::compiler::{CompilationOutput, Compiler};
pub use crate::reverse::{parse_document, parse_screen};
pub use crate::validator::{ValidationReport, validate, validate_json};

// Registry
pub use crate::registry::{
    ActionName, ActionSlot, ComponentKind, ComponentSpec, IdentifierKind, Registry,
};

// Data models
pub use crate::document::{
    DataModelEntry, FlowDocument, Layout, OptionItem, TargetNode, TargetScreen,
};
pub use crate::editor::{
    ActionDescriptor, ActionKind, EditorComponent, EditorFooter, EditorModel, EditorScreen,
    ScreenData,
};

// Error types
pub use crate::error::{CompileError, CompileWarning, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
