//! # Flowdoc - Flow Document Compilation and Validation Engine
//!
//! **Flowdoc** is a bidirectional transformation engine between the visual
//! flow designer's loosely-typed editor model and the strict Flow Document
//! JSON schema consumed by the messaging platform, together with an
//! independent validator over the same rule set.
//!
//! ## Core Workflow
//!
//! Everything is driven by one immutable spec table. The primary workflow is:
//!
//! 1.  **Load Your Model**: Parse the designer's JSON into an `EditorModel`
//!     (or build one in code).
//! 2.  **Compile**: Run the `Compiler` to produce a schema-compliant
//!     `FlowDocument` plus any non-fatal warnings. Unsupported widgets are
//!     skipped, never fatal.
//! 3.  **Validate**: Gate submission on `validator::validate`, which returns
//!     the complete list of structural violations without ever throwing.
//! 4.  **Reverse**: When loading an existing document back into the designer,
//!     `reverse::parse_document` recovers the editable model, including the
//!     option lists stored in screen data declarations.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowdoc::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let model = EditorModel::from_json(
//!         r#"{
//!             "name": "feedback",
//!             "categories": ["OTHER"],
//!             "screens": [{
//!                 "id": "RATE",
//!                 "title": "Rate us",
//!                 "data": {
//!                     "body": "How did we do?",
//!                     "footer": { "label": "Done" },
//!                     "actions": [{
//!                         "kind": "dropdown",
//!                         "data": {
//!                             "label": "Score",
//!                             "options": [
//!                                 { "id": "good", "title": "Good" },
//!                                 { "id": "bad", "title": "Bad" }
//!                             ]
//!                         }
//!                     }]
//!                 }
//!             }]
//!         }"#,
//!     )?;
//!
//!     let output = Compiler::new(&model).generate()?;
//!     for warning in &output.warnings {
//!         eprintln!("warning: {}", warning);
//!     }
//!
//!     let report = flowdoc::validator::validate(&output.document);
//!     assert!(report.valid, "{:?}", report.errors);
//!
//!     println!("{}", output.document.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod document;
pub mod editor;
pub mod error;
pub mod prelude;
pub mod registry;
pub mod reverse;
pub mod validator;
