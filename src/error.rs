use thiserror::Error;

/// Errors that can occur during forward compilation.
///
/// The forward compiler is deliberately lenient: most defects degrade to
/// [`CompileWarning`]s so an author can inspect the output of a half-finished
/// flow. Only preconditions the caller must fix are fatal.
#[derive(Error, Debug, Clone)]
pub enum CompileError {
    #[error("Failed to parse editor model JSON: {0}")]
    ModelParseError(String),

    #[error("Flow model has no name; assign a name before compiling")]
    MissingDocumentName,
}

/// Non-fatal diagnostics emitted while compiling a flow model.
///
/// A warning always means a node was skipped; the rest of the screen is
/// compiled normally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileWarning {
    #[error("Screen '{screen_id}': component kind '{kind}' is not supported and was skipped")]
    UnknownComponentKind { screen_id: String, kind: String },

    #[error(
        "Screen '{screen_id}': '{kind}' branch '{branch}' is not a list of components and was skipped"
    )]
    MalformedBranch {
        screen_id: String,
        kind: String,
        branch: String,
    },
}

/// A single structural violation found by the validator.
///
/// The validator never throws; violations are accumulated and rendered into
/// the string list of a [`crate::validator::ValidationReport`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Screen {screen}: unknown component type '{kind}'. Supported types are: {supported}")]
    UnknownComponentKind {
        screen: usize,
        kind: String,
        supported: String,
    },

    #[error("Screen {screen}: '{component}' is missing required field '{field}' or it is empty")]
    MissingRequiredField {
        screen: usize,
        component: String,
        field: String,
    },

    #[error("Screen {screen}: '{component}' must not carry field '{field}'")]
    ForbiddenFieldPresent {
        screen: usize,
        component: String,
        field: String,
    },

    #[error(
        "Screen {screen}: '{component}' identifier '{value}' is invalid; identifiers may only contain letters and underscores"
    )]
    InvalidIdentifierFormat {
        screen: usize,
        component: String,
        value: String,
    },

    #[error(
        "Screen {screen}: '{component}' action '{name}' is not permitted here; allowed: {allowed}"
    )]
    InvalidActionName {
        screen: usize,
        component: String,
        name: String,
        allowed: String,
    },

    #[error("Screen {screen}: '{component}' data-source '{value}' is invalid: {reason}")]
    InvalidDataSourceFormat {
        screen: usize,
        component: String,
        value: String,
        reason: String,
    },

    #[error("Screen {screen}: {message}")]
    StructuralConstraintViolation { screen: usize, message: String },

    #[error("Document: {message}")]
    DocumentConstraintViolation { message: String },

    #[error("Failed to parse Flow Document JSON: {0}")]
    DocumentParseFailure(String),
}
