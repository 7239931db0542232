use serde::Serialize;
use tc_ast::Span;
use thiserror::Error;

/// Rendered in place of a declared type that is missing or unregistered.
pub const UNDEFINED: &str = "undefined";

/// A single inconsistency found by the checker.
///
/// `Display` renders the user-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Diagnostic {
    #[error("Function \"{name}\" does not exist")]
    UnknownFunction { name: String, span: Span },

    #[error("Type \"{tag}\" for argument \"{param}\" does not exist")]
    UnknownType {
        tag: String,
        param: String,
        span: Span,
    },

    #[error(
        "Type \"{}\" is incompatible with \"{}\"",
        .value,
        .expected.as_deref().unwrap_or(UNDEFINED)
    )]
    TypeMismatch {
        value: String,
        /// Display name of the declared type, `None` when it has none.
        expected: Option<String>,
        span: Span,
    },

    #[error("Property \"{found}\" does not exist on interface \"{interface}\". Did you mean Property \"{expected}\"?")]
    PropertyMismatch {
        found: String,
        expected: String,
        interface: String,
        span: Span,
    },
}

impl Diagnostic {
    pub fn span(&self) -> Span {
        match self {
            Diagnostic::UnknownFunction { span, .. }
            | Diagnostic::UnknownType { span, .. }
            | Diagnostic::TypeMismatch { span, .. }
            | Diagnostic::PropertyMismatch { span, .. } => *span,
        }
    }

    /// Stable code for tooling output.
    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::UnknownFunction { .. } => "TC001",
            Diagnostic::UnknownType { .. } => "TC002",
            Diagnostic::TypeMismatch { .. } => "TC003",
            Diagnostic::PropertyMismatch { .. } => "TC004",
        }
    }
}

/// Render diagnostics to their message strings, preserving order.
pub fn render(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(ToString::to_string).collect()
}
