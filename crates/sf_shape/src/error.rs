use thiserror::Error;

/// Errors surfaced by the shape engine.
///
/// Decomposition never fails. Reconstruction fails only when no instance
/// can be obtained, and explicit text parsing fails when a text cannot be
/// turned into the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The type has no primitive parser, is not an enum and has no
    /// registered text converter.
    #[error("type `{type_path}` has no text conversion")]
    UnsupportedType { type_path: &'static str },
    /// The text is not a valid representation of the type.
    #[error("cannot parse {text:?} as `{type_path}`")]
    InvalidText {
        text: String,
        type_path: &'static str,
    },
    /// Neither an activator nor a reconstruction constructor is available.
    #[error("cannot construct an instance of `{type_path}`")]
    Construction { type_path: &'static str },
    /// A constructor argument is absent and its type has no default value.
    #[error("missing argument `{name}` for a constructor of `{type_path}`")]
    MissingArgument {
        name: &'static str,
        type_path: &'static str,
    },
    /// A value does not have the type the operation requires.
    #[error("expected a value of `{expected}`, found `{actual}`")]
    MismatchedType {
        expected: &'static str,
        actual: &'static str,
    },
}
