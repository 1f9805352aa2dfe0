use llbc_ast::ty::IntegerTy;
use llbc_macros::declare_error_type;
use miette::Diagnostic;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use thiserror::Error;

declare_error_type! {
    #[error("decode error: {0}")]
    pub enum DecodeError {
        SchemaMismatch(SchemaMismatchError),
        UnknownFile(UnknownFileError),
        ScalarOutOfRange(ScalarOutOfRangeError),
        InvariantViolation(InvariantViolationError),
    }
}

/// Handy type alias for all decoding errors.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// The decoders a failure propagated through.
///
/// Decoders are pushed as the error bubbles up, so the innermost decoder comes first. The path is
/// displayed from the outermost decoder to the innermost one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodePath(Vec<&'static str>);

impl DecodePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, decoder: &'static str) {
        self.0.push(decoder);
    }

    /// The decoders, from the outermost to the innermost.
    pub fn decoders(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().rev().copied()
    }

    pub fn innermost(&self) -> Option<&'static str> {
        self.0.first().copied()
    }
}

impl Display for DecodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        write!(f, "{}", self.decoders().collect::<Vec<_>>().join(" > "))
    }
}

#[derive(Error, Diagnostic, Debug)]
#[diagnostic(
    code(decode::schema_mismatch),
    help("the document does not follow the schema of the extraction tool")
)]
#[error("expected {expected}, found {found} (in {path})")]
pub struct SchemaMismatchError {
    pub expected: String,
    pub found: String,
    pub path: DecodePath,
}

#[derive(Error, Diagnostic, Debug)]
#[diagnostic(
    code(decode::unknown_file),
    help("every file id must be listed in the `id_to_file` table of the crate")
)]
#[error("span refers to unknown file {file_id} (in {path})")]
pub struct UnknownFileError {
    pub file_id: String,
    pub path: DecodePath,
}

#[derive(Error, Diagnostic, Debug)]
#[diagnostic(code(decode::scalar_out_of_range))]
#[error("literal {value} does not fit in type {ty} (in {path})")]
pub struct ScalarOutOfRangeError {
    pub value: String,
    pub ty: IntegerTy,
    pub path: DecodePath,
}

#[derive(Error, Diagnostic, Debug)]
#[diagnostic(code(decode::invariant_violation))]
#[error("{message} (in {path})")]
pub struct InvariantViolationError {
    pub message: String,
    pub path: DecodePath,
}

impl DecodeError {
    /// A node which does not have the expected shape.
    pub fn schema(expected: impl Into<String>, found: &Value) -> Self {
        DecodeError::SchemaMismatch(SchemaMismatchError {
            expected: expected.into(),
            found: describe(found),
            path: DecodePath::new(),
        })
    }

    /// A tagged variant whose tag is not a variant of the expected type.
    pub fn unknown_variant(ty: &str, tag: &str) -> Self {
        DecodeError::SchemaMismatch(SchemaMismatchError {
            expected: format!("a variant of {}", ty),
            found: format!("variant `{}`", tag),
            path: DecodePath::new(),
        })
    }

    pub fn unknown_file(file_id: impl Display) -> Self {
        DecodeError::UnknownFile(UnknownFileError {
            file_id: file_id.to_string(),
            path: DecodePath::new(),
        })
    }

    pub fn out_of_range(value: impl Into<String>, ty: IntegerTy) -> Self {
        DecodeError::ScalarOutOfRange(ScalarOutOfRangeError {
            value: value.into(),
            ty,
            path: DecodePath::new(),
        })
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        DecodeError::InvariantViolation(InvariantViolationError {
            message: message.into(),
            path: DecodePath::new(),
        })
    }

    pub fn path(&self) -> &DecodePath {
        match self {
            DecodeError::SchemaMismatch(e) => &e.path,
            DecodeError::UnknownFile(e) => &e.path,
            DecodeError::ScalarOutOfRange(e) => &e.path,
            DecodeError::InvariantViolation(e) => &e.path,
        }
    }

    fn path_mut(&mut self) -> &mut DecodePath {
        match self {
            DecodeError::SchemaMismatch(e) => &mut e.path,
            DecodeError::UnknownFile(e) => &mut e.path,
            DecodeError::ScalarOutOfRange(e) => &mut e.path,
            DecodeError::InvariantViolation(e) => &mut e.path,
        }
    }
}

/// Record the decoder a failure propagates through.
pub trait Within {
    fn within(self, decoder: &'static str) -> Self;
}

impl<T> Within for DecodeResult<T> {
    fn within(self, decoder: &'static str) -> Self {
        self.map_err(|mut err| {
            err.path_mut().push(decoder);
            err
        })
    }
}

/// Run a decoder body, recording `decoder` on the path of any failure, including the ones
/// returned early with `?`.
pub fn decoding<T>(
    decoder: &'static str,
    decode: impl FnOnce() -> DecodeResult<T>,
) -> DecodeResult<T> {
    decode().within(decoder)
}

/// A short rendition of a node for error messages.
fn describe(value: &Value) -> String {
    const MAX_LEN: usize = 60;
    let text = value.to_string();
    if text.chars().count() <= MAX_LEN {
        return text;
    }
    let truncated = text.chars().take(MAX_LEN).collect::<String>();
    format!("{}...", truncated)
}
