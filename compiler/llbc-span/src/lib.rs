//! Source locations attached to decoded IR nodes.
//!
//! The extraction tool refers to source files through compact [`FileId`]s, which are resolved to
//! [`FileName`]s once, while decoding. Everything in this crate is therefore already resolved: a
//! [`Span`] holds the file name itself and never a file id.

use llbc_macros::declare_id_type;
use std::fmt::{Display, Formatter};

declare_id_type!(LocalFileId, VirtualFileId);

/// Reference to a source file, as it appears in the serialized crate.
///
/// Local files are files of the crate being extracted, virtual files are files the compiler knows
/// by name only (e.g. from the standard library).
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileId {
    LocalId(LocalFileId),
    VirtualId(VirtualFileId),
}

/// The resolved identity of a source file.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileName {
    /// A path to a file on disk.
    Local(String),
    /// A name the compiler uses for a file that is not on disk.
    Virtual(String),
}

impl Display for FileName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FileName::Local(path) => write!(f, "{}", path),
            FileName::Virtual(name) => write!(f, "<{}>", name),
        }
    }
}

/// A position in a source file.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loc {
    /// The (1-based) line number.
    pub line: usize,
    /// The (0-based) column offset.
    pub col: usize,
}

impl Display for Loc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A range of characters in a single source file.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub file: FileName,
    pub beg: Loc,
    pub end: Loc,
}

impl Span {
    pub fn new(file: FileName, beg: Loc, end: Loc) -> Self {
        Self { file, beg, end }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.file, self.beg, self.end)
    }
}

/// Provenance attached to declarations and statements.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Meta {
    /// The span of the node itself.
    pub span: Span,
    /// The span of the code this node was generated from, if it came out of a macro expansion.
    pub generated_from_span: Option<Span>,
}

impl Meta {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            generated_from_span: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FileName, Loc, Span};

    #[test]
    fn test_span_display() {
        let span = Span::new(
            FileName::Virtual("core".to_owned()),
            Loc { line: 1, col: 0 },
            Loc { line: 1, col: 8 },
        );
        assert_eq!(span.to_string(), "<core>:1:0-1:8");
    }
}
