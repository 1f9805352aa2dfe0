//! File table, spans and names.
//!
//! Spans refer to their file through a [`FileId`]. The table mapping ids to file names comes with
//! the crate, and must be decoded before anything holding a span. Spans are resolved as they are
//! decoded, so the decoded tree only ever holds file names.

use crate::error::{decoding, DecodeError, DecodeResult};
use crate::primitive::{
    decode_id, decode_list, decode_option, decode_record, decode_string, decode_tuple,
    decode_unary, decode_usize, decode_variant,
};
use llbc_ast::name::{Name, PathElem};
use llbc_span::{FileId, FileName, Loc, Meta, Span};
use serde_json::Value;
use std::collections::BTreeMap;

/// The mapping from file ids to file names of a single crate.
///
/// The table is read-only once decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTable {
    files: BTreeMap<FileId, FileName>,
}

impl FileTable {
    pub fn get(&self, id: FileId) -> Option<&FileName> {
        self.files.get(&id)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve a file id, failing if the table does not know it.
    pub fn resolve(&self, id: FileId) -> DecodeResult<FileName> {
        self.get(id).cloned().ok_or_else(|| {
            let id = match id {
                FileId::LocalId(id) => format!("LocalId({})", id),
                FileId::VirtualId(id) => format!("VirtualId({})", id),
            };
            DecodeError::unknown_file(id)
        })
    }
}

pub fn decode_file_id(value: &Value) -> DecodeResult<FileId> {
    decoding("file_id", || match decode_variant(value)? {
        ("LocalId", Some(payload)) => decode_unary(payload, decode_id).map(FileId::LocalId),
        ("VirtualId", Some(payload)) => decode_unary(payload, decode_id).map(FileId::VirtualId),
        (tag, _) => Err(DecodeError::unknown_variant("FileId", tag)),
    })
}

pub fn decode_file_name(value: &Value) -> DecodeResult<FileName> {
    decoding("file_name", || match decode_variant(value)? {
        ("Local", Some(payload)) => decode_unary(payload, decode_string).map(FileName::Local),
        ("Virtual", Some(payload)) => decode_unary(payload, decode_string).map(FileName::Virtual),
        (tag, _) => Err(DecodeError::unknown_variant("FileName", tag)),
    })
}

/// Decode the `[[file_id, file_name], ...]` table of a crate.
pub fn decode_id_to_file(value: &Value) -> DecodeResult<FileTable> {
    decoding("id_to_file", || {
        let entries = decode_list(value, |entry| {
            let [id, name] = decode_tuple(entry)?;
            Ok((decode_file_id(id)?, decode_file_name(name)?))
        })?;
        let mut files = BTreeMap::new();
        for (id, name) in entries {
            if let Some(previous) = files.insert(id, name) {
                return Err(DecodeError::invariant(format!(
                    "file id {:?} is listed twice, the first time for {}",
                    id, previous
                )));
            }
        }
        tracing::trace!(files = files.len(), "decoded file table");
        Ok(FileTable { files })
    })
}

pub fn decode_loc(value: &Value) -> DecodeResult<Loc> {
    decoding("loc", || {
        let [line, col] = decode_record(value, ["line", "col"])?;
        Ok(Loc {
            line: decode_usize(line)?,
            col: decode_usize(col)?,
        })
    })
}

/// Decode a span, resolving its file through the table.
pub fn decode_span(files: &FileTable, value: &Value) -> DecodeResult<Span> {
    decoding("span", || {
        let [file_id, beg, end] = decode_record(value, ["file_id", "beg", "end"])?;
        let file = files.resolve(decode_file_id(file_id)?)?;
        Ok(Span::new(file, decode_loc(beg)?, decode_loc(end)?))
    })
}

pub fn decode_meta(files: &FileTable, value: &Value) -> DecodeResult<Meta> {
    decoding("meta", || {
        let [span, generated_from_span] = decode_record(value, ["span", "generated_from_span"])?;
        Ok(Meta {
            span: decode_span(files, span)?,
            generated_from_span: decode_option(generated_from_span, |v| decode_span(files, v))?,
        })
    })
}

fn decode_path_elem(value: &Value) -> DecodeResult<PathElem> {
    match decode_variant(value)? {
        ("Ident", Some(payload)) => decode_unary(payload, decode_string).map(PathElem::Ident),
        ("Disambiguator", Some(payload)) => {
            decode_unary(payload, decode_usize).map(PathElem::Disambiguator)
        }
        (tag, _) => Err(DecodeError::unknown_variant("PathElem", tag)),
    }
}

pub fn decode_name(value: &Value) -> DecodeResult<Name> {
    decoding("name", || decode_list(value, decode_path_elem).map(Name::new))
}
