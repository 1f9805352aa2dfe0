//! Whole crates.

use crate::error::{decoding, DecodeError, DecodeResult};
use crate::files::decode_id_to_file;
use crate::gast::{
    decode_declaration_group, decode_fun_decl, decode_global_decl, decode_type_decl, BodyDecoder,
};
use crate::llbc::LlbcBodyDecoder;
use crate::primitive::{decode_list, decode_record, decode_string};
use llbc_ast::gast::DeclarationGroup;
use llbc_ast::krate::GCrate;
use llbc_ast::llbc::LlbcCrate;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Key declarations by their id, rejecting an id which is declared twice.
fn index_by_id<Id, T>(
    namespace: &str,
    decls: Vec<T>,
    id: impl Fn(&T) -> Id,
) -> DecodeResult<BTreeMap<Id, T>>
where
    Id: Ord + Display,
{
    let mut map = BTreeMap::new();
    for decl in decls {
        let key = id(&decl);
        if map.contains_key(&key) {
            return Err(DecodeError::invariant(format!(
                "{} declaration {} is declared twice",
                namespace, key
            )));
        }
        map.insert(key, decl);
    }
    Ok(map)
}

/// Check that every declaration group only names declarations of the crate.
fn check_groups<B>(krate: &GCrate<B>) -> DecodeResult<()> {
    let missing = |namespace: &str, id: &dyn Display| {
        Err(DecodeError::invariant(format!(
            "declaration group names {} declaration {} which does not exist",
            namespace, id
        )))
    };
    for group in &krate.declarations {
        match group {
            DeclarationGroup::Type(group) => {
                if let Some(id) = group.ids().into_iter().find(|id| !krate.types.contains_key(id)) {
                    return missing("type", &id);
                }
            }
            DeclarationGroup::Fun(group) => {
                if let Some(id) = group
                    .ids()
                    .into_iter()
                    .find(|id| !krate.functions.contains_key(id))
                {
                    return missing("function", &id);
                }
            }
            DeclarationGroup::Global(id) => {
                if !krate.globals.contains_key(id) {
                    return missing("global", id);
                }
            }
        }
    }
    Ok(())
}

/// Decode a crate, decoding function and global bodies with `decoder`.
///
/// The file table is decoded before anything else, and lives only as long as this call.
#[tracing::instrument(level = "debug", skip_all)]
pub fn decode_crate<D: BodyDecoder>(decoder: &D, value: &Value) -> DecodeResult<GCrate<D::Body>> {
    decoding("crate", || {
        let [name, id_to_file, declarations, types, functions, globals] = decode_record(
            value,
            [
                "name",
                "id_to_file",
                "declarations",
                "types",
                "functions",
                "globals",
            ],
        )?;
        let files = decode_id_to_file(id_to_file)?;
        let name = decode_string(name)?;
        let declarations = decode_list(declarations, decode_declaration_group)?;
        let types = decode_list(types, |v| decode_type_decl(&files, v))?;
        let functions = decode_list(functions, |v| decode_fun_decl(decoder, &files, v))?;
        let globals = decode_list(globals, |v| decode_global_decl(decoder, &files, v))?;

        let krate = GCrate {
            name,
            declarations,
            types: index_by_id("type", types, |d| d.def_id)?,
            functions: index_by_id("function", functions, |d| d.def_id)?,
            globals: index_by_id("global", globals, |d| d.def_id)?,
        };
        check_groups(&krate)?;
        tracing::debug!(
            name = %krate.name,
            types = krate.types.len(),
            functions = krate.functions.len(),
            globals = krate.globals.len(),
            "decoded crate"
        );
        Ok(krate)
    })
}

/// Decode a crate whose bodies are LLBC statements.
pub fn decode_llbc_crate(value: &Value) -> DecodeResult<LlbcCrate> {
    decode_crate(&LlbcBodyDecoder, value)
}
