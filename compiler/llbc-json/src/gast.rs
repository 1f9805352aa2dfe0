//! Declarations.
//!
//! The statement grammar of bodies is not known here. Function and global declarations are
//! decoded with a [`BodyDecoder`] supplied by the caller, and this module only decodes the locals
//! framing the body.

use crate::error::{decoding, DecodeError, DecodeResult};
use crate::files::{decode_meta, decode_name, FileTable};
use crate::primitive::{
    decode_id, decode_list, decode_option, decode_record, decode_string, decode_unary,
    decode_usize, decode_variant,
};
use crate::ty::{decode_ety, decode_sig_ty};
use llbc_ast::gast::{
    DeclarationGroup, FunSig, GDeclarationGroup, GExprBody, GFunDecl, GGlobalDecl, Var,
};
use llbc_ast::ty::{Field, RegionGroup, RegionVar, TypeDecl, TypeDeclKind, TypeVar, Variant};
use serde_json::Value;

/// Decoder for the payload of a body, given the file table of the crate.
pub trait BodyDecoder {
    type Body;

    fn decode_body(&self, files: &FileTable, value: &Value) -> DecodeResult<Self::Body>;
}

impl<B, F> BodyDecoder for F
where
    F: Fn(&FileTable, &Value) -> DecodeResult<B>,
{
    type Body = B;

    fn decode_body(&self, files: &FileTable, value: &Value) -> DecodeResult<B> {
        self(files, value)
    }
}

/// Keep bodies as they are, without interpreting them.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBodyDecoder;

impl BodyDecoder for RawBodyDecoder {
    type Body = Value;

    fn decode_body(&self, _: &FileTable, value: &Value) -> DecodeResult<Value> {
        Ok(value.clone())
    }
}

pub fn decode_region_var(value: &Value) -> DecodeResult<RegionVar> {
    decoding("region_var", || {
        let [index, name] = decode_record(value, ["index", "name"])?;
        Ok(RegionVar {
            index: decode_id(index)?,
            name: decode_option(name, decode_string)?,
        })
    })
}

pub fn decode_type_var(value: &Value) -> DecodeResult<TypeVar> {
    decoding("type_var", || {
        let [index, name] = decode_record(value, ["index", "name"])?;
        Ok(TypeVar {
            index: decode_id(index)?,
            name: decode_string(name)?,
        })
    })
}

pub fn decode_region_group(value: &Value) -> DecodeResult<RegionGroup> {
    decoding("region_group", || {
        let [id, regions, parents] = decode_record(value, ["id", "regions", "parents"])?;
        Ok(RegionGroup {
            id: decode_id(id)?,
            regions: decode_list(regions, decode_id)?,
            parents: decode_list(parents, decode_id)?,
        })
    })
}

fn decode_field(files: &FileTable, value: &Value) -> DecodeResult<Field> {
    decoding("field", || {
        let [meta, name, ty] = decode_record(value, ["meta", "name", "ty"])?;
        Ok(Field {
            meta: decode_meta(files, meta)?,
            name: decode_option(name, decode_string)?,
            ty: decode_sig_ty(ty)?,
        })
    })
}

fn decode_variant_decl(files: &FileTable, value: &Value) -> DecodeResult<Variant> {
    decoding("variant", || {
        let [meta, name, fields] = decode_record(value, ["meta", "name", "fields"])?;
        Ok(Variant {
            meta: decode_meta(files, meta)?,
            name: decode_string(name)?,
            fields: decode_list(fields, |v| decode_field(files, v))?,
        })
    })
}

fn decode_type_decl_kind(files: &FileTable, value: &Value) -> DecodeResult<TypeDeclKind> {
    decoding("type_decl_kind", || match decode_variant(value)? {
        ("Struct", Some(payload)) => {
            decode_unary(payload, |v| decode_list(v, |f| decode_field(files, f)))
                .map(TypeDeclKind::Struct)
        }
        ("Enum", Some(payload)) => {
            decode_unary(payload, |v| decode_list(v, |f| decode_variant_decl(files, f)))
                .map(TypeDeclKind::Enum)
        }
        ("Opaque", None) => Ok(TypeDeclKind::Opaque),
        (tag, _) => Err(DecodeError::unknown_variant("TypeDeclKind", tag)),
    })
}

pub fn decode_type_decl(files: &FileTable, value: &Value) -> DecodeResult<TypeDecl> {
    decoding("type_decl", || {
        let [def_id, meta, name, region_params, type_params, regions_hierarchy, kind] =
            decode_record(
                value,
                [
                    "def_id",
                    "meta",
                    "name",
                    "region_params",
                    "type_params",
                    "regions_hierarchy",
                    "kind",
                ],
            )?;
        let decl = TypeDecl {
            def_id: decode_id(def_id)?,
            meta: decode_meta(files, meta)?,
            name: decode_name(name)?,
            region_params: decode_list(region_params, decode_region_var)?,
            type_params: decode_list(type_params, decode_type_var)?,
            regions_hierarchy: decode_list(regions_hierarchy, decode_region_group)?,
            kind: decode_type_decl_kind(files, kind)?,
        };
        tracing::debug!(id = %decl.def_id, name = %decl.name, "decoded type declaration");
        Ok(decl)
    })
}

pub fn decode_fun_sig(value: &Value) -> DecodeResult<FunSig> {
    decoding("signature", || {
        let [regions, early_bound, hierarchy, type_params, inputs, output] =
            decode_record(
                value,
                [
                    "region_params",
                    "num_early_bound_regions",
                    "regions_hierarchy",
                    "type_params",
                    "inputs",
                    "output",
                ],
            )?;
        Ok(FunSig {
            region_params: decode_list(regions, decode_region_var)?,
            num_early_bound_regions: decode_usize(early_bound)?,
            regions_hierarchy: decode_list(hierarchy, decode_region_group)?,
            type_params: decode_list(type_params, decode_type_var)?,
            inputs: decode_list(inputs, decode_sig_ty)?,
            output: decode_sig_ty(output)?,
        })
    })
}

pub fn decode_var(value: &Value) -> DecodeResult<Var> {
    decoding("var", || {
        let [index, name, ty] = decode_record(value, ["index", "name", "ty"])?;
        Ok(Var {
            index: decode_id(index)?,
            name: decode_option(name, decode_string)?,
            ty: decode_ety(ty)?,
        })
    })
}

/// Decode a body and its local variables, decoding the payload with `decoder`.
pub fn decode_expr_body<D: BodyDecoder>(
    decoder: &D,
    files: &FileTable,
    value: &Value,
) -> DecodeResult<GExprBody<D::Body>> {
    decoding("body", || {
        let [meta, arg_count, locals, body] =
            decode_record(value, ["meta", "arg_count", "locals", "body"])?;
        let meta = decode_meta(files, meta)?;
        let arg_count = decode_usize(arg_count)?;
        let locals = decode_list(locals, decode_var)?;
        // Local 0 is the return value, the arguments come right after it.
        if locals.is_empty() || arg_count > locals.len() - 1 {
            return Err(DecodeError::invariant(format!(
                "body declares {} arguments but only {} locals",
                arg_count,
                locals.len()
            )));
        }
        Ok(GExprBody {
            meta,
            arg_count,
            locals,
            body: decoder.decode_body(files, body)?,
        })
    })
}

pub fn decode_fun_decl<D: BodyDecoder>(
    decoder: &D,
    files: &FileTable,
    value: &Value,
) -> DecodeResult<GFunDecl<D::Body>> {
    decoding("fun_decl", || {
        let [def_id, meta, name, signature, body] =
            decode_record(value, ["def_id", "meta", "name", "signature", "body"])?;
        let decl = GFunDecl {
            def_id: decode_id(def_id)?,
            meta: decode_meta(files, meta)?,
            name: decode_name(name)?,
            signature: decode_fun_sig(signature)?,
            body: decode_option(body, |v| decode_expr_body(decoder, files, v))?,
        };
        tracing::debug!(id = %decl.def_id, name = %decl.name, "decoded function declaration");
        Ok(decl)
    })
}

pub fn decode_global_decl<D: BodyDecoder>(
    decoder: &D,
    files: &FileTable,
    value: &Value,
) -> DecodeResult<GGlobalDecl<D::Body>> {
    decoding("global_decl", || {
        let [def_id, meta, name, ty, body] =
            decode_record(value, ["def_id", "meta", "name", "ty", "body"])?;
        let decl = GGlobalDecl {
            def_id: decode_id(def_id)?,
            meta: decode_meta(files, meta)?,
            name: decode_name(name)?,
            ty: decode_ety(ty)?,
            body: decode_option(body, |v| decode_expr_body(decoder, files, v))?,
        };
        tracing::debug!(id = %decl.def_id, name = %decl.name, "decoded global declaration");
        Ok(decl)
    })
}

fn decode_group<Id: From<usize>>(value: &Value) -> DecodeResult<GDeclarationGroup<Id>> {
    match decode_variant(value)? {
        ("NonRec", Some(payload)) => decode_unary(payload, decode_id).map(GDeclarationGroup::NonRec),
        ("Rec", Some(payload)) => {
            let ids = decode_unary(payload, |v| decode_list(v, decode_id))?;
            if ids.is_empty() {
                return Err(DecodeError::invariant("recursive declaration group has no members"));
            }
            Ok(GDeclarationGroup::Rec(ids))
        }
        (tag, _) => Err(DecodeError::unknown_variant("declaration group", tag)),
    }
}

fn decode_global_group<Id: From<usize>>(value: &Value) -> DecodeResult<Id> {
    match decode_variant(value)? {
        ("NonRec", Some(payload)) => decode_unary(payload, decode_id),
        // Globals cannot be mutually recursive.
        ("Rec", Some(_)) => Err(DecodeError::schema("a non-recursive global group", value)),
        (tag, _) => Err(DecodeError::unknown_variant("declaration group", tag)),
    }
}

pub fn decode_declaration_group(value: &Value) -> DecodeResult<DeclarationGroup> {
    decoding("declaration_group", || match decode_variant(value)? {
        ("Type", Some(payload)) => decode_unary(payload, decode_group).map(DeclarationGroup::Type),
        ("Fun", Some(payload)) => decode_unary(payload, decode_group).map(DeclarationGroup::Fun),
        ("Global", Some(payload)) => {
            decode_unary(payload, decode_global_group).map(DeclarationGroup::Global)
        }
        (tag, _) => Err(DecodeError::unknown_variant("DeclarationGroup", tag)),
    })
}
