//! Types.
//!
//! The type grammar is the same before and after region erasure, only the regions differ. Type
//! declarations and signatures hold region variables, while bodies only hold erased regions. The
//! type decoder is therefore generic over a [`RegionDecoder`], which decodes the region leaves.

use crate::error::{decoding, DecodeError, DecodeResult};
use crate::primitive::{decode_id, decode_list, decode_tuple, decode_unary, decode_variant};
use llbc_ast::ty::{
    AssumedTy, ETy, ErasedRegion, IntegerTy, RefKind, Region, RegionVarId, SigTy, Ty, TypeId,
};
use serde_json::Value;

/// Strategy for decoding the regions of a type.
pub trait RegionDecoder {
    type Region;

    fn decode_region(&self, value: &Value) -> DecodeResult<Self::Region>;
}

/// Regions of type declarations and signatures: `'static` or a region variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureRegions;

impl RegionDecoder for SignatureRegions {
    type Region = Region<RegionVarId>;

    fn decode_region(&self, value: &Value) -> DecodeResult<Self::Region> {
        decoding("region", || match decode_variant(value)? {
            ("Static", None) => Ok(Region::Static),
            ("Var", Some(payload)) => decode_unary(payload, decode_id).map(Region::Var),
            (tag, _) => Err(DecodeError::unknown_variant("Region", tag)),
        })
    }
}

/// Regions of bodies, which have all been erased.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErasedRegions;

impl RegionDecoder for ErasedRegions {
    type Region = ErasedRegion;

    fn decode_region(&self, value: &Value) -> DecodeResult<Self::Region> {
        decoding("erased_region", || match decode_variant(value)? {
            ("Erased", None) => Ok(ErasedRegion::Erased),
            (tag, _) => Err(DecodeError::unknown_variant("ErasedRegion", tag)),
        })
    }
}

pub fn decode_integer_ty(value: &Value) -> DecodeResult<IntegerTy> {
    decoding("integer_ty", || match decode_variant(value)? {
        (tag, None) => {
            integer_ty_from_tag(tag).ok_or_else(|| DecodeError::unknown_variant("IntegerTy", tag))
        }
        (tag, Some(_)) => Err(DecodeError::unknown_variant("IntegerTy", tag)),
    })
}

/// The integer type whose variant name is `tag`, as in `U32`.
pub fn integer_ty_from_tag(tag: &str) -> Option<IntegerTy> {
    IntegerTy::ALL
        .iter()
        .copied()
        .find(|ty| ty.variant_name() == tag)
}

pub fn decode_ref_kind(value: &Value) -> DecodeResult<RefKind> {
    decoding("ref_kind", || match decode_variant(value)? {
        ("Mut", None) => Ok(RefKind::Mut),
        ("Shared", None) => Ok(RefKind::Shared),
        (tag, _) => Err(DecodeError::unknown_variant("RefKind", tag)),
    })
}

pub fn decode_assumed_ty(value: &Value) -> DecodeResult<AssumedTy> {
    decoding("assumed_ty", || match decode_variant(value)? {
        ("Box", None) => Ok(AssumedTy::Box),
        ("Vec", None) => Ok(AssumedTy::Vec),
        ("Option", None) => Ok(AssumedTy::Option),
        (tag, _) => Err(DecodeError::unknown_variant("AssumedTy", tag)),
    })
}

pub fn decode_type_id(value: &Value) -> DecodeResult<TypeId> {
    decoding("type_id", || match decode_variant(value)? {
        ("Adt", Some(payload)) => decode_unary(payload, decode_id).map(TypeId::Adt),
        ("Tuple", None) => Ok(TypeId::Tuple),
        ("Assumed", Some(payload)) => {
            decode_unary(payload, decode_assumed_ty).map(TypeId::Assumed)
        }
        (tag, _) => Err(DecodeError::unknown_variant("TypeId", tag)),
    })
}

/// Decode a type, with the regions decoded by `regions`.
pub fn decode_ty<D: RegionDecoder>(regions: &D, value: &Value) -> DecodeResult<Ty<D::Region>> {
    let boxed = |payload: &Value| decode_unary(payload, |v| decode_ty(regions, v)).map(Box::new);
    decoding("ty", || match decode_variant(value)? {
        ("Adt", Some(payload)) => {
            let [id, region_args, type_args] = decode_tuple(payload)?;
            let id = decode_type_id(id)?;
            let region_args = decode_list(region_args, |v| regions.decode_region(v))?;
            let type_args = decode_list(type_args, |v| decode_ty(regions, v))?;
            check_type_application(id, region_args.len(), type_args.len())?;
            Ok(Ty::Adt(id, region_args, type_args))
        }
        ("TypeVar", Some(payload)) => decode_unary(payload, decode_id).map(Ty::TypeVar),
        ("Bool", None) => Ok(Ty::Bool),
        ("Char", None) => Ok(Ty::Char),
        ("Never", None) => Ok(Ty::Never),
        ("Integer", Some(payload)) => decode_unary(payload, decode_integer_ty).map(Ty::Integer),
        ("Str", None) => Ok(Ty::Str),
        ("Array", Some(payload)) => boxed(payload).map(Ty::Array),
        ("Slice", Some(payload)) => boxed(payload).map(Ty::Slice),
        ("Ref", Some(payload)) => {
            let [region, ty, kind] = decode_tuple(payload)?;
            Ok(Ty::Ref(
                regions.decode_region(region)?,
                Box::new(decode_ty(regions, ty)?),
                decode_ref_kind(kind)?,
            ))
        }
        (tag, _) => Err(DecodeError::unknown_variant("Ty", tag)),
    })
}

/// Check the number of arguments of a type application against what the type id allows.
///
/// Tuples never take regions, and the builtin types have a fixed arity. Arguments of ADTs are
/// checked against their declaration by consumers, which have all declarations at hand.
fn check_type_application(id: TypeId, regions: usize, types: usize) -> DecodeResult<()> {
    match id {
        TypeId::Tuple if regions != 0 => Err(DecodeError::invariant(format!(
            "tuple type applied to {} region arguments",
            regions
        ))),
        TypeId::Assumed(assumed) if assumed.arity() != (regions, types) => {
            let (expected_regions, expected_types) = assumed.arity();
            Err(DecodeError::invariant(format!(
                "builtin type {} expects {} region and {} type arguments, but got {} and {}",
                assumed, expected_regions, expected_types, regions, types
            )))
        }
        _ => Ok(()),
    }
}

/// Decode a type of a signature or a type declaration.
pub fn decode_sig_ty(value: &Value) -> DecodeResult<SigTy> {
    decode_ty(&SignatureRegions, value)
}

/// Decode a type of a body, where regions are erased.
pub fn decode_ety(value: &Value) -> DecodeResult<ETy> {
    decode_ty(&ErasedRegions, value)
}
