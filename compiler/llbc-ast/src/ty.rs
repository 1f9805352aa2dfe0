//! Types and type declarations.

use crate::name::Name;
use llbc_macros::declare_id_type;
use llbc_span::Meta;
use std::fmt::{Display, Formatter};

declare_id_type!(
    TypeDeclId,
    TypeVarId,
    RegionVarId,
    RegionGroupId,
    FieldId,
    VariantId
);

/// A region, as it appears in signatures and type declarations.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region<Rid> {
    /// The `'static` region.
    Static,
    /// A region variable bound by the enclosing declaration.
    Var(Rid),
}

/// The single region left after region erasure.
///
/// Bodies are type checked before extraction, so the regions inside them carry no information.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErasedRegion {
    Erased,
}

impl<Rid: Display> Display for Region<Rid> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Static => write!(f, "'static"),
            Region::Var(id) => write!(f, "'_{}", id),
        }
    }
}

impl Display for ErasedRegion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "'_")
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Mut,
    Shared,
}

impl Display for RefKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RefKind::Mut => write!(f, "mut"),
            RefKind::Shared => write!(f, "shared"),
        }
    }
}

/// Types which are known to the extraction tool and have no declaration in the crate.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssumedTy {
    Box,
    Vec,
    Option,
}

impl AssumedTy {
    /// The number of region and type arguments an application of this type takes.
    pub fn arity(self) -> (usize, usize) {
        match self {
            AssumedTy::Box | AssumedTy::Vec | AssumedTy::Option => (0, 1),
        }
    }
}

impl Display for AssumedTy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AssumedTy::Box => write!(f, "alloc::boxed::Box"),
            AssumedTy::Vec => write!(f, "alloc::vec::Vec"),
            AssumedTy::Option => write!(f, "core::option::Option"),
        }
    }
}

/// The head of an ADT application.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeId {
    /// A type declared in the crate.
    Adt(TypeDeclId),
    /// Tuples are applications of this head to their component types, and never carry regions.
    Tuple,
    Assumed(AssumedTy),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntegerTy {
    Isize,
    I8,
    I16,
    I32,
    I64,
    I128,
    Usize,
    U8,
    U16,
    U32,
    U64,
    U128,
}

impl IntegerTy {
    pub const ALL: [IntegerTy; 12] = [
        IntegerTy::Isize,
        IntegerTy::I8,
        IntegerTy::I16,
        IntegerTy::I32,
        IntegerTy::I64,
        IntegerTy::I128,
        IntegerTy::Usize,
        IntegerTy::U8,
        IntegerTy::U16,
        IntegerTy::U32,
        IntegerTy::U64,
        IntegerTy::U128,
    ];

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            IntegerTy::Isize
                | IntegerTy::I8
                | IntegerTy::I16
                | IntegerTy::I32
                | IntegerTy::I64
                | IntegerTy::I128
        )
    }

    /// The width of the integer type in bits.
    ///
    /// Pointer-sized integers are assumed to be 64 bits wide.
    pub fn bit_width(self) -> u32 {
        match self {
            IntegerTy::I8 | IntegerTy::U8 => 8,
            IntegerTy::I16 | IntegerTy::U16 => 16,
            IntegerTy::I32 | IntegerTy::U32 => 32,
            IntegerTy::Isize | IntegerTy::Usize | IntegerTy::I64 | IntegerTy::U64 => 64,
            IntegerTy::I128 | IntegerTy::U128 => 128,
        }
    }

    /// The name of the type, as written in the serialized form.
    pub fn variant_name(self) -> &'static str {
        match self {
            IntegerTy::Isize => "Isize",
            IntegerTy::I8 => "I8",
            IntegerTy::I16 => "I16",
            IntegerTy::I32 => "I32",
            IntegerTy::I64 => "I64",
            IntegerTy::I128 => "I128",
            IntegerTy::Usize => "Usize",
            IntegerTy::U8 => "U8",
            IntegerTy::U16 => "U16",
            IntegerTy::U32 => "U32",
            IntegerTy::U64 => "U64",
            IntegerTy::U128 => "U128",
        }
    }
}

impl Display for IntegerTy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.variant_name().to_lowercase())
    }
}

/// A type, generic over the representation of its regions.
///
/// See [`SigTy`] and [`ETy`] for the two instantiations that occur in a crate.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty<R> {
    /// An application of a type constructor to region and type arguments.
    Adt(TypeId, Vec<R>, Vec<Ty<R>>),
    TypeVar(TypeVarId),
    Bool,
    Char,
    /// The `!` type.
    Never,
    Integer(IntegerTy),
    Str,
    Array(Box<Ty<R>>),
    Slice(Box<Ty<R>>),
    Ref(R, Box<Ty<R>>, RefKind),
}

/// Types with region variables, as found in signatures and type declarations.
pub type SigTy = Ty<Region<RegionVarId>>;

/// Types with erased regions, as found in bodies.
pub type ETy = Ty<ErasedRegion>;

impl<R> Ty<R> {
    /// The unit type, which is the empty tuple.
    pub fn unit() -> Self {
        Ty::Adt(TypeId::Tuple, vec![], vec![])
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Ty::Adt(TypeId::Tuple, regions, tys) if regions.is_empty() && tys.is_empty())
    }
}

/// A region parameter of a declaration.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionVar {
    pub index: RegionVarId,
    /// Anonymous regions have no name.
    pub name: Option<String>,
}

/// A type parameter of a declaration.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeVar {
    pub index: TypeVarId,
    pub name: String,
}

/// A set of region variables which share the same lifetime, together with the groups which
/// outlive it.
///
/// The groups of a declaration form a hierarchy, ordered so that parents come first.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGroup {
    pub id: RegionGroupId,
    pub regions: Vec<RegionVarId>,
    pub parents: Vec<RegionGroupId>,
}

pub type RegionGroups = Vec<RegionGroup>;

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub meta: Meta,
    /// Tuple structs have unnamed fields.
    pub name: Option<String>,
    pub ty: SigTy,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub meta: Meta,
    pub name: String,
    pub fields: Vec<Field>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDeclKind {
    Struct(Vec<Field>),
    Enum(Vec<Variant>),
    /// An external type whose definition is not available.
    Opaque,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub def_id: TypeDeclId,
    pub meta: Meta,
    pub name: Name,
    pub region_params: Vec<RegionVar>,
    pub type_params: Vec<TypeVar>,
    pub regions_hierarchy: RegionGroups,
    pub kind: TypeDeclKind,
}

impl TypeDecl {
    /// Look up a field of a structure, or of a variant of an enumeration.
    pub fn field(&self, variant: Option<VariantId>, field: FieldId) -> Option<&Field> {
        match (&self.kind, variant) {
            (TypeDeclKind::Struct(fields), None) => fields.get(field.index()),
            (TypeDeclKind::Enum(variants), Some(variant)) => variants
                .get(variant.index())
                .and_then(|v| v.fields.get(field.index())),
            _ => None,
        }
    }

    pub fn variant(&self, variant: VariantId) -> Option<&Variant> {
        match &self.kind {
            TypeDeclKind::Enum(variants) => variants.get(variant.index()),
            _ => None,
        }
    }
}
