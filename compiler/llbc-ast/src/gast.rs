//! Declarations shared by every flavour of bodies.
//!
//! Function and global declarations are generic over the type of their body. The crate decoder
//! does not know the statement grammar: it is handed a decoder for the body, and only frames the
//! body with its local variables.

use crate::expr::VarId;
use crate::name::Name;
use crate::ty::{ETy, RegionGroups, RegionVar, SigTy, TypeDeclId, TypeVar};
use llbc_macros::declare_id_type;
use llbc_span::Meta;

declare_id_type!(FunDeclId, GlobalDeclId);

/// A local variable of a body.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    pub index: VarId,
    /// Compiler-introduced temporaries have no name.
    pub name: Option<String>,
    pub ty: ETy,
}

/// A body, together with the local variables it operates on.
///
/// The locals are ordered as follows: the return value first, then the `arg_count` arguments,
/// and then the remaining local variables.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GExprBody<T> {
    pub meta: Meta,
    pub arg_count: usize,
    pub locals: Vec<Var>,
    pub body: T,
}

impl<T> GExprBody<T> {
    pub fn return_var(&self) -> Option<&Var> {
        self.locals.first()
    }

    pub fn args(&self) -> &[Var] {
        let end = (self.arg_count + 1).min(self.locals.len());
        self.locals.get(1..end).unwrap_or(&[])
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunSig {
    pub region_params: Vec<RegionVar>,
    /// The first `num_early_bound_regions` region parameters are early bound.
    pub num_early_bound_regions: usize,
    pub regions_hierarchy: RegionGroups,
    pub type_params: Vec<TypeVar>,
    pub inputs: Vec<SigTy>,
    pub output: SigTy,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GFunDecl<T> {
    pub def_id: FunDeclId,
    pub meta: Meta,
    pub name: Name,
    pub signature: FunSig,
    /// External functions have no body.
    pub body: Option<GExprBody<T>>,
}

impl<T> GFunDecl<T> {
    pub fn is_opaque(&self) -> bool {
        self.body.is_none()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GGlobalDecl<T> {
    pub def_id: GlobalDeclId,
    pub meta: Meta,
    pub name: Name,
    pub ty: ETy,
    /// External globals have no body.
    pub body: Option<GExprBody<T>>,
}

impl<T> GGlobalDecl<T> {
    pub fn is_opaque(&self) -> bool {
        self.body.is_none()
    }
}

/// A strongly connected component of the declaration dependency graph.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GDeclarationGroup<Id> {
    NonRec(Id),
    Rec(Vec<Id>),
}

impl<Id: Copy> GDeclarationGroup<Id> {
    pub fn ids(&self) -> Vec<Id> {
        match self {
            GDeclarationGroup::NonRec(id) => vec![*id],
            GDeclarationGroup::Rec(ids) => ids.clone(),
        }
    }
}

/// A declaration group, tagged by the namespace of the declarations it groups.
///
/// Globals cannot be mutually recursive, so a global group is always a single declaration.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationGroup {
    Type(GDeclarationGroup<TypeDeclId>),
    Fun(GDeclarationGroup<FunDeclId>),
    Global(GlobalDeclId),
}

#[cfg(test)]
mod tests {
    use super::{GDeclarationGroup, GExprBody, Var};
    use crate::expr::VarId;
    use crate::ty::{IntegerTy, Ty};
    use llbc_span::{FileName, Loc, Meta, Span};

    fn local(index: usize) -> Var {
        Var {
            index: VarId::new(index),
            name: None,
            ty: Ty::Integer(IntegerTy::U32),
        }
    }

    #[test]
    fn test_body_args_skip_return_slot() {
        let span = Span::new(
            FileName::Local("a.rs".to_owned()),
            Loc { line: 1, col: 0 },
            Loc { line: 1, col: 1 },
        );
        let body = GExprBody {
            meta: Meta::new(span),
            arg_count: 2,
            locals: (0..4).map(local).collect(),
            body: (),
        };
        assert_eq!(body.return_var().map(|v| v.index), Some(VarId::new(0)));
        let args = body.args().iter().map(|v| v.index.index()).collect::<Vec<_>>();
        assert_eq!(args, vec![1, 2]);
    }

    #[test]
    fn test_group_ids() {
        assert_eq!(GDeclarationGroup::NonRec(5usize).ids(), vec![5]);
        assert_eq!(GDeclarationGroup::Rec(vec![5usize, 6]).ids(), vec![5, 6]);
    }
}
