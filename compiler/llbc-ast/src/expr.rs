//! Places, operands and r-values.

use crate::gast::GlobalDeclId;
use crate::ty::{ETy, ErasedRegion, FieldId, TypeDeclId, VariantId};
use crate::values::PrimitiveValue;
use llbc_macros::declare_id_type;
use std::fmt::{Display, Formatter};

declare_id_type!(VarId);

/// A memory location: a local variable, followed by a path of projections.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Place {
    pub var_id: VarId,
    pub projection: Vec<ProjectionElem>,
}

impl Place {
    /// A place referring to a local variable, without any projection.
    pub fn new(var_id: VarId) -> Self {
        Self {
            var_id,
            projection: vec![],
        }
    }

    /// Extend the place with one more projection.
    pub fn project(mut self, elem: ProjectionElem) -> Self {
        self.projection.push(elem);
        self
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectionElem {
    /// Dereference a shared or mutable reference.
    Deref,
    /// Dereference a boxed value.
    ///
    /// References and boxes are both dereferenced with `*` in Rust, but have very different
    /// semantics, so they are kept apart.
    DerefBox,
    /// Access a field.
    ///
    /// The same field access is used for structures, enumeration variants, tuples and the builtin
    /// option type. The projection kind says which of those the accessed value is.
    Field(FieldProjKind, FieldId),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldProjKind {
    /// A field of a structure (no variant), or of a variant of an enumeration.
    Adt(TypeDeclId, Option<VariantId>),
    /// A field of a tuple of the given arity.
    Tuple(usize),
    /// The field of a variant of the builtin option type.
    Option(VariantId),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorrowKind {
    Shared,
    Mut,
    /// A mutable borrow which is only activated at its first use.
    TwoPhaseMut,
}

impl Display for BorrowKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BorrowKind::Shared => write!(f, "&"),
            BorrowKind::Mut => write!(f, "&mut "),
            BorrowKind::TwoPhaseMut => write!(f, "&two-phase-mut "),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Not,
    /// Negation can overflow on the minimum value of a signed integer type.
    Neg,
}

impl Display for UnOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UnOp::Not => write!(f, "~"),
            UnOp::Neg => write!(f, "-"),
        }
    }
}

/// Binary operations.
///
/// Checked and unchecked operations are merged: overflow behaviour is the concern of the
/// consumer.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    BitXor,
    BitAnd,
    BitOr,
    Eq,
    Lt,
    Le,
    Ne,
    Ge,
    Gt,
    Div,
    Rem,
    Add,
    Sub,
    Mul,
    Shl,
    Shr,
}

impl BinOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Lt | BinOp::Le | BinOp::Ne | BinOp::Ge | BinOp::Gt
        )
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            BinOp::BitXor => "^",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::Eq => "==",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Ne => "!=",
            BinOp::Ge => ">=",
            BinOp::Gt => ">",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
        };
        write!(f, "{}", op)
    }
}

/// Constant value for an operand.
///
/// Rust treats some ADT and tuple instances as constants, like an enumeration variant without
/// fields, or the unit value.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperandConstantValue {
    ConstantValue(PrimitiveValue),
    /// A structure without fields, or an enumeration with a single variant without fields.
    Adt(TypeDeclId),
    Unit,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Copy(Place),
    Move(Place),
    Constant(ETy, OperandConstantValue),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Tuple,
    /// A variant of the builtin option type, with the type of its content.
    Option(VariantId, ETy),
    /// A structure (no variant), or a variant of an enumeration.
    Adt(TypeDeclId, Option<VariantId>, Vec<ErasedRegion>, Vec<ETy>),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rvalue {
    Use(Operand),
    Ref(Place, BorrowKind),
    UnaryOp(UnOp, Operand),
    BinaryOp(BinOp, Operand, Operand),
    /// Read the discriminant of an enumeration. Discriminants have type `isize`.
    Discriminant(Place),
    /// Read the value of a global.
    Global(GlobalDeclId),
    /// Build a tuple, an option, a structure or an enumeration variant.
    Aggregate(AggregateKind, Vec<Operand>),
}

#[cfg(test)]
mod tests {
    use super::{BinOp, BorrowKind, FieldProjKind, Place, ProjectionElem, VarId};
    use crate::ty::FieldId;

    #[test]
    fn test_place_projection_order() {
        let place = Place::new(VarId::new(1))
            .project(ProjectionElem::Deref)
            .project(ProjectionElem::Field(FieldProjKind::Tuple(2), FieldId::new(1)));
        assert_eq!(place.projection.len(), 2);
        assert_eq!(place.projection[0], ProjectionElem::Deref);
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(BinOp::Shl.to_string(), "<<");
        assert!(BinOp::Ge.is_comparison());
        assert!(!BinOp::Add.is_comparison());
        assert_eq!(BorrowKind::Mut.to_string(), "&mut ");
    }
}
