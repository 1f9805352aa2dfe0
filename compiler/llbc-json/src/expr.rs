//! Places, operands and r-values.
//!
//! No semantic checking happens here: whether a projection matches the type of the projected
//! place is left to the consumers.

use crate::error::{decoding, DecodeError, DecodeResult};
use crate::primitive::{
    decode_id, decode_list, decode_option, decode_record, decode_tuple, decode_unary,
    decode_usize, decode_variant,
};
use crate::ty::{decode_ety, ErasedRegions, RegionDecoder};
use crate::values::decode_primitive_value;
use llbc_ast::expr::{
    AggregateKind, BinOp, BorrowKind, FieldProjKind, Operand, OperandConstantValue, Place,
    ProjectionElem, Rvalue, UnOp,
};
use serde_json::Value;

fn decode_field_proj_kind(value: &Value) -> DecodeResult<FieldProjKind> {
    decoding("field_proj_kind", || match decode_variant(value)? {
        ("Adt", Some(payload)) => {
            let [id, variant] = decode_tuple(payload)?;
            Ok(FieldProjKind::Adt(
                decode_id(id)?,
                decode_option(variant, decode_id)?,
            ))
        }
        ("Tuple", Some(payload)) => decode_unary(payload, decode_usize).map(FieldProjKind::Tuple),
        ("Option", Some(payload)) => decode_unary(payload, decode_id).map(FieldProjKind::Option),
        (tag, _) => Err(DecodeError::unknown_variant("FieldProjKind", tag)),
    })
}

fn decode_projection_elem(value: &Value) -> DecodeResult<ProjectionElem> {
    decoding("projection_elem", || match decode_variant(value)? {
        ("Deref", None) => Ok(ProjectionElem::Deref),
        ("DerefBox", None) => Ok(ProjectionElem::DerefBox),
        ("Field", Some(payload)) => {
            let [kind, field] = decode_tuple(payload)?;
            Ok(ProjectionElem::Field(
                decode_field_proj_kind(kind)?,
                decode_id(field)?,
            ))
        }
        (tag, _) => Err(DecodeError::unknown_variant("ProjectionElem", tag)),
    })
}

pub fn decode_place(value: &Value) -> DecodeResult<Place> {
    decoding("place", || {
        let [var_id, projection] = decode_record(value, ["var_id", "projection"])?;
        Ok(Place {
            var_id: decode_id(var_id)?,
            projection: decode_list(projection, decode_projection_elem)?,
        })
    })
}

pub fn decode_borrow_kind(value: &Value) -> DecodeResult<BorrowKind> {
    decoding("borrow_kind", || match decode_variant(value)? {
        ("Shared", None) => Ok(BorrowKind::Shared),
        ("Mut", None) => Ok(BorrowKind::Mut),
        ("TwoPhaseMut", None) => Ok(BorrowKind::TwoPhaseMut),
        (tag, _) => Err(DecodeError::unknown_variant("BorrowKind", tag)),
    })
}

pub fn decode_unop(value: &Value) -> DecodeResult<UnOp> {
    decoding("unop", || match decode_variant(value)? {
        ("Not", None) => Ok(UnOp::Not),
        ("Neg", None) => Ok(UnOp::Neg),
        (tag, _) => Err(DecodeError::unknown_variant("UnOp", tag)),
    })
}

pub fn decode_binop(value: &Value) -> DecodeResult<BinOp> {
    decoding("binop", || {
        let op = match decode_variant(value)? {
            ("BitXor", None) => BinOp::BitXor,
            ("BitAnd", None) => BinOp::BitAnd,
            ("BitOr", None) => BinOp::BitOr,
            ("Eq", None) => BinOp::Eq,
            ("Lt", None) => BinOp::Lt,
            ("Le", None) => BinOp::Le,
            ("Ne", None) => BinOp::Ne,
            ("Ge", None) => BinOp::Ge,
            ("Gt", None) => BinOp::Gt,
            ("Div", None) => BinOp::Div,
            ("Rem", None) => BinOp::Rem,
            ("Add", None) => BinOp::Add,
            ("Sub", None) => BinOp::Sub,
            ("Mul", None) => BinOp::Mul,
            ("Shl", None) => BinOp::Shl,
            ("Shr", None) => BinOp::Shr,
            (tag, _) => return Err(DecodeError::unknown_variant("BinOp", tag)),
        };
        Ok(op)
    })
}

fn decode_operand_constant_value(value: &Value) -> DecodeResult<OperandConstantValue> {
    decoding("operand_constant_value", || match decode_variant(value)? {
        ("ConstantValue", Some(payload)) => {
            decode_unary(payload, decode_primitive_value).map(OperandConstantValue::ConstantValue)
        }
        ("Adt", Some(payload)) => decode_unary(payload, decode_id).map(OperandConstantValue::Adt),
        ("Unit", None) => Ok(OperandConstantValue::Unit),
        (tag, _) => Err(DecodeError::unknown_variant("OperandConstantValue", tag)),
    })
}

pub fn decode_operand(value: &Value) -> DecodeResult<Operand> {
    decoding("operand", || match decode_variant(value)? {
        ("Copy", Some(payload)) => decode_unary(payload, decode_place).map(Operand::Copy),
        ("Move", Some(payload)) => decode_unary(payload, decode_place).map(Operand::Move),
        ("Constant", Some(payload)) => {
            let [ty, constant] = decode_tuple(payload)?;
            Ok(Operand::Constant(
                decode_ety(ty)?,
                decode_operand_constant_value(constant)?,
            ))
        }
        (tag, _) => Err(DecodeError::unknown_variant("Operand", tag)),
    })
}

fn decode_aggregate_kind(value: &Value) -> DecodeResult<AggregateKind> {
    decoding("aggregate_kind", || match decode_variant(value)? {
        ("Tuple", None) => Ok(AggregateKind::Tuple),
        ("Option", Some(payload)) => {
            let [variant, ty] = decode_tuple(payload)?;
            Ok(AggregateKind::Option(decode_id(variant)?, decode_ety(ty)?))
        }
        ("Adt", Some(payload)) => {
            let [id, variant, regions, types] = decode_tuple(payload)?;
            Ok(AggregateKind::Adt(
                decode_id(id)?,
                decode_option(variant, decode_id)?,
                decode_list(regions, |v| ErasedRegions.decode_region(v))?,
                decode_list(types, decode_ety)?,
            ))
        }
        (tag, _) => Err(DecodeError::unknown_variant("AggregateKind", tag)),
    })
}

pub fn decode_rvalue(value: &Value) -> DecodeResult<Rvalue> {
    decoding("rvalue", || match decode_variant(value)? {
        ("Use", Some(payload)) => decode_unary(payload, decode_operand).map(Rvalue::Use),
        ("Ref", Some(payload)) => {
            let [place, kind] = decode_tuple(payload)?;
            Ok(Rvalue::Ref(decode_place(place)?, decode_borrow_kind(kind)?))
        }
        ("UnaryOp", Some(payload)) => {
            let [op, operand] = decode_tuple(payload)?;
            Ok(Rvalue::UnaryOp(decode_unop(op)?, decode_operand(operand)?))
        }
        ("BinaryOp", Some(payload)) => {
            let [op, lhs, rhs] = decode_tuple(payload)?;
            Ok(Rvalue::BinaryOp(
                decode_binop(op)?,
                decode_operand(lhs)?,
                decode_operand(rhs)?,
            ))
        }
        ("Discriminant", Some(payload)) => {
            decode_unary(payload, decode_place).map(Rvalue::Discriminant)
        }
        ("Global", Some(payload)) => decode_unary(payload, decode_id).map(Rvalue::Global),
        ("Aggregate", Some(payload)) => {
            let [kind, operands] = decode_tuple(payload)?;
            Ok(Rvalue::Aggregate(
                decode_aggregate_kind(kind)?,
                decode_list(operands, decode_operand)?,
            ))
        }
        (tag, _) => Err(DecodeError::unknown_variant("Rvalue", tag)),
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_binop, decode_operand, decode_place, decode_rvalue};
    use crate::error::DecodeError;
    use llbc_ast::expr::{
        AggregateKind, BinOp, BorrowKind, FieldProjKind, Operand, OperandConstantValue, Place,
        ProjectionElem, Rvalue, UnOp, VarId,
    };
    use llbc_ast::gast::GlobalDeclId;
    use llbc_ast::ty::{FieldId, IntegerTy, Ty, TypeDeclId, VariantId};
    use llbc_ast::values::{PrimitiveValue, ScalarValue};
    use llbc_macros::{assert_err, assert_matches, assert_ok};
    use serde_json::json;

    #[test]
    fn test_decode_place_with_projections() {
        let place = assert_ok!(decode_place(&json!({
            "var_id": 2,
            "projection": [
                "Deref",
                {"Field": [{"Adt": [4, 1]}, 0]},
                {"Field": [{"Tuple": [3]}, 2]},
                {"Field": [{"Option": [1]}, 0]},
                "DerefBox",
            ],
        })));
        let expected = Place::new(VarId::new(2))
            .project(ProjectionElem::Deref)
            .project(ProjectionElem::Field(
                FieldProjKind::Adt(TypeDeclId::new(4), Some(VariantId::new(1))),
                FieldId::new(0),
            ))
            .project(ProjectionElem::Field(FieldProjKind::Tuple(3), FieldId::new(2)))
            .project(ProjectionElem::Field(
                FieldProjKind::Option(VariantId::new(1)),
                FieldId::new(0),
            ))
            .project(ProjectionElem::DerefBox);
        assert_eq!(place, expected);
    }

    #[test]
    fn test_struct_field_has_no_variant() {
        let place = assert_ok!(decode_place(&json!({
            "var_id": 0,
            "projection": [{"Field": [{"Adt": [4, null]}, 1]}],
        })));
        assert_matches!(
            place.projection[0],
            ProjectionElem::Field(FieldProjKind::Adt(_, None), _)
        );
    }

    #[test]
    fn test_decode_constant_operand() {
        let operand = assert_ok!(decode_operand(&json!({
            "Constant": [
                {"Integer": ["U32"]},
                {"ConstantValue": [{"Scalar": [{"U32": [7]}]}]}
            ]
        })));
        assert_eq!(
            operand,
            Operand::Constant(
                Ty::Integer(IntegerTy::U32),
                OperandConstantValue::ConstantValue(PrimitiveValue::Scalar(ScalarValue::U32(7)))
            )
        );
        let unit = assert_ok!(decode_operand(&json!({
            "Constant": [{"Adt": ["Tuple", [], []]}, "Unit"]
        })));
        assert_matches!(unit, Operand::Constant(_, OperandConstantValue::Unit));
    }

    #[test]
    fn test_decode_rvalues() {
        let place = json!({"var_id": 1, "projection": []});
        let copy = json!({"Copy": [place.clone()]});

        let rvalue = assert_ok!(decode_rvalue(&json!({"Ref": [place.clone(), "TwoPhaseMut"]})));
        assert_eq!(
            rvalue,
            Rvalue::Ref(Place::new(VarId::new(1)), BorrowKind::TwoPhaseMut)
        );
        let rvalue = assert_ok!(decode_rvalue(&json!({"UnaryOp": ["Neg", copy.clone()]})));
        assert_matches!(rvalue, Rvalue::UnaryOp(UnOp::Neg, Operand::Copy(_)));
        let rvalue = assert_ok!(decode_rvalue(&json!({
            "BinaryOp": ["Add", copy.clone(), {"Move": [place.clone()]}]
        })));
        assert_matches!(
            rvalue,
            Rvalue::BinaryOp(BinOp::Add, Operand::Copy(_), Operand::Move(_))
        );
        let rvalue = assert_ok!(decode_rvalue(&json!({"Discriminant": [place.clone()]})));
        assert_matches!(rvalue, Rvalue::Discriminant(_));
        let rvalue = assert_ok!(decode_rvalue(&json!({"Global": [3]})));
        assert_eq!(rvalue, Rvalue::Global(GlobalDeclId::new(3)));
    }

    #[test]
    fn test_decode_aggregates() {
        let rvalue = assert_ok!(decode_rvalue(&json!({
            "Aggregate": [{"Adt": [2, 0, ["Erased"], ["Bool"]]}, []]
        })));
        let (kind, ops) = assert_matches!(rvalue, Rvalue::Aggregate(kind, ops) => (kind, ops));
        assert!(ops.is_empty());
        let (regions, types) =
            assert_matches!(kind, AggregateKind::Adt(_, Some(_), regions, types) => (regions, types));
        assert_eq!(regions.len(), 1);
        assert_eq!(types, vec![Ty::Bool]);
        let rvalue = assert_ok!(decode_rvalue(&json!({
            "Aggregate": [{"Option": [1, "Char"]}, [{"Move": [{"var_id": 0, "projection": []}]}]]
        })));
        assert_matches!(rvalue, Rvalue::Aggregate(AggregateKind::Option(_, Ty::Char), _));
        let rvalue = assert_ok!(decode_rvalue(&json!({"Aggregate": ["Tuple", []]})));
        assert_matches!(rvalue, Rvalue::Aggregate(AggregateKind::Tuple, _));
    }

    #[test]
    fn test_every_binop_decodes() {
        let ops = [
            "BitXor", "BitAnd", "BitOr", "Eq", "Lt", "Le", "Ne", "Ge", "Gt", "Div", "Rem", "Add",
            "Sub", "Mul", "Shl", "Shr",
        ];
        for op in ops {
            assert_ok!(decode_binop(&json!(op)));
        }
        let err = assert_err!(decode_binop(&json!("Pow")));
        assert_eq!(err.path().to_string(), "binop");
    }

    #[test]
    fn test_failure_path_through_operand() {
        let err = assert_err!(decode_rvalue(&json!({
            "Use": [{"Copy": [{"var_id": -1, "projection": []}]}]
        })));
        assert_matches!(err, DecodeError::SchemaMismatch(_));
        assert_eq!(err.path().to_string(), "rvalue > operand > place > id");
    }
}
