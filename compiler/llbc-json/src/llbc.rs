//! Bodies made of LLBC statements.
//!
//! This is the body grammar of the structured control-flow flavour of the IR. It plugs into the
//! declaration decoders through [`LlbcBodyDecoder`].

use crate::error::{decoding, DecodeError, DecodeResult};
use crate::expr::{decode_operand, decode_place, decode_rvalue};
use crate::files::{decode_meta, FileTable};
use crate::gast::BodyDecoder;
use crate::primitive::{
    decode_bool, decode_id, decode_list, decode_record, decode_tuple, decode_unary,
    decode_usize, decode_variant,
};
use crate::ty::{decode_ety, decode_integer_ty, ErasedRegions, RegionDecoder};
use crate::values::decode_scalar_value;
use llbc_ast::llbc::{Assert, AssumedFunId, Call, FunId, RawStatement, Statement, Switch};
use serde_json::Value;

/// Decode bodies as LLBC statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct LlbcBodyDecoder;

impl BodyDecoder for LlbcBodyDecoder {
    type Body = Statement;

    fn decode_body(&self, files: &FileTable, value: &Value) -> DecodeResult<Statement> {
        decode_statement(files, value)
    }
}

fn decode_assumed_fun_id(value: &Value) -> DecodeResult<AssumedFunId> {
    decoding("assumed_fun_id", || {
        let id = match decode_variant(value)? {
            ("Replace", None) => AssumedFunId::Replace,
            ("BoxNew", None) => AssumedFunId::BoxNew,
            ("BoxDeref", None) => AssumedFunId::BoxDeref,
            ("BoxDerefMut", None) => AssumedFunId::BoxDerefMut,
            ("BoxFree", None) => AssumedFunId::BoxFree,
            ("VecNew", None) => AssumedFunId::VecNew,
            ("VecPush", None) => AssumedFunId::VecPush,
            ("VecInsert", None) => AssumedFunId::VecInsert,
            ("VecLen", None) => AssumedFunId::VecLen,
            ("VecIndex", None) => AssumedFunId::VecIndex,
            ("VecIndexMut", None) => AssumedFunId::VecIndexMut,
            (tag, _) => return Err(DecodeError::unknown_variant("AssumedFunId", tag)),
        };
        Ok(id)
    })
}

fn decode_fun_id(value: &Value) -> DecodeResult<FunId> {
    decoding("fun_id", || match decode_variant(value)? {
        ("Regular", Some(payload)) => decode_unary(payload, decode_id).map(FunId::Regular),
        ("Assumed", Some(payload)) => {
            decode_unary(payload, decode_assumed_fun_id).map(FunId::Assumed)
        }
        (tag, _) => Err(DecodeError::unknown_variant("FunId", tag)),
    })
}

fn decode_call(value: &Value) -> DecodeResult<Call> {
    decoding("call", || {
        let [func, region_args, type_args, args, dest] = decode_record(
            value,
            ["func", "region_args", "type_args", "args", "dest"],
        )?;
        Ok(Call {
            func: decode_fun_id(func)?,
            region_args: decode_list(region_args, |v| ErasedRegions.decode_region(v))?,
            type_args: decode_list(type_args, decode_ety)?,
            args: decode_list(args, decode_operand)?,
            dest: decode_place(dest)?,
        })
    })
}

fn decode_assert(value: &Value) -> DecodeResult<Assert> {
    decoding("assert", || {
        let [cond, expected] = decode_record(value, ["cond", "expected"])?;
        Ok(Assert {
            cond: decode_operand(cond)?,
            expected: decode_bool(expected)?,
        })
    })
}

fn decode_switch(files: &FileTable, value: &Value) -> DecodeResult<Switch> {
    let statement = |v: &Value| decode_statement(files, v);
    let boxed = |v: &Value| decode_statement(files, v).map(Box::new);
    decoding("switch", || match decode_variant(value)? {
        ("If", Some(payload)) => {
            let [cond, then, otherwise] = decode_tuple(payload)?;
            Ok(Switch::If(
                decode_operand(cond)?,
                boxed(then)?,
                boxed(otherwise)?,
            ))
        }
        ("SwitchInt", Some(payload)) => {
            let [discr, int_ty, branches, otherwise] = decode_tuple(payload)?;
            let discr = decode_operand(discr)?;
            let int_ty = decode_integer_ty(int_ty)?;
            let branches = decode_list(branches, |branch| {
                let [values, body] = decode_tuple(branch)?;
                Ok((decode_list(values, decode_scalar_value)?, statement(body)?))
            })?;
            let mismatch = branches
                .iter()
                .flat_map(|(values, _)| values)
                .find(|v| v.integer_ty() != int_ty);
            if let Some(value) = mismatch {
                return Err(DecodeError::invariant(format!(
                    "switch over {} has a branch for {}",
                    int_ty, value
                )));
            }
            Ok(Switch::SwitchInt(discr, int_ty, branches, boxed(otherwise)?))
        }
        ("Match", Some(payload)) => {
            let [place, branches, otherwise] = decode_tuple(payload)?;
            let place = decode_place(place)?;
            let branches = decode_list(branches, |branch| {
                let [variants, body] = decode_tuple(branch)?;
                Ok((decode_list(variants, decode_id)?, statement(body)?))
            })?;
            Ok(Switch::Match(place, branches, boxed(otherwise)?))
        }
        (tag, _) => Err(DecodeError::unknown_variant("Switch", tag)),
    })
}

fn decode_raw_statement(files: &FileTable, value: &Value) -> DecodeResult<RawStatement> {
    let boxed = |v: &Value| decode_statement(files, v).map(Box::new);
    decoding("raw_statement", || match decode_variant(value)? {
        ("Assign", Some(payload)) => {
            let [place, rvalue] = decode_tuple(payload)?;
            Ok(RawStatement::Assign(
                decode_place(place)?,
                decode_rvalue(rvalue)?,
            ))
        }
        ("FakeRead", Some(payload)) => decode_unary(payload, decode_place).map(RawStatement::FakeRead),
        ("SetDiscriminant", Some(payload)) => {
            let [place, variant] = decode_tuple(payload)?;
            Ok(RawStatement::SetDiscriminant(
                decode_place(place)?,
                decode_id(variant)?,
            ))
        }
        ("Drop", Some(payload)) => decode_unary(payload, decode_place).map(RawStatement::Drop),
        ("Assert", Some(payload)) => decode_unary(payload, decode_assert).map(RawStatement::Assert),
        ("Call", Some(payload)) => decode_unary(payload, decode_call).map(RawStatement::Call),
        ("Panic", None) => Ok(RawStatement::Panic),
        ("Return", None) => Ok(RawStatement::Return),
        ("Break", Some(payload)) => decode_unary(payload, decode_usize).map(RawStatement::Break),
        ("Continue", Some(payload)) => {
            decode_unary(payload, decode_usize).map(RawStatement::Continue)
        }
        ("Nop", None) => Ok(RawStatement::Nop),
        ("Sequence", Some(payload)) => {
            let [first, rest] = decode_tuple(payload)?;
            Ok(RawStatement::Sequence(boxed(first)?, boxed(rest)?))
        }
        ("Switch", Some(payload)) => {
            decode_unary(payload, |v| decode_switch(files, v)).map(RawStatement::Switch)
        }
        ("Loop", Some(payload)) => decode_unary(payload, boxed).map(RawStatement::Loop),
        (tag, _) => Err(DecodeError::unknown_variant("RawStatement", tag)),
    })
}

pub fn decode_statement(files: &FileTable, value: &Value) -> DecodeResult<Statement> {
    decoding("statement", || {
        let [meta, content] = decode_record(value, ["meta", "content"])?;
        Ok(Statement {
            meta: decode_meta(files, meta)?,
            content: decode_raw_statement(files, content)?,
        })
    })
}
