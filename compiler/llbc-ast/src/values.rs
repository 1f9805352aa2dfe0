//! Literal values.

use crate::ty::IntegerTy;
use std::fmt::{Display, Formatter};

/// An integer literal together with its type.
///
/// The payload of each variant is wide enough to hold every value of the corresponding integer
/// type, and nothing more: a value that does not fit its type cannot be represented.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarValue {
    /// Pointer-sized integers are 64 bits wide.
    Isize(i64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Usize(u64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
}

impl ScalarValue {
    pub fn integer_ty(&self) -> IntegerTy {
        match self {
            ScalarValue::Isize(_) => IntegerTy::Isize,
            ScalarValue::I8(_) => IntegerTy::I8,
            ScalarValue::I16(_) => IntegerTy::I16,
            ScalarValue::I32(_) => IntegerTy::I32,
            ScalarValue::I64(_) => IntegerTy::I64,
            ScalarValue::I128(_) => IntegerTy::I128,
            ScalarValue::Usize(_) => IntegerTy::Usize,
            ScalarValue::U8(_) => IntegerTy::U8,
            ScalarValue::U16(_) => IntegerTy::U16,
            ScalarValue::U32(_) => IntegerTy::U32,
            ScalarValue::U64(_) => IntegerTy::U64,
            ScalarValue::U128(_) => IntegerTy::U128,
        }
    }

    fn fmt_value(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Isize(v) => write!(f, "{}", v),
            ScalarValue::I8(v) => write!(f, "{}", v),
            ScalarValue::I16(v) => write!(f, "{}", v),
            ScalarValue::I32(v) => write!(f, "{}", v),
            ScalarValue::I64(v) => write!(f, "{}", v),
            ScalarValue::I128(v) => write!(f, "{}", v),
            ScalarValue::Usize(v) => write!(f, "{}", v),
            ScalarValue::U8(v) => write!(f, "{}", v),
            ScalarValue::U16(v) => write!(f, "{}", v),
            ScalarValue::U32(v) => write!(f, "{}", v),
            ScalarValue::U64(v) => write!(f, "{}", v),
            ScalarValue::U128(v) => write!(f, "{}", v),
        }
    }
}

impl Display for ScalarValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_value(f)?;
        write!(f, " : {}", self.integer_ty())
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveValue {
    Scalar(ScalarValue),
    Bool(bool),
    Char(char),
    String(String),
}

impl Display for PrimitiveValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveValue::Scalar(v) => write!(f, "{}", v),
            PrimitiveValue::Bool(v) => write!(f, "{}", v),
            PrimitiveValue::Char(v) => write!(f, "{:?}", v),
            PrimitiveValue::String(v) => write!(f, "{:?}", v),
        }
    }
}
