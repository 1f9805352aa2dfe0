//! LLBC statements.
//!
//! LLBC is MIR where the control-flow has been rebuilt into structured statements: `if`/`else`,
//! switches, matches and loops. Basic blocks and terminators no longer exist, everything is a
//! statement.

use crate::expr::{Operand, Place, Rvalue};
use crate::gast::{FunDeclId, GExprBody, GFunDecl, GGlobalDecl};
use crate::krate::GCrate;
use crate::ty::{ETy, ErasedRegion, IntegerTy, VariantId};
use crate::values::ScalarValue;
use llbc_span::Meta;

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Assert {
    pub cond: Operand,
    pub expected: bool,
}

/// Functions which are known to the extraction tool and have no declaration in the crate.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssumedFunId {
    /// `core::mem::replace`
    Replace,
    BoxNew,
    BoxDeref,
    BoxDerefMut,
    BoxFree,
    VecNew,
    VecPush,
    VecInsert,
    VecLen,
    VecIndex,
    VecIndexMut,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunId {
    Regular(FunDeclId),
    Assumed(AssumedFunId),
}

/// A call to a top-level function.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub func: FunId,
    pub region_args: Vec<ErasedRegion>,
    pub type_args: Vec<ETy>,
    pub args: Vec<Operand>,
    pub dest: Place,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub meta: Meta,
    pub content: RawStatement,
}

/// A statement without its provenance.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum RawStatement {
    Assign(Place, Rvalue),
    FakeRead(Place),
    SetDiscriminant(Place, VariantId),
    Drop(Place),
    Assert(Assert),
    Call(Call),
    /// Panic also handles `unreachable`.
    Panic,
    Return,
    /// Break to an outer loop: 0 is the innermost loop, 1 the loop around it, and so on.
    Break(usize),
    /// Continue an outer loop, counted like [`RawStatement::Break`].
    Continue(usize),
    Nop,
    /// The left statement is never itself a sequence.
    Sequence(Box<Statement>, Box<Statement>),
    Switch(Switch),
    Loop(Box<Statement>),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Switch {
    /// The `if` block and the `else` block.
    If(Operand, Box<Statement>, Box<Statement>),
    /// A switch over an integer, with the branches in source order and the `otherwise` block.
    ///
    /// Several values may lead to the same branch, as in `1 | 2 => ...`.
    SwitchInt(
        Operand,
        IntegerTy,
        Vec<(Vec<ScalarValue>, Statement)>,
        Box<Statement>,
    ),
    /// A match over the variants of an enumeration.
    Match(Place, Vec<(Vec<VariantId>, Statement)>, Box<Statement>),
}

impl Statement {
    pub fn new(meta: Meta, content: RawStatement) -> Self {
        Self { meta, content }
    }

    /// Collect the statements of a sequence, in order.
    pub fn flatten(&self) -> Vec<&Statement> {
        let mut out = vec![];
        let mut current = self;
        while let RawStatement::Sequence(first, rest) = &current.content {
            out.push(first.as_ref());
            current = rest.as_ref();
        }
        out.push(current);
        out
    }
}

pub type ExprBody = GExprBody<Statement>;
pub type FunDecl = GFunDecl<Statement>;
pub type GlobalDecl = GGlobalDecl<Statement>;
pub type LlbcCrate = GCrate<Statement>;

#[cfg(test)]
mod tests {
    use super::{RawStatement, Statement};
    use llbc_span::{FileName, Loc, Meta, Span};

    fn stmt(content: RawStatement) -> Statement {
        let span = Span::new(
            FileName::Local("a.rs".to_owned()),
            Loc { line: 1, col: 0 },
            Loc { line: 1, col: 1 },
        );
        Statement::new(Meta::new(span), content)
    }

    #[test]
    fn test_flatten_sequence() {
        let seq = stmt(RawStatement::Sequence(
            Box::new(stmt(RawStatement::Nop)),
            Box::new(stmt(RawStatement::Sequence(
                Box::new(stmt(RawStatement::Break(0))),
                Box::new(stmt(RawStatement::Return)),
            ))),
        ));
        let contents = seq
            .flatten()
            .into_iter()
            .map(|s| s.content.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            contents,
            vec![RawStatement::Nop, RawStatement::Break(0), RawStatement::Return]
        );
    }
}
