//! Low-Level Borrow Calculus (LLBC) abstract syntax.
//!
//! This crate holds the in-memory form of an IR crate produced by the extraction tool: type
//! declarations, function and global declarations with their signatures and bodies, and the
//! expression language used inside the bodies.
//!
//! The declarations are generic over their body ([`gast::GFunDecl`], [`gast::GGlobalDecl`]), so
//! that consumers can pick how much of the control-flow they care about. The structured
//! control-flow statements of LLBC live in [`llbc`].
//!
//! Types are generic over their region representation. Signatures and type declarations keep
//! region variables ([`ty::SigTy`]), whereas everything inside a body has its regions erased
//! ([`ty::ETy`]).

pub mod expr;
pub mod gast;
pub mod krate;
pub mod llbc;
pub mod name;
pub mod textual_pass;
pub mod ty;
pub mod values;
