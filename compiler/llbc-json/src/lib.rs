//! Decoding of serialized LLBC crates.
//!
//! The extraction tool serializes crates as JSON documents. This crate walks the generic
//! [`serde_json::Value`] tree and rebuilds the strongly-typed AST from `llbc-ast`, checking the
//! shape of every node on the way.
//!
//! The decoders are plain functions over `&Value`, and are mutually recursive in the same way as
//! the AST. The only context they share is the [`FileTable`](files::FileTable), which is decoded
//! first and then passed down by reference to every decoder that resolves a span.
//!
//! Every failure is a [`DecodeError`](error::DecodeError) which records the chain of decoders it
//! went through, so that a mismatch with the schema of the extraction tool can be pinned down.

pub mod error;
pub mod expr;
pub mod files;
pub mod gast;
pub mod krate;
pub mod llbc;
pub mod primitive;
pub mod ty;
pub mod values;

pub use error::{DecodeError, DecodeResult};
pub use gast::{BodyDecoder, RawBodyDecoder};
pub use krate::{decode_crate, decode_llbc_crate};
pub use llbc::LlbcBodyDecoder;
