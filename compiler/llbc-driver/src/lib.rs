//! Driver for inspecting serialized LLBC crates.
//!
//! The driver reads a single JSON document, decodes it into an LLBC crate, and emits the crate in
//! the formats requested on the command line.

pub mod operations;
pub mod pipeline;
pub mod query;
