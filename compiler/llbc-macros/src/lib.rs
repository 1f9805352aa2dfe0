//! Macros shared by the LLBC crates.
//!
//! - [`declare_error_type!`] builds an aggregate diagnostic error out of individual error structs.
//! - [`declare_id_type!`] builds the namespaced identifier newtypes of the IR.
//! - The assertion macros in [`assertions`] are only compiled with the `assertion-macros` feature,
//!   and are intended for tests.

#[cfg(feature = "assertion-macros")]
pub mod assertions;
pub mod error;
pub mod id;
