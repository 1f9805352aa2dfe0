//! Internal error reporting for the LLBC tooling.
//!
//! Malformed input is never reported through this crate: input errors are typed decode errors.
//! [`ice!`] is reserved for broken invariants inside the tooling itself.

/// Abort with an internal error, pointing at the location of the macro invocation.
#[macro_export]
macro_rules! ice {
    ($message:expr) => {{
        let message = $message;
        panic!(
            "internal error in llbc tooling ({}:{}:{}):\n{}",
            file!(),
            line!(),
            column!(),
            message
        )
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    #[should_panic(expected = "internal error in llbc tooling")]
    fn test_ice_panics_with_location() {
        ice!("broken invariant");
    }
}
