//! Strongly-typed numeric identifiers.
//!
//! Each kind of IR entity lives in its own id space. The ids are plain indices, but keeping them
//! as distinct types means a variable id can never be confused with a field id.

/// Declare one or more identifier types.
///
/// ```
/// llbc_macros::declare_id_type!(TypeDeclId, FunDeclId);
///
/// let id = TypeDeclId::new(3);
/// assert_eq!(id.index(), 3);
/// assert_eq!(TypeDeclId::from(3), id);
/// ```
#[macro_export]
macro_rules! declare_id_type {
    ($($name:ident),+ $(,)?) => {
        $(
            #[cfg_attr(feature = "serde", derive(serde::Serialize))]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $name(usize);

            impl $name {
                pub fn new(index: usize) -> Self {
                    Self(index)
                }

                pub fn index(self) -> usize {
                    self.0
                }
            }

            impl ::std::convert::From<usize> for $name {
                fn from(index: usize) -> Self {
                    Self(index)
                }
            }

            impl ::std::fmt::Display for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )+
    };
}
