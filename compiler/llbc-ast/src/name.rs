use std::fmt::{Display, Formatter};

/// A single segment of a fully-qualified path.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathElem {
    Ident(String),
    /// Numeric suffix distinguishing items that share the same identifier, such as the `impl`
    /// blocks of a module.
    Disambiguator(usize),
}

/// A fully-qualified name, like `core::option::Option`.
///
/// The order of the segments is significant.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name {
    pub elems: Vec<PathElem>,
}

impl Name {
    pub fn new(elems: Vec<PathElem>) -> Self {
        Self { elems }
    }

    /// Build a name made of identifiers only.
    pub fn from_idents<'a>(idents: impl IntoIterator<Item = &'a str>) -> Self {
        let elems = idents
            .into_iter()
            .map(|i| PathElem::Ident(i.to_owned()))
            .collect();
        Self { elems }
    }

    /// The last identifier of the path, ignoring disambiguators.
    pub fn last_ident(&self) -> Option<&str> {
        self.elems.iter().rev().find_map(|e| match e {
            PathElem::Ident(i) => Some(i.as_str()),
            PathElem::Disambiguator(_) => None,
        })
    }
}

impl Display for Name {
    /// Disambiguators are attached to the preceding segment, so `a::{impl#1}::f` is printed as
    /// `a#1::f`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for elem in &self.elems {
            match elem {
                PathElem::Ident(i) => {
                    if !first {
                        write!(f, "::")?;
                    }
                    write!(f, "{}", i)?;
                }
                PathElem::Disambiguator(d) => write!(f, "#{}", d)?,
            }
            first = false;
        }
        Ok(())
    }
}
