use crate::gast::{DeclarationGroup, FunDeclId, GFunDecl, GGlobalDecl, GlobalDeclId};
use crate::name::Name;
use crate::ty::{TypeDecl, TypeDeclId};
use std::collections::BTreeMap;

/// A fully decoded crate.
///
/// The declarations are keyed by their identifiers. We use BTreeMaps so that iterating over a
/// crate is deterministic, which keeps the textual output stable. The declaration groups give the
/// order in which the declarations can be processed: each group only depends on the groups before
/// it.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GCrate<B> {
    pub name: String,
    pub declarations: Vec<DeclarationGroup>,
    pub types: BTreeMap<TypeDeclId, TypeDecl>,
    pub functions: BTreeMap<FunDeclId, GFunDecl<B>>,
    pub globals: BTreeMap<GlobalDeclId, GGlobalDecl<B>>,
}

impl<B> GCrate<B> {
    /// Create an empty crate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: vec![],
            types: BTreeMap::new(),
            functions: BTreeMap::new(),
            globals: BTreeMap::new(),
        }
    }

    pub fn type_decl(&self, id: TypeDeclId) -> Option<&TypeDecl> {
        self.types.get(&id)
    }

    pub fn fun_decl(&self, id: FunDeclId) -> Option<&GFunDecl<B>> {
        self.functions.get(&id)
    }

    pub fn global_decl(&self, id: GlobalDeclId) -> Option<&GGlobalDecl<B>> {
        self.globals.get(&id)
    }

    /// Find a type declaration by its fully-qualified name, as printed by [`Name`]'s `Display`.
    pub fn find_type_by_name(&self, name: &str) -> Option<&TypeDecl> {
        self.types.values().find(|d| name_matches(&d.name, name))
    }

    pub fn find_fun_by_name(&self, name: &str) -> Option<&GFunDecl<B>> {
        self.functions.values().find(|d| name_matches(&d.name, name))
    }

    pub fn find_global_by_name(&self, name: &str) -> Option<&GGlobalDecl<B>> {
        self.globals.values().find(|d| name_matches(&d.name, name))
    }
}

fn name_matches(name: &Name, query: &str) -> bool {
    name.to_string() == query
}
