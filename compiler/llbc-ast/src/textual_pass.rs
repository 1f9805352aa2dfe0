//! Textual formatting for decoded crates.
//!
//! This module provides a Wadler-style pretty printer for LLBC crates. The format is not intended
//! to be consumed programmatically, but rather to be read by humans as an alternative to the raw
//! Ron format.
//!
//! Identifiers are resolved to the names of the declarations they refer to whenever the crate
//! holds them. Dangling identifiers are printed raw, as `@Adt3`, `@Fun1` or `@Global0`.

use crate::expr::{
    AggregateKind, FieldProjKind, Operand, OperandConstantValue, Place, ProjectionElem, Rvalue,
};
use crate::gast::{DeclarationGroup, FunDeclId, FunSig, GlobalDeclId, Var};
use crate::llbc::{
    Assert, Call, FunDecl, FunId, GlobalDecl, LlbcCrate, RawStatement, Statement, Switch,
};
use crate::ty::{
    ErasedRegion, Field, Region, RegionVar, RegionVarId, Ty, TypeDecl, TypeDeclId, TypeDeclKind,
    TypeId, TypeVar, VariantId,
};
use llbc_diagnostics::ice;
use pretty::{Arena, DocAllocator, DocBuilder};

pub type Document<'a> = DocBuilder<'a, Arena<'a>>;

/// The generic parameters in scope, used to print region and type variables by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generics<'g> {
    pub regions: &'g [RegionVar],
    pub types: &'g [TypeVar],
}

impl<'g> Generics<'g> {
    pub fn new(regions: &'g [RegionVar], types: &'g [TypeVar]) -> Self {
        Self { regions, types }
    }
}

/// Regions are printed differently depending on whether they were erased.
pub trait FormatRegion {
    fn format_region(&self, generics: Generics<'_>) -> String;
}

impl FormatRegion for Region<RegionVarId> {
    fn format_region(&self, generics: Generics<'_>) -> String {
        match self {
            Region::Static => "'static".to_owned(),
            Region::Var(id) => generics
                .regions
                .iter()
                .find(|r| r.index == *id)
                .and_then(|r| r.name.clone())
                .unwrap_or_else(|| format!("'_{}", id)),
        }
    }
}

impl FormatRegion for ErasedRegion {
    fn format_region(&self, _: Generics<'_>) -> String {
        "'_".to_owned()
    }
}

pub struct CrateTextualPass<'a> {
    arena: Arena<'a>,
    krate: &'a LlbcCrate,
}

impl<'a> CrateTextualPass<'a> {
    pub fn new(krate: &'a LlbcCrate) -> Self {
        Self {
            arena: Arena::new(),
            krate,
        }
    }

    pub fn format_doc_to_string(doc: Document<'a>) -> String {
        let mut w = Vec::new();
        doc.render(80, &mut w)
            .unwrap_or_else(|_| ice!("failed to render llbc crate"));
        String::from_utf8(w).unwrap_or_else(|_| ice!("rendered llbc crate is not utf-8"))
    }

    /// Print the entire crate, following the order of its declaration groups.
    pub fn visit_crate(&'a self) -> Document<'a> {
        let items = self.krate.declarations.iter().flat_map(|group| match group {
            DeclarationGroup::Type(g) => g
                .ids()
                .into_iter()
                .filter_map(|id| self.krate.type_decl(id))
                .map(|d| self.visit_type_decl(d))
                .collect::<Vec<_>>(),
            DeclarationGroup::Fun(g) => g
                .ids()
                .into_iter()
                .filter_map(|id| self.krate.fun_decl(id))
                .map(|d| self.visit_fun_decl(d))
                .collect::<Vec<_>>(),
            DeclarationGroup::Global(id) => self
                .krate
                .global_decl(*id)
                .map(|d| vec![self.visit_global_decl(d)])
                .unwrap_or_default(),
        });
        self.arena
            .text(format!("// crate {}", self.krate.name))
            .append(self.arena.hardline())
            .append(self.arena.hardline())
            .append(self.arena.intersperse(
                items,
                self.arena.hardline().append(self.arena.hardline()),
            ))
    }

    pub fn visit_type_decl(&'a self, decl: &'a TypeDecl) -> Document<'a> {
        let generics = Generics::new(&decl.region_params, &decl.type_params);
        let head = self
            .arena
            .text(decl.name.to_string())
            .append(self.visit_generic_params(generics));
        match &decl.kind {
            TypeDeclKind::Opaque => self
                .arena
                .text("opaque type")
                .append(self.arena.space())
                .append(head),
            TypeDeclKind::Struct(fields) => self
                .arena
                .text("struct")
                .append(self.arena.space())
                .append(head)
                .append(self.arena.space())
                .append(self.visit_block(
                    fields.iter().map(|f| self.visit_field(f, generics)),
                )),
            TypeDeclKind::Enum(variants) => self
                .arena
                .text("enum")
                .append(self.arena.space())
                .append(head)
                .append(self.arena.space())
                .append(self.visit_block(
                    variants.iter().map(|v| {
                        let fields = v
                            .fields
                            .iter()
                            .map(|f| self.format_field(f, generics))
                            .collect::<Vec<_>>();
                        if fields.is_empty() {
                            self.arena.text(format!("{},", v.name))
                        } else {
                            self.arena
                                .text(format!("{}({}),", v.name, fields.join(", ")))
                        }
                    }),
                )),
        }
    }

    fn visit_field(&'a self, field: &'a Field, generics: Generics<'a>) -> Document<'a> {
        self.arena
            .text(self.format_field(field, generics))
            .append(self.arena.text(","))
    }

    fn format_field(&self, field: &Field, generics: Generics<'_>) -> String {
        match &field.name {
            Some(name) => format!("{}: {}", name, self.format_ty(&field.ty, generics)),
            None => self.format_ty(&field.ty, generics),
        }
    }

    fn visit_generic_params(&'a self, generics: Generics<'a>) -> Document<'a> {
        let params = generics
            .regions
            .iter()
            .map(|r| Region::Var(r.index).format_region(generics))
            .chain(generics.types.iter().map(|t| t.name.clone()))
            .collect::<Vec<_>>();
        if params.is_empty() {
            return self.arena.nil();
        }
        self.arena.text(format!("<{}>", params.join(", ")))
    }

    pub fn visit_fun_signature(
        &'a self,
        name: String,
        sig: &'a FunSig,
        args: Option<&'a [Var]>,
    ) -> Document<'a> {
        let generics = Generics::new(&sig.region_params, &sig.type_params);
        let inputs = sig
            .inputs
            .iter()
            .enumerate()
            .map(|(i, ty)| {
                let ty = self.format_ty(ty, generics);
                match args.and_then(|a| a.get(i)) {
                    Some(var) => format!("{}: {}", self.format_var(var), ty),
                    None => ty,
                }
            })
            .collect::<Vec<_>>();
        self.arena
            .text("fn")
            .append(self.arena.space())
            .append(self.arena.text(name))
            .append(self.visit_generic_params(generics))
            .append(self.arena.text(format!("({})", inputs.join(", "))))
            .append(self.arena.space())
            .append(self.arena.text("->"))
            .append(self.arena.space())
            .append(self.arena.text(self.format_ty(&sig.output, generics)))
    }

    pub fn visit_fun_decl(&'a self, decl: &'a FunDecl) -> Document<'a> {
        let generics = Generics::new(&decl.signature.region_params, &decl.signature.type_params);
        let Some(body) = &decl.body else {
            return self
                .arena
                .text("opaque")
                .append(self.arena.space())
                .append(self.visit_fun_signature(decl.name.to_string(), &decl.signature, None));
        };
        let locals = body
            .locals
            .iter()
            .skip(body.arg_count + 1)
            .map(|v| self.visit_local(v, generics));
        self.visit_fun_signature(decl.name.to_string(), &decl.signature, Some(body.args()))
            .append(self.arena.space())
            .append(self.visit_block(
                locals.chain(std::iter::once(
                    self.visit_statement(&body.body, &body.locals, generics),
                )),
            ))
    }

    pub fn visit_global_decl(&'a self, decl: &'a GlobalDecl) -> Document<'a> {
        let generics = Generics::default();
        let head = self
            .arena
            .text("global")
            .append(self.arena.space())
            .append(self.arena.text(decl.name.to_string()))
            .append(self.arena.text(":"))
            .append(self.arena.space())
            .append(self.arena.text(self.format_ty(&decl.ty, generics)));
        let Some(body) = &decl.body else {
            return self.arena.text("opaque").append(self.arena.space()).append(head);
        };
        let locals = body
            .locals
            .iter()
            .skip(1)
            .map(|v| self.visit_local(v, generics));
        head.append(self.arena.space()).append(self.visit_block(
            locals.chain(std::iter::once(
                self.visit_statement(&body.body, &body.locals, generics),
            )),
        ))
    }

    fn visit_local(&'a self, var: &'a Var, generics: Generics<'a>) -> Document<'a> {
        self.arena.text(format!(
            "let {}: {};",
            self.format_var(var),
            self.format_ty(&var.ty, generics)
        ))
    }

    /// Print a brace-delimited block, with one item per line.
    fn visit_block(&'a self, items: impl Iterator<Item = Document<'a>>) -> Document<'a> {
        let items = items.collect::<Vec<_>>();
        if items.is_empty() {
            return self.arena.text("{}");
        }
        self.arena
            .text("{")
            .append(
                self.arena
                    .hardline()
                    .append(self.arena.intersperse(items, self.arena.hardline()))
                    .nest(2)
                    .group(),
            )
            .append(self.arena.hardline())
            .append(self.arena.text("}"))
    }

    pub fn visit_statement(
        &'a self,
        stmt: &'a Statement,
        locals: &'a [Var],
        generics: Generics<'a>,
    ) -> Document<'a> {
        if let RawStatement::Sequence(..) = &stmt.content {
            return self.arena.intersperse(
                stmt.flatten()
                    .into_iter()
                    .map(|s| self.visit_statement(s, locals, generics)),
                self.arena.hardline(),
            );
        }
        match &stmt.content {
            RawStatement::Assign(place, rvalue) => self.arena.text(format!(
                "{} := {};",
                self.format_place(place, locals),
                self.format_rvalue(rvalue, locals, generics)
            )),
            RawStatement::FakeRead(place) => self
                .arena
                .text(format!("@fake_read({});", self.format_place(place, locals))),
            RawStatement::SetDiscriminant(place, variant) => self.arena.text(format!(
                "@discriminant({}) := {};",
                self.format_place(place, locals),
                variant
            )),
            RawStatement::Drop(place) => self
                .arena
                .text(format!("drop {};", self.format_place(place, locals))),
            RawStatement::Assert(Assert { cond, expected }) => self.arena.text(format!(
                "assert({} == {});",
                self.format_operand(cond, locals, generics),
                expected
            )),
            RawStatement::Call(call) => self
                .arena
                .text(self.format_call(call, locals, generics)),
            RawStatement::Panic => self.arena.text("panic;"),
            RawStatement::Return => self.arena.text("return;"),
            RawStatement::Break(i) => self.arena.text(format!("break {};", i)),
            RawStatement::Continue(i) => self.arena.text(format!("continue {};", i)),
            RawStatement::Nop => self.arena.text("@nop;"),
            RawStatement::Sequence(..) => ice!("sequences are flattened before matching"),
            RawStatement::Switch(switch) => self.visit_switch(switch, locals, generics),
            RawStatement::Loop(body) => self.arena.text("loop").append(self.arena.space()).append(
                self.visit_block(
                    std::iter::once(self.visit_statement(body, locals, generics)),
                ),
            ),
        }
    }

    fn visit_switch(
        &'a self,
        switch: &'a Switch,
        locals: &'a [Var],
        generics: Generics<'a>,
    ) -> Document<'a> {
        match switch {
            Switch::If(cond, then, otherwise) => self
                .arena
                .text(format!("if {} ", self.format_operand(cond, locals, generics)))
                .append(self.visit_block(
                    std::iter::once(self.visit_statement(then, locals, generics)),
                ))
                .append(self.arena.text(" else "))
                .append(self.visit_block(
                    std::iter::once(self.visit_statement(otherwise, locals, generics)),
                )),
            Switch::SwitchInt(discr, _, branches, otherwise) => {
                let arms = branches.iter().map(|(values, stmt)| {
                    let pattern = values
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(" | ");
                    self.visit_arm(pattern, stmt, locals, generics)
                });
                let default = self.visit_arm("_".to_owned(), otherwise, locals, generics);
                self.arena
                    .text(format!(
                        "switch {} ",
                        self.format_operand(discr, locals, generics)
                    ))
                    .append(self.visit_block(arms.chain(std::iter::once(default))))
            }
            Switch::Match(place, branches, otherwise) => {
                let adt = self.match_scrutinee_adt(place, locals);
                let arms = branches.iter().map(|(variants, stmt)| {
                    let pattern = variants
                        .iter()
                        .map(|v| self.format_variant(adt, *v))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    self.visit_arm(pattern, stmt, locals, generics)
                });
                let default = self.visit_arm("_".to_owned(), otherwise, locals, generics);
                self.arena
                    .text(format!("match {} ", self.format_place(place, locals)))
                    .append(self.visit_block(arms.chain(std::iter::once(default))))
            }
        }
    }

    fn visit_arm(
        &'a self,
        pattern: String,
        stmt: &'a Statement,
        locals: &'a [Var],
        generics: Generics<'a>,
    ) -> Document<'a> {
        self.arena
            .text(format!("{} => ", pattern))
            .append(self.visit_block(
                std::iter::once(self.visit_statement(stmt, locals, generics)),
            ))
    }

    /// The enumeration matched over, when the scrutinee is a local of ADT type.
    fn match_scrutinee_adt(&self, place: &Place, locals: &[Var]) -> Option<TypeDeclId> {
        if !place.projection.is_empty() {
            return None;
        }
        match find_local(locals, place).map(|v| &v.ty) {
            Some(Ty::Adt(TypeId::Adt(id), _, _)) => Some(*id),
            _ => None,
        }
    }

    fn format_variant(&self, adt: Option<TypeDeclId>, variant: VariantId) -> String {
        adt.and_then(|id| self.krate.type_decl(id))
            .and_then(|d| d.variant(variant))
            .map(|v| v.name.clone())
            .unwrap_or_else(|| format!("@Variant{}", variant))
    }

    pub fn format_ty<R: FormatRegion>(&self, ty: &Ty<R>, generics: Generics<'_>) -> String {
        match ty {
            Ty::Adt(TypeId::Tuple, _, tys) => {
                let tys = tys
                    .iter()
                    .map(|t| self.format_ty(t, generics))
                    .collect::<Vec<_>>();
                match tys.len() {
                    1 => format!("({},)", tys[0]),
                    _ => format!("({})", tys.join(", ")),
                }
            }
            Ty::Adt(id, regions, tys) => {
                let head = match id {
                    TypeId::Adt(id) => self.format_adt(*id),
                    TypeId::Assumed(assumed) => assumed.to_string(),
                    TypeId::Tuple => ice!("tuples are printed before other applications"),
                };
                let args = regions
                    .iter()
                    .map(|r| r.format_region(generics))
                    .chain(tys.iter().map(|t| self.format_ty(t, generics)))
                    .collect::<Vec<_>>();
                if args.is_empty() {
                    head
                } else {
                    format!("{}<{}>", head, args.join(", "))
                }
            }
            Ty::TypeVar(id) => generics
                .types
                .iter()
                .find(|t| t.index == *id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| format!("@T{}", id)),
            Ty::Bool => "bool".to_owned(),
            Ty::Char => "char".to_owned(),
            Ty::Never => "!".to_owned(),
            Ty::Integer(ty) => ty.to_string(),
            Ty::Str => "str".to_owned(),
            Ty::Array(ty) => format!("[{}; _]", self.format_ty(ty, generics)),
            Ty::Slice(ty) => format!("[{}]", self.format_ty(ty, generics)),
            Ty::Ref(region, ty, kind) => {
                let mutability = match kind {
                    crate::ty::RefKind::Mut => "mut ",
                    crate::ty::RefKind::Shared => "",
                };
                format!(
                    "&{} {}{}",
                    region.format_region(generics),
                    mutability,
                    self.format_ty(ty, generics)
                )
            }
        }
    }

    fn format_adt(&self, id: TypeDeclId) -> String {
        self.krate
            .type_decl(id)
            .map(|d| d.name.to_string())
            .unwrap_or_else(|| format!("@Adt{}", id))
    }

    fn format_fun(&self, id: FunDeclId) -> String {
        self.krate
            .fun_decl(id)
            .map(|d| d.name.to_string())
            .unwrap_or_else(|| format!("@Fun{}", id))
    }

    fn format_global(&self, id: GlobalDeclId) -> String {
        self.krate
            .global_decl(id)
            .map(|d| d.name.to_string())
            .unwrap_or_else(|| format!("@Global{}", id))
    }

    fn format_var(&self, var: &Var) -> String {
        match &var.name {
            Some(name) => format!("{}@{}", name, var.index),
            None => format!("@{}", var.index),
        }
    }

    pub fn format_place(&self, place: &Place, locals: &[Var]) -> String {
        let mut out = match find_local(locals, place) {
            Some(var) => self.format_var(var),
            None => format!("@{}", place.var_id),
        };
        for elem in &place.projection {
            out = match elem {
                ProjectionElem::Deref => format!("*({})", out),
                ProjectionElem::DerefBox => format!("deref_box ({})", out),
                ProjectionElem::Field(FieldProjKind::Adt(id, variant), field) => {
                    let name = self
                        .krate
                        .type_decl(*id)
                        .and_then(|d| d.field(*variant, *field))
                        .and_then(|f| f.name.clone())
                        .unwrap_or_else(|| field.to_string());
                    format!("({}).{}", out, name)
                }
                ProjectionElem::Field(FieldProjKind::Tuple(_), field) => {
                    format!("({}).{}", out, field)
                }
                ProjectionElem::Field(FieldProjKind::Option(variant), field) => {
                    format!("({} as {}).{}", out, option_variant_name(*variant), field)
                }
            };
        }
        out
    }

    pub fn format_operand(&self, op: &Operand, locals: &[Var], generics: Generics<'_>) -> String {
        match op {
            Operand::Copy(p) => format!("copy ({})", self.format_place(p, locals)),
            Operand::Move(p) => format!("move ({})", self.format_place(p, locals)),
            Operand::Constant(ty, value) => {
                let value = match value {
                    OperandConstantValue::ConstantValue(v) => v.to_string(),
                    OperandConstantValue::Adt(id) => format!("ConstAdt {}", self.format_adt(*id)),
                    OperandConstantValue::Unit => "()".to_owned(),
                };
                format!("const ({} : {})", value, self.format_ty(ty, generics))
            }
        }
    }

    pub fn format_rvalue(&self, rvalue: &Rvalue, locals: &[Var], generics: Generics<'_>) -> String {
        match rvalue {
            Rvalue::Use(op) => self.format_operand(op, locals, generics),
            Rvalue::Ref(place, kind) => format!("{}{}", kind, self.format_place(place, locals)),
            Rvalue::UnaryOp(op, x) => format!("{}({})", op, self.format_operand(x, locals, generics)),
            Rvalue::BinaryOp(op, x, y) => format!(
                "{} {} {}",
                self.format_operand(x, locals, generics),
                op,
                self.format_operand(y, locals, generics)
            ),
            Rvalue::Discriminant(place) => {
                format!("@discriminant({})", self.format_place(place, locals))
            }
            Rvalue::Global(id) => self.format_global(*id),
            Rvalue::Aggregate(kind, ops) => {
                let ops = ops
                    .iter()
                    .map(|op| self.format_operand(op, locals, generics))
                    .collect::<Vec<_>>();
                match kind {
                    AggregateKind::Tuple => format!("({})", ops.join(", ")),
                    AggregateKind::Option(variant, _) => {
                        format!("{}({})", option_variant_name(*variant), ops.join(", "))
                    }
                    AggregateKind::Adt(id, variant, _, _) => {
                        let decl = self.krate.type_decl(*id);
                        let fields = ops
                            .iter()
                            .enumerate()
                            .map(|(i, op)| {
                                let name = decl
                                    .and_then(|d| d.field(*variant, crate::ty::FieldId::new(i)))
                                    .and_then(|f| f.name.clone())
                                    .unwrap_or_else(|| i.to_string());
                                format!("{}: {}", name, op)
                            })
                            .collect::<Vec<_>>();
                        let head = match variant {
                            None => self.format_adt(*id),
                            Some(v) => format!(
                                "{}::{}",
                                self.format_adt(*id),
                                self.format_variant(Some(*id), *v)
                            ),
                        };
                        format!("{} {{ {} }}", head, fields.join(", "))
                    }
                }
            }
        }
    }

    fn format_call(&self, call: &Call, locals: &[Var], generics: Generics<'_>) -> String {
        let func = match call.func {
            FunId::Regular(id) => self.format_fun(id),
            FunId::Assumed(id) => format!("@{:?}", id),
        };
        let type_args = if call.type_args.is_empty() {
            String::new()
        } else {
            let tys = call
                .type_args
                .iter()
                .map(|t| self.format_ty(t, generics))
                .collect::<Vec<_>>();
            format!("<{}>", tys.join(", "))
        };
        let args = call
            .args
            .iter()
            .map(|op| self.format_operand(op, locals, generics))
            .collect::<Vec<_>>();
        format!(
            "{} := {}{}({});",
            self.format_place(&call.dest, locals),
            func,
            type_args,
            args.join(", ")
        )
    }
}

fn find_local<'l>(locals: &'l [Var], place: &Place) -> Option<&'l Var> {
    locals.iter().find(|v| v.index == place.var_id)
}

/// Variant 0 of the builtin option type is `None`, variant 1 is `Some`.
fn option_variant_name(variant: VariantId) -> String {
    match variant.index() {
        0 => "None".to_owned(),
        1 => "Some".to_owned(),
        _ => format!("@Variant{}", variant),
    }
}

/// Format a crate to a string in the textual format.
pub fn format_crate(krate: &LlbcCrate) -> String {
    let pass = CrateTextualPass::new(krate);
    let doc = pass.visit_crate();
    CrateTextualPass::format_doc_to_string(doc)
}

#[cfg(test)]
mod tests {
    use super::{format_crate, CrateTextualPass, FormatRegion, Generics};
    use crate::expr::{Operand, Place, ProjectionElem, Rvalue, VarId};
    use crate::gast::{DeclarationGroup, FunDeclId, FunSig, GDeclarationGroup, GExprBody, Var};
    use crate::llbc::{FunDecl, LlbcCrate, RawStatement, Statement};
    use crate::name::Name;
    use crate::ty::{
        ErasedRegion, Field, IntegerTy, Region, RegionVar, RegionVarId, RefKind, Ty, TypeDecl,
        TypeDeclId, TypeDeclKind, TypeId, TypeVar, TypeVarId,
    };
    use llbc_span::{FileName, Loc, Meta, Span};

    fn meta() -> Meta {
        Meta::new(Span::new(
            FileName::Local("lib.rs".to_owned()),
            Loc { line: 1, col: 0 },
            Loc { line: 1, col: 1 },
        ))
    }

    fn stmt(content: RawStatement) -> Statement {
        Statement::new(meta(), content)
    }

    fn pair_decl() -> TypeDecl {
        TypeDecl {
            def_id: TypeDeclId::new(0),
            meta: meta(),
            name: Name::from_idents(["test", "Pair"]),
            region_params: vec![],
            type_params: vec![TypeVar {
                index: TypeVarId::new(0),
                name: "T".to_owned(),
            }],
            regions_hierarchy: vec![],
            kind: TypeDeclKind::Struct(vec![
                Field {
                    meta: meta(),
                    name: Some("x".to_owned()),
                    ty: Ty::TypeVar(TypeVarId::new(0)),
                },
                Field {
                    meta: meta(),
                    name: Some("y".to_owned()),
                    ty: Ty::Integer(IntegerTy::U32),
                },
            ]),
        }
    }

    fn u32_ty<R>() -> Ty<R> {
        Ty::Integer(IntegerTy::U32)
    }

    fn id_decl() -> FunDecl {
        FunDecl {
            def_id: FunDeclId::new(0),
            meta: meta(),
            name: Name::from_idents(["test", "id"]),
            signature: FunSig {
                region_params: vec![],
                num_early_bound_regions: 0,
                regions_hierarchy: vec![],
                type_params: vec![],
                inputs: vec![u32_ty()],
                output: u32_ty(),
            },
            body: Some(GExprBody {
                meta: meta(),
                arg_count: 1,
                locals: vec![
                    Var {
                        index: VarId::new(0),
                        name: None,
                        ty: u32_ty(),
                    },
                    Var {
                        index: VarId::new(1),
                        name: Some("x".to_owned()),
                        ty: u32_ty(),
                    },
                ],
                body: stmt(RawStatement::Sequence(
                    Box::new(stmt(RawStatement::Assign(
                        Place::new(VarId::new(0)),
                        Rvalue::Use(Operand::Copy(Place::new(VarId::new(1)))),
                    ))),
                    Box::new(stmt(RawStatement::Return)),
                )),
            }),
        }
    }

    fn test_crate() -> LlbcCrate {
        let mut krate = LlbcCrate::new("test");
        krate.types.insert(TypeDeclId::new(0), pair_decl());
        krate.functions.insert(FunDeclId::new(0), id_decl());
        krate.declarations = vec![
            DeclarationGroup::Type(GDeclarationGroup::NonRec(TypeDeclId::new(0))),
            DeclarationGroup::Fun(GDeclarationGroup::NonRec(FunDeclId::new(0))),
        ];
        krate
    }

    #[test]
    fn test_format_crate() {
        let krate = test_crate();
        insta::assert_snapshot!(format_crate(&krate), @r"
        // crate test

        struct test::Pair<T> {
          x: T,
          y: u32,
        }

        fn test::id(x@1: u32) -> u32 {
          @0 := copy (x@1);
          return;
        }
        ");
    }

    #[test]
    fn test_format_regions_by_name() {
        let regions = vec![RegionVar {
            index: RegionVarId::new(0),
            name: Some("'a".to_owned()),
        }];
        let generics = Generics::new(&regions, &[]);
        assert_eq!(Region::Var(RegionVarId::new(0)).format_region(generics), "'a");
        assert_eq!(Region::Var(RegionVarId::new(3)).format_region(generics), "'_3");
        assert_eq!(Region::<RegionVarId>::Static.format_region(generics), "'static");
        assert_eq!(ErasedRegion::Erased.format_region(generics), "'_");
    }

    #[test]
    fn test_format_types_and_places() {
        let krate = test_crate();
        let pass = CrateTextualPass::new(&krate);
        let generics = Generics::default();
        let pair: Ty<ErasedRegion> = Ty::Adt(
            TypeId::Adt(TypeDeclId::new(0)),
            vec![],
            vec![Ty::Bool],
        );
        assert_eq!(pass.format_ty(&pair, generics), "test::Pair<bool>");
        let dangling: Ty<ErasedRegion> = Ty::Adt(TypeId::Adt(TypeDeclId::new(7)), vec![], vec![]);
        assert_eq!(pass.format_ty(&dangling, generics), "@Adt7");
        let reference = Ty::Ref(
            ErasedRegion::Erased,
            Box::new(Ty::Adt(TypeId::Tuple, vec![], vec![Ty::Char])),
            RefKind::Mut,
        );
        assert_eq!(pass.format_ty(&reference, generics), "&'_ mut (char,)");

        let locals = &krate.functions[&FunDeclId::new(0)]
            .body
            .as_ref()
            .map(|b| b.locals.clone())
            .unwrap_or_default();
        let place = Place::new(VarId::new(1)).project(ProjectionElem::Deref);
        assert_eq!(pass.format_place(&place, locals), "*(x@1)");
    }
}
