use crate::pipeline::{Pipeline, PipelineError, PipelineOperation};
use crate::query::{EmitQuery, QueryError};
use llbc_ast::llbc::LlbcCrate;
use llbc_ast::textual_pass::{CrateTextualPass, Document};

/// Operation for emitting the decoded crate in the textual format.
pub struct TextEmitOperation;

impl TextEmitOperation {
    /// Find the declaration a query refers to.
    pub fn decode<'a>(
        query: &EmitQuery,
        krate: &'a LlbcCrate,
        textual_pass: &'a CrateTextualPass<'a>,
    ) -> Result<Document<'a>, PipelineError> {
        let doc = match query {
            EmitQuery::Type(name) => krate
                .find_type_by_name(name)
                .map(|d| textual_pass.visit_type_decl(d)),
            EmitQuery::Function(name) => krate
                .find_fun_by_name(name)
                .map(|d| textual_pass.visit_fun_decl(d)),
            EmitQuery::Global(name) => krate
                .find_global_by_name(name)
                .map(|d| textual_pass.visit_global_decl(d)),
        };
        doc.ok_or_else(|| QueryError::UnknownDeclaration(query.to_string()).into())
    }

    /// Render the whole crate, or only the declarations the queries name.
    pub fn format(queries: &[EmitQuery], krate: &LlbcCrate) -> Result<String, PipelineError> {
        let textual_pass = CrateTextualPass::new(krate);
        // If no query patterns have been specified, we dump the entire crate.
        if queries.is_empty() {
            return Ok(CrateTextualPass::format_doc_to_string(
                textual_pass.visit_crate(),
            ));
        }
        let mut texts = Vec::with_capacity(queries.len());
        for query in queries {
            let target = Self::decode(query, krate, &textual_pass)?;
            texts.push(CrateTextualPass::format_doc_to_string(target));
        }
        Ok(texts.join("\n\n"))
    }
}

impl PipelineOperation<LlbcCrate, LlbcCrate> for TextEmitOperation {
    fn execute(pipeline: &Pipeline, input: LlbcCrate) -> Result<LlbcCrate, PipelineError> {
        if !pipeline.opts.emit_text {
            return Ok(input);
        }
        let text = Self::format(&pipeline.opts.queries, &input)?;
        println!("{}", text);
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::TextEmitOperation;
    use crate::pipeline::PipelineError;
    use crate::query::{EmitQuery, QueryError};
    use llbc_ast::gast::{DeclarationGroup, GDeclarationGroup};
    use llbc_ast::llbc::LlbcCrate;
    use llbc_ast::name::Name;
    use llbc_ast::ty::{TypeDecl, TypeDeclId, TypeDeclKind};
    use llbc_macros::{assert_err, assert_matches, assert_ok};
    use llbc_span::{FileName, Loc, Meta, Span};

    fn krate() -> LlbcCrate {
        let meta = Meta::new(Span::new(
            FileName::Local("lib.rs".to_owned()),
            Loc { line: 1, col: 0 },
            Loc { line: 1, col: 4 },
        ));
        let mut krate = LlbcCrate::new("inspect");
        for (id, ident) in [(0, "Left"), (1, "Right")] {
            krate.types.insert(
                TypeDeclId::new(id),
                TypeDecl {
                    def_id: TypeDeclId::new(id),
                    meta: meta.clone(),
                    name: Name::from_idents(["inspect", ident]),
                    region_params: vec![],
                    type_params: vec![],
                    regions_hierarchy: vec![],
                    kind: TypeDeclKind::Opaque,
                },
            );
            krate.declarations.push(DeclarationGroup::Type(GDeclarationGroup::NonRec(
                TypeDeclId::new(id),
            )));
        }
        krate
    }

    #[test]
    fn test_queries_select_declarations() {
        let queries = [EmitQuery::Type("inspect::Right".to_owned())];
        let text = assert_ok!(TextEmitOperation::format(&queries, &krate()));
        assert_eq!(text, "opaque type inspect::Right");
    }

    #[test]
    fn test_without_queries_the_whole_crate_is_emitted() {
        let text = assert_ok!(TextEmitOperation::format(&[], &krate()));
        assert_eq!(
            text,
            "// crate inspect\n\nopaque type inspect::Left\n\nopaque type inspect::Right"
        );
    }

    #[test]
    fn test_unknown_declaration_is_an_error() {
        let queries = [EmitQuery::Function("inspect::Left".to_owned())];
        let err = assert_err!(TextEmitOperation::format(&queries, &krate()));
        let query = assert_matches!(err, PipelineError::Query(QueryError::UnknownDeclaration(q)) => q);
        assert_eq!(query, "fn.inspect::Left");
    }
}
