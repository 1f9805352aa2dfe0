use crate::operations::decode::DecodeOperation;
use crate::operations::emit_ron::RonEmitOperation;
use crate::operations::emit_text::TextEmitOperation;
use crate::query::{EmitQuery, QueryError};
use llbc_json::DecodeError;
use llbc_macros::declare_error_type;
use miette::{Diagnostic, SourceOffset, SourceSpan};
use thiserror::Error;

/// Execute the entire inspection pipeline over a JSON document.
pub fn execute_inspection_pipeline(
    opts: PipelineOptions,
    input: &str,
) -> Result<(), PipelineError> {
    let pipeline = Pipeline::new(opts);
    let krate = DecodeOperation::execute(&pipeline, input)?;
    let krate = RonEmitOperation::execute(&pipeline, krate)?;
    let _ = TextEmitOperation::execute(&pipeline, krate)?;
    Ok(())
}

declare_error_type! {
    #[error("pipeline error: {0}")]
    pub enum PipelineError {
        Json(JsonSyntaxError),
        Decode(DecodeError),
        Query(QueryError),
    }
}

/// The input is not a JSON document at all.
#[derive(Error, Diagnostic, Debug)]
#[diagnostic(code(driver::invalid_json))]
#[error("input is not valid json: {source}")]
pub struct JsonSyntaxError {
    pub source: serde_json::Error,
    #[label("here")]
    pub span: SourceSpan,
}

impl JsonSyntaxError {
    pub fn new(input: &str, source: serde_json::Error) -> Self {
        let offset = SourceOffset::from_location(input, source.line(), source.column());
        Self {
            source,
            span: (offset.offset(), 0).into(),
        }
    }
}

/// Options for the inspection pipeline.
///
/// Most of these are derived from the command line arguments.
#[derive(Debug, Default)]
pub struct PipelineOptions {
    pub emit_ron: bool,
    pub emit_text: bool,
    pub queries: Vec<EmitQuery>,
}

pub struct Pipeline {
    pub(crate) opts: PipelineOptions,
}

impl Pipeline {
    pub fn new(opts: PipelineOptions) -> Self {
        Self { opts }
    }
}

pub trait PipelineOperation<I, O> {
    fn execute(pipeline: &Pipeline, input: I) -> Result<O, PipelineError>;
}
