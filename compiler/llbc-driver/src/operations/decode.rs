use crate::pipeline::{JsonSyntaxError, Pipeline, PipelineError, PipelineOperation};
use llbc_ast::llbc::LlbcCrate;
use llbc_json::decode_llbc_crate;
use serde_json::Value;

/// Operation for decoding the input document into an LLBC crate.
pub struct DecodeOperation;

impl<T: AsRef<str>> PipelineOperation<T, LlbcCrate> for DecodeOperation {
    fn execute(_: &Pipeline, input: T) -> Result<LlbcCrate, PipelineError> {
        let input = input.as_ref();
        let document = serde_json::from_str::<Value>(input)
            .map_err(|err| JsonSyntaxError::new(input, err))?;
        let krate = decode_llbc_crate(&document)?;
        tracing::info!(
            name = %krate.name,
            declarations = krate.declarations.len(),
            "decoded crate"
        );
        Ok(krate)
    }
}
