use crate::pipeline::{Pipeline, PipelineError, PipelineOperation};
use llbc_ast::llbc::LlbcCrate;
use llbc_diagnostics::ice;

/// Operation for emitting the decoded crate as Ron.
pub struct RonEmitOperation;

impl RonEmitOperation {
    pub fn format(krate: &LlbcCrate) -> String {
        ron::ser::to_string_pretty(krate, Default::default())
            .unwrap_or_else(|err| ice!(format!("failed to serialize crate to ron: {}", err)))
    }
}

impl PipelineOperation<LlbcCrate, LlbcCrate> for RonEmitOperation {
    fn execute(pipeline: &Pipeline, input: LlbcCrate) -> Result<LlbcCrate, PipelineError> {
        if !pipeline.opts.emit_ron {
            return Ok(input);
        }
        println!("{}", Self::format(&input));
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::RonEmitOperation;
    use llbc_ast::llbc::LlbcCrate;

    #[test]
    fn test_ron_holds_the_crate_name() {
        let krate = LlbcCrate::new("inspect");
        let ron = RonEmitOperation::format(&krate);
        assert!(ron.contains("name: \"inspect\""));
    }
}
