use clap::Parser;
use llbc_driver::pipeline::{execute_inspection_pipeline, PipelineOptions};
use llbc_driver::query::{EmitQuery, QueryError};
use miette::{IntoDiagnostic, NamedSource, WrapErr};
use std::io::Read;

#[derive(clap::Parser)]
#[command(version, about, long_about = None)]
struct AppArgs {
    /// The input document. If this is `-`, the input is read from stdin.
    input: String,

    /// Should the decoded crate be emitted as Ron?
    #[arg(long, default_value = "false")]
    emit_ron: bool,

    /// Should the decoded crate be emitted in the textual format?
    #[arg(long, default_value = "false")]
    emit_text: bool,

    /// Emission queries to specify which declarations should be emitted.
    #[arg(long)]
    emit_query: Vec<String>,
}

impl TryFrom<&AppArgs> for PipelineOptions {
    type Error = QueryError;

    fn try_from(args: &AppArgs) -> Result<Self, Self::Error> {
        let queries = args.emit_query.iter().map(String::as_str).collect::<Vec<_>>();
        Ok(Self {
            emit_ron: args.emit_ron,
            emit_text: args.emit_text,
            queries: EmitQuery::from_queries(&queries)?,
        })
    }
}

/// Install a subscriber printing the decoder's events, only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> miette::Result<()> {
    init_tracing();
    let args = AppArgs::parse();
    let options = PipelineOptions::try_from(&args)?;

    let source = match args.input.as_str() {
        "-" => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .into_diagnostic()
                .wrap_err("failed to read from stdin")?;
            source
        }
        path => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read input file {}", path))?,
    };
    let source_code = NamedSource::new(&args.input, source.clone());

    let result = || -> miette::Result<()> {
        execute_inspection_pipeline(options, &source)?;
        Ok(())
    }();
    result.map_err(|e| e.with_source_code(source_code))?;
    Ok(())
}
