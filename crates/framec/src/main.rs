use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use bebopc::BebopcClient;
use framec::{resolve_schema_path, BebopcEncoder, Converter};

#[derive(Debug, Parser)]
#[command(name = "framec")]
#[command(about = "Converts orchestration observability NDJSON logs into schema-typed bebop frames")]
struct Cli {
    /// Newline-delimited JSON event log to convert.
    #[arg(long)]
    input: PathBuf,
    /// Directory that receives one frame file per event; created if missing.
    #[arg(long)]
    outdir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let schema = match resolve_schema_path() {
        Ok(schema) => schema,
        Err(err) => {
            error!(%err, "failed to resolve bundled schema");
            return ExitCode::FAILURE;
        }
    };

    let encoder = BebopcEncoder::new(BebopcClient::builder().build(), schema);
    let converter = Converter::new(encoder, cli.outdir);
    let results = match converter.run(&cli.input).await {
        Ok(results) => results,
        Err(err) => {
            error!(%err, "conversion run failed");
            return ExitCode::FAILURE;
        }
    };

    let mut converted = 0usize;
    let mut failed = 0usize;
    for result in &results {
        match &result.outcome {
            Ok(path) => {
                converted += 1;
                println!("line {}: {}", result.line_number, path.display());
            }
            Err(err) => {
                failed += 1;
                println!("line {}: {} ({err})", result.line_number, err.kind());
            }
        }
    }
    println!("converted {converted}, failed {failed}");

    // Per-event failures are reported above, not escalated to the exit code.
    ExitCode::SUCCESS
}
