use std::{env, fs::File};

use settlement_engine::{CliArgs, Engine, ingestion::CsvReader, report::StdOutReport};

#[tokio::main] // using Tokio runtime for async
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the settlement only.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = CliArgs::parse(env::args())?;
    let file = File::open(&args.input)?;
    tracing::info!(input = %args.input.display(), "settling expenses");

    let ingestion = CsvReader::new(file);
    let report = StdOutReport::stdout(args.config.display_scale);

    let mut engine = Engine::new(ingestion, report, args.config);
    engine.process().await?;

    Ok(())
}
