//! batchperf: record one perf event and exit.

use bp_config::RecorderConfig;
use bp_core::cli::{Cli, Invocation};
use bp_core::recorder::{record_event, RecordRequest};
use bp_core::{AppError, ExitCode};
use bp_store::AzureTableClient;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn run(invocation: &Invocation) -> Result<(), AppError> {
    let config = RecorderConfig::from_env()?;
    let client = AzureTableClient::new(&config.credentials)?;

    let request = RecordRequest {
        table: &invocation.table,
        source: &invocation.source,
        event: &invocation.event,
        ts: invocation.ts,
        message: invocation.message.clone(),
        max_attempts: invocation.max_attempts,
    };
    let row_key = record_event(&client, &config, &request)?;
    debug!(row_key = %row_key, table = %invocation.table, "event recorded");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let invocation = Cli::parse().resolve();
    match run(&invocation) {
        Ok(()) => std::process::exit(ExitCode::Ok.as_i32()),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.exit_code().as_i32());
        }
    }
}
