use std::fs::File;

use anyhow::{Context, Result};
use teller::{bin_utils::Service, service::TransferError};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let accounts_file = args
        .next()
        .context("Expected an accounts file name as the first argument")?;
    let transfers_file = args
        .next()
        .context("Expected a transfers file name as the second argument")?;
    let accounts = File::open(&accounts_file)
        .with_context(|| format!("Failed to open `{accounts_file}`"))?;
    let transfers = File::open(&transfers_file)
        .with_context(|| format!("Failed to open `{transfers_file}`"))?;

    let service = Service {
        accounts,
        transfers,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err: TransferError| {
            // domain rejections are expected outcomes of a batch
            if err.is_validation() {
                warn!(line, %err, "transfer rejected");
            } else {
                error!(line, %err, "transfer failed");
            }
        }),
    };
    service.run()
}
