use std::fs::File;

use anyhow::{Context, Result};
use prepaid_card::{
    bin_utils::Service,
    card::{Balance, PrepaidCard},
    pin::Pin,
    processor::ProcessError,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the CSV summary, logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected a file name as the first argument")?;
    let pin: Pin = args
        .next()
        .context("Expected the card PIN as the second argument")?
        .parse()
        .context("Failed to parse the card PIN")?;
    let opening_balance: Balance = args
        .next()
        .map(|balance| balance.parse::<Balance>())
        .transpose()
        .context("Failed to parse the opening balance")?
        .unwrap_or_default();

    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;
    let card = PrepaidCard::with_balance(pin, opening_balance);

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        card: &card,
        error_printer: Box::new(|line, err| {
            match err {
                ProcessError::CommandErr(err) => {
                    eprintln!("Error at line {line}: {err}")
                }
                ProcessError::CardErr(err) => {
                    // card rejections are outcomes, not technical errors
                    debug!(line, %err, "operation rejected by card");
                }
            }
        }),
    };
    service.run()
}
