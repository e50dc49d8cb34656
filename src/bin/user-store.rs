//! User Store CLI Binary
//!
//! Command-line interface for the JSON file backed user record store.

use std::io::Write;
use std::process;
use user_store::logging::init_logging;
use user_store::tooling::cli::{Cli, CliContext};
use user_store::{ApiError, StoreError};

fn main() {
    let cli = Cli::parse_normalized();

    let context = match CliContext::new(cli.config.clone()).and_then(|ctx| ctx.with_overrides(&cli))
    {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&context.config().logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = context.execute(&cli.arguments(), &mut out).and_then(|()| {
        out.flush()
            .map_err(|e| ApiError::from(StoreError::from(e)))
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "Operation failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
