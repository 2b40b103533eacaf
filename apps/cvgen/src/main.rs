mod config;
mod errors;
mod fonts;
mod generator;
mod layout;
mod models;
mod render;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Cli, Config};
use crate::errors::CvError;

fn main() -> ExitCode {
    // Load .env before parsing so CVGEN_* fallbacks see it
    dotenvy::dotenv().ok();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_usage(&err),
    };

    // Initialize structured logging; stdout is reserved for the result line
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting cvgen v{}", env!("CARGO_PKG_VERSION"));

    let result = Config::from_cli(cli)
        .and_then(|config| generator::generate(&config).map_err(anyhow::Error::from));

    match result {
        Ok(path) => {
            println!("\nSaved {}\n", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(&err),
    }
}

/// `--help` and `--version` exit 0; bad arguments exit 1 like any other failure.
fn report_usage(err: &clap::Error) -> ExitCode {
    // clap renders its own "error: ..." line and usage hint
    let _ = err.print();
    if err.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Output failures get the generic message; everything else says what broke.
fn report_failure(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<CvError>() {
        Some(cv_err) if cv_err.is_output_failure() => {
            error!("{cv_err}");
            eprintln!("\nSomething went wrong\n");
        }
        _ => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
        }
    }
    ExitCode::FAILURE
}
