//! Matrix Rain - live terminal animation
//!
//! Fills the terminal with digital rain until `q`, `Esc` or `Ctrl-C`.

use std::fs::File;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matrix_rain::app::{App, CliArgs, Settings};

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    // Default to "warn"; RUST_LOG=debug for more
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        },
        None => registry.with(fmt::layer().with_writer(io::stderr)).init(),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("Cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    // Precedence: CLI > env > file > defaults
    let settings = match Settings::load_with_args(&args) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Settings error: {}", e);
            eprintln!("Settings error: {}", e);
            return ExitCode::FAILURE;
        },
    };
    tracing::debug!("Settings: {:?}", settings);

    // The session is restored before this returns, so errors print cleanly
    match App::new(settings).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("matrix: {}", e);
            ExitCode::FAILURE
        },
    }
}
