//! Matrix Rain Headless Runner
//!
//! Runs the rain without a terminal for a number of frames and prints the
//! final state, as text or as a JSON snapshot. With a fixed seed the output
//! is reproducible.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matrix_rain::app::Settings;
use matrix_rain::rain::{Charset, Field, Snapshot};

#[derive(Parser, Debug)]
#[command(name = "matrix-headless")]
#[command(version)]
#[command(about = "Run the rain headless and dump the final frame", long_about = None)]
struct Args {
    /// Terminal width
    #[arg(short, long, default_value_t = 80)]
    cols: usize,

    /// Terminal height
    #[arg(short, long, default_value_t = 24)]
    rows: usize,

    /// Frames to run
    #[arg(short, long, default_value_t = 100)]
    frames: u64,

    /// Seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Named character set
    #[arg(long, value_enum, default_value_t = Charset::Binary)]
    charset: Charset,

    /// Output the snapshot as JSON
    #[arg(short, long)]
    json: bool,

    /// Blank out characters at the background color
    #[arg(long)]
    hide_dim: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let settings = Settings {
        charset: args.charset,
        ..Settings::default()
    };
    let config = match settings.to_config(args.cols, args.rows) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Invalid geometry {}x{}: {}", args.cols, args.rows, e);
            return ExitCode::FAILURE;
        },
    };
    let dim_index = config.ramp().last_index();

    let mut field = match Field::new(config, args.seed) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Error creating field: {}", e);
            return ExitCode::FAILURE;
        },
    };
    for _ in 0..args.frames {
        field.step();
    }

    let snapshot = Snapshot::from_field(&field);
    if args.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            },
        }
    } else {
        println!(
            "Rain ({}x{}), frame {}, {} active columns:",
            args.cols,
            args.rows,
            snapshot.frame,
            field.active_columns()
        );
        println!("---");
        for line in snapshot.text(args.hide_dim, dim_index) {
            println!("{}", line);
        }
        println!("---");
    }

    ExitCode::SUCCESS
}
