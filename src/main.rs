//! rtprio-dump - version 0.1.0
//!
//! Prints one CSV row per live task with its scheduling attributes.
//! Any fatal condition aborts with a diagnostic on stderr and exit code 1.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, Level};

use rtprio_dump::cli::{Args, LogLevel};
use rtprio_dump::config::{validate_config, Config};
use rtprio_dump::output::CsvWriter;
use rtprio_dump::process::{dump, LinuxTaskSource};
use rtprio_dump::startup_checks::validate_requirements;

/// Initializes tracing on stderr; stdout carries only CSV.
fn setup_logging(args: &Args) {
    let log_level = match args.log_level {
        LogLevel::Off => Level::ERROR,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("WARNING: tracing subscriber already set");
    }

    debug!("Logging initialized with level: {:?}", args.log_level);
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = Config::from_args(args);
    validate_config(&config).context("invalid configuration")?;
    validate_requirements(&config.proc_root).context("startup checks failed")?;

    let stdout = io::stdout();
    let mut out = CsvWriter::new(BufWriter::new(stdout.lock()));

    let source = LinuxTaskSource::new(config.proc_root.clone());

    info!("Reading tasks under {}", config.proc_root.display());
    let summary = dump(&config.pid_max_path(), &source, &mut out)?;
    out.finish()?;

    info!(
        "Done: {} emitted, {} absent or vanished",
        summary.emitted, summary.vanished
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("FATAL: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
