//! CLI arguments for rtprio-dump.
//!
//! The tool needs no arguments; the flags below only affect diagnostics
//! on stderr and where procfs is looked up.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "rtprio-dump",
    about = "Print scheduling attributes of every task as CSV",
    long_about = "Print scheduling attributes of every task as CSV.\n\n\
                  Walks every task id up to pid_max and prints executable, thread name, \
                  CPU affinity, scheduling policy, nice value and real-time priority, \
                  one row per live thread, on standard output.",
    version
)]
pub struct Args {
    /// Log level for diagnostics on stderr
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Mount point of the proc filesystem
    #[arg(long, default_value = "/proc")]
    pub proc_root: PathBuf,
}
