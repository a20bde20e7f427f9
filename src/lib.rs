//! rtprio-dump library
//!
//! Enumerates every task id on a Linux system and collects the scheduling
//! attributes the kernel exposes for it: executable, thread name, CPU
//! affinity, scheduling policy, nice value, real-time priority, and the
//! thread/process/parent/session ids.
//!
//! Tasks exit while the scan runs. Every attribute query therefore yields
//! a [`process::Probe`]: either the value or "vanished". A task that
//! vanished during any query is skipped; every other failure is a fatal
//! [`error::ScanError`].
//!
//! # Usage
//!
//! ```no_run
//! use rtprio_dump::output::CsvWriter;
//! use rtprio_dump::process::{dump, LinuxTaskSource};
//! use std::path::Path;
//!
//! let mut out = CsvWriter::new(std::io::stdout().lock());
//! let pid_max = Path::new("/proc/sys/kernel/pid_max");
//! let summary = dump(pid_max, &LinuxTaskSource::default(), &mut out)?;
//! out.finish()?;
//! eprintln!("{} rows", summary.emitted);
//! # Ok::<(), rtprio_dump::error::ScanError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod process;
pub mod snapshot;
pub mod startup_checks;
pub mod system;

// Re-export main types for convenience
pub use error::{ScanError, ScanResult};
pub use snapshot::{assemble, CpuMaskLabel, ProcessSnapshot};
pub use system::{CpuList, SystemLimits};
