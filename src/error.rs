//! Fatal error taxonomy for the scan.
//!
//! Anything that is not "the identifier went away" ends up here and
//! aborts the whole scan. Vanished identifiers are not errors; see
//! [`crate::process::Probe`].

use nix::errno::Errno;
use std::path::PathBuf;

/// Result alias used across the readers and the scan driver.
pub type ScanResult<T> = Result<T, ScanError>;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot read {}", path.display())]
    PidMaxUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not contain exactly one integer: {content:?}", path.display())]
    PidMaxMalformed { path: PathBuf, content: String },

    #[error("sysconf(_SC_NPROCESSORS_CONF) failed: {0}")]
    CpuCount(Errno),

    #[error("{call}({tid}) failed")]
    Syscall {
        call: &'static str,
        tid: i32,
        #[source]
        source: Errno,
    },

    #[error("{op} {} failed", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed stat record for {tid}: {reason}")]
    MalformedStat { tid: i32, reason: String },

    #[error("malformed status record for {tid}: {reason}")]
    MalformedStatus { tid: i32, reason: String },

    #[error("{record} record of {tid} reports pid {found}")]
    TidMismatch {
        record: &'static str,
        tid: i32,
        found: i32,
    },

    #[error("parent pid mismatch for {tid}: stat says {stat}, status says {status}")]
    PpidMismatch { tid: i32, stat: i32, status: i32 },

    #[error("procfs root {} is not usable: {reason}", path.display())]
    ProcRoot { path: PathBuf, reason: String },

    #[error("failed to write CSV output")]
    Output(#[source] std::io::Error),
}
