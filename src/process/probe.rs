//! Outcome of querying one attribute of one identifier.
//!
//! Processes exit concurrently with the scan, so every reader has three
//! possible outcomes: the value, "the identifier is gone", or a fatal
//! [`ScanError`](crate::error::ScanError). Readers return
//! `ScanResult<Probe<T>>` to encode all three.

use nix::errno::Errno;
use std::io;

/// Non-fatal result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    Found(T),
    Vanished,
}

impl<T> Probe<T> {
    pub fn is_vanished(&self) -> bool {
        matches!(self, Probe::Vanished)
    }

    /// Returns the value if the probe found one.
    pub fn found(self) -> Option<T> {
        match self {
            Probe::Found(v) => Some(v),
            Probe::Vanished => None,
        }
    }
}

/// True if an I/O error on a procfs path means the task exited.
///
/// Opening `/proc/<tid>/...` after exit yields `ENOENT`; reading an
/// already-open record of a reaped task yields `ESRCH`.
pub fn io_vanished(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound || err.raw_os_error() == Some(Errno::ESRCH as i32)
}
