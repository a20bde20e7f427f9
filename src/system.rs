//! System-wide limits read once at startup.
//!
//! The scan needs two facts about the machine: the largest task id the
//! kernel can hand out (`/proc/sys/kernel/pid_max`) and the set of
//! configured processors, against which every task's affinity mask is
//! compared.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use nix::errno::Errno;
use tracing::debug;

use crate::error::{ScanError, ScanResult};

/// Set of CPU indices.
pub type CpuList = BTreeSet<usize>;

/// Immutable for the lifetime of the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemLimits {
    pub max_identifier: i32,
    pub all_cpus: CpuList,
}

impl SystemLimits {
    /// Reads both limits from the live system.
    pub fn probe(pid_max_path: &Path) -> ScanResult<Self> {
        let max_identifier = read_pid_max(pid_max_path)?;
        let all_cpus = all_cpus()?;
        debug!(
            "System limits: pid_max={}, configured cpus={}",
            max_identifier,
            all_cpus.len()
        );
        Ok(Self {
            max_identifier,
            all_cpus,
        })
    }
}

/// Parses the content of `pid_max`: exactly one integer, surrounding
/// whitespace allowed.
pub fn parse_pid_max(content: &str) -> Option<i32> {
    let mut parts = content.split_whitespace();
    let value = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(value)
}

/// Reads the maximum task id from `path`.
pub fn read_pid_max(path: &Path) -> ScanResult<i32> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::PidMaxUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    parse_pid_max(&content).ok_or_else(|| ScanError::PidMaxMalformed {
        path: path.to_path_buf(),
        content: content.trim_end().to_string(),
    })
}

/// Builds `{0 .. n-1}` for `n` processors.
pub fn cpu_range(n: usize) -> CpuList {
    (0..n).collect()
}

/// Returns the set of configured processors.
pub fn all_cpus() -> ScanResult<CpuList> {
    Errno::clear();
    // SAFETY: sysconf is safe to call with _SC_NPROCESSORS_CONF.
    let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_CONF) };
    if n < 0 {
        return Err(ScanError::CpuCount(Errno::last()));
    }
    Ok(cpu_range(n as usize))
}
