//! The set of kernel interfaces probed for each task id.
//!
//! [`TaskSource`] is the seam between the snapshot assembler and the
//! kernel. [`LinuxTaskSource`] talks to the real system; tests substitute
//! scripted sources to reproduce exit races and inconsistent records.

use std::path::PathBuf;

use crate::error::ScanResult;
use crate::process::exe::read_exe;
use crate::process::probe::Probe;
use crate::process::sched::{
    read_affinity, read_nice, read_sched_policy, read_sched_priority, Policy,
};
use crate::process::stat::{read_stat, StatRecord};
use crate::process::status::{read_status, StatusRecord};
use crate::system::CpuList;

/// Per-task attribute readers.
///
/// Each method either finds the attribute, reports that the task is gone,
/// or fails fatally.
pub trait TaskSource {
    fn affinity(&self, tid: i32) -> ScanResult<Probe<CpuList>>;
    fn sched_priority(&self, tid: i32) -> ScanResult<Probe<i32>>;
    fn sched_policy(&self, tid: i32) -> ScanResult<Probe<Policy>>;
    fn exe(&self, tid: i32) -> ScanResult<Probe<String>>;
    fn nice(&self, tid: i32) -> ScanResult<Probe<i32>>;
    fn stat(&self, tid: i32) -> ScanResult<Probe<StatRecord>>;
    fn status(&self, tid: i32) -> ScanResult<Probe<StatusRecord>>;
}

/// Reads from the running kernel, with procfs mounted at `proc_root`.
#[derive(Debug, Clone)]
pub struct LinuxTaskSource {
    proc_root: PathBuf,
}

impl LinuxTaskSource {
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }
}

impl Default for LinuxTaskSource {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl TaskSource for LinuxTaskSource {
    fn affinity(&self, tid: i32) -> ScanResult<Probe<CpuList>> {
        read_affinity(tid)
    }

    fn sched_priority(&self, tid: i32) -> ScanResult<Probe<i32>> {
        read_sched_priority(tid)
    }

    fn sched_policy(&self, tid: i32) -> ScanResult<Probe<Policy>> {
        read_sched_policy(tid)
    }

    fn exe(&self, tid: i32) -> ScanResult<Probe<String>> {
        read_exe(&self.proc_root, tid)
    }

    fn nice(&self, tid: i32) -> ScanResult<Probe<i32>> {
        read_nice(tid)
    }

    fn stat(&self, tid: i32) -> ScanResult<Probe<StatRecord>> {
        read_stat(&self.proc_root, tid)
    }

    fn status(&self, tid: i32) -> ScanResult<Probe<StatusRecord>> {
        read_status(&self.proc_root, tid)
    }
}
