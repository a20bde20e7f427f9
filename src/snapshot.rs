//! Snapshot assembly: one row's worth of data for one task id.
//!
//! All readers of a [`TaskSource`] are invoked for the id, in a fixed
//! order and without early exit. If any of them reports the task as gone
//! the whole snapshot is dropped. Otherwise the fields that two records
//! both report are cross-checked before the snapshot is built.

use std::fmt;

use tracing::debug;

use crate::error::{ScanError, ScanResult};
use crate::process::sched::{Policy, UNKNOWN_LABEL};
use crate::process::{Probe, StatRecord, StatusRecord, TaskSource};
use crate::system::CpuList;

/// Rendering of a task's affinity mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuMaskLabel {
    /// The mask equals the set of configured CPUs.
    All,
    /// Anything else; arbitrary subsets are not rendered.
    Unknown,
}

impl CpuMaskLabel {
    pub fn classify(affinity: &CpuList, all_cpus: &CpuList) -> Self {
        if affinity == all_cpus {
            CpuMaskLabel::All
        } else {
            CpuMaskLabel::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CpuMaskLabel::All => "all",
            CpuMaskLabel::Unknown => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for CpuMaskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scheduling attributes of one live task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSnapshot {
    pub exe: String,
    pub name: String,
    pub cpu_mask: CpuMaskLabel,
    pub policy: Policy,
    pub nice: i32,
    pub priority: i32,
    pub tid: i32,
    /// Thread group id, i.e. the owning process.
    pub pid: i32,
    pub ppid: i32,
    pub sid: i32,
}

/// Checks that the stat and status records describe `tid` and agree on
/// its parent.
pub fn cross_validate(tid: i32, stat: &StatRecord, status: &StatusRecord) -> ScanResult<()> {
    if stat.pid != tid {
        return Err(ScanError::TidMismatch {
            record: "stat",
            tid,
            found: stat.pid,
        });
    }
    if status.pid != tid {
        return Err(ScanError::TidMismatch {
            record: "status",
            tid,
            found: status.pid,
        });
    }
    if status.ppid != stat.ppid {
        return Err(ScanError::PpidMismatch {
            tid,
            stat: stat.ppid,
            status: status.ppid,
        });
    }
    Ok(())
}

/// Probes `tid` through `source`.
///
/// Returns `Ok(None)` if the task vanished during the probe sequence.
pub fn assemble<S>(source: &S, tid: i32, all_cpus: &CpuList) -> ScanResult<Option<ProcessSnapshot>>
where
    S: TaskSource + ?Sized,
{
    let affinity = source.affinity(tid)?;
    let priority = source.sched_priority(tid)?;
    let policy = source.sched_policy(tid)?;
    let exe = source.exe(tid)?;
    let nice = source.nice(tid)?;
    let stat = source.stat(tid)?;
    let status = source.status(tid)?;

    let (
        Probe::Found(affinity),
        Probe::Found(priority),
        Probe::Found(policy),
        Probe::Found(exe),
        Probe::Found(nice),
        Probe::Found(stat),
        Probe::Found(status),
    ) = (affinity, priority, policy, exe, nice, stat, status)
    else {
        debug!("tid {} vanished during probe, skipping", tid);
        return Ok(None);
    };

    cross_validate(tid, &stat, &status)?;

    Ok(Some(ProcessSnapshot {
        exe,
        name: status.name,
        cpu_mask: CpuMaskLabel::classify(&affinity, all_cpus),
        policy,
        nice,
        priority,
        tid,
        pid: status.tgid,
        ppid: stat.ppid,
        sid: stat.sid,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Tests for CpuMaskLabel
    // -------------------------------------------------------------------------

    #[test]
    fn test_cpu_mask_all() {
        let all = CpuList::from([0, 1, 2, 3]);
        assert_eq!(CpuMaskLabel::classify(&all.clone(), &all), CpuMaskLabel::All);
        assert_eq!(CpuMaskLabel::All.to_string(), "all");
    }

    #[test]
    fn test_cpu_mask_subset_and_superset() {
        let all = CpuList::from([0, 1, 2, 3]);
        assert_eq!(
            CpuMaskLabel::classify(&CpuList::from([0, 1]), &all),
            CpuMaskLabel::Unknown
        );
        assert_eq!(
            CpuMaskLabel::classify(&CpuList::from([0, 1, 2, 3, 4]), &all),
            CpuMaskLabel::Unknown
        );
        assert_eq!(
            CpuMaskLabel::classify(&CpuList::new(), &all),
            CpuMaskLabel::Unknown
        );
        assert_eq!(CpuMaskLabel::Unknown.label(), "???");
    }

    // -------------------------------------------------------------------------
    // Tests for cross_validate
    // -------------------------------------------------------------------------

    fn status(pid: i32, ppid: i32) -> StatusRecord {
        StatusRecord {
            name: "t".to_string(),
            pid,
            ppid,
            tgid: pid,
        }
    }

    #[test]
    fn test_cross_validate_consistent() {
        let stat = StatRecord { pid: 10, ppid: 1, sid: 10 };
        assert!(cross_validate(10, &stat, &status(10, 1)).is_ok());
    }

    #[test]
    fn test_cross_validate_stat_pid_mismatch() {
        let stat = StatRecord { pid: 11, ppid: 1, sid: 10 };
        let err = cross_validate(10, &stat, &status(10, 1)).unwrap_err();
        assert!(matches!(
            err,
            ScanError::TidMismatch {
                record: "stat",
                tid: 10,
                found: 11
            }
        ));
    }

    #[test]
    fn test_cross_validate_status_pid_mismatch() {
        let stat = StatRecord { pid: 10, ppid: 1, sid: 10 };
        let err = cross_validate(10, &stat, &status(12, 1)).unwrap_err();
        assert!(matches!(err, ScanError::TidMismatch { record: "status", .. }));
    }

    #[test]
    fn test_cross_validate_ppid_mismatch() {
        let stat = StatRecord { pid: 10, ppid: 1, sid: 10 };
        let err = cross_validate(10, &stat, &status(10, 2)).unwrap_err();
        assert!(matches!(
            err,
            ScanError::PpidMismatch {
                tid: 10,
                stat: 1,
                status: 2
            }
        ));
    }
}
