//! Scheduler-related queries for a single task id.
//!
//! This module wraps `sched_getaffinity`, `sched_getparam`,
//! `sched_getscheduler` and `getpriority`. `ESRCH` from any of them means
//! the task exited between the start of the scan and this call; every
//! other errno is fatal.

use std::fmt;

use nix::errno::Errno;
use nix::sched::{sched_getaffinity, CpuSet};
use nix::unistd::Pid;
use tracing::trace;

use crate::error::{ScanError, ScanResult};
use crate::process::probe::Probe;
use crate::system::CpuList;

/// Linux `SCHED_DEADLINE`, not exported by every libc target.
pub const SCHED_DEADLINE: i32 = 6;

/// Label used for any policy or mask this tool cannot name.
pub const UNKNOWN_LABEL: &str = "???";

/// Scheduling policy as reported by `sched_getscheduler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Other,
    Batch,
    Idle,
    Fifo,
    Rr,
    Deadline,
    /// Any value not in the list above, e.g. a policy with
    /// `SCHED_RESET_ON_FORK` or one added by a newer kernel.
    Unknown(i32),
}

impl Policy {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            libc::SCHED_OTHER => Policy::Other,
            libc::SCHED_BATCH => Policy::Batch,
            libc::SCHED_IDLE => Policy::Idle,
            libc::SCHED_FIFO => Policy::Fifo,
            libc::SCHED_RR => Policy::Rr,
            SCHED_DEADLINE => Policy::Deadline,
            other => Policy::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Policy::Other => "OTHER",
            Policy::Batch => "BATCH",
            Policy::Idle => "IDLE",
            Policy::Fifo => "FIFO",
            Policy::Rr => "RR",
            Policy::Deadline => "DEADLINE",
            Policy::Unknown(_) => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a syscall result onto found / vanished / fatal.
fn classify<T>(call: &'static str, tid: i32, res: Result<T, Errno>) -> ScanResult<Probe<T>> {
    match res {
        Ok(v) => Ok(Probe::Found(v)),
        Err(Errno::ESRCH) => {
            trace!("{}({}) -> ESRCH", call, tid);
            Ok(Probe::Vanished)
        }
        Err(source) => Err(ScanError::Syscall { call, tid, source }),
    }
}

/// Converts a kernel affinity mask into the set of CPU indices it contains.
pub fn cpu_set_indices(set: &CpuSet) -> CpuList {
    (0..CpuSet::count())
        .filter(|&cpu| set.is_set(cpu).unwrap_or(false))
        .collect()
}

/// Reads the CPU affinity mask of `tid`.
pub fn read_affinity(tid: i32) -> ScanResult<Probe<CpuList>> {
    let res = sched_getaffinity(Pid::from_raw(tid)).map(|set| cpu_set_indices(&set));
    classify("sched_getaffinity", tid, res)
}

/// Reads the static (real-time) scheduling priority of `tid`.
pub fn read_sched_priority(tid: i32) -> ScanResult<Probe<i32>> {
    // SAFETY: sched_param is plain old data; all-zero is a valid value.
    let mut param: libc::sched_param = unsafe { std::mem::zeroed() };
    // SAFETY: `param` is a valid, writable sched_param for the duration of the call.
    let ret = unsafe { libc::sched_getparam(tid, &mut param) };
    let res = Errno::result(ret).map(|_| param.sched_priority);
    classify("sched_getparam", tid, res)
}

/// Reads the scheduling policy of `tid`.
pub fn read_sched_policy(tid: i32) -> ScanResult<Probe<Policy>> {
    // SAFETY: sched_getscheduler takes no pointers.
    let ret = unsafe { libc::sched_getscheduler(tid) };
    let res = Errno::result(ret).map(Policy::from_raw);
    classify("sched_getscheduler", tid, res)
}

/// Reads the nice value of `tid`.
///
/// `getpriority` can legitimately return -1, so success is decided by
/// errno alone: it is cleared right before the call and inspected right
/// after, with nothing in between that could touch it.
pub fn read_nice(tid: i32) -> ScanResult<Probe<i32>> {
    Errno::clear();
    // SAFETY: getpriority takes no pointers.
    let value = unsafe { libc::getpriority(libc::PRIO_PROCESS, tid as libc::id_t) };
    let errno = Errno::last_raw();

    let res = if errno == 0 {
        Ok(value)
    } else {
        Err(Errno::from_raw(errno))
    };
    classify("getpriority", tid, res)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Tests for Policy
    // -------------------------------------------------------------------------

    #[test]
    fn test_policy_known_values() {
        assert_eq!(Policy::from_raw(libc::SCHED_OTHER), Policy::Other);
        assert_eq!(Policy::from_raw(libc::SCHED_FIFO), Policy::Fifo);
        assert_eq!(Policy::from_raw(libc::SCHED_RR), Policy::Rr);
        assert_eq!(Policy::from_raw(libc::SCHED_BATCH), Policy::Batch);
        assert_eq!(Policy::from_raw(libc::SCHED_IDLE), Policy::Idle);
        assert_eq!(Policy::from_raw(SCHED_DEADLINE), Policy::Deadline);
        assert_eq!(Policy::Fifo.to_string(), "FIFO");
        assert_eq!(Policy::Deadline.label(), "DEADLINE");
    }

    #[test]
    fn test_policy_unknown_degrades() {
        let reset_on_fork = 0x4000_0000 | libc::SCHED_FIFO;
        assert_eq!(Policy::from_raw(reset_on_fork), Policy::Unknown(reset_on_fork));
        assert_eq!(Policy::from_raw(42).label(), UNKNOWN_LABEL);
        assert_eq!(Policy::from_raw(-7).to_string(), "???");
    }

    // -------------------------------------------------------------------------
    // Tests for classify
    // -------------------------------------------------------------------------

    #[test]
    fn test_classify_splits_esrch_from_fatal() {
        assert_eq!(classify("x", 5, Ok(1)).unwrap(), Probe::Found(1));
        assert!(classify::<i32>("x", 5, Err(Errno::ESRCH))
            .unwrap()
            .is_vanished());

        let err = classify::<i32>("sched_getparam", 5, Err(Errno::EPERM)).unwrap_err();
        assert!(matches!(
            err,
            ScanError::Syscall {
                call: "sched_getparam",
                tid: 5,
                source: Errno::EPERM
            }
        ));
    }

    #[test]
    fn test_cpu_set_indices() {
        let mut set = CpuSet::new();
        set.set(0).unwrap();
        set.set(3).unwrap();
        let cpus = cpu_set_indices(&set);
        assert_eq!(cpus.into_iter().collect::<Vec<_>>(), vec![0, 3]);
    }

    // -------------------------------------------------------------------------
    // Live queries against this test process
    // -------------------------------------------------------------------------

    #[test]
    fn test_live_queries_on_self() {
        let tid = std::process::id() as i32;

        let cpus = read_affinity(tid).unwrap().found().unwrap();
        assert!(!cpus.is_empty());
        assert!(read_sched_policy(tid).unwrap().found().is_some());
        assert!(read_sched_priority(tid).unwrap().found().is_some());

        let nice = read_nice(tid).unwrap().found().unwrap();
        assert!((-20..=19).contains(&nice));
    }

    #[test]
    fn test_live_queries_on_missing_tid() {
        // Larger than any pid_max the kernel accepts (PID_MAX_LIMIT = 2^22).
        let tid = 1 << 23;
        assert!(read_affinity(tid).unwrap().is_vanished());
        assert!(read_sched_priority(tid).unwrap().is_vanished());
        assert!(read_sched_policy(tid).unwrap().is_vanished());
        assert!(read_nice(tid).unwrap().is_vanished());
    }
}
