//! Startup requirement validation for rtprio-dump.
//!
//! Runs before the scan to turn an unusable environment into one clear
//! error instead of a failure on the first task id.

use nix::unistd::{geteuid, getpid};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{ScanError, ScanResult};

/// Validate all runtime requirements
pub fn validate_requirements(proc_root: &Path) -> ScanResult<()> {
    check_user_privileges();
    check_proc_mounted(proc_root)?;
    debug!("Runtime requirements validated");
    Ok(())
}

/// Warn when other tasks' executable links may be unreadable
fn check_user_privileges() {
    if geteuid().is_root() {
        info!("Running as root (uid=0)");
    } else {
        warn!("Not running as root - may lack permission to read other tasks' exe links, which aborts the scan");
        warn!("   Recommendation: run as root with ptrace access for a full dump");
    }
}

/// Check that `proc_root` is a procfs of our own pid namespace.
///
/// Scheduler queries always address the caller's pid namespace, so the
/// file-based records must come from the same one: `<proc_root>/self`
/// has to resolve to our own pid.
fn check_proc_mounted(proc_root: &Path) -> ScanResult<()> {
    let self_link = proc_root.join("self");
    let target = fs::read_link(&self_link).map_err(|e| ScanError::ProcRoot {
        path: proc_root.to_path_buf(),
        reason: format!("cannot resolve {} ({}), is procfs mounted?", self_link.display(), e),
    })?;

    let me = getpid().as_raw();
    let seen = target.to_str().and_then(|s| s.parse::<i32>().ok());
    if seen != Some(me) {
        return Err(ScanError::ProcRoot {
            path: proc_root.to_path_buf(),
            reason: format!(
                "{} points to {}, expected {} (procfs of another pid namespace?)",
                self_link.display(),
                target.display(),
                me
            ),
        });
    }
    Ok(())
}
