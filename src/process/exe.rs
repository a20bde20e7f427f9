//! Executable image lookup via `/proc/<tid>/exe`.

use std::fs;
use std::io;
use std::path::Path;

use nix::errno::Errno;
use tracing::trace;

use crate::error::{ScanError, ScanResult};
use crate::process::probe::Probe;

/// Reported for tasks without an executable (kernel threads, zombies).
pub const MISSING_EXE: &str = "ENOENT";

/// Resolves the executable link of `tid` under `proc_root`.
///
/// A missing link is not a vanished task: kernel threads have no `exe`
/// and still get a row, with [`MISSING_EXE`] in place of the path.
pub fn read_exe(proc_root: &Path, tid: i32) -> ScanResult<Probe<String>> {
    let link = proc_root.join(tid.to_string()).join("exe");

    match fs::read_link(&link) {
        Ok(target) => Ok(Probe::Found(target.to_string_lossy().into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!("{} has no target", link.display());
            Ok(Probe::Found(MISSING_EXE.to_string()))
        }
        Err(e) if e.raw_os_error() == Some(Errno::ESRCH as i32) => Ok(Probe::Vanished),
        Err(source) => Err(ScanError::Io {
            op: "readlink",
            path: link,
            source,
        }),
    }
}
