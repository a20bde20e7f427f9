//! Effective configuration for a scan.

use crate::cli::Args;
use crate::error::{ScanError, ScanResult};
use std::path::{Path, PathBuf};

pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Where the kernel publishes the largest task id, relative to procfs.
const PID_MAX_RELATIVE: &str = "sys/kernel/pid_max";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub proc_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
        }
    }
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            proc_root: args.proc_root.clone(),
        }
    }

    pub fn pid_max_path(&self) -> PathBuf {
        self.proc_root.join(PID_MAX_RELATIVE)
    }
}

/// Validates the effective configuration.
pub fn validate_config(config: &Config) -> ScanResult<()> {
    let root: &Path = &config.proc_root;
    if !root.is_dir() {
        return Err(ScanError::ProcRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn test_default_paths() {
        let cfg = Config::default();
        assert_eq!(cfg.pid_max_path(), PathBuf::from("/proc/sys/kernel/pid_max"));
    }

    #[test]
    fn test_from_args() {
        let args = Args::parse_from(["rtprio-dump", "--proc-root", "/mnt/proc"]);
        let cfg = Config::from_args(&args);
        assert_eq!(cfg.pid_max_path(), PathBuf::from("/mnt/proc/sys/kernel/pid_max"));
    }

    #[test]
    fn test_validate_config() {
        let dir = tempdir().expect("Failed to create temp dir");
        let ok = Config {
            proc_root: dir.path().to_path_buf(),
        };
        assert!(validate_config(&ok).is_ok());

        let missing = Config {
            proc_root: dir.path().join("nope"),
        };
        assert!(matches!(
            validate_config(&missing),
            Err(ScanError::ProcRoot { .. })
        ));
    }
}
