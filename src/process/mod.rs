//! Per-task probing.
//!
//! This module provides:
//! - `probe`: the found / vanished outcome of a single query
//! - `sched`: affinity, scheduling parameter, policy and nice queries
//! - `exe`: executable link resolution
//! - `stat`: `/proc/<tid>/stat` tokenizer and reader
//! - `status`: `/proc/<tid>/status` reader
//! - `source`: the `TaskSource` seam and its Linux implementation
//! - `scanner`: the pass over all task ids

pub mod exe;
pub mod probe;
pub mod scanner;
pub mod sched;
pub mod source;
pub mod stat;
pub mod status;

// Re-export commonly used types
pub use exe::MISSING_EXE;
pub use probe::Probe;
pub use scanner::{dump, scan, ScanSummary};
pub use sched::Policy;
pub use source::{LinuxTaskSource, TaskSource};
pub use stat::StatRecord;
pub use status::StatusRecord;
