//! CSV output.
//!
//! Values are written verbatim, without quoting or escaping. Executable
//! paths and thread names containing commas or newlines will break the
//! column layout.

use std::io::Write;

use crate::error::{ScanError, ScanResult};
use crate::snapshot::ProcessSnapshot;

/// Header line. It names a trailing `cpu` column that rows never fill;
/// kept as-is so existing consumers of the output keep working.
pub const HEADER: &str = "exe,name,cpumask,policy,nice,priority,tid,pid,ppid,sid,cpu";

/// Formats one snapshot as a CSV line, without the trailing newline.
pub fn format_row(s: &ProcessSnapshot) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{}",
        s.exe, s.name, s.cpu_mask, s.policy, s.nice, s.priority, s.tid, s.pid, s.ppid, s.sid
    )
}

/// Line-oriented CSV writer over any byte sink.
pub struct CsvWriter<W: Write> {
    out: W,
    rows: u64,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, rows: 0 }
    }

    pub fn write_header(&mut self) -> ScanResult<()> {
        writeln!(self.out, "{}", HEADER).map_err(ScanError::Output)
    }

    pub fn write_row(&mut self, snapshot: &ProcessSnapshot) -> ScanResult<()> {
        writeln!(self.out, "{}", format_row(snapshot)).map_err(ScanError::Output)?;
        self.rows += 1;
        Ok(())
    }

    /// Number of rows written so far, header excluded.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flushes and returns the underlying sink.
    pub fn finish(mut self) -> ScanResult<W> {
        self.out.flush().map_err(ScanError::Output)?;
        Ok(self.out)
    }
}
