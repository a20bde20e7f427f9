//! `/proc/<tid>/stat` parsing.
//!
//! The record is one line of space-separated fields, except that the
//! second field is the command name in parentheses and may itself contain
//! spaces and parentheses. The tokenizer treats a parenthesized span as a
//! single opaque field by tracking nesting depth.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::trace;

use crate::error::{ScanError, ScanResult};
use crate::process::probe::{io_vanished, Probe};

const FIELD_PID: usize = 0;
const FIELD_PPID: usize = 3;
const FIELD_SID: usize = 4;

/// The fields of a stat record this tool uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatRecord {
    /// Field 0, the task's own id.
    pub pid: i32,
    /// Field 3.
    pub ppid: i32,
    /// Field 4, reported in the `sid` column.
    pub sid: i32,
}

/// Splits a stat line on whitespace, keeping parenthesized spans whole.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in line.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            c if c.is_ascii_whitespace() && depth == 0 => {
                if i > start {
                    fields.push(&line[start..i]);
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if start < line.len() {
        fields.push(&line[start..]);
    }
    fields
}

fn field(fields: &[&str], tid: i32, index: usize) -> ScanResult<i32> {
    let raw = fields.get(index).ok_or_else(|| ScanError::MalformedStat {
        tid,
        reason: format!("expected at least {} fields, got {}", FIELD_SID + 1, fields.len()),
    })?;
    raw.parse().map_err(|_| ScanError::MalformedStat {
        tid,
        reason: format!("field {} is not an integer: {:?}", index, raw),
    })
}

/// Parses one stat line read for `tid`.
pub fn parse_stat(tid: i32, line: &str) -> ScanResult<StatRecord> {
    let fields = tokenize(line);
    if fields.len() <= FIELD_SID {
        return Err(ScanError::MalformedStat {
            tid,
            reason: format!("expected at least {} fields, got {}", FIELD_SID + 1, fields.len()),
        });
    }

    Ok(StatRecord {
        pid: field(&fields, tid, FIELD_PID)?,
        ppid: field(&fields, tid, FIELD_PPID)?,
        sid: field(&fields, tid, FIELD_SID)?,
    })
}

/// Reads and parses `/proc/<tid>/stat` under `proc_root`.
pub fn read_stat(proc_root: &Path, tid: i32) -> ScanResult<Probe<StatRecord>> {
    let path = proc_root.join(tid.to_string()).join("stat");

    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) if io_vanished(&e) => return Ok(Probe::Vanished),
        Err(source) => {
            return Err(ScanError::Io {
                op: "open",
                path,
                source,
            })
        }
    };

    let mut buf = Vec::new();
    match BufReader::new(file).read_until(b'\n', &mut buf) {
        Ok(_) => {}
        Err(e) if io_vanished(&e) => return Ok(Probe::Vanished),
        Err(source) => {
            return Err(ScanError::Io {
                op: "read",
                path,
                source,
            })
        }
    }

    let line = String::from_utf8_lossy(&buf);
    trace!("{}: {}", path.display(), line.trim_end());
    parse_stat(tid, &line).map(Probe::Found)
}
