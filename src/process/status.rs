//! `/proc/<tid>/status` parsing.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{ScanError, ScanResult};
use crate::process::probe::{io_vanished, Probe};

/// The labeled fields of a status record this tool uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub name: String,
    pub pid: i32,
    pub ppid: i32,
    pub tgid: i32,
}

#[derive(Default)]
struct PartialStatus {
    name: Option<String>,
    pid: Option<i32>,
    ppid: Option<i32>,
    tgid: Option<i32>,
}

fn parse_int(tid: i32, label: &str, value: &str) -> ScanResult<i32> {
    value.trim().parse().map_err(|_| ScanError::MalformedStatus {
        tid,
        reason: format!("{} is not an integer: {:?}", label, value.trim()),
    })
}

fn missing(tid: i32, label: &str) -> ScanError {
    ScanError::MalformedStatus {
        tid,
        reason: format!("no {} line", label),
    }
}

impl PartialStatus {
    fn feed(&mut self, tid: i32, line: &str) -> ScanResult<()> {
        if let Some(v) = line.strip_prefix("Name:") {
            self.name = Some(v.trim().to_string());
        } else if let Some(v) = line.strip_prefix("Pid:") {
            self.pid = Some(parse_int(tid, "Pid", v)?);
        } else if let Some(v) = line.strip_prefix("PPid:") {
            self.ppid = Some(parse_int(tid, "PPid", v)?);
        } else if let Some(v) = line.strip_prefix("Tgid:") {
            self.tgid = Some(parse_int(tid, "Tgid", v)?);
        }
        Ok(())
    }

    fn finish(self, tid: i32) -> ScanResult<StatusRecord> {
        Ok(StatusRecord {
            name: self.name.ok_or_else(|| missing(tid, "Name"))?,
            pid: self.pid.ok_or_else(|| missing(tid, "Pid"))?,
            ppid: self.ppid.ok_or_else(|| missing(tid, "PPid"))?,
            tgid: self.tgid.ok_or_else(|| missing(tid, "Tgid"))?,
        })
    }
}

/// Parses a whole status record held in memory.
pub fn parse_status(tid: i32, content: &str) -> ScanResult<StatusRecord> {
    let mut partial = PartialStatus::default();
    for line in content.lines() {
        partial.feed(tid, line)?;
    }
    partial.finish(tid)
}

/// Parses a status record line by line until end of file.
///
/// Returns `Ok(None)` if the task disappeared while the record was being
/// read.
fn parse_status_from<R: Read>(tid: i32, path: &Path, reader: R) -> ScanResult<Option<StatusRecord>> {
    let mut partial = PartialStatus::default();

    for line in BufReader::new(reader).split(b'\n') {
        let line = match line {
            Ok(l) => l,
            Err(e) if io_vanished(&e) => return Ok(None),
            Err(source) => {
                return Err(ScanError::Io {
                    op: "read",
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        partial.feed(tid, &String::from_utf8_lossy(&line))?;
    }

    partial.finish(tid).map(Some)
}

/// Reads and parses `/proc/<tid>/status` under `proc_root`.
pub fn read_status(proc_root: &Path, tid: i32) -> ScanResult<Probe<StatusRecord>> {
    let path = proc_root.join(tid.to_string()).join("status");

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

    Ok(match parse_status_from(tid, &path, file)? {
        Some(rec) => Probe::Found(rec),
        None => Probe::Vanished,
    })
}
