//! Single pass over the task id space.
//!
//! Ids `1..=max_identifier` are probed in ascending order. Each id either
//! yields exactly one CSV row or none; nothing carries over between ids.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::error::ScanResult;
use crate::output::CsvWriter;
use crate::process::TaskSource;
use crate::snapshot::assemble;
use crate::system::SystemLimits;

/// Counts reported after a completed scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub scanned: u64,
    pub emitted: u64,
    pub vanished: u64,
}

/// Writes the header, reads the system limits from `pid_max_path` and
/// scans.
///
/// The header goes out before the limits are read, so a failure to read
/// them still leaves a header on the output.
pub fn dump<S, W>(pid_max_path: &Path, source: &S, out: &mut CsvWriter<W>) -> ScanResult<ScanSummary>
where
    S: TaskSource + ?Sized,
    W: Write,
{
    out.write_header()?;
    let limits = SystemLimits::probe(pid_max_path)?;
    info!("Scanning task ids 1..={}", limits.max_identifier);
    scan(&limits, source, out)
}

/// Probes every task id and writes one row per live task.
///
/// Writes rows only; the header is the caller's. The first fatal error
/// aborts the scan.
pub fn scan<S, W>(limits: &SystemLimits, source: &S, out: &mut CsvWriter<W>) -> ScanResult<ScanSummary>
where
    S: TaskSource + ?Sized,
    W: Write,
{
    let mut summary = ScanSummary::default();
    for tid in 1..=limits.max_identifier {
        summary.scanned += 1;
        match assemble(source, tid, &limits.all_cpus)? {
            Some(snapshot) => {
                out.write_row(&snapshot)?;
                summary.emitted += 1;
            }
            None => summary.vanished += 1,
        }
    }

    debug!("Scan finished: {:?}", summary);
    info!(
        "Scanned {} ids, {} live tasks emitted",
        summary.scanned, summary.emitted
    );
    Ok(summary)
}
