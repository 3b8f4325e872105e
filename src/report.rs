//! Post-session analysis: which forms needed more than one try

use crate::quiz::IncorrectCounts;
use std::fs;
use std::io;
use std::path::Path;

/// One `verb/tense/pronoun: Nx` line per item missed at least once
pub fn build_report(counts: &IncorrectCounts) -> String {
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(item, count)| format!("{}/{}/{}: {}x\n", item.verb, item.tense, item.pronoun, count))
        .collect()
}

/// Replace the report file's contents
pub fn write_report(path: &Path, report: &str) -> io::Result<()> {
    fs::write(path, report)
}
