use serde::Serialize;

use crate::readers::FileSummary;

/// Diagnostics gathered over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub files_opened: usize,
    pub files_skipped: usize,
    pub lines_read: usize,
    pub blank_lines: usize,
    pub malformed_lines: usize,
    pub observations_folded: usize,
    pub observations_rejected: usize,
}

impl RunStats {
    /// Add the line counts of one finished file.
    pub fn record_file(&mut self, summary: &FileSummary) {
        self.files_opened += 1;
        self.lines_read += summary.lines_read;
        self.blank_lines += summary.blank_lines;
        self.malformed_lines += summary.malformed_lines;
    }

    pub fn summary(&self) -> String {
        format!(
            "Files: {} read, {} skipped | Lines: {} read, {} blank, {} malformed | Observations: {} folded, {} rejected",
            self.files_opened,
            self.files_skipped,
            self.lines_read,
            self.blank_lines,
            self.malformed_lines,
            self.observations_folded,
            self.observations_rejected
        )
    }
}
