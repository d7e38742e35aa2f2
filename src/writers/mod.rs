pub mod report_writer;

pub use report_writer::{ExtremeSummary, RegionSummary, ReportFormat, ReportWriter};
