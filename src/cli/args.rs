use clap::Parser;
use std::path::PathBuf;

use crate::utils::time::TimeZonePolicy;
use crate::writers::ReportFormat;

#[derive(Parser, Debug)]
#[command(name = "climate-summary")]
#[command(about = "Summarise NOAA tab-delimited climate observations per region")]
#[command(version)]
pub struct Cli {
    /// Tab-delimited observation files, processed in the order given
    #[arg(required = true, value_name = "TDV_FILE")]
    pub files: Vec<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    #[arg(
        long,
        value_enum,
        default_value_t = TimeZonePolicy::Utc,
        help = "Time zone used to print max/min temperature times"
    )]
    pub timezone: TimeZonePolicy,

    #[arg(
        long,
        help = "Treat unparsable numbers as their numeric prefix (or 0) instead of skipping the line"
    )]
    pub lenient_numbers: bool,

    #[arg(long, help = "Refuse regions beyond this many distinct codes")]
    pub max_regions: Option<usize>,

    #[arg(long, help = "Stop at the first file that cannot be opened")]
    pub fail_fast: bool,

    #[arg(long, help = "Include average pressure in the report")]
    pub show_pressure: bool,

    #[arg(long, help = "Memory-map input files instead of buffered reads")]
    pub mmap: bool,

    #[arg(long, help = "Disable the progress spinner")]
    pub no_progress: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase logging verbosity")]
    pub verbose: u8,

    #[arg(short, long, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,
}

impl Cli {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    pub fn show_progress(&self) -> bool {
        !(self.no_progress || self.quiet)
    }
}
