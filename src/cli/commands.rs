use crate::cli::args::Cli;
use crate::error::{ProcessingError, Result};
use crate::models::RunStats;
use crate::processors::AccumulatorStore;
use crate::readers::{LineParser, NumericMode, ObservationReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::ReportWriter;
use std::collections::HashSet;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Options controlling how input files are read and folded.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub numeric_mode: NumericMode,
    pub max_regions: Option<usize>,
    pub fail_fast: bool,
    pub use_mmap: bool,
    pub show_progress: bool,
}

impl From<&Cli> for ProcessOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            numeric_mode: if cli.lenient_numbers {
                NumericMode::Lenient
            } else {
                NumericMode::Strict
            },
            max_regions: cli.max_regions,
            fail_fast: cli.fail_fast,
            use_mmap: cli.mmap,
            show_progress: cli.show_progress(),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(&cli);

    let options = ProcessOptions::from(&cli);
    let (store, stats) = process_files(&cli.files, &options)?;

    let writer = ReportWriter::new()
        .with_time_zone(cli.timezone)
        .with_pressure(cli.show_pressure);
    let report = writer.render(&store, cli.format, Some(&stats))?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

/// Read every file in order and fold its observations into a fresh store.
///
/// Files that cannot be opened or read are skipped unless `fail_fast` is
/// set. Malformed lines and capacity rejections are counted in the
/// returned stats.
pub fn process_files(
    files: &[PathBuf],
    options: &ProcessOptions,
) -> Result<(AccumulatorStore, RunStats)> {
    if files.is_empty() {
        return Err(ProcessingError::Usage(
            "at least one input file is required".to_string(),
        ));
    }

    let mut store = match options.max_regions {
        Some(limit) => AccumulatorStore::with_capacity_limit(limit),
        None => AccumulatorStore::new(),
    };
    let mut stats = RunStats::default();
    let mut rejected_regions = HashSet::new();

    let reader = ObservationReader::with_parser(LineParser::with_numeric_mode(
        options.numeric_mode,
    ))
    .with_mmap(options.use_mmap);
    let progress = ProgressReporter::new_spinner("Reading observations...", !options.show_progress);

    for path in files {
        info!("Opening file: {}", path.display());
        progress.set_message(&path.display().to_string());

        let result = reader.read_file(path, Some(&progress), |observation| {
            match store.fold(&observation) {
                Ok(()) => stats.observations_folded += 1,
                Err(e) => {
                    stats.observations_rejected += 1;
                    if rejected_regions.insert(observation.region_code.clone()) {
                        warn!("{}", e);
                    }
                }
            }
        });

        match result {
            Ok(summary) => {
                stats.record_file(&summary);
                if summary.malformed_lines > 0 {
                    warn!(
                        "Skipped {} malformed line(s) in {}",
                        summary.malformed_lines,
                        path.display()
                    );
                }
            }
            // Observations read before a mid-file failure stay folded
            Err(e) if !options.fail_fast => {
                stats.files_skipped += 1;
                warn!("{}; skipping", e);
            }
            Err(e) => {
                progress.finish_and_clear();
                error!("{}", e);
                return Err(e);
            }
        }
    }

    progress.finish_and_clear();

    if stats.observations_rejected > 0 {
        warn!(
            "{} observation(s) from {} region(s) rejected: store limited to {} regions",
            stats.observations_rejected,
            rejected_regions.len(),
            store.capacity_limit().unwrap_or_default()
        );
    }
    info!("{}", stats.summary());

    Ok((store, stats))
}

/// Structured logging to stderr, keeping stdout for the report.
pub fn setup_logging(cli: &Cli) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("climate_summary={}", cli.get_log_level())));

    // A subscriber may already be installed when running under a test harness
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}
