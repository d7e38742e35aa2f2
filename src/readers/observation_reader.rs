use crate::error::{ProcessingError, Result};
use crate::models::Observation;
use crate::readers::parser::LineParser;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, PROGRESS_UPDATE_INTERVAL};
use crate::utils::progress::ProgressReporter;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Line counts for a single input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub lines_read: usize,
    pub blank_lines: usize,
    pub malformed_lines: usize,
    pub observations: usize,
}

/// Reads TDV files line by line and hands every parsed observation to a sink.
pub struct ObservationReader {
    parser: LineParser,
    use_mmap: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            parser: LineParser::new(),
            use_mmap: false,
        }
    }

    pub fn with_parser(parser: LineParser) -> Self {
        Self {
            parser,
            use_mmap: false,
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn open(path: &Path) -> Result<File> {
        File::open(path).map_err(|source| ProcessingError::FileOpen {
            path: path.to_path_buf(),
            source,
        })
    }

    fn read_error(path: &Path, source: std::io::Error) -> ProcessingError {
        ProcessingError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Read every line of `path`, in order, feeding observations to `sink`.
    /// Malformed lines are skipped and counted.
    ///
    /// Memory mapping only applies to regular files; pipes and other
    /// streams are always read through a buffer.
    pub fn read_file<F>(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
        sink: F,
    ) -> Result<FileSummary>
    where
        F: FnMut(Observation),
    {
        let file = Self::open(path)?;
        let metadata = file
            .metadata()
            .map_err(|source| Self::read_error(path, source))?;

        if self.use_mmap && metadata.is_file() {
            self.read_mmap(file, metadata.len(), path, progress, sink)
        } else {
            self.read_buffered(file, path, progress, sink)
        }
    }

    fn read_buffered<F>(
        &self,
        file: File,
        path: &Path,
        progress: Option<&ProgressReporter>,
        mut sink: F,
    ) -> Result<FileSummary>
    where
        F: FnMut(Observation),
    {
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut summary = FileSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| Self::read_error(path, source))?;
            if read == 0 {
                break;
            }
            self.process_line(&buf, path, &mut summary, progress, &mut sink);
        }

        Ok(summary)
    }

    fn read_mmap<F>(
        &self,
        file: File,
        len: u64,
        path: &Path,
        progress: Option<&ProgressReporter>,
        mut sink: F,
    ) -> Result<FileSummary>
    where
        F: FnMut(Observation),
    {
        let mut summary = FileSummary::default();
        // Mapping a zero-length regular file fails on some platforms
        if len == 0 {
            return Ok(summary);
        }

        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| Self::read_error(path, source))?;
        let content: &[u8] = &mmap;
        let content = content.strip_suffix(b"\n").unwrap_or(content);

        for line in content.split(|b| *b == b'\n') {
            self.process_line(line, path, &mut summary, progress, &mut sink);
        }

        Ok(summary)
    }

    fn process_line<F>(
        &self,
        bytes: &[u8],
        path: &Path,
        summary: &mut FileSummary,
        progress: Option<&ProgressReporter>,
        sink: &mut F,
    ) where
        F: FnMut(Observation),
    {
        summary.lines_read += 1;
        if let Some(progress) = progress {
            if summary.lines_read as u64 % PROGRESS_UPDATE_INTERVAL == 0 {
                progress.set_message(&format!(
                    "{}: {} lines",
                    path.display(),
                    summary.lines_read
                ));
            }
        }

        let line = String::from_utf8_lossy(bytes);
        if line.trim().is_empty() {
            summary.blank_lines += 1;
            return;
        }

        match self.parser.parse_line(&line) {
            Ok(observation) => {
                summary.observations += 1;
                sink(observation);
            }
            Err(source) => {
                summary.malformed_lines += 1;
                let err = ProcessingError::MalformedLine {
                    path: path.to_path_buf(),
                    line_number: summary.lines_read,
                    source,
                };
                debug!("Skipping line: {}", err);
            }
        }
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
