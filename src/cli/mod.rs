pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::{process_files, run, setup_logging, ProcessOptions};
