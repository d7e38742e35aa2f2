pub mod observation_reader;
pub mod parser;

pub use observation_reader::{FileSummary, ObservationReader};
pub use parser::{parse, LineParser, NumericMode};
