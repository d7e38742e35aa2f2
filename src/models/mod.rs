pub mod accumulator;
pub mod observation;
pub mod run_stats;

pub use accumulator::{Extreme, RegionAccumulator};
pub use observation::{kelvin_to_fahrenheit, Observation};
pub use run_stats::RunStats;
