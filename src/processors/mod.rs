pub mod accumulator_store;

pub use accumulator_store::AccumulatorStore;
