use crate::error::{ProcessingError, Result};
use crate::models::{Observation, RegionAccumulator};
use std::collections::HashMap;

/// Region accumulators keyed by region code, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct AccumulatorStore {
    regions: Vec<RegionAccumulator>,
    index: HashMap<String, usize>,
    capacity: Option<usize>,
}

impl AccumulatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses new regions once `capacity` distinct codes are held.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            regions: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Fold one observation into its region's accumulator, creating the
    /// accumulator on first sight of the region.
    ///
    /// On `CapacityExceeded` the store is left untouched.
    pub fn fold(&mut self, observation: &Observation) -> Result<()> {
        if let Some(&slot) = self.index.get(&observation.region_code) {
            self.regions[slot].add(observation);
            return Ok(());
        }

        if let Some(limit) = self.capacity {
            if self.regions.len() >= limit {
                return Err(ProcessingError::CapacityExceeded {
                    limit,
                    region: observation.region_code.clone(),
                });
            }
        }

        self.index
            .insert(observation.region_code.clone(), self.regions.len());
        self.regions.push(RegionAccumulator::new(observation));
        Ok(())
    }

    pub fn get(&self, region_code: &str) -> Option<&RegionAccumulator> {
        self.index.get(region_code).map(|&slot| &self.regions[slot])
    }

    /// Accumulators in the order their regions were first seen.
    pub fn iter(&self) -> impl Iterator<Item = &RegionAccumulator> {
        self.regions.iter()
    }

    pub fn region_codes(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.region_code.as_str())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }

    pub fn total_records(&self) -> u64 {
        self.regions.iter().map(|r| r.record_count).sum()
    }
}
