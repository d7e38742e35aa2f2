use serde::Serialize;

use crate::models::Observation;
use crate::utils::constants::PASCALS_PER_HECTOPASCAL;

/// A temperature extreme and the time it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extreme {
    pub temperature: f64,
    pub timestamp: i64,
}

/// Running statistics for a single region.
///
/// Created from the first observation of a region, so `record_count` is
/// never zero and the averages are always defined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAccumulator {
    pub region_code: String,
    pub record_count: u64,
    pub sum_temperature: f64,
    pub sum_humidity: f64,
    pub sum_cloud_cover: f64,
    pub sum_snow: f64,
    pub sum_lightning: f64,
    pub sum_pressure: f64,
    pub max: Extreme,
    pub min: Extreme,
}

impl RegionAccumulator {
    pub fn new(observation: &Observation) -> Self {
        let extreme = Extreme {
            temperature: observation.temperature,
            timestamp: observation.timestamp,
        };

        Self {
            region_code: observation.region_code.clone(),
            record_count: 1,
            sum_temperature: observation.temperature,
            sum_humidity: observation.humidity,
            sum_cloud_cover: observation.cloud_cover,
            sum_snow: observation.snow,
            sum_lightning: observation.lightning,
            sum_pressure: observation.pressure,
            max: extreme,
            min: extreme,
        }
    }

    /// Fold a further observation of the same region into the running totals.
    /// Ties on an extreme go to the later observation.
    pub fn add(&mut self, observation: &Observation) {
        debug_assert_eq!(self.region_code, observation.region_code);

        self.record_count += 1;
        self.sum_temperature += observation.temperature;
        self.sum_humidity += observation.humidity;
        self.sum_cloud_cover += observation.cloud_cover;
        self.sum_snow += observation.snow;
        self.sum_lightning += observation.lightning;
        self.sum_pressure += observation.pressure;

        if observation.temperature >= self.max.temperature {
            self.max = Extreme {
                temperature: observation.temperature,
                timestamp: observation.timestamp,
            };
        }

        if observation.temperature <= self.min.temperature {
            self.min = Extreme {
                temperature: observation.temperature,
                timestamp: observation.timestamp,
            };
        }
    }

    fn mean(&self, sum: f64) -> f64 {
        sum / self.record_count as f64
    }

    pub fn average_temperature(&self) -> f64 {
        self.mean(self.sum_temperature)
    }

    pub fn average_humidity(&self) -> f64 {
        self.mean(self.sum_humidity)
    }

    pub fn average_cloud_cover(&self) -> f64 {
        self.mean(self.sum_cloud_cover)
    }

    /// Average pressure in hectopascals
    pub fn average_pressure_hpa(&self) -> f64 {
        self.mean(self.sum_pressure) / PASCALS_PER_HECTOPASCAL
    }

    pub fn lightning_strikes(&self) -> f64 {
        self.sum_lightning
    }

    pub fn snow_records(&self) -> f64 {
        self.sum_snow
    }
}
