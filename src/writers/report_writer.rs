use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write;

use crate::error::Result;
use crate::models::{Extreme, RegionAccumulator, RunStats};
use crate::processors::AccumulatorStore;
use crate::utils::constants::{PRESSURE_UNIT, TEMPERATURE_UNIT};
use crate::utils::time::{format_timestamp, TimeZonePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtremeSummary {
    pub temperature: f64,
    pub timestamp: i64,
    pub observed_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionSummary {
    pub region_code: String,
    pub record_count: u64,
    pub average_humidity: f64,
    pub average_temperature: f64,
    pub max_temperature: ExtremeSummary,
    pub min_temperature: ExtremeSummary,
    pub lightning_strikes: f64,
    pub snow_records: f64,
    pub average_cloud_cover: f64,
    pub average_pressure_hpa: f64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    time_zone: TimeZonePolicy,
    regions: Vec<RegionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a RunStats>,
}

/// Renders a finished accumulator store. Never mutates the store.
pub struct ReportWriter {
    time_zone: TimeZonePolicy,
    show_pressure: bool,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self {
            time_zone: TimeZonePolicy::Utc,
            show_pressure: false,
        }
    }

    pub fn with_time_zone(mut self, time_zone: TimeZonePolicy) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_pressure(mut self, show_pressure: bool) -> Self {
        self.show_pressure = show_pressure;
        self
    }

    pub fn render(
        &self,
        store: &AccumulatorStore,
        format: ReportFormat,
        stats: Option<&RunStats>,
    ) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text(store)),
            ReportFormat::Json => self.render_json(store, stats),
        }
    }

    pub fn render_text(&self, store: &AccumulatorStore) -> String {
        let mut out = String::new();

        let codes: Vec<&str> = store.region_codes().collect();
        if codes.is_empty() {
            out.push_str("States found:\nNo records found\n");
            return out;
        }
        // Writing into a String cannot fail
        let _ = writeln!(out, "States found: {}", codes.join(" "));

        for region in store.iter() {
            self.write_region(&mut out, region);
        }

        out
    }

    fn write_region(&self, out: &mut String, region: &RegionAccumulator) {
        let _ = writeln!(out, "-- State: {} --", region.region_code);
        let _ = writeln!(out, "Number of Records: {}", region.record_count);
        let _ = writeln!(out, "Average Humidity: {:.1}%", region.average_humidity());
        let _ = writeln!(
            out,
            "Average Temperature: {:.1}{}",
            region.average_temperature(),
            TEMPERATURE_UNIT
        );
        let _ = writeln!(
            out,
            "Max Temperature: {:.1}{}",
            region.max.temperature, TEMPERATURE_UNIT
        );
        let _ = writeln!(
            out,
            "Max Temperature on: {}",
            format_timestamp(region.max.timestamp, self.time_zone)
        );
        let _ = writeln!(
            out,
            "Min Temperature: {:.1}{}",
            region.min.temperature, TEMPERATURE_UNIT
        );
        let _ = writeln!(
            out,
            "Min Temperature on: {}",
            format_timestamp(region.min.timestamp, self.time_zone)
        );
        let _ = writeln!(out, "Lightning Strikes: {:.0}", region.lightning_strikes());
        let _ = writeln!(out, "Records with Snow Cover: {:.0}", region.snow_records());
        let _ = writeln!(
            out,
            "Average Cloud Cover: {:.1}%",
            region.average_cloud_cover()
        );
        if self.show_pressure {
            let _ = writeln!(
                out,
                "Average Pressure: {:.1}{}",
                region.average_pressure_hpa(),
                PRESSURE_UNIT
            );
        }
    }

    pub fn render_json(&self, store: &AccumulatorStore, stats: Option<&RunStats>) -> Result<String> {
        let report = JsonReport {
            time_zone: self.time_zone,
            regions: store.iter().map(|r| self.summarize(r)).collect(),
            stats,
        };
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }

    pub fn summarize(&self, region: &RegionAccumulator) -> RegionSummary {
        RegionSummary {
            region_code: region.region_code.clone(),
            record_count: region.record_count,
            average_humidity: region.average_humidity(),
            average_temperature: region.average_temperature(),
            max_temperature: self.extreme_summary(&region.max),
            min_temperature: self.extreme_summary(&region.min),
            lightning_strikes: region.lightning_strikes(),
            snow_records: region.snow_records(),
            average_cloud_cover: region.average_cloud_cover(),
            average_pressure_hpa: region.average_pressure_hpa(),
        }
    }

    fn extreme_summary(&self, extreme: &Extreme) -> ExtremeSummary {
        ExtremeSummary {
            temperature: extreme.temperature,
            timestamp: extreme.timestamp,
            observed_at: format_timestamp(extreme.timestamp, self.time_zone),
        }
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use pretty_assertions::assert_eq;

    fn sample_store() -> AccumulatorStore {
        let mut store = AccumulatorStore::new();
        let readings = [
            ("TN", 1, 40.0, 1.0, 0.0, 50.0),
            ("TN", 2, 60.0, 0.0, 1.0, 70.0),
            ("TN", 3, 50.0, 0.0, 1.0, 60.0),
            ("WA", 4, 80.0, 1.0, 0.0, 40.0),
        ];
        for (region, ts, humidity, snow, lightning, temp) in readings {
            let obs = Observation::new(region, ts, humidity, snow, 30.0, lightning, 101330.0, temp);
            store.fold(&obs).unwrap();
        }
        store
    }

    #[test]
    fn test_render_text() {
        let report = ReportWriter::new().render_text(&sample_store());

        let expected = "\
States found: TN WA
-- State: TN --
Number of Records: 3
Average Humidity: 50.0%
Average Temperature: 60.0F
Max Temperature: 70.0F
Max Temperature on: Thu Jan  1 00:00:02 1970
Min Temperature: 50.0F
Min Temperature on: Thu Jan  1 00:00:01 1970
Lightning Strikes: 2
Records with Snow Cover: 1
Average Cloud Cover: 30.0%
-- State: WA --
Number of Records: 1
Average Humidity: 80.0%
Average Temperature: 40.0F
Max Temperature: 40.0F
Max Temperature on: Thu Jan  1 00:00:04 1970
Min Temperature: 40.0F
Min Temperature on: Thu Jan  1 00:00:04 1970
Lightning Strikes: 0
Records with Snow Cover: 1
Average Cloud Cover: 30.0%
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_text_with_pressure() {
        let report = ReportWriter::new()
            .with_pressure(true)
            .render_text(&sample_store());
        assert!(report.contains("Average Pressure: 1013.3hPa\n"));
    }

    #[test]
    fn test_render_empty_store() {
        let report = ReportWriter::new().render_text(&AccumulatorStore::new());
        assert_eq!(report, "States found:\nNo records found\n");
    }

    #[test]
    fn test_render_json() -> Result<()> {
        let stats = RunStats {
            files_opened: 1,
            lines_read: 4,
            observations_folded: 4,
            ..Default::default()
        };
        let json = ReportWriter::new().render(&sample_store(), ReportFormat::Json, Some(&stats))?;
        let value: serde_json::Value = serde_json::from_str(&json)?;

        assert_eq!(value["time_zone"], "utc");
        assert_eq!(value["regions"][0]["region_code"], "TN");
        assert_eq!(value["regions"][0]["record_count"], 3);
        assert_eq!(value["regions"][0]["max_temperature"]["timestamp"], 2);
        assert_eq!(
            value["regions"][0]["min_temperature"]["observed_at"],
            "Thu Jan  1 00:00:01 1970"
        );
        assert_eq!(value["regions"][1]["region_code"], "WA");
        assert_eq!(value["stats"]["observations_folded"], 4);
        Ok(())
    }

    #[test]
    fn test_render_does_not_mutate_store() {
        let store = sample_store();
        let writer = ReportWriter::new();
        let first = writer.render_text(&store);
        let second = writer.render_text(&store);
        assert_eq!(first, second);
        assert_eq!(store.total_records(), 4);
    }
}
