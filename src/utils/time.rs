use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::Serialize;

use crate::utils::constants::CTIME_FORMAT;

/// Time zone used when rendering observation timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZonePolicy {
    /// Coordinated Universal Time, identical on every machine
    #[default]
    Utc,
    /// The zone of the machine running the report
    Local,
}

/// Render epoch seconds in the C `ctime` layout, without the trailing newline.
pub fn format_timestamp(seconds: i64, policy: TimeZonePolicy) -> String {
    match DateTime::from_timestamp(seconds, 0) {
        Some(utc) => match policy {
            TimeZonePolicy::Utc => utc.format(CTIME_FORMAT).to_string(),
            TimeZonePolicy::Local => utc.with_timezone(&Local).format(CTIME_FORMAT).to_string(),
        },
        None => format!("<invalid timestamp {}>", seconds),
    }
}
