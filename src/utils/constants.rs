/// TDV layout
pub const FIELD_SEPARATOR: char = '\t';
pub const EXPECTED_FIELD_COUNT: usize = 9;

/// Field positions within a TDV line
pub const FIELD_REGION: usize = 0;
pub const FIELD_TIMESTAMP: usize = 1;
pub const FIELD_HUMIDITY: usize = 3;
pub const FIELD_SNOW: usize = 4;
pub const FIELD_CLOUD_COVER: usize = 5;
pub const FIELD_LIGHTNING: usize = 6;
pub const FIELD_PRESSURE: usize = 7;
pub const FIELD_SURFACE_TEMP: usize = 8;

/// Unit conversion
pub const KELVIN_OFFSET: f64 = 273.15;
pub const MILLIS_PER_SECOND: i64 = 1000;
pub const PASCALS_PER_HECTOPASCAL: f64 = 100.0;

/// Report layout
pub const TEMPERATURE_UNIT: &str = "F";
pub const PRESSURE_UNIT: &str = "hPa";
/// Equivalent of the C `ctime` layout, e.g. `Mon Aug  3 11:00:00 2015`
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const PROGRESS_UPDATE_INTERVAL: u64 = 1000;
