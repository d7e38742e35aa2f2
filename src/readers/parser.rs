use chrono::DateTime;

use crate::error::ParseError;
use crate::models::{kelvin_to_fahrenheit, Observation};
use crate::utils::constants::*;

/// How numeric fields that fail to parse are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericMode {
    /// Reject the line with `ParseError::NumericFieldInvalid`
    #[default]
    Strict,
    /// Close to C `atof`: the longest prefix that reads as a finite decimal
    /// number, otherwise zero. Unlike `atof`, infinities and overflowing
    /// values become zero and hex literals are not recognised.
    Lenient,
}

/// Parses TDV lines into observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser {
    numeric_mode: NumericMode,
}

/// Parse a TDV line with strict numeric handling.
pub fn parse(line: &str) -> Result<Observation, ParseError> {
    LineParser::new().parse_line(line)
}

impl LineParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numeric_mode(numeric_mode: NumericMode) -> Self {
        Self { numeric_mode }
    }

    /// Parse one line. Fields past the ninth are ignored.
    pub fn parse_line(&self, line: &str) -> Result<Observation, ParseError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();

        if fields.len() < EXPECTED_FIELD_COUNT {
            return Err(ParseError::FieldCountMismatch {
                expected: EXPECTED_FIELD_COUNT,
                found: fields.len(),
            });
        }

        let region_code = fields[FIELD_REGION];
        if region_code.is_empty() {
            return Err(ParseError::EmptyRegionCode);
        }

        let timestamp = self.parse_timestamp(fields[FIELD_TIMESTAMP])?;
        let humidity = self.parse_number("humidity", fields[FIELD_HUMIDITY])?;
        let snow = self.parse_number("snow", fields[FIELD_SNOW])?;
        let cloud_cover = self.parse_number("cloud_cover", fields[FIELD_CLOUD_COVER])?;
        let lightning = self.parse_number("lightning", fields[FIELD_LIGHTNING])?;
        let pressure = self.parse_number("pressure", fields[FIELD_PRESSURE])?;
        let kelvin = self.parse_number("surface_temperature", fields[FIELD_SURFACE_TEMP])?;

        Ok(Observation::new(
            region_code,
            timestamp,
            humidity,
            snow,
            cloud_cover,
            lightning,
            pressure,
            kelvin_to_fahrenheit(kelvin),
        ))
    }

    /// Millisecond epoch string to whole seconds, truncating toward zero.
    /// Times outside the renderable calendar range are rejected in both modes.
    fn parse_timestamp(&self, value: &str) -> Result<i64, ParseError> {
        let seconds = match value.parse::<i64>() {
            Ok(millis) => Some(millis / MILLIS_PER_SECOND),
            Err(_) => {
                let millis = self.parse_number("timestamp", value)?;
                let seconds = (millis / MILLIS_PER_SECOND as f64).trunc();
                // `as` saturates, so check the range before converting
                (seconds.abs() < i64::MAX as f64).then_some(seconds as i64)
            }
        };

        seconds
            .filter(|&s| DateTime::from_timestamp(s, 0).is_some())
            .ok_or_else(|| ParseError::NumericFieldInvalid {
                field: "timestamp",
                value: value.to_string(),
            })
    }

    fn parse_number(&self, field: &'static str, value: &str) -> Result<f64, ParseError> {
        match value.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => match self.numeric_mode {
                NumericMode::Strict => Err(ParseError::NumericFieldInvalid {
                    field,
                    value: value.to_string(),
                }),
                NumericMode::Lenient => Ok(leading_number(value)),
            },
        }
    }
}

/// Longest prefix of `value` that reads as a finite decimal number, or zero.
fn leading_number(value: &str) -> f64 {
    let candidate = value.trim_start();
    let end = candidate
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(candidate.len());

    (1..=end)
        .rev()
        .filter_map(|len| candidate[..len].parse::<f64>().ok())
        .find(|number| number.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str =
        "TN\t1428300000000\t9prcjqk3yc80\t93.0\t0.0\t100.0\t1.0\t95644.0\t277.58716\n";

    #[test]
    fn test_parse_valid_line() {
        let obs = parse(LINE).unwrap();

        assert_eq!(obs.region_code, "TN");
        assert_eq!(obs.timestamp, 1428300000);
        assert_eq!(obs.humidity, 93.0);
        assert_eq!(obs.snow, 0.0);
        assert_eq!(obs.cloud_cover, 100.0);
        assert_eq!(obs.lightning, 1.0);
        assert_eq!(obs.pressure, 95644.0);
        assert_eq!(format!("{:.1}", obs.temperature), "40.0");
    }

    #[test]
    fn test_parse_crlf_and_padding() {
        let line = " WA \t1430308800000\t9prc9sgwvw80\t 4.0\t0.0\t100.0\t0.0\t99226.0\t273.15\r\n";
        let obs = parse(line).unwrap();

        assert_eq!(obs.region_code, "WA");
        assert_eq!(obs.humidity, 4.0);
        assert_eq!(obs.temperature, 32.0);
    }

    #[test]
    fn test_parse_extra_fields_ignored() {
        let line = "CA\t1000\tgh\t1\t0\t2\t0\t3\t273.15\textra\tmore";
        let obs = parse(line).unwrap();
        assert_eq!(obs.timestamp, 1);
    }

    #[test]
    fn test_parse_too_few_fields() {
        let err = parse("TN\t1428300000000\t9prcjqk3yc80\t93.0\t0.0").unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldCountMismatch {
                expected: 9,
                found: 5
            }
        );
    }

    #[test]
    fn test_parse_empty_region() {
        let line = "\t1000\tgh\t1\t0\t2\t0\t3\t273.15";
        assert_eq!(parse(line).unwrap_err(), ParseError::EmptyRegionCode);
    }

    #[test]
    fn test_parse_invalid_numeric_strict() {
        let line = "TN\t1000\tgh\tabc\t0\t2\t0\t3\t273.15";
        let err = parse(line).unwrap_err();
        assert_eq!(
            err,
            ParseError::NumericFieldInvalid {
                field: "humidity",
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_nan_strict() {
        let line = "TN\t1000\tgh\t1\t0\t2\t0\t3\tNaN";
        assert!(matches!(
            parse(line),
            Err(ParseError::NumericFieldInvalid {
                field: "surface_temperature",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_invalid_numeric_lenient() {
        let parser = LineParser::with_numeric_mode(NumericMode::Lenient);
        let line = "TN\tbogus\tgh\tabc\t1x\t12.5%\t0\t3\t273.15";
        let obs = parser.parse_line(line).unwrap();

        assert_eq!(obs.timestamp, 0);
        assert_eq!(obs.humidity, 0.0);
        assert_eq!(obs.snow, 1.0);
        assert_eq!(obs.cloud_cover, 12.5);
    }

    #[test]
    fn test_parse_fractional_timestamp() {
        let line = "TN\t1.4283e12\tgh\t1\t0\t2\t0\t3\t273.15";
        assert_eq!(parse(line).unwrap().timestamp, 1428300000);
    }

    #[test]
    fn test_timestamp_truncates_millis() {
        let line = "TN\t1428300000999\tgh\t1\t0\t2\t0\t3\t273.15";
        assert_eq!(parse(line).unwrap().timestamp, 1428300000);
    }

    #[test]
    fn test_out_of_range_timestamp_rejected() {
        for millis in ["1e300", "9223372036854775807", "-9223372036854775808"] {
            let line = format!("TN\t{}\tgh\t1\t0\t2\t0\t3\t273.15", millis);
            assert_eq!(
                parse(&line).unwrap_err(),
                ParseError::NumericFieldInvalid {
                    field: "timestamp",
                    value: millis.to_string()
                }
            );
        }

        let lenient = LineParser::with_numeric_mode(NumericMode::Lenient);
        assert!(lenient
            .parse_line("TN\t1e300\tgh\t1\t0\t2\t0\t3\t273.15")
            .is_err());
    }

    #[test]
    fn test_lenient_drops_non_finite_values() {
        assert_eq!(leading_number("inf"), 0.0);
        assert_eq!(leading_number("1e999"), 1e99);
        assert_eq!(leading_number("0x1A"), 0.0);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("  42.5abc"), 42.5);
        assert_eq!(leading_number("-3e2x"), -300.0);
        assert_eq!(leading_number("1e"), 1.0);
        assert_eq!(leading_number("x1"), 0.0);
        assert_eq!(leading_number(""), 0.0);
    }
}
