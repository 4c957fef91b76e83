use chrono::prelude::*;
use chrono::LocalResult;
use chrono_tz::Tz;
use thiserror::Error;

/// Accepted input formats for date fields, tried in order. First match wins.
pub const DATE_FORMATS: [&str; 2] = [
    // DD/MM/YY HH:MM
    "%d/%m/%y %H:%M",
    // DD Month YYYY, HH:MM AM/PM
    "%d %B %Y, %I:%M %p",
];

/// How date strings are interpreted: the zone to assume when the input
/// carries none, and the list of accepted formats.
#[derive(Debug, Clone)]
pub struct DateTimeConfig {
    pub timezone: Tz,
    pub formats: Vec<String>,
}

impl Default for DateTimeConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            formats: DATE_FORMATS.iter().map(|f| (*f).to_string()).collect(),
        }
    }
}

/// A date field as received by the validator. Requests carry strings, the
/// update merge path carries instants inherited from the stored row. Both go
/// through the same past-date check.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Text(String),
    Instant(DateTime<Utc>),
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Instant(value)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateParseError {
    #[error("Could not parse datetime string \"{value}\". Expected formats: \"{formats}\"")]
    Unparseable { value: String, formats: String },
    #[error("Datetime must be in the future")]
    PastDate,
}

/// Parse a date field into a UTC instant.
///
/// Strings are matched against the configured formats in order; the parsed
/// wall-clock time is interpreted in the configured zone and converted to
/// UTC. Any result strictly before `now` is rejected.
pub fn parse_datetime(
    input: &DateInput,
    now: DateTime<Utc>,
    config: &DateTimeConfig,
) -> Result<DateTime<Utc>, DateParseError> {
    let dt_utc = match input {
        DateInput::Instant(dt) => *dt,
        DateInput::Text(value) => {
            let naive = config
                .formats
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .ok_or_else(|| unparseable(value, config))?;

            match config.timezone.from_local_datetime(&naive) {
                LocalResult::Single(dt) => dt.with_timezone(&Utc),
                LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
                // Wall-clock time that does not exist in the zone (DST gap)
                LocalResult::None => return Err(unparseable(value, config)),
            }
        }
    };

    if dt_utc < now {
        return Err(DateParseError::PastDate);
    }

    Ok(dt_utc)
}

fn unparseable(value: &str, config: &DateTimeConfig) -> DateParseError {
    DateParseError::Unparseable {
        value: value.to_string(),
        formats: config.formats.join("\", \""),
    }
}

/// Human readable output form: `DD Month YYYY, HH:MM AM/PM` with the leading
/// zero on the hour stripped.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%d %B %Y, %I:%M %p")
        .to_string()
        .replace(" 0", " ")
}

#[cfg(test)]
mod test {
    use super::*;

    fn long_ago() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn parses_short_format() {
        let config = DateTimeConfig::default();
        let parsed = parse_datetime(&"24/12/30 18:30".into(), long_ago(), &config).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 12, 24, 18, 30, 0).unwrap());
    }

    #[test]
    fn parses_long_format() {
        let config = DateTimeConfig::default();
        let parsed = parse_datetime(&"24 December 2030, 06:30 PM".into(), long_ago(), &config)
            .unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 12, 24, 18, 30, 0).unwrap());
    }

    #[test]
    fn first_matching_format_wins() {
        let config = DateTimeConfig::default();
        // Valid in the first format only
        let parsed = parse_datetime(&"01/02/31 08:00".into(), long_ago(), &config).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2031, 2, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn rejects_unknown_formats() {
        let config = DateTimeConfig::default();
        for value in ["2030-12-24 18:30", "tomorrow", "24/12/2030 18:30", ""] {
            let res = parse_datetime(&DateInput::from(value), long_ago(), &config);
            assert!(
                matches!(res, Err(DateParseError::Unparseable { .. })),
                "expected parse failure for {:?}",
                value
            );
        }
    }

    #[test]
    fn rejects_past_dates() {
        let config = DateTimeConfig::default();
        let now = Utc.with_ymd_and_hms(2031, 1, 1, 0, 0, 0).unwrap();
        let res = parse_datetime(&"24/12/30 18:30".into(), now, &config);
        assert_eq!(res, Err(DateParseError::PastDate));
    }

    #[test]
    fn past_check_applies_to_instants() {
        let config = DateTimeConfig::default();
        let now = Utc.with_ymd_and_hms(2031, 1, 1, 0, 0, 0).unwrap();
        let res = parse_datetime(&DateInput::Instant(long_ago()), now, &config);
        assert_eq!(res, Err(DateParseError::PastDate));
    }

    #[test]
    fn input_without_zone_uses_configured_zone() {
        let config = DateTimeConfig {
            timezone: chrono_tz::Europe::Berlin,
            ..Default::default()
        };
        // Berlin is UTC+1 in December
        let parsed = parse_datetime(&"24/12/30 18:30".into(), long_ago(), &config).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 12, 24, 17, 30, 0).unwrap());
    }

    #[test]
    fn nonexistent_wall_clock_time_is_rejected() {
        let config = DateTimeConfig {
            timezone: chrono_tz::Europe::Berlin,
            ..Default::default()
        };
        // Berlin skips from 02:00 to 03:00 on 2030-03-31
        let res = parse_datetime(&"31/03/30 02:30".into(), long_ago(), &config);
        assert!(matches!(res, Err(DateParseError::Unparseable { .. })));
    }

    #[test]
    fn formats_without_leading_zero_on_hour() {
        let dt = Utc.with_ymd_and_hms(2030, 12, 24, 8, 5, 0).unwrap();
        assert_eq!(format_datetime(&dt), "24 December 2030, 8:05 AM");

        let dt = Utc.with_ymd_and_hms(2030, 12, 24, 18, 30, 0).unwrap();
        assert_eq!(format_datetime(&dt), "24 December 2030, 6:30 PM");
    }

    #[test]
    fn round_trips_to_the_minute() {
        let config = DateTimeConfig::default();
        let dt = Utc.with_ymd_and_hms(2030, 5, 2, 9, 45, 0).unwrap();
        let formatted = format_datetime(&dt);
        let reparsed = parse_datetime(&DateInput::Text(formatted), long_ago(), &config).unwrap();
        assert_eq!(reparsed, dt);
    }
}
