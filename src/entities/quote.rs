use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};

use crate::error::{invalid_input_error, Error};

/// Pickup timing as sent by the booking form.
///
/// Timestamps carrying an offset (or epoch milliseconds) name an exact
/// instant. Offset-less wall-clock times, as produced by a `datetime-local`
/// input, are read in the service timezone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickupTime {
    Instant(DateTime<Utc>),
    Local(NaiveDateTime),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPickupTime {
    EpochMillis(i64),
    Text(String),
}

const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

impl<'de> Deserialize<'de> for PickupTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawPickupTime::deserialize(deserializer)? {
            RawPickupTime::EpochMillis(millis) => Utc
                .timestamp_millis_opt(millis)
                .single()
                .map(PickupTime::Instant)
                .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", millis))),
            RawPickupTime::Text(text) => {
                let text = text.trim();

                if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
                    return Ok(PickupTime::Instant(instant.with_timezone(&Utc)));
                }

                LOCAL_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                    .map(PickupTime::Local)
                    .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp: {}", text)))
            }
        }
    }
}

impl PickupTime {
    /// Pins the pickup to an instant. Wall-clock times that fall in a DST gap
    /// are rejected; repeated ones take the earlier instant.
    pub fn resolve(&self, timezone: Tz) -> Result<DateTime<Utc>, Error> {
        match self {
            PickupTime::Instant(instant) => Ok(*instant),
            PickupTime::Local(naive) => timezone
                .from_local_datetime(naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc))
                .ok_or_else(|| invalid_input_error("Invalid pickup time")),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuoteRequest {
    pub origin_id: Option<String>,
    pub destination_id: Option<String>,
    pub vehicle_type: Option<String>,
    pub is_airport_pickup: bool,
    pub pickup_time: Option<PickupTime>,
    pub is_asap: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quote {
    pub amount: f64,
}

impl Quote {
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    fn parse(json: &str) -> PickupTime {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_instants() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 15, 16, 0, 0).unwrap();

        assert_eq!(parse("\"2024-05-15T16:00:00Z\""), PickupTime::Instant(expected));
        assert_eq!(parse("\"2024-05-15T12:00:00-04:00\""), PickupTime::Instant(expected));
        assert_eq!(parse("1715788800000"), PickupTime::Instant(expected));
    }

    #[test]
    fn parses_wall_clock_times() {
        let naive = NaiveDateTime::parse_from_str("2024-05-15T12:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();

        assert_eq!(parse("\"2024-05-15T12:00\""), PickupTime::Local(naive));
        assert_eq!(parse("\"2024-05-15T12:00:00\""), PickupTime::Local(naive));
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<PickupTime>("\"next tuesday\"").is_err());
        assert!(serde_json::from_str::<PickupTime>("true").is_err());
    }

    #[test]
    fn resolves_wall_clock_in_service_timezone() {
        let pickup = parse("\"2024-05-15T12:00\"");

        assert_eq!(
            pickup.resolve(New_York).unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 15, 16, 0, 0).unwrap()
        );
    }

    #[test]
    fn dst_gap_is_invalid() {
        // 2024-03-10 02:30 never happens in New York
        let err = parse("\"2024-03-10T02:30\"").resolve(New_York).unwrap_err();

        assert_eq!(err.message, "Invalid pickup time");
    }

    #[test]
    fn dst_overlap_takes_earlier_instant() {
        // 2024-11-03 01:30 happens twice; first occurrence is EDT (UTC-4)
        let resolved = parse("\"2024-11-03T01:30\"").resolve(New_York).unwrap();

        assert_eq!(resolved, Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
    }
}
