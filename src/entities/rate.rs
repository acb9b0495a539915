use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::entities::VehicleType;
use crate::error::{configuration_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub base: f64,
    pub per_mile_short: f64,
    pub per_mile_long: f64,
    pub per_minute: f64,
    pub minimum_fare: f64,
}

impl Rate {
    fn is_valid(&self) -> bool {
        [
            self.base,
            self.per_mile_short,
            self.per_mile_long,
            self.per_minute,
            self.minimum_fare,
        ]
        .iter()
        .all(|value| value.is_finite() && *value >= 0.0)
    }
}

/// Per-vehicle pricing, fixed for the lifetime of the process.
#[derive(Clone, Debug, PartialEq)]
pub struct RateTable {
    rates: HashMap<VehicleType, Rate>,
}

impl RateTable {
    pub fn new(rates: HashMap<VehicleType, Rate>) -> Self {
        Self { rates }
    }

    pub fn get(&self, vehicle: VehicleType) -> Option<&Rate> {
        self.rates.get(&vehicle)
    }

    /// Parses a JSON object keyed by vehicle name, e.g.
    /// `{"Luxury Sedan": {"base": 5.0, "perMileShort": 2.08, ...}}`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let raw: HashMap<String, Rate> = serde_json::from_str(json)
            .map_err(|_| configuration_error("Rate table is not valid JSON"))?;

        let mut rates = HashMap::with_capacity(raw.len());
        for (name, rate) in raw {
            let vehicle: VehicleType = name
                .parse()
                .map_err(|_| configuration_error("Rate table names an unknown vehicle type"))?;

            if !rate.is_valid() {
                return Err(configuration_error(
                    "Rate table values must be non-negative numbers",
                ));
            }

            rates.insert(vehicle, rate);
        }

        Ok(Self { rates })
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path)
            .map_err(|_| configuration_error("Rate table file could not be read"))?;

        Self::from_json(&json)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new(HashMap::from([
            (
                VehicleType::LuxurySedan,
                Rate {
                    base: 5.00,
                    per_mile_short: 2.08,
                    per_mile_long: 1.60,
                    per_minute: 0.35,
                    minimum_fare: 15.00,
                },
            ),
            (
                VehicleType::PremiumSuv,
                Rate {
                    base: 7.50,
                    per_mile_short: 2.75,
                    per_mile_long: 2.10,
                    per_minute: 0.45,
                    minimum_fare: 20.00,
                },
            ),
            (
                VehicleType::VipGroupSprinter,
                Rate {
                    base: 15.00,
                    per_mile_short: 4.20,
                    per_mile_long: 3.25,
                    per_minute: 0.75,
                    minimum_fare: 50.00,
                },
            ),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_vehicle() {
        let table = RateTable::default();

        for vehicle in VehicleType::ALL {
            let rate = table.get(vehicle).unwrap();
            assert!(rate.is_valid());
            assert!(rate.per_mile_long <= rate.per_mile_short);
        }

        assert_eq!(table.get(VehicleType::LuxurySedan).unwrap().minimum_fare, 15.00);
    }

    #[test]
    fn from_json_reads_named_vehicles() {
        let table = RateTable::from_json(
            r#"{
                "Luxury Sedan": {
                    "base": 6.0,
                    "perMileShort": 2.5,
                    "perMileLong": 1.75,
                    "perMinute": 0.4,
                    "minimumFare": 18.0
                }
            }"#,
        )
        .unwrap();

        let rate = table.get(VehicleType::LuxurySedan).unwrap();
        assert_eq!(rate.base, 6.0);
        assert_eq!(rate.minimum_fare, 18.0);
        assert!(table.get(VehicleType::PremiumSuv).is_none());
    }

    #[test]
    fn from_json_rejects_unknown_vehicle() {
        let err = RateTable::from_json(
            r#"{"Hovercraft": {"base": 1, "perMileShort": 1, "perMileLong": 1, "perMinute": 1, "minimumFare": 1}}"#,
        )
        .unwrap_err();

        assert_eq!(err.code, crate::error::CONFIGURATION_ERROR);
    }

    #[test]
    fn from_json_rejects_negative_rates() {
        let err = RateTable::from_json(
            r#"{"Premium SUV": {"base": -1, "perMileShort": 1, "perMileLong": 1, "perMinute": 1, "minimumFare": 1}}"#,
        )
        .unwrap_err();

        assert_eq!(err.code, crate::error::CONFIGURATION_ERROR);
    }
}
