use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "Luxury Sedan")]
    LuxurySedan,
    #[serde(rename = "Premium SUV")]
    PremiumSuv,
    #[serde(rename = "VIP Group Sprinter")]
    VipGroupSprinter,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [
        VehicleType::LuxurySedan,
        VehicleType::PremiumSuv,
        VehicleType::VipGroupSprinter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VehicleType::LuxurySedan => "Luxury Sedan",
            VehicleType::PremiumSuv => "Premium SUV",
            VehicleType::VipGroupSprinter => "VIP Group Sprinter",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|vehicle| vehicle.name() == s.trim())
            .ok_or_else(|| invalid_input_error("Invalid vehicle type"))
    }
}

#[test]
fn parse_vehicle_names() {
    assert_eq!(
        "Luxury Sedan".parse::<VehicleType>().unwrap(),
        VehicleType::LuxurySedan
    );
    assert_eq!(
        " Premium SUV ".parse::<VehicleType>().unwrap(),
        VehicleType::PremiumSuv
    );
    assert_eq!(
        "VIP Group Sprinter".parse::<VehicleType>().unwrap(),
        VehicleType::VipGroupSprinter
    );

    let err = "Stretch Limo".parse::<VehicleType>().unwrap_err();
    assert_eq!(err.message, "Invalid vehicle type");
}

#[test]
fn serde_uses_display_names() {
    let json = serde_json::to_string(&VehicleType::PremiumSuv).unwrap();
    assert_eq!(json, "\"Premium SUV\"");

    let vehicle: VehicleType = serde_json::from_str("\"VIP Group Sprinter\"").unwrap();
    assert_eq!(vehicle, VehicleType::VipGroupSprinter);
}
