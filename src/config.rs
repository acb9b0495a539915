use chrono_tz::Tz;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::{
    entities::RateTable,
    error::{configuration_error, Error},
    external::google_maps::DEFAULT_API_BASE,
};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub timezone: Tz,
    pub rates_path: Option<PathBuf>,
    pub maps_api_base: String,
}

impl Config {
    /// Reads settings from the process environment. The Maps API key is not
    /// part of it; the route provider looks it up per request.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let listen_addr = setting("CONCIERGE_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into())
            .trim()
            .parse()
            .map_err(|_| configuration_error("CONCIERGE_LISTEN_ADDR is not a socket address"))?;

        let timezone = setting("CONCIERGE_TIMEZONE")
            .unwrap_or_else(|| DEFAULT_TIMEZONE.into())
            .trim()
            .parse()
            .map_err(|_| configuration_error("CONCIERGE_TIMEZONE is not an IANA timezone"))?;

        Ok(Self {
            listen_addr,
            timezone,
            rates_path: setting("CONCIERGE_RATES_PATH").map(PathBuf::from),
            maps_api_base: setting("GOOGLE_MAPS_API_BASE")
                .map(|base| with_scheme(base.trim()))
                .unwrap_or_else(|| DEFAULT_API_BASE.into()),
        })
    }

    pub fn rate_table(&self) -> Result<RateTable, Error> {
        match &self.rates_path {
            Some(path) => RateTable::load(path),
            None => Ok(RateTable::default()),
        }
    }
}

// Bare hosts are reached over https.
fn with_scheme(base: &str) -> String {
    if base.contains("://") {
        base.into()
    } else {
        format!("https://{}", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.rates_path, None);
        assert_eq!(config.maps_api_base, "https://maps.googleapis.com");
        assert_eq!(config.rate_table().unwrap(), RateTable::default());
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("CONCIERGE_LISTEN_ADDR", "0.0.0.0:8080"),
            ("CONCIERGE_TIMEZONE", "America/Chicago"),
            ("CONCIERGE_RATES_PATH", "/etc/concierge/rates.json"),
            ("GOOGLE_MAPS_API_BASE", "maps.example.test"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.timezone, chrono_tz::America::Chicago);
        assert_eq!(config.rates_path, Some(PathBuf::from("/etc/concierge/rates.json")));
        assert_eq!(config.maps_api_base, "https://maps.example.test");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let config = config(&[("GOOGLE_MAPS_API_BASE", "http://127.0.0.1:8081")]).unwrap();

        assert_eq!(config.maps_api_base, "http://127.0.0.1:8081");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config(&[("CONCIERGE_TIMEZONE", "  ")]).unwrap();

        assert_eq!(config.timezone, chrono_tz::America::New_York);
    }

    #[test]
    fn invalid_values_are_configuration_errors() {
        let err = config(&[("CONCIERGE_TIMEZONE", "Mars/Olympus_Mons")]).unwrap_err();
        assert_eq!(err.code, crate::error::CONFIGURATION_ERROR);

        let err = config(&[("CONCIERGE_LISTEN_ADDR", "localhost")]).unwrap_err();
        assert_eq!(err.code, crate::error::CONFIGURATION_ERROR);
    }

    #[test]
    fn unreadable_rate_file() {
        let config = config(&[("CONCIERGE_RATES_PATH", "/nonexistent/rates.json")]).unwrap();

        assert_eq!(
            config.rate_table().unwrap_err().code,
            crate::error::CONFIGURATION_ERROR
        );
    }
}
