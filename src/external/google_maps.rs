use async_trait::async_trait;
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::{
    entities::RouteMetrics,
    error::{configuration_error, no_route_found_error, route_lookup_error, Error},
    external::RouteProvider,
};

pub const DEFAULT_API_BASE: &str = "https://maps.googleapis.com";
pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, Deserialize)]
pub struct Measure {
    pub value: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Element {
    pub status: String,
    pub distance: Option<Measure>,
    pub duration: Option<Measure>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Row {
    pub elements: Vec<Element>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DistanceMatrix {
    pub status: String,
    #[serde(default)]
    pub rows: Vec<Row>,
    pub error_message: Option<String>,
}

impl DistanceMatrix {
    /// Reads the single origin/destination pair out of a matrix response.
    pub fn into_route_metrics(self) -> Result<RouteMetrics, Error> {
        check_status(&self.status)?;

        let element = self
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| route_lookup_error("missing distance or duration"))?;

        check_status(&element.status)?;

        match (element.distance, element.duration) {
            (Some(distance), Some(duration)) if distance.value >= 0.0 && duration.value >= 0.0 => {
                Ok(RouteMetrics::new(distance.value, duration.value))
            }
            _ => Err(route_lookup_error("missing distance or duration")),
        }
    }
}

fn check_status(status: &str) -> Result<(), Error> {
    match status {
        "OK" => Ok(()),
        "ZERO_RESULTS" => Err(no_route_found_error()),
        other => Err(route_lookup_error(other)),
    }
}

/// Distance Matrix client. The API key is read from the environment on every
/// lookup and never leaves the server.
#[derive(Clone, Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_base: String,
    api_key_var: String,
}

impl GoogleMaps {
    /// `api_base` is scheme and host, e.g. `https://maps.googleapis.com`.
    pub fn new(api_base: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|_| configuration_error("HTTP client could not be built"))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').into(),
            api_key_var: API_KEY_VAR.into(),
        })
    }

    pub fn with_api_key_var(mut self, name: &str) -> Self {
        self.api_key_var = name.into();
        self
    }

    fn api_key(&self) -> Result<String, Error> {
        let key = env::var(&self.api_key_var)?;

        if key.trim().is_empty() {
            return Err(configuration_error("Server configuration error"));
        }

        Ok(key)
    }
}

#[async_trait]
impl RouteProvider for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn route_metrics(
        &self,
        origin_id: &str,
        destination_id: &str,
    ) -> Result<RouteMetrics, Error> {
        let key = self.api_key()?;
        let url = format!("{}/maps/api/distancematrix/json", self.api_base);

        let res = self
            .client
            .get(url)
            .query(&[("key", key)])
            .query(&[("origins", format!("place_id:{}", origin_id))])
            .query(&[("destinations", format!("place_id:{}", destination_id))])
            .query(&[("units", "imperial")])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code != 200 {
            return Err(route_lookup_error(&format!("HTTP {}", status_code)));
        }

        let data: DistanceMatrix = res.json().await?;

        if let Some(message) = &data.error_message {
            tracing::warn!(status = %data.status, %message, "distance matrix error");
        }

        data.into_route_metrics()
    }
}
