pub mod google_maps;

use async_trait::async_trait;

use crate::{entities::RouteMetrics, error::Error};

pub use google_maps::GoogleMaps;

/// Source of driving distance and duration between two places.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteProvider {
    async fn route_metrics(
        &self,
        origin_id: &str,
        destination_id: &str,
    ) -> Result<RouteMetrics, Error>;
}
