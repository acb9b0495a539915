mod quote;
mod rate;
mod route;
mod vehicle;

pub use quote::{PickupTime, Quote, QuoteRequest};
pub use rate::{Rate, RateTable};
pub use route::{RouteMetrics, METERS_PER_MILE};
pub use vehicle::VehicleType;
