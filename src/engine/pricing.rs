use crate::entities::{Rate, RouteMetrics};

/// Above this distance the long-haul per-mile rate applies.
pub const LONG_DISTANCE_MILES: f64 = 75.0;

/// Flat fee added to every airport pickup.
pub const AIRPORT_FEE: f64 = 10.00;

/// Floor enforced while any surcharge window is active.
pub const TIME_EVENT_MINIMUM: f64 = 25.00;

pub fn per_mile_rate(rate: &Rate, distance_miles: f64) -> f64 {
    if distance_miles > LONG_DISTANCE_MILES {
        rate.per_mile_long
    } else {
        rate.per_mile_short
    }
}

pub fn distance_fare(rate: &Rate, metrics: &RouteMetrics) -> f64 {
    let miles = metrics.distance_miles();
    let minutes = metrics.duration_minutes();

    let fare = rate.base + miles * per_mile_rate(rate, miles) + minutes * rate.per_minute;

    fare.max(rate.minimum_fare)
}

/// Unrounded fare. The vehicle minimum is applied before the airport fee and
/// is not applied again afterwards.
pub fn compute_fare(
    rate: &Rate,
    metrics: &RouteMetrics,
    is_airport_pickup: bool,
    surcharge_window: bool,
) -> f64 {
    let mut fare = distance_fare(rate, metrics);

    if is_airport_pickup {
        fare += AIRPORT_FEE;
    }

    if surcharge_window {
        fare = fare.max(TIME_EVENT_MINIMUM);
    }

    fare
}

pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
