use super::Engine;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    api::QuoteAPI,
    engine::{
        pricing::{compute_fare, round_to_cents},
        time_window::classify_time_window,
    },
    entities::{Quote, QuoteRequest, Rate, VehicleType},
    error::{invalid_input_error, unexpected_error, Error},
    external::RouteProvider,
};

struct Booking<'a> {
    origin_id: &'a str,
    destination_id: &'a str,
    vehicle: VehicleType,
    rate: &'a Rate,
    pickup: DateTime<Utc>,
}

fn non_empty(id: &Option<String>) -> Option<&str> {
    id.as_deref().map(str::trim).filter(|id| !id.is_empty())
}

impl<R: RouteProvider> Engine<R> {
    fn validate<'a>(
        &'a self,
        request: &'a QuoteRequest,
        now: DateTime<Utc>,
    ) -> Result<Booking<'a>, Error> {
        let (origin_id, destination_id) =
            match (non_empty(&request.origin_id), non_empty(&request.destination_id)) {
                (Some(origin_id), Some(destination_id)) => (origin_id, destination_id),
                _ => return Err(invalid_input_error("Missing origin or destination")),
            };

        let vehicle: VehicleType = request
            .vehicle_type
            .as_deref()
            .ok_or_else(|| invalid_input_error("Invalid vehicle type"))?
            .parse()?;

        let rate = self
            .rates
            .get(vehicle)
            .ok_or_else(|| invalid_input_error("Invalid vehicle type"))?;

        let pickup = match (request.is_asap, &request.pickup_time) {
            (true, _) => now,
            (false, Some(pickup_time)) => pickup_time.resolve(self.timezone)?,
            (false, None) => return Err(invalid_input_error("Missing booking time information")),
        };

        Ok(Booking {
            origin_id,
            destination_id,
            vehicle,
            rate,
            pickup,
        })
    }

    /// Prices `request` with `now` standing in for the current time of ASAP
    /// bookings.
    #[tracing::instrument(skip(self))]
    pub async fn compute_quote_at(
        &self,
        request: QuoteRequest,
        now: DateTime<Utc>,
    ) -> Result<Quote, Error> {
        let booking = self.validate(&request, now)?;

        let metrics = self
            .routes
            .route_metrics(booking.origin_id, booking.destination_id)
            .await?;

        let window = classify_time_window(booking.pickup, self.timezone, self.events.as_ref());

        let fare = compute_fare(
            booking.rate,
            &metrics,
            request.is_airport_pickup,
            window.is_active(),
        );

        if !fare.is_finite() {
            tracing::error!(?metrics, "fare is not a finite number");
            return Err(unexpected_error());
        }

        let quote = Quote::new(round_to_cents(fare));

        tracing::info!(
            vehicle = %booking.vehicle,
            miles = metrics.distance_miles(),
            minutes = metrics.duration_minutes(),
            ?window,
            amount = quote.amount,
            "computed quote"
        );

        Ok(quote)
    }
}

#[async_trait]
impl<R: RouteProvider + Send + Sync> QuoteAPI for Engine<R> {
    async fn compute_quote(&self, request: QuoteRequest) -> Result<Quote, Error> {
        self.compute_quote_at(request, Utc::now()).await
    }
}
