pub mod pricing;
mod quote_api;
pub mod time_window;

use chrono_tz::Tz;
use std::sync::Arc;

use crate::{api::API, entities::RateTable, external::RouteProvider};

pub use time_window::{classify_time_window, EventCalendar, NoEvents, TimeWindow};

/// Stateless fare calculator. Safe to share between concurrent requests; the
/// only suspension point is the route lookup.
pub struct Engine<R> {
    routes: R,
    rates: RateTable,
    timezone: Tz,
    events: Arc<dyn EventCalendar + Send + Sync>,
}

impl<R: RouteProvider> Engine<R> {
    pub fn new(routes: R, rates: RateTable, timezone: Tz) -> Self {
        Self {
            routes,
            rates,
            timezone,
            events: Arc::new(NoEvents),
        }
    }

    pub fn with_event_calendar<E>(mut self, events: E) -> Self
    where
        E: EventCalendar + Send + Sync + 'static,
    {
        self.events = Arc::new(events);
        self
    }
}

impl<R: RouteProvider + Send + Sync> API for Engine<R> {}
