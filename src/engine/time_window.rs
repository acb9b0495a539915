use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;

/// Hook for pricing special events (concerts, boat shows, race weekends).
pub trait EventCalendar {
    fn is_event_active(&self, at: &DateTime<Tz>) -> bool;
}

/// Calendar with no events scheduled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvents;

impl EventCalendar for NoEvents {
    fn is_event_active(&self, _: &DateTime<Tz>) -> bool {
        false
    }
}

impl<F> EventCalendar for F
where
    F: Fn(&DateTime<Tz>) -> bool,
{
    fn is_event_active(&self, at: &DateTime<Tz>) -> bool {
        self(at)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub late_night: bool,
    pub rush_hour: bool,
    pub weekend: bool,
    pub event: bool,
}

impl TimeWindow {
    pub fn is_active(&self) -> bool {
        self.late_night || self.rush_hour || self.weekend || self.event
    }
}

fn is_weekday(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}

pub fn classify_time_window(
    instant: DateTime<Utc>,
    timezone: Tz,
    events: &dyn EventCalendar,
) -> TimeWindow {
    let local = instant.with_timezone(&timezone);
    let hour = local.hour();
    let day = local.weekday();

    TimeWindow {
        late_night: hour < 5,
        rush_hour: is_weekday(day) && ((7..10).contains(&hour) || (16..19).contains(&hour)),
        weekend: matches!(day, Weekday::Sat | Weekday::Sun) || (day == Weekday::Fri && hour >= 19),
        event: events.is_event_active(&local),
    }
}
