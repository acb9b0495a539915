pub const METERS_PER_MILE: f64 = 1609.34;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteMetrics {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl RouteMetrics {
    pub fn new(distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            distance_meters,
            duration_seconds,
        }
    }

    pub fn distance_miles(&self) -> f64 {
        self.distance_meters / METERS_PER_MILE
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }
}

#[test]
fn unit_conversions() {
    let metrics = RouteMetrics::new(METERS_PER_MILE * 12.5, 1800.0);

    assert!((metrics.distance_miles() - 12.5).abs() < 1e-9);
    assert_eq!(metrics.duration_minutes(), 30.0);
}
