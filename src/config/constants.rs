use std::time::Duration;

use crate::config::Ratio;

/// Hard cap on the live window. Older points are evicted from the front.
pub const LIVE_BUFFER_CAPACITY: usize = 50;

/// Relative deviation above which a prediction is flagged as an anomaly.
/// Strict comparison: a deviation of exactly this value is not an error.
pub const ERROR_THRESHOLD: Ratio = Ratio::new(0.15);

/// Points shown in a trend sparkline, current point included (approx 30 mins of history data).
pub const TREND_LOOKBACK: usize = 6;

/// Start, 25%, 50%, 75%, End
pub const AXIS_TICK_COUNT: usize = 5;

pub mod sparkline {
    pub const WIDTH: f64 = 40.0;
    pub const HEIGHT: f64 = 16.0;
}

pub mod reconnect {
    use std::time::Duration;

    pub const INITIAL_DELAY: Duration = Duration::from_secs(1);
    pub const MAX_DELAY: Duration = Duration::from_secs(30);
}

/// The live feed pushes roughly one point per second.
pub const LIVE_TICK: Duration = Duration::from_secs(1);

/// A pre-constructed settings struct so callers can pass the tuning around as one value.
pub const MONITOR: MonitorSettings = MonitorSettings {
    buffer_capacity: LIVE_BUFFER_CAPACITY,
    error_threshold: ERROR_THRESHOLD,
    trend_lookback: TREND_LOOKBACK,
    tick_count: AXIS_TICK_COUNT,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorSettings {
    pub buffer_capacity: usize,
    pub error_threshold: Ratio,
    pub trend_lookback: usize,
    pub tick_count: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        MONITOR
    }
}
