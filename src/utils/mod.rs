mod perf;
mod time_utils;

pub use time_utils::{AppInstant, CLOCK_FORMAT, format_local_clock, format_span_secs};
