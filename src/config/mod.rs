//! Configuration module for the RPS monitor.

mod backend;
mod debug;
mod persistence;
mod types;

// Public
pub mod constants;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use backend::{BACKEND, history_url, live_ws_url};
pub use constants::{MONITOR, MonitorSettings};
pub use debug::DF;
pub use persistence::PERSISTENCE;
pub use types::Ratio;

pub const LOG_PERFORMANCE: bool = DF.log_performance;
