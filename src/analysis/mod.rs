// Pure numeric analysis over the displayed series
mod deviation;
mod ticks;
mod trend;

pub mod summary;

pub use deviation::{
    DeviationAnalyzer, DeviationRecord, RECOMMENDED_ACTION, ROOT_CAUSES, RootCauseNarrative,
};
pub use ticks::TickPlanner;
pub use trend::{Sparkline, TrendWindow};
