mod history;
mod live_stream;
pub mod wire;

pub use history::{HistoryProvider, HttpHistoryProvider};
pub use live_stream::{Backoff, LiveStreamManager};
pub use wire::{decode_point, decode_series};
