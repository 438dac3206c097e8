mod core;
mod live_buffer;
mod messages;
mod range_selector;
mod view_controller;
mod worker;

pub use core::MonitorEngine;
pub use live_buffer::LiveStreamBuffer;
pub use messages::{ConnectionStatus, Effect, HistoryRequest, HistoryResponse, LiveEvent};
pub use range_selector::{CommitOutcome, RangeSelector, SelectionDraft, SelectionState};
pub use view_controller::ViewController;
pub use worker::{process_request, spawn_history_worker};
