use crate::domain::{DataPoint, ViewMode};

/// Ask the history worker for the window behind `mode`.
/// `generation` identifies the mode change that issued it; responses carrying an older
/// generation are stale and get dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRequest {
    pub generation: u64,
    pub mode: ViewMode,
}

/// The result returned by the history worker
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryResponse {
    pub generation: u64,
    pub mode: ViewMode,
    pub duration_ms: u128,
    pub result: Result<Vec<DataPoint>, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    Connected,
    Connecting,
    #[default]
    Disconnected,
}

/// Pushed by the live feed task. `session` identifies the connection that produced it so
/// anything still in flight from a torn-down connection can be ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
    Status { session: u64, status: ConnectionStatus },
    Point { session: u64, point: DataPoint },
}

impl LiveEvent {
    pub fn session(&self) -> u64 {
        match self {
            Self::Status { session, .. } | Self::Point { session, .. } => *session,
        }
    }
}

/// Boundary work the view controller asks its owner to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FetchHistory(HistoryRequest),
    /// Open (or re-open) the live connection, tagging its events with `session`.
    ConnectLive { session: u64 },
    DisconnectLive,
}
