//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Emit verbose logging for live stream connections and every received point.
    pub log_live_stream: bool,

    /// History requests, responses and discarded (stale) responses.
    pub log_history: bool,

    /// View mode transitions and zoom resets they cause.
    pub log_view_changes: bool,

    /// Anything about the drag selection state machine
    pub log_selection: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_view_changes: true,
    log_history: true,

    log_selection: false,
    log_live_stream: false,
    log_performance: false,
};
