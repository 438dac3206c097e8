pub struct UiText {
    pub app_title: &'static str,
    pub current_rps: &'static str,
    pub clear_buffer: &'static str,
    pub auto_refresh: &'static str,
    pub reset_zoom: &'static str,
    pub connecting_banner: &'static str,
    pub loading: &'static str,
    pub history_error_prefix: &'static str,
    pub no_data: &'static str,

    pub legend_best: &'static str,
    pub forecast_badge: &'static str,
    pub best_badge: &'static str,
    pub deviation_label: &'static str,
    pub over_estimate: &'static str,
    pub under_estimate: &'static str,

    pub learn_more: &'static str,
    pub inspect_title: &'static str,
    pub narrative_title: &'static str,
    pub narrative_causes: &'static str,
    pub narrative_action: &'static str,
    pub close: &'static str,

    pub selection_points: &'static str,
    pub drag_hint: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "RPS Monitor",
    current_rps: "Current RPS",
    clear_buffer: "Clear buffer",
    auto_refresh: "Auto refresh",
    reset_zoom: "Reset zoom",
    connecting_banner: "Connecting to live stream...",
    loading: "Loading history...",
    history_error_prefix: "History unavailable:",
    no_data: "Waiting for data",

    legend_best: "Best",
    forecast_badge: "FORECAST",
    best_badge: "BEST",
    deviation_label: "Deviation",
    over_estimate: "over",
    under_estimate: "under",

    learn_more: "Learn more",
    inspect_title: "Point details",
    narrative_title: "Root cause analysis",
    narrative_causes: "Likely causes",
    narrative_action: "Recommended action",
    close: "Close",

    selection_points: "pts",
    drag_hint: "Drag across the chart to zoom (Esc cancels). Click a point to inspect it.",
};
