//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub actual_color: Color32,
    /// LightGBM + EMWA
    pub model1_color: Color32,
    /// LightGBM
    pub model2_color: Color32,

    pub actual_line_width: f32,
    pub model_line_width: f32,
    /// Model lines are drawn dashed so the ground truth stays dominant
    pub model_dash_length: f32,

    // --- ANOMALY MARKERS ---
    pub error_color: Color32,
    pub error_marker_radius: f32,

    // --- SELECTION ---
    pub selection_fill: Color32,
    pub selection_stroke: Color32,

    /// Fixed Y-axis ceiling (requests per second)
    pub y_axis_max: f64,
    pub y_axis_label: &'static str,
    /// Hover cursor snaps to the nearest sample within this many index units
    pub hover_snap_distance: f64,

    pub color_forecast_badge: Color32,
    pub color_best_model: Color32,
    pub color_text_subdued: Color32,
    pub color_banner_bg: Color32,
    pub color_banner_fg: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    actual_color: Color32::from_rgb(19, 127, 236),
    model1_color: Color32::from_rgb(245, 158, 11), // Amber
    model2_color: Color32::from_rgb(16, 185, 129), // Emerald

    actual_line_width: 2.5,
    model_line_width: 2.0,
    model_dash_length: 6.0,

    error_color: Color32::from_rgb(239, 68, 68),
    error_marker_radius: 3.5,

    selection_fill: Color32::from_rgba_premultiplied(19, 127, 236, 30),
    selection_stroke: Color32::from_rgb(19, 127, 236),

    y_axis_max: 4000.0,
    y_axis_label: "REQS/S",
    hover_snap_distance: 0.5,

    color_forecast_badge: Color32::from_rgb(147, 51, 234),
    color_best_model: Color32::from_rgb(234, 179, 8),
    color_text_subdued: Color32::GRAY,
    color_banner_bg: Color32::from_rgb(255, 237, 213),
    color_banner_fg: Color32::from_rgb(154, 52, 18),
};
