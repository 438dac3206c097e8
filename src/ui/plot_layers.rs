use eframe::egui::{Color32, RichText, Stroke};
use egui_plot::{Line, LineStyle, PlotPoint, PlotPoints, PlotUi, Points, Polygon, Text, VLine};

use crate::analysis::DeviationAnalyzer;
use crate::analysis::summary::SelectionSummary;
use crate::config::plot::PLOT_CONFIG;
use crate::domain::{DataPoint, IndexedPoint, ModelKey, SeriesKey, indexed};
use crate::engine::SelectionDraft;
use crate::ui::ui_text::UI_TEXT;

/// Which series the user has switched on. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeriesVisibility {
    pub model1: bool,
    pub model2: bool,
}

impl Default for SeriesVisibility {
    fn default() -> Self {
        Self {
            model1: true,
            model2: true,
        }
    }
}

impl SeriesVisibility {
    pub fn shows(&self, key: SeriesKey) -> bool {
        match key {
            SeriesKey::Actual => true,
            SeriesKey::Model1 => self.model1,
            SeriesKey::Model2 => self.model2,
        }
    }

    pub fn toggle(&mut self, model: ModelKey) -> &mut bool {
        match model {
            ModelKey::Model1 => &mut self.model1,
            ModelKey::Model2 => &mut self.model2,
        }
    }
}

pub struct LayerContext<'a> {
    pub series: &'a [DataPoint],
    /// Inclusive index window currently on screen.
    pub visible: (usize, usize),
    pub visibility: &'a SeriesVisibility,
    pub analyzer: &'a DeviationAnalyzer,
    pub draft: Option<SelectionDraft>,
    pub selection: Option<&'a SelectionSummary>,
    pub hovered: Option<usize>,
}

impl<'a> LayerContext<'a> {
    /// Points on screen, indexed by their position in the whole series.
    fn visible_points(&self) -> impl Iterator<Item = IndexedPoint<'a>> + use<'a> {
        let (start, end) = self.visible;
        indexed(self.series).skip(start).take(end + 1 - start)
    }
}

pub trait PlotLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext);
}

pub fn series_color(key: SeriesKey) -> Color32 {
    match key {
        SeriesKey::Actual => PLOT_CONFIG.actual_color,
        SeriesKey::Model1 => PLOT_CONFIG.model1_color,
        SeriesKey::Model2 => PLOT_CONFIG.model2_color,
    }
}

/// One line per series. The actual line breaks at forecast points instead of dropping to zero.
pub struct SeriesLineLayer(pub SeriesKey);

impl PlotLayer for SeriesLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let key = self.0;
        if !ctx.visibility.shows(key) {
            return;
        }

        let mut runs: Vec<Vec<[f64; 2]>> = vec![Vec::new()];
        for p in ctx.visible_points() {
            match p.point.value(key) {
                Some(v) => {
                    if let Some(run) = runs.last_mut() {
                        run.push([p.index as f64, v]);
                    }
                }
                None => runs.push(Vec::new()),
            }
        }

        for run in runs.into_iter().filter(|r| !r.is_empty()) {
            let mut line = Line::new(key.short_label(), PlotPoints::new(run)).color(series_color(key));
            line = match key.model() {
                None => line.width(PLOT_CONFIG.actual_line_width),
                Some(_) => line.width(PLOT_CONFIG.model_line_width).style(LineStyle::Dashed {
                    length: PLOT_CONFIG.model_dash_length,
                }),
            };
            plot_ui.line(line);
        }
    }
}

/// Red dots on every model prediction whose deviation crosses the threshold.
pub struct ErrorMarkerLayer;

impl PlotLayer for ErrorMarkerLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let mut markers = Vec::new();
        for p in ctx.visible_points() {
            for model in [ModelKey::Model1, ModelKey::Model2] {
                if !ctx.visibility.shows(model.series()) {
                    continue;
                }
                if ctx.analyzer.is_error_at(p.point, model) {
                    markers.push([p.index as f64, p.point.prediction(model)]);
                }
            }
        }
        if markers.is_empty() {
            return;
        }
        plot_ui.points(
            Points::new("", PlotPoints::new(markers))
                .radius(PLOT_CONFIG.error_marker_radius)
                .color(PLOT_CONFIG.error_color)
                .filled(true),
        );
    }
}

/// Shaded band over an in-progress drag, with its point-count / duration badge.
pub struct SelectionLayer;

impl PlotLayer for SelectionLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let Some((left, right)) = ctx.draft.and_then(|d| d.span()) else {
            return;
        };
        let (x0, x1) = (left.min(right) as f64, left.max(right) as f64);
        let y_max = PLOT_CONFIG.y_axis_max;

        plot_ui.polygon(
            Polygon::new(
                "",
                PlotPoints::new(vec![[x0, 0.0], [x1, 0.0], [x1, y_max], [x0, y_max]]),
            )
            .fill_color(PLOT_CONFIG.selection_fill)
            .stroke(Stroke::new(1.0, PLOT_CONFIG.selection_stroke)),
        );

        if let Some(summary) = ctx.selection {
            let label = format!(
                "{} {} • {}",
                summary.point_count, UI_TEXT.selection_points, summary.duration_label
            );
            plot_ui.text(Text::new(
                "",
                PlotPoint::new((x0 + x1) / 2.0, y_max * 0.95),
                RichText::new(label).color(PLOT_CONFIG.selection_stroke).strong(),
            ));
        }
    }
}

/// Vertical cursor at the hovered sample.
pub struct HoverLayer;

impl PlotLayer for HoverLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if let Some(index) = ctx.hovered {
            plot_ui.vline(
                VLine::new("", index as f64)
                    .color(PLOT_CONFIG.color_text_subdued)
                    .width(1.0),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actual_is_always_visible() {
        let mut v = SeriesVisibility::default();
        *v.toggle(ModelKey::Model1) = false;
        assert!(v.shows(SeriesKey::Actual));
        assert!(!v.shows(SeriesKey::Model1));
        assert!(v.shows(SeriesKey::Model2));
    }

    #[test]
    fn visible_points_keep_series_indices() {
        let series: Vec<DataPoint> = (0..10)
            .map(|i| DataPoint::new(format!("10:00:{:02}", i), Some(100.0), 90.0, 95.0))
            .collect();
        let visibility = SeriesVisibility::default();
        let analyzer = DeviationAnalyzer::default();
        let ctx = LayerContext {
            series: &series,
            visible: (3, 6),
            visibility: &visibility,
            analyzer: &analyzer,
            draft: None,
            selection: None,
            hovered: None,
        };
        let points: Vec<(usize, &str)> = ctx
            .visible_points()
            .map(|p| (p.index, p.point.time.as_str()))
            .collect();
        assert_eq!(
            points,
            vec![(3, "10:00:03"), (4, "10:00:04"), (5, "10:00:05"), (6, "10:00:06")]
        );
    }
}
