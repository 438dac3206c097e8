use eframe::egui::{Color32, Pos2, RichText, Sense, Shape, Stroke, Ui, vec2};

use crate::analysis::summary::{PointReport, SeriesRow};
use crate::analysis::{DeviationAnalyzer, RootCauseNarrative, Sparkline};
use crate::config::constants::sparkline;
use crate::config::plot::PLOT_CONFIG;
use crate::domain::SeriesKey;
use crate::ui::plot_layers::{SeriesVisibility, series_color};
use crate::ui::ui_text::UI_TEXT;

/// Hover / inspect card for one point. Returns the narrative for the first "Learn more"
/// button clicked, if any (only ever clicked in the pinned window).
pub fn render_point_report(
    ui: &mut Ui,
    report: &PointReport,
    visibility: &SeriesVisibility,
    analyzer: &DeviationAnalyzer,
    interactive: bool,
) -> Option<RootCauseNarrative> {
    let mut requested = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new(&report.time).strong());
        if report.is_forecast {
            ui.label(
                RichText::new(UI_TEXT.forecast_badge)
                    .small()
                    .strong()
                    .color(PLOT_CONFIG.color_forecast_badge),
            );
        }
    });
    ui.separator();

    for row in report.rows.iter().filter(|r| visibility.shows(r.key)) {
        ui.horizontal(|ui| {
            render_row_header(ui, row);
            if let Some(line) = &row.sparkline {
                draw_sparkline(ui, line, series_color(row.key));
            }
        });

        if let Some(dev) = &row.deviation {
            ui.horizontal(|ui| {
                let color = if dev.is_error {
                    PLOT_CONFIG.error_color
                } else {
                    PLOT_CONFIG.color_text_subdued
                };
                let direction = if dev.is_overestimate() {
                    UI_TEXT.over_estimate
                } else {
                    UI_TEXT.under_estimate
                };
                ui.label(
                    RichText::new(format!(
                        "{} {} ({} {:+.0})",
                        UI_TEXT.deviation_label,
                        dev.deviation,
                        direction,
                        dev.signed_error()
                    ))
                    .small()
                    .color(color),
                );
                if dev.is_error && interactive && ui.small_button(UI_TEXT.learn_more).clicked() {
                    requested = Some(analyzer.root_cause_narrative(dev.model, dev.deviation));
                }
            });
        }
    }
    requested
}

fn render_row_header(ui: &mut Ui, row: &SeriesRow) {
    let label = match row.key.model() {
        Some(model) => model.to_string(),
        None => SeriesKey::Actual.short_label().to_string(),
    };
    ui.label(RichText::new("●").color(series_color(row.key)));
    ui.label(label);
    ui.label(RichText::new(format!("{:.1}", row.value)).strong());
    if row.is_best {
        ui.label(
            RichText::new(UI_TEXT.best_badge)
                .small()
                .strong()
                .color(PLOT_CONFIG.color_best_model),
        );
    }
}

/// Sparkline points are already in local pixel space (0..WIDTH, 0..HEIGHT, y down).
fn draw_sparkline(ui: &mut Ui, line: &Sparkline, color: Color32) {
    let size = vec2(sparkline::WIDTH as f32, sparkline::HEIGHT as f32);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let to_screen = |p: [f64; 2]| Pos2::new(origin.x + p[0] as f32, origin.y + p[1] as f32);

    let points: Vec<Pos2> = line.points.iter().copied().map(to_screen).collect();
    painter.add(Shape::line(points, Stroke::new(1.5, color)));
    if let Some(last) = line.last() {
        painter.circle_filled(to_screen(last), 2.0, color);
    }
}

pub fn render_narrative(ui: &mut Ui, narrative: &RootCauseNarrative) {
    ui.label(
        RichText::new(narrative.headline())
            .strong()
            .color(PLOT_CONFIG.error_color),
    );
    ui.label(narrative.summary());
    ui.add_space(6.0);
    ui.label(RichText::new(UI_TEXT.narrative_causes).strong());
    for cause in narrative.causes {
        ui.label(format!("• {}", cause));
    }
    ui.add_space(6.0);
    ui.label(RichText::new(UI_TEXT.narrative_action).strong());
    ui.label(narrative.recommended_action);
}
