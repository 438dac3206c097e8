use eframe::egui::{Key, Ui, Vec2b};
use egui_plot::{AxisHints, GridMark, HPlacement, Plot, VPlacement};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::SeriesKey;
use crate::engine::{CommitOutcome, MonitorEngine, ViewController};
use crate::ui::plot_layers::{
    ErrorMarkerLayer, HoverLayer, LayerContext, PlotLayer, SelectionLayer, SeriesLineLayer,
    SeriesVisibility,
};
use crate::ui::tooltip::render_point_report;
use crate::ui::ui_text::UI_TEXT;

#[cfg(debug_assertions)]
use crate::config::DF;

/// Map a plot x coordinate to the nearest sample index inside the visible window.
pub fn index_at(x: f64, visible: (usize, usize)) -> usize {
    let (start, end) = visible;
    if !x.is_finite() {
        return start;
    }
    (x.round().max(0.0) as usize).clamp(start, end)
}

#[derive(Default)]
pub struct PlotView {
    /// Sample under the cursor last frame.
    hovered: Option<usize>,
}

impl PlotView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the chart and route pointer input to the engine.
    /// Returns the index of a clicked point (for the inspect window).
    pub fn show(
        &mut self,
        ui: &mut Ui,
        engine: &mut MonitorEngine,
        visibility: &SeriesVisibility,
    ) -> Option<usize> {
        let view = engine.view();
        let Some(visible) = view.visible_range() else {
            self.hovered = None;
            ui.centered_and_justified(|ui| ui.label(UI_TEXT.no_data));
            return None;
        };

        let response = {
            let series = view.displayed();
            let selection = view.selection_summary();
            let ctx = LayerContext {
                series,
                visible,
                visibility,
                analyzer: view.analyzer(),
                draft: view.draft(),
                selection: selection.as_ref(),
                hovered: self.hovered,
            };

            let (x_min, x_max) = (visible.0 as f64 - 0.5, visible.1 as f64 + 0.5);
            let ticks = view.ticks();
            let labels: Vec<String> = series.iter().map(|p| p.time.clone()).collect();

            Plot::new("rps_plot")
                .custom_x_axes(vec![create_time_axis(labels)])
                .custom_y_axes(vec![create_y_axis()])
                .x_grid_spacer(move |_input| {
                    ticks
                        .iter()
                        .map(|&i| GridMark {
                            value: i as f64,
                            step_size: 1.0,
                        })
                        .collect()
                })
                .label_formatter(|_, _| String::new())
                .show_x(false)
                .show_y(false)
                .allow_drag(Vec2b::FALSE)
                .allow_zoom(Vec2b::FALSE)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .allow_double_click_reset(false)
                .show(ui, |plot_ui| {
                    plot_ui.set_plot_bounds_x(x_min..=x_max);
                    plot_ui.set_plot_bounds_y(0.0..=PLOT_CONFIG.y_axis_max);

                    crate::trace_time!("Render plot layers", 2000, {
                        let layers: [&dyn PlotLayer; 6] = [
                            &SelectionLayer,
                            &SeriesLineLayer(SeriesKey::Model1),
                            &SeriesLineLayer(SeriesKey::Model2),
                            &SeriesLineLayer(SeriesKey::Actual),
                            &ErrorMarkerLayer,
                            &HoverLayer,
                        ];
                        for layer in layers {
                            layer.render(plot_ui, &ctx);
                        }
                    });

                    plot_ui.pointer_coordinate()
                })
        };

        let pointer_index = response.inner.map(|p| index_at(p.x, visible));
        self.hovered = pointer_index.filter(|_| response.response.hovered());

        let press_index = ui
            .input(|i| i.pointer.press_origin())
            .map(|pos| index_at(response.transform.value_from_position(pos).x, visible));

        let mut clicked = None;
        let view = engine.view_mut();

        if response.response.drag_started() {
            if let Some(i) = press_index.or(pointer_index) {
                view.begin_drag(i);
            }
        }
        if response.response.dragged() {
            if let Some(i) = pointer_index {
                view.update_drag(i);
            }
        }
        if view.draft().is_some() && ui.input(|i| i.key_pressed(Key::Escape)) {
            view.cancel_drag();
        }
        if response.response.drag_stopped() {
            if let CommitOutcome::Click = view.commit_drag() {
                clicked = pointer_index;
            }
            #[cfg(debug_assertions)]
            if DF.log_selection {
                log::info!("PLOT: drag finished, zoom now {:?}", view.zoom());
            }
        } else if response.response.clicked() {
            clicked = pointer_index;
        }

        if view.draft().is_none() {
            if let Some(index) = self.hovered {
                show_hover_card(&response.response, view, index, visibility);
            }
        }

        clicked
    }
}

fn show_hover_card(
    response: &eframe::egui::Response,
    view: &ViewController,
    index: usize,
    visibility: &SeriesVisibility,
) {
    if let Some(report) = view.point_report(index) {
        response.clone().on_hover_ui_at_pointer(|ui| {
            render_point_report(ui, &report, visibility, view.analyzer(), false);
        });
    }
}

/// X axis labels come from the sample's own clock label; gaps between samples stay blank.
fn create_time_axis(labels: Vec<String>) -> AxisHints<'static> {
    AxisHints::new_x()
        .formatter(move |mark, _range| {
            let x = mark.value;
            if x < 0.0 || x.fract() != 0.0 {
                return String::new();
            }
            labels.get(x as usize).cloned().unwrap_or_default()
        })
        .placement(VPlacement::Bottom)
}

fn create_y_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(PLOT_CONFIG.y_axis_label)
        .formatter(|mark, _range| format!("{:.0}", mark.value))
        .placement(HPlacement::Left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_snaps_and_clamps_to_window() {
        assert_eq!(index_at(3.4, (0, 9)), 3);
        assert_eq!(index_at(3.6, (0, 9)), 4);
        assert_eq!(index_at(-2.0, (0, 9)), 0);
        assert_eq!(index_at(42.0, (5, 12)), 12);
        assert_eq!(index_at(1.0, (5, 12)), 5);
        assert_eq!(index_at(f64::NAN, (5, 12)), 5);
    }
}
