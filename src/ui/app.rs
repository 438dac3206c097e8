use eframe::{
    Frame, Storage,
    egui::{
        self, CentralPanel, Color32, Context, Margin, RichText, Spinner, TopBottomPanel, Ui,
        Window,
    },
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

#[cfg(debug_assertions)]
use crate::config::DF;

use crate::{
    Cli,
    analysis::{RootCauseNarrative, summary},
    config::{MONITOR, constants::LIVE_TICK, plot::PLOT_CONFIG},
    domain::{ModelKey, ViewMode},
    engine::MonitorEngine,
    ui::{
        plot_layers::{SeriesVisibility, series_color},
        plot_view::PlotView,
        tooltip::{render_narrative, render_point_report},
        ui_config::UI_CONFIG,
        ui_text::UI_TEXT,
    },
};

/// Preferences that survive restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiPrefs {
    pub visibility: SeriesVisibility,
    pub auto_refresh: bool,
    pub last_view: ViewMode,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            visibility: SeriesVisibility::default(),
            auto_refresh: true,
            last_view: ViewMode::Live,
        }
    }
}

#[derive(Default)]
struct HeaderAction {
    mode: Option<ViewMode>,
    toggled: bool,
    clear: bool,
    reset_zoom: bool,
}

pub struct App {
    prefs: UiPrefs,
    engine: Option<MonitorEngine>,
    startup_error: Option<String>,
    plot_view: PlotView,
    /// Point pinned by a click, shown in the inspect window.
    inspected: Option<usize>,
    narrative: Option<RootCauseNarrative>,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let mut prefs: UiPrefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        if args.start_paused {
            prefs.auto_refresh = false;
        }
        let initial_view = args.view.unwrap_or(prefs.last_view);

        cc.egui_ctx.set_visuals(UI_CONFIG.visuals());

        let (engine, startup_error) =
            match MonitorEngine::new(&args.server_url, &MONITOR, prefs.auto_refresh) {
                Ok(mut engine) => {
                    engine.start(initial_view);
                    (Some(engine), None)
                }
                Err(e) => {
                    log::error!("Failed to start monitor engine: {:#}", e);
                    (None, Some(format!("{:#}", e)))
                }
            };

        #[cfg(debug_assertions)]
        if DF.log_view_changes {
            log::info!(
                "APP: server {} | view {} | auto refresh {}",
                args.server_url,
                initial_view,
                prefs.auto_refresh
            );
        }

        Self {
            prefs,
            engine,
            startup_error,
            plot_view: PlotView::new(),
            inspected: None,
            narrative: None,
        }
    }

    fn render_header(&mut self, ui: &mut Ui) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let view = engine.view();
        let mode = view.mode();
        let mut auto_refresh = view.auto_refresh();
        let is_zoomed = view.is_zoomed();
        let is_loading = view.is_loading();
        let rps = view
            .current_rps()
            .map(|v| format!("{:.0}", v))
            .unwrap_or_else(|| "-".to_string());

        ui.horizontal(|ui| {
            ui.heading(RichText::new(UI_TEXT.app_title).color(UI_CONFIG.colors.heading));
            ui.separator();
            ui.label(summary::view_title(mode));
            ui.separator();
            ui.label(format!("{}: ", UI_TEXT.current_rps));
            ui.label(RichText::new(rps).strong().size(18.0));
        });

        let action = ui
            .horizontal(|ui| {
                let mut action = HeaderAction::default();
                for candidate in ViewMode::iter() {
                    if ui
                        .selectable_label(mode == candidate, candidate.to_string())
                        .clicked()
                    {
                        action.mode = Some(candidate);
                    }
                }

                ui.separator();
                action.toggled = ui.checkbox(&mut auto_refresh, UI_TEXT.auto_refresh).changed();
                action.clear = mode.is_live() && ui.button(UI_TEXT.clear_buffer).clicked();
                action.reset_zoom = is_zoomed && ui.button(UI_TEXT.reset_zoom).clicked();

                if is_loading {
                    ui.add(Spinner::new());
                    ui.label(UI_TEXT.loading);
                }
                action
            })
            .inner;

        if let Some(next) = action.mode {
            engine.change_mode(next);
            self.prefs.last_view = next;
            self.inspected = None;
        }
        if action.toggled {
            engine.set_auto_refresh(auto_refresh);
            self.prefs.auto_refresh = auto_refresh;
        }
        if action.clear {
            engine.clear_buffer();
            self.inspected = None;
        }
        if action.reset_zoom {
            engine.view_mut().reset_zoom();
        }

        self.render_legend(ui);
    }

    fn render_legend(&mut self, ui: &mut Ui) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let best = engine.view().legend_best_model();

        ui.horizontal(|ui| {
            ui.label(RichText::new("●").color(PLOT_CONFIG.actual_color));
            ui.label("Actual");
            for model in ModelKey::iter() {
                ui.separator();
                let color = series_color(model.series());
                ui.checkbox(
                    self.prefs.visibility.toggle(model),
                    RichText::new(model.to_string()).color(color),
                );
                if best == Some(model) {
                    ui.label(
                        RichText::new(UI_TEXT.legend_best)
                            .small()
                            .strong()
                            .color(PLOT_CONFIG.color_best_model),
                    );
                }
            }
        });
    }

    fn render_banners(&self, ui: &mut Ui) {
        if let Some(err) = &self.startup_error {
            ui.colored_label(PLOT_CONFIG.error_color, err);
            return;
        }
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let view = engine.view();

        if view.auto_refresh() && view.is_awaiting_stream() {
            egui::Frame::new()
                .fill(PLOT_CONFIG.color_banner_bg)
                .inner_margin(Margin::same(6))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.add(Spinner::new().color(PLOT_CONFIG.color_banner_fg));
                        ui.label(
                            RichText::new(UI_TEXT.connecting_banner).color(PLOT_CONFIG.color_banner_fg),
                        );
                    });
                });
        }
        if let Some(err) = view.last_error() {
            ui.colored_label(
                PLOT_CONFIG.error_color,
                format!("{} {}", UI_TEXT.history_error_prefix, err),
            );
        }
    }

    fn render_inspect_window(&mut self, ctx: &Context) {
        let Some(index) = self.inspected else {
            return;
        };
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let Some(report) = engine.view().point_report(index) else {
            // Series shrank underneath the pinned point.
            self.inspected = None;
            return;
        };

        let mut open = true;
        let mut requested = None;
        Window::new(UI_TEXT.inspect_title)
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                requested = render_point_report(
                    ui,
                    &report,
                    &self.prefs.visibility,
                    engine.view().analyzer(),
                    true,
                );
            });
        if !open {
            self.inspected = None;
        }
        if requested.is_some() {
            self.narrative = requested;
        }
    }

    fn render_narrative_window(&mut self, ctx: &Context) {
        let Some(narrative) = self.narrative.as_ref() else {
            return;
        };
        let mut open = true;
        let mut close = false;
        Window::new(UI_TEXT.narrative_title)
            .open(&mut open)
            .default_width(360.0)
            .collapsible(false)
            .show(ctx, |ui| {
                render_narrative(ui, narrative);
                ui.add_space(8.0);
                close = ui.button(UI_TEXT.close).clicked();
            });
        if !open || close {
            self.narrative = None;
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        if let Some(engine) = self.engine.as_mut() {
            engine.update();
            if engine.view().is_loading() {
                ctx.request_repaint();
            } else {
                ctx.request_repaint_after(LIVE_TICK);
            }
        }

        TopBottomPanel::top("header")
            .frame(UI_CONFIG.top_panel_frame())
            .show(ctx, |ui| {
                self.render_header(ui);
            });

        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                self.render_banners(ui);
                if let Some(engine) = self.engine.as_mut() {
                    if let Some(index) = self.plot_view.show(ui, engine, &self.prefs.visibility) {
                        self.inspected = Some(index);
                    }
                }
                ui.label(RichText::new(UI_TEXT.drag_hint).small().color(Color32::GRAY));
            });

        self.render_inspect_window(ctx);
        self.render_narrative_window(ctx);
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        #[cfg(debug_assertions)]
        if DF.log_view_changes {
            log::info!("SAVE [App]: {:?}", self.prefs);
        }
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }
}
