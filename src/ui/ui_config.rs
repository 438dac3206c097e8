use eframe::egui::{Color32, Frame, Margin, Stroke, Visuals};

#[derive(Clone, Copy)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub central_panel: Color32,
    pub top_panel: Color32,
}

#[derive(Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
}

pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_gray(200),
        heading: Color32::WHITE,
        central_panel: Color32::from_rgb(17, 24, 39),
        top_panel: Color32::from_rgb(31, 41, 55),
    },
};

impl UiConfig {
    pub fn top_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.top_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    pub fn visuals(&self) -> Visuals {
        let mut visuals = Visuals::dark();
        visuals.panel_fill = self.colors.central_panel;
        visuals.widgets.noninteractive.fg_stroke.color = self.colors.label;
        visuals.widgets.inactive.fg_stroke.color = self.colors.label;
        visuals.widgets.hovered.fg_stroke.color = self.colors.heading;
        visuals.widgets.active.fg_stroke.color = self.colors.heading;
        visuals
    }
}
