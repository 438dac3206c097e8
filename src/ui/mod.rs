mod app;
mod plot_layers;
mod plot_view;
mod tooltip;
mod ui_config;
mod ui_text;

pub use app::{App, UiPrefs};
pub use plot_layers::SeriesVisibility;
pub use plot_view::index_at;
