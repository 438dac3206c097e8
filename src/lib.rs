#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate
pub use config::PERSISTENCE;
pub use domain::{DataPoint, ModelKey, ViewMode};
pub use engine::{MonitorEngine, ViewController};
pub use ui::App;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the prediction backend (REST and WebSocket share the host)
    #[arg(long, default_value = config::BACKEND.endpoints.default_server_url)]
    pub server_url: String,

    /// Start with auto refresh off (no live connection until enabled)
    #[arg(long, default_value_t = false)]
    pub start_paused: bool,

    /// Initial view: live, 1h, 6h or 24h. Defaults to the last view used.
    #[arg(long)]
    pub view: Option<ViewMode>,
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
