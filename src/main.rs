mod app;
mod controller;
mod dispatch;
mod error;
mod models;
mod settings;
mod ui;
mod utils;

use app::FormApp;

use tracing::{info, warn};

fn main() -> Result<(), eframe::Error> {
    // Initialize logging with reasonable defaults
    tracing_subscriber::fmt::init();

    info!("Starting File Operations");

    let config_path = settings::config_path();
    let settings = settings::load(&config_path).unwrap_or_else(|e| {
        warn!("{}; using default settings", e);
        settings::Settings::default()
    });
    info!("Submitting to {}", settings.server.endpoint);

    let options = eframe::NativeOptions {
        vsync: true,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window.width, settings.window.height])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "File Operations",
        options,
        Box::new(move |_| Ok(Box::new(FormApp::new(settings)))),
    )
}
