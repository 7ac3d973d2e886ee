mod app;
mod config;
mod data;
mod frames;
mod playback;
mod state;
mod ui;

use std::path::Path;

use app::LeedViewerApp;
use config::ViewerConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional single argument: a JSON configuration file.
    let (config, config_error) = match std::env::args().nth(1) {
        Some(path) => match ViewerConfig::load(Path::new(&path)) {
            Ok(config) => (config, None),
            Err(e) => {
                log::error!("Failed to load configuration: {e:#}");
                (ViewerConfig::default(), Some(format!("Error: {e:#}")))
            }
        },
        None => (ViewerConfig::default(), None),
    };

    let mut state = AppState::new(config);
    if config_error.is_some() {
        state.status_message = config_error;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LEED I-V Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(LeedViewerApp::new(state)))),
    )
}
