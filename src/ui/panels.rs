use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::ViewerConfig;
use crate::data::export::write_curve_csv;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data…").clicked() {
                open_data_dialog(state);
                ui.close_menu();
            }
            if ui.button("Choose image folder…").clicked() {
                choose_image_dir_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load configuration…").clicked() {
                open_config_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let can_export = state.session.as_ref().is_some_and(|s| !s.curve.is_empty());
            if ui
                .add_enabled(can_export, egui::Button::new("Export curve…"))
                .clicked()
            {
                export_curve_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            let (start, end) = (session.playback.start(), session.playback.end());
            let mut energy = session.energy();
            let playing = state.is_playing();

            if ui.button(if playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                state.toggle_playback();
            }
            if ui.button("⏮ Restart").clicked() {
                state.restart();
            }

            let slider = egui::Slider::new(&mut energy, start..=end)
                .suffix(" eV")
                .fixed_decimals(0);
            if ui.add(slider).changed() {
                state.seek(energy);
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_data_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open I-V measurement")
        .add_filter("Text", &["txt", "dat"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Loading measurement {}", path.display());
        state.set_source_file(path);
    }
}

pub fn choose_image_dir_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Choose LEED image folder")
        .pick_folder();

    if let Some(dir) = dir {
        log::info!("Using LEED images from {}", dir.display());
        state.set_image_dir(dir);
    }
}

pub fn open_config_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Load viewer configuration")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match ViewerConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded configuration {}", path.display());
                state.set_config(config);
            }
            Err(e) => {
                log::error!("Failed to load configuration: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_curve_dialog(state: &mut AppState) {
    let Some(session) = &state.session else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export resampled curve")
        .add_filter("CSV", &["csv"])
        .set_file_name("iv_curve.csv")
        .save_file();

    if let Some(path) = file {
        match write_curve_csv(&session.curve, &path) {
            Ok(()) => log::info!("Exported {} points to {}", session.curve.len(), path.display()),
            Err(e) => {
                log::error!("Failed to export curve: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
