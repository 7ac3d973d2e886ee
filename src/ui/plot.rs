use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Line, Plot, PlotPoints, VLine};

use crate::state::AppState;

const CURVE_COLOR: Color32 = Color32::YELLOW;

// ---------------------------------------------------------------------------
// I-V plot (central panel)
// ---------------------------------------------------------------------------

/// Render the visible prefix of the I-V curve up to the current energy.
pub fn curve_plot(ui: &mut Ui, state: &AppState) {
    let session = match &state.session {
        Some(s) => s,
        None => {
            let text = match &state.status_message {
                Some(msg) => RichText::new(msg).color(Color32::RED),
                None => RichText::new("Open a data file to play the I-V curve  (File → Open data…)"),
            };
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(text);
            });
            return;
        }
    };

    let energy = session.energy();
    let points: PlotPoints = session.curve.visible_points(energy).collect();

    Plot::new("iv_plot")
        .x_axis_label("Energy (eV)")
        .y_axis_label("Intensity (a.u.)")
        .include_x(session.curve.start)
        .include_x(session.curve.end)
        .include_y(0.0)
        .include_y(1.1)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("experimental").color(CURVE_COLOR).width(2.0));
            plot_ui.vline(VLine::new(energy).color(Color32::LIGHT_BLUE).width(1.0));
        });
}
