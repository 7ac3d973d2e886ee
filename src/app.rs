use eframe::egui;

use crate::state::AppState;
use crate::ui::frame::{frame_panel, FrameTexture};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LeedViewerApp {
    pub state: AppState,
    texture: FrameTexture,
}

impl LeedViewerApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            texture: FrameTexture::default(),
        }
    }
}

impl eframe::App for LeedViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One playback tick per rendered frame.
        let dt = ctx.input(|i| i.stable_dt) as f64;
        self.state.tick(dt);
        if self.state.is_playing() {
            ctx.request_repaint();
        }

        // ---- Top panel: menu bar and playback controls ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: energy readout and LEED frame ----
        egui::SidePanel::right("frame_panel")
            .default_width(360.0)
            .resizable(true)
            .show(ctx, |ui| {
                frame_panel(ui, &self.state, &mut self.texture);
            });

        // ---- Central panel: I-V curve ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::curve_plot(ui, &self.state);
        });
    }
}
