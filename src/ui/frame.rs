use eframe::egui::{self, Color32, ColorImage, Context, RichText, TextureHandle, Ui};
use image::RgbaImage;

use crate::frames::FrameId;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GPU copy of the held diffraction frame
// ---------------------------------------------------------------------------

/// Texture for the controller's held frame, re-uploaded only when the frame
/// identifier changes.
#[derive(Default)]
pub struct FrameTexture {
    current: Option<(FrameId, TextureHandle)>,
}

impl FrameTexture {
    fn sync(&mut self, ctx: &Context, frame: Option<&(FrameId, RgbaImage)>) -> Option<&TextureHandle> {
        let Some((id, img)) = frame else {
            self.current = None;
            return None;
        };
        if self.current.as_ref().map(|(cur, _)| cur) != Some(id) {
            let size = [img.width() as usize, img.height() as usize];
            let pixels = ColorImage::from_rgba_unmultiplied(size, img.as_raw());
            let handle = ctx.load_texture(format!("leed_{id}"), pixels, egui::TextureOptions::LINEAR);
            self.current = Some((*id, handle));
        }
        self.current.as_ref().map(|(_, handle)| handle)
    }
}

// ---------------------------------------------------------------------------
// Right side panel – readout and frame
// ---------------------------------------------------------------------------

/// Energy readout, the current LEED frame, and the missing-frame notice.
pub fn frame_panel(ui: &mut Ui, state: &AppState, texture: &mut FrameTexture) {
    let Some(session) = &state.session else {
        ui.label("No data loaded.");
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(format!("Energy: {:.0} eV", session.energy()));
        ui.small(format!("Images: {}", session.frames.source().dir().display()));
    });
    ui.separator();

    let display = session.frames.state();
    match texture.sync(ui.ctx(), display.frame.as_ref()) {
        Some(handle) => {
            let side = ui.available_width().min(ui.available_height() - 40.0).max(64.0);
            ui.vertical_centered(|ui: &mut Ui| {
                ui.add(
                    egui::Image::new(egui::load::SizedTexture::from_handle(handle))
                        .max_width(side)
                        .max_height(side)
                        .maintain_aspect_ratio(true),
                );
            });
        }
        None => {
            ui.label("No LEED image shown yet.");
        }
    }

    if session.frames.show_missing_indicator() {
        if let Some(id) = display.missing {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(format!("LEED image not found! ({id} eV)")).color(Color32::RED));
            });
        }
    }
}
