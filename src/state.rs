use std::path::PathBuf;

use crate::config::ViewerConfig;
use crate::data::model::NormalizedCurve;
use crate::data::prepare_curve;
use crate::frames::{DirectoryFrames, DisplayState, FrameController};
use crate::playback::Playback;

/// Shown instead of the plot when the data pipeline fails.
pub const DATA_ERROR_MESSAGE: &str = "Data file not found or invalid";

// ---------------------------------------------------------------------------
// Session – one loaded dataset ready to play
// ---------------------------------------------------------------------------

/// A prepared curve plus the frame controller and sweep that play it.
pub struct Session {
    pub curve: NormalizedCurve,
    pub frames: FrameController<DirectoryFrames>,
    pub playback: Playback,
}

impl Session {
    /// Current sweep energy.
    pub fn energy(&self) -> f64 {
        self.playback.energy()
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded session (None when the data pipeline failed).
    pub session: Option<Session>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and run the data pipeline for `config`.
    pub fn new(config: ViewerConfig) -> Self {
        let mut state = Self {
            config,
            session: None,
            status_message: None,
        };
        state.reload();
        state
    }

    /// Replace the configuration and reload everything.
    pub fn set_config(&mut self, config: ViewerConfig) {
        self.config = config;
        self.reload();
    }

    pub fn set_source_file(&mut self, path: PathBuf) {
        self.config.source_file = path;
        self.reload();
    }

    /// Point the frame controller at another image directory, keeping the
    /// curve and sweep position.
    pub fn set_image_dir(&mut self, dir: PathBuf) {
        self.config.image_dir = dir;
        let frames = self.frame_controller();
        if let Some(session) = &mut self.session {
            session.frames = frames;
            let energy = session.energy();
            session.frames.on_energy_changed(energy);
        }
    }

    fn frame_controller(&self) -> FrameController<DirectoryFrames> {
        FrameController::new(
            DirectoryFrames::new(&self.config.image_dir, &*self.config.image_extension),
            self.config.quant_step,
            self.config.missing_frame,
        )
    }

    /// Parse and resample the source file; on failure no session exists.
    pub fn reload(&mut self) {
        self.session = None;
        let params = self.config.resample_params();
        match prepare_curve(&self.config.source_file, &self.config.markers, &params) {
            Ok(curve) => {
                let mut frames = self.frame_controller();
                frames.on_energy_changed(curve.start);
                let playback = Playback::new(curve.start, curve.end, self.config.sweep_seconds);
                self.session = Some(Session {
                    curve,
                    frames,
                    playback,
                });
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to prepare curve: {:#}", anyhow::Error::new(e));
                self.status_message = Some(DATA_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// One playback tick: advance the sweep by `dt` seconds and sync the frame.
    pub fn tick(&mut self, dt: f64) -> Option<&DisplayState<image::RgbaImage>> {
        let session = self.session.as_mut()?;
        session.playback.advance(dt);
        let energy = session.energy();
        Some(session.frames.on_energy_changed(energy))
    }

    /// Scrub to `energy` and sync the frame.
    pub fn seek(&mut self, energy: f64) {
        if let Some(session) = &mut self.session {
            session.playback.seek_energy(energy);
            let energy = session.energy();
            session.frames.on_energy_changed(energy);
        }
    }

    pub fn toggle_playback(&mut self) {
        if let Some(session) = &mut self.session {
            session.playback.toggle();
        }
    }

    /// Replay the sweep from the start with a cleared frame cache.
    pub fn restart(&mut self) {
        if let Some(session) = &mut self.session {
            session.playback.restart();
            session.frames.reset();
            let energy = session.energy();
            session.frames.on_energy_changed(energy);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.playback.is_running())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::frames::controller::DisplayPhase;
    use crate::frames::FrameId;

    fn write_frame(dir: &Path, id: i64) {
        image::RgbImage::from_pixel(2, 2, image::Rgb([id as u8, 0, 0]))
            .save(dir.join(format!("{id}.jpg")))
            .unwrap();
    }

    fn fixture() -> (tempfile::TempDir, ViewerConfig) {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("exp.txt");
        std::fs::write(&data, "\"IV exp (1,0)\n40 1.0\n44 3.0\n48 2.0\n").unwrap();
        let images = dir.path().join("leed_imagens");
        std::fs::create_dir(&images).unwrap();
        write_frame(&images, 40);
        write_frame(&images, 44);

        let config = ViewerConfig {
            source_file: data,
            image_dir: images,
            sweep_seconds: 8.0,
            ..ViewerConfig::default()
        };
        (dir, config)
    }

    #[test]
    fn loading_shows_the_first_frame() {
        let (_dir, config) = fixture();
        let state = AppState::new(config);
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.curve.energies, vec![40.0, 42.0, 44.0, 46.0, 48.0]);
        assert_eq!(session.frames.state().phase, DisplayPhase::Displaying(FrameId(40)));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn ticks_follow_the_sweep() {
        let (_dir, config) = fixture();
        let mut state = AppState::new(config);
        state.toggle_playback();

        // 1 s of 8 s over 40..48 eV -> 41 eV -> frame 40, already shown
        state.tick(1.0);
        assert_eq!(state.session.as_ref().unwrap().frames.load_count(), 1);

        // 42 eV -> frame 42 is missing, 40 stays visible
        let shown = state.tick(1.0).unwrap();
        assert_eq!(shown.missing, Some(FrameId(42)));
        assert_eq!(shown.frame_id(), Some(FrameId(40)));

        // 44 eV
        let shown = state.tick(2.0).unwrap();
        assert_eq!(shown.phase, DisplayPhase::Displaying(FrameId(44)));
        assert_eq!(state.session.as_ref().unwrap().frames.load_count(), 3);
    }

    #[test]
    fn missing_source_halts_the_pipeline() {
        let (dir, mut config) = fixture();
        config.source_file = dir.path().join("absent.txt");
        let mut state = AppState::new(config);
        assert!(state.session.is_none());
        assert_eq!(state.status_message.as_deref(), Some(DATA_ERROR_MESSAGE));
        assert!(state.tick(1.0).is_none());
    }

    #[test]
    fn restart_reloads_the_first_frame() {
        let (_dir, config) = fixture();
        let mut state = AppState::new(config);
        state.seek(44.0);
        assert_eq!(state.session.as_ref().unwrap().frames.load_count(), 2);

        state.restart();
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.energy(), 40.0);
        assert!(session.playback.is_running());
        assert_eq!(session.frames.state().phase, DisplayPhase::Displaying(FrameId(40)));
        assert_eq!(session.frames.load_count(), 1);
    }

    #[test]
    fn changing_image_dir_keeps_the_curve() {
        let (dir, config) = fixture();
        let mut state = AppState::new(config);
        state.seek(44.0);
        state.set_image_dir(dir.path().join("elsewhere"));
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.energy(), 44.0);
        assert_eq!(session.frames.state().missing, Some(FrameId(44)));
        assert!(session.frames.state().frame.is_none());
    }
}
