use serde::{Deserialize, Serialize};

use super::mapper::{map_to_frame, FrameId};
use super::source::FrameSource;

/// What the viewer shows when the current energy has no image.
///
/// Under both policies the last good frame stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFramePolicy {
    /// Keep the previous frame, no overlay.
    KeepLast,
    /// Keep the previous frame and overlay a "not found" notice.
    #[default]
    ShowIndicator,
}

/// Whether the current energy is backed by the held frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhase {
    /// Nothing requested yet, or the requested frame is missing.
    Idle,
    /// The held frame belongs to the current energy.
    Displaying(FrameId),
}

/// The visible frame and its status. Mutated only by [`FrameController`].
#[derive(Debug)]
pub struct DisplayState<F> {
    pub phase: DisplayPhase,
    /// Last successfully loaded frame.
    pub frame: Option<(FrameId, F)>,
    /// Identifier that was requested but has no backing resource.
    pub missing: Option<FrameId>,
}

impl<F> Default for DisplayState<F> {
    fn default() -> Self {
        Self {
            phase: DisplayPhase::Idle,
            frame: None,
            missing: None,
        }
    }
}

impl<F> DisplayState<F> {
    /// Identifier of the frame on screen, if any.
    pub fn frame_id(&self) -> Option<FrameId> {
        self.frame.as_ref().map(|(id, _)| *id)
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Swaps the displayed frame as energy changes, loading each frame at most
/// once per identifier transition.
pub struct FrameController<S: FrameSource> {
    source: S,
    quant_step: u32,
    policy: MissingFramePolicy,
    state: DisplayState<S::Frame>,
    /// Last identifier handed to the source (found or not).
    requested: Option<FrameId>,
    loads: usize,
}

impl<S: FrameSource> FrameController<S> {
    pub fn new(source: S, quant_step: u32, policy: MissingFramePolicy) -> Self {
        Self {
            source,
            quant_step,
            policy,
            state: DisplayState::default(),
            requested: None,
            loads: 0,
        }
    }

    /// Advance to `energy`; touches the source only when the identifier changes.
    pub fn on_energy_changed(&mut self, energy: f64) -> &DisplayState<S::Frame> {
        let id = map_to_frame(energy, self.quant_step);
        if self.requested == Some(id) {
            return &self.state;
        }
        self.requested = Some(id);

        if self.state.frame_id() == Some(id) {
            self.state.phase = DisplayPhase::Displaying(id);
            self.state.missing = None;
            return &self.state;
        }

        self.loads += 1;
        match self.source.load(id) {
            Ok(Some(frame)) => {
                log::debug!("Showing frame {id}");
                self.state.frame = Some((id, frame));
                self.state.phase = DisplayPhase::Displaying(id);
                self.state.missing = None;
            }
            Ok(None) => {
                log::debug!("No frame for {id}, keeping previous");
                self.mark_missing(id);
            }
            Err(e) => {
                log::warn!("Failed to load frame {id}: {:#}", anyhow::Error::new(e));
                self.mark_missing(id);
            }
        }
        &self.state
    }

    fn mark_missing(&mut self, id: FrameId) {
        self.state.phase = DisplayPhase::Idle;
        self.state.missing = Some(id);
    }

    /// Drop the held frame and request history; the next energy loads afresh.
    pub fn reset(&mut self) {
        self.state = DisplayState::default();
        self.requested = None;
        self.loads = 0;
    }

    pub fn state(&self) -> &DisplayState<S::Frame> {
        &self.state
    }

    /// Whether the UI should overlay the missing-frame notice.
    pub fn show_missing_indicator(&self) -> bool {
        self.policy == MissingFramePolicy::ShowIndicator && self.state.missing.is_some()
    }

    /// Number of times the source has been asked for a frame.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
