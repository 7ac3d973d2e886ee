// ---------------------------------------------------------------------------
// Playback – linear energy sweep over wall-clock time
// ---------------------------------------------------------------------------

/// Sweeps energy from `start` to `end` at constant speed over `duration`
/// seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    start: f64,
    end: f64,
    duration: f64,
    elapsed: f64,
    running: bool,
}

impl Playback {
    /// A paused sweep positioned at `start`.
    pub fn new(start: f64, end: f64, duration: f64) -> Self {
        Self {
            start,
            end,
            duration: duration.max(f64::EPSILON),
            elapsed: 0.0,
            running: false,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Fraction of the sweep completed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Current energy.
    pub fn energy(&self) -> f64 {
        self.start + (self.end - self.start) * self.progress()
    }

    /// Accumulate `dt` seconds if running; stops at the end of the sweep.
    pub fn advance(&mut self, dt: f64) {
        if !self.running || dt.is_nan() || dt <= 0.0 {
            return;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.is_finished() {
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn play(&mut self) {
        if self.is_finished() {
            self.elapsed = 0.0;
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Back to `start` and playing.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Jump to the time at which the sweep reaches `energy`.
    pub fn seek_energy(&mut self, energy: f64) {
        let span = self.end - self.start;
        let fraction = if span.abs() < f64::EPSILON {
            1.0
        } else {
            ((energy - self.start) / span).clamp(0.0, 1.0)
        };
        self.elapsed = fraction * self.duration;
    }
}
