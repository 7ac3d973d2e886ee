use std::fmt;

/// Quantized energy identifying one diffraction image, e.g. `44` for `44.jpg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub i64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nearest multiple of `quant_step` to `energy`, ties to even.
///
/// A zero step is treated as 1. Non-finite energies saturate through the
/// integer cast rather than failing.
pub fn map_to_frame(energy: f64, quant_step: u32) -> FrameId {
    let q = quant_step.max(1) as f64;
    let multiple = (energy / q).round_ties_even();
    FrameId((multiple * q) as i64)
}
