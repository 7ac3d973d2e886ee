use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the data pipeline before playback starts.
#[derive(Debug, Error)]
pub enum DataError {
    /// The measurement file is missing or unreadable.
    #[error("measurement file '{}' could not be read", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was readable but held no experimental data pairs.
    #[error("no experimental data pairs found")]
    Empty,

    /// Resampling needs at least two pairs.
    #[error("at least 2 data pairs are required, found {0}")]
    InsufficientData(usize),

    #[error("grid step must be a positive finite number, got {0}")]
    InvalidStep(f64),

    #[error("energy range ({start}, {end}) is not a finite, ascending pair")]
    InvalidBounds { start: f64, end: f64 },

    /// The energy span would need more grid points than the viewer holds.
    #[error("energy span {start}..{end} at step {step} needs more than {max} grid points")]
    GridTooLarge {
        start: f64,
        end: f64,
        step: f64,
        max: usize,
    },
}
