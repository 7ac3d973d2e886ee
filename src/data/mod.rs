/// Data layer: measurement parsing, resampling, and export.
///
/// Architecture:
/// ```text
///  exp.txt ("IV exp" / "IV theory" sections)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse experimental section → MeasurementRecord
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ resample  │  normalize, grid, interpolate, smooth → NormalizedCurve
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  optional CSV dump of the resampled curve
///   └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod resample;

use std::path::Path;

pub use error::DataError;
use loader::SectionMarkers;
use model::NormalizedCurve;
use resample::ResampleParams;

/// Run the whole pipeline: read the file, keep the experimental section,
/// resample it onto the energy grid.
pub fn prepare_curve(
    path: &Path,
    markers: &SectionMarkers,
    params: &ResampleParams,
) -> Result<NormalizedCurve, DataError> {
    let record = loader::load_file(path, markers)?;
    log::info!(
        "Parsed {} experimental pairs from {}",
        record.len(),
        path.display()
    );
    let curve = resample::resample(&record, params)?;
    log::info!(
        "Resampled onto {} points, {} to {} eV",
        curve.len(),
        curve.start,
        curve.end
    );
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = prepare_curve(
            &dir.path().join("absent.txt"),
            &SectionMarkers::default(),
            &ResampleParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[test]
    fn single_pair_is_insufficient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exp.txt");
        std::fs::write(&path, "\"IV exp (0,1)\n40 1.0\n").unwrap();
        let err = prepare_curve(&path, &SectionMarkers::default(), &ResampleParams::default())
            .unwrap_err();
        assert!(matches!(err, DataError::InsufficientData(1)));
    }

    #[test]
    fn file_round_trip_without_smoothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exp.txt");
        std::fs::write(
            &path,
            "\"IV exp (1,0)\n40 1.0\n42 2.0\n44 3.0\n\n\"IV theory (1,0)\n40 9.0\n",
        )
        .unwrap();
        let params = ResampleParams {
            sigma: 0.0,
            ..ResampleParams::default()
        };
        let curve = prepare_curve(&path, &SectionMarkers::default(), &params).unwrap();
        assert_eq!(curve.energies, vec![40.0, 42.0, 44.0]);
        assert_eq!(curve.intensities, vec![0.0, 0.5, 1.0]);
    }
}
