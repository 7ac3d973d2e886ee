use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::SectionMarkers;
use crate::data::resample::ResampleParams;
use crate::frames::MissingFramePolicy;

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Everything that differs between datasets and set-ups.
///
/// Every field is optional in JSON; missing ones take the defaults below.
///
/// ```json
/// {
///   "source_file": "exp.txt",
///   "image_dir": "leed_imagens",
///   "step": 2.0,
///   "smoothing_sigma": 1.0,
///   "quant_step": 2,
///   "energy_range": [40.0, 200.0],
///   "missing_frame": "show_indicator"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Measurement file with the `"IV exp` section.
    pub source_file: PathBuf,
    /// Directory holding `{energy}.{image_extension}` frames.
    pub image_dir: PathBuf,
    pub image_extension: String,
    /// Energy grid spacing (eV).
    pub step: f64,
    pub smoothing_sigma: f64,
    /// Frame identifiers are multiples of this.
    pub quant_step: u32,
    /// Fixed sweep bounds, snapped to multiples of `step`; derived from the
    /// data when absent.
    pub energy_range: Option<[f64; 2]>,
    pub missing_frame: MissingFramePolicy,
    /// Wall-clock length of one full sweep.
    pub sweep_seconds: f64,
    pub markers: SectionMarkers,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source_file: PathBuf::from("exp.txt"),
            image_dir: PathBuf::from("leed_imagens"),
            image_extension: "jpg".to_string(),
            step: 2.0,
            smoothing_sigma: 1.0,
            quant_step: 2,
            energy_range: None,
            missing_frame: MissingFramePolicy::default(),
            sweep_seconds: 15.0,
            markers: SectionMarkers::default(),
        }
    }
}

impl ViewerConfig {
    /// Read a JSON config. Relative paths inside it resolve against the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: ViewerConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        config.validate()?;
        Ok(config)
    }

    /// Prefix relative `source_file` / `image_dir` with `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for p in [&mut self.source_file, &mut self.image_dir] {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            bail!("step must be positive, got {}", self.step);
        }
        if !self.smoothing_sigma.is_finite() || self.smoothing_sigma < 0.0 {
            bail!("smoothing_sigma must be >= 0, got {}", self.smoothing_sigma);
        }
        if self.quant_step == 0 {
            bail!("quant_step must be at least 1");
        }
        if !self.sweep_seconds.is_finite() || self.sweep_seconds <= 0.0 {
            bail!("sweep_seconds must be positive, got {}", self.sweep_seconds);
        }
        if self.markers.experimental.is_empty() || self.markers.other.is_empty() {
            bail!("section markers must not be empty");
        }
        if let Some([start, end]) = self.energy_range {
            if !start.is_finite() || !end.is_finite() {
                bail!("energy_range must be finite, got [{start}, {end}]");
            }
            if end < start {
                bail!("energy_range end {end} is below start {start}");
            }
        }
        Ok(())
    }

    pub fn resample_params(&self) -> ResampleParams {
        ResampleParams {
            step: self.step,
            sigma: self.smoothing_sigma,
            bounds: self.energy_range.map(|[s, e]| (s, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_setup() {
        let c = ViewerConfig::default();
        assert_eq!(c.step, 2.0);
        assert_eq!(c.smoothing_sigma, 1.0);
        assert_eq!(c.quant_step, 2);
        assert_eq!(c.energy_range, None);
        assert_eq!(c.missing_frame, MissingFramePolicy::ShowIndicator);
        assert_eq!(c.markers.experimental, "\"IV exp");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: ViewerConfig =
            serde_json::from_str(r#"{ "quant_step": 4, "missing_frame": "keep_last" }"#).unwrap();
        assert_eq!(c.quant_step, 4);
        assert_eq!(c.missing_frame, MissingFramePolicy::KeepLast);
        assert_eq!(c.step, 2.0);
        assert_eq!(c.image_extension, "jpg");
    }

    #[test]
    fn load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.json");
        std::fs::write(
            &path,
            r#"{ "source_file": "data/exp.txt", "image_dir": "/abs/frames", "energy_range": [40, 200] }"#,
        )
        .unwrap();

        let c = ViewerConfig::load(&path).unwrap();
        assert_eq!(c.source_file, dir.path().join("data/exp.txt"));
        assert_eq!(c.image_dir, PathBuf::from("/abs/frames"));
        assert_eq!(c.resample_params().bounds, Some((40.0, 200.0)));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let bad = [
            ViewerConfig { step: 0.0, ..Default::default() },
            ViewerConfig { smoothing_sigma: -1.0, ..Default::default() },
            ViewerConfig { quant_step: 0, ..Default::default() },
            ViewerConfig { sweep_seconds: 0.0, ..Default::default() },
            ViewerConfig { energy_range: Some([200.0, 40.0]), ..Default::default() },
            ViewerConfig { energy_range: Some([40.0, f64::NAN]), ..Default::default() },
            ViewerConfig {
                markers: SectionMarkers {
                    experimental: String::new(),
                    ..SectionMarkers::default()
                },
                ..Default::default()
            },
        ];
        for c in bad {
            assert!(c.validate().is_err(), "{c:?}");
        }
    }

    #[test]
    fn off_grid_range_is_snapped_when_resampling() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("exp.txt");
        std::fs::write(&data, "\"IV exp\n40 1.0\n42 2.0\n44 3.0\n").unwrap();
        let c = ViewerConfig {
            source_file: data,
            energy_range: Some([39.0, 43.0]),
            ..Default::default()
        };
        assert!(c.validate().is_ok());

        let curve = crate::data::prepare_curve(&c.source_file, &c.markers, &c.resample_params())
            .unwrap();
        // 39 / 2 = 19.5 -> 20, 43 / 2 = 21.5 -> 22
        assert_eq!((curve.start, curve.end), (40.0, 44.0));
        assert_eq!(*curve.energies.last().unwrap(), curve.end);
    }

    #[test]
    fn unreadable_config_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewerConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading config"));
    }
}
