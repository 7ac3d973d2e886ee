use std::path::Path;

use anyhow::{Context, Result};

use super::model::NormalizedCurve;

/// Write the resampled curve as `energy,intensity` CSV rows.
pub fn write_curve_csv(curve: &NormalizedCurve, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV file {}", path.display()))?;
    writer
        .write_record(["energy", "intensity"])
        .context("writing CSV header")?;
    for (e, i) in curve.energies.iter().zip(&curve.intensities) {
        writer
            .write_record([e.to_string(), i.to_string()])
            .with_context(|| format!("writing CSV row for {e} eV"))?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}
