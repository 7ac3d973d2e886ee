// ---------------------------------------------------------------------------
// MeasurementRecord – raw pairs from the experimental section
// ---------------------------------------------------------------------------

/// The `(angle, intensity)` pairs of one experimental section, in file order.
///
/// Angles are the independent axis but are neither sorted nor deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementRecord {
    pub pairs: Vec<(f64, f64)>,
}

impl MeasurementRecord {
    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// NormalizedCurve – the resampled series played back over time
// ---------------------------------------------------------------------------

/// Normalized intensity on a uniform energy grid.
///
/// `energies` is strictly increasing with a constant step and index-aligned
/// with `intensities`. Built once and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCurve {
    /// Energy axis (x), eV.
    pub energies: Vec<f64>,
    /// Normalized intensity (y) – same length as `energies`.
    pub intensities: Vec<f64>,
    /// First grid energy.
    pub start: f64,
    /// Last grid energy.
    pub end: f64,
}

impl NormalizedCurve {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Number of leading samples with `energy_i <= energy`.
    ///
    /// Grows monotonically with `energy` because the grid is sorted.
    pub fn visible_len(&self, energy: f64) -> usize {
        self.energies.partition_point(|&e| e <= energy)
    }

    /// The `[energy, intensity]` points visible at `energy`.
    pub fn visible_points(&self, energy: f64) -> impl Iterator<Item = [f64; 2]> + '_ {
        let n = self.visible_len(energy);
        self.energies[..n]
            .iter()
            .zip(&self.intensities[..n])
            .map(|(&e, &i)| [e, i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> NormalizedCurve {
        NormalizedCurve {
            energies: vec![40.0, 42.0, 44.0, 46.0],
            intensities: vec![0.0, 0.3, 1.0, 0.6],
            start: 40.0,
            end: 46.0,
        }
    }

    #[test]
    fn visible_prefix_grows_with_energy() {
        let c = curve();
        assert_eq!(c.visible_len(39.9), 0);
        assert_eq!(c.visible_len(40.0), 1);
        assert_eq!(c.visible_len(43.0), 2);
        assert_eq!(c.visible_len(46.0), 4);
        assert_eq!(c.visible_len(500.0), 4);

        let mut last = 0;
        for step in 0..100 {
            let n = c.visible_len(38.0 + step as f64 * 0.1);
            assert!(n >= last);
            last = n;
        }
    }

    #[test]
    fn record_length_helpers() {
        let empty = MeasurementRecord::default();
        assert!(empty.is_empty());
        let rec = MeasurementRecord {
            pairs: vec![(40.0, 1.0)],
        };
        assert_eq!(rec.len(), 1);
        assert!(!rec.is_empty());
        assert!(!curve().is_empty());
    }

    #[test]
    fn visible_points_are_index_aligned() {
        let pts: Vec<[f64; 2]> = curve().visible_points(44.0).collect();
        assert_eq!(pts, vec![[40.0, 0.0], [42.0, 0.3], [44.0, 1.0]]);
    }
}
