use super::error::DataError;
use super::model::{MeasurementRecord, NormalizedCurve};

/// Gaussian kernels are cut off at this many standard deviations.
const KERNEL_TRUNCATE: f64 = 4.0;

/// Upper limit on grid length; larger spans come from corrupt angles.
const MAX_GRID_POINTS: usize = 1_000_000;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Resampling knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampleParams {
    /// Grid spacing in eV.
    pub step: f64,
    /// Gaussian smoothing width in grid samples; `<= 0` disables smoothing.
    pub sigma: f64,
    /// Fixed `(start, end)` grid bounds. `None` derives them from the data.
    pub bounds: Option<(f64, f64)>,
}

impl Default for ResampleParams {
    fn default() -> Self {
        Self {
            step: 2.0,
            sigma: 1.0,
            bounds: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Normalize, regrid, interpolate and smooth a measurement record.
///
/// Grid bounds are `step * round(x / step)` of the angle extremes (or of the
/// fixed bounds) with ties rounded to even. Grid points outside the data take the nearest boundary
/// value. Smoothing reflects the series at both ends.
pub fn resample(
    record: &MeasurementRecord,
    params: &ResampleParams,
) -> Result<NormalizedCurve, DataError> {
    if record.len() < 2 {
        return Err(DataError::InsufficientData(record.len()));
    }
    let step = params.step;
    if !step.is_finite() || step <= 0.0 {
        return Err(DataError::InvalidStep(step));
    }

    let mut points: Vec<(f64, f64)> = normalize(&record.pairs);
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (start, end) = match params.bounds {
        Some((start, end)) => {
            if !start.is_finite() || !end.is_finite() || end < start {
                return Err(DataError::InvalidBounds { start, end });
            }
            let snapped = (quantize(start, step), quantize(end, step));
            if snapped != (start, end) {
                log::warn!(
                    "Energy range {start}..{end} is off the {step} eV grid, using {}..{}",
                    snapped.0,
                    snapped.1
                );
            }
            snapped
        }
        None => {
            let first = points[0].0;
            let last = points[points.len() - 1].0;
            (quantize(first, step), quantize(last, step))
        }
    };

    let energies = grid(start, end, step)?;
    let interpolated: Vec<f64> = energies.iter().map(|&e| interpolate(&points, e)).collect();
    let intensities = gaussian_smooth(&interpolated, params.sigma);

    Ok(NormalizedCurve {
        energies,
        intensities,
        start,
        end,
    })
}

/// Min-max scale intensities into `[0, 1]`; a flat series becomes all zeros.
fn normalize(pairs: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let min = pairs.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = pairs.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range.abs() < f64::EPSILON {
        log::warn!("Intensity range is degenerate ({min}..{max}), using a flat zero curve");
        return pairs.iter().map(|&(a, _)| (a, 0.0)).collect();
    }
    pairs.iter().map(|&(a, i)| (a, (i - min) / range)).collect()
}

/// Snap `x` to the nearest multiple of `step`, ties to even.
fn quantize(x: f64, step: f64) -> f64 {
    step * (x / step).round_ties_even()
}

/// `start, start + step, ..., end`; both ends are multiples of `step`.
fn grid(start: f64, end: f64, step: f64) -> Result<Vec<f64>, DataError> {
    let intervals = ((end - start) / step).round();
    let too_large = DataError::GridTooLarge {
        start,
        end,
        step,
        max: MAX_GRID_POINTS,
    };
    if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
        return Err(too_large);
    }
    let n = (intervals as usize).checked_add(1).ok_or(too_large)?;
    Ok((0..n).map(|i| start + i as f64 * step).collect())
}

/// Piecewise-linear lookup over angle-sorted points, flat outside the data.
fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    let (first, last) = (points[0], points[points.len() - 1]);
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    let hi = points.partition_point(|p| p.0 <= x);
    let (x0, y0) = points[hi - 1];
    let (x1, y1) = points[hi];
    if x == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

// ---------------------------------------------------------------------------
// Gaussian smoothing
// ---------------------------------------------------------------------------

fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (KERNEL_TRUNCATE * sigma + 0.5) as i64;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|k| (-0.5 * (k * k) as f64 / (sigma * sigma)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Index into a series of length `n` extended by half-sample reflection:
/// `d c b a | a b c d | d c b a`.
fn reflect(i: i64, n: i64) -> usize {
    let period = 2 * n;
    let j = i.rem_euclid(period);
    (if j >= n { period - 1 - j } else { j }) as usize
}

/// 1-D Gaussian convolution with reflected boundaries.
pub fn gaussian_smooth(values: &[f64], sigma: f64) -> Vec<f64> {
    if sigma.is_nan() || sigma <= 0.0 || values.is_empty() {
        return values.to_vec();
    }
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as i64;
    let n = values.len() as i64;

    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * values[reflect(i + k as i64 - radius, n)])
                .sum()
        })
        .collect()
}
