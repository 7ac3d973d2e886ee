use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};

/// Energies without an image, to exercise the missing-frame path.
const MISSING_ENERGIES: [u32; 3] = [90, 132, 134];
const IMAGE_SIZE: u32 = 256;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Peaks `(energy, width, amplitude)` of the synthetic I-V curve.
const PEAKS: [(f64, f64, f64); 4] = [
    (62.0, 6.0, 0.9),
    (95.0, 9.0, 1.6),
    (138.0, 12.0, 1.1),
    (176.0, 10.0, 0.7),
];

fn iv_intensity(energy: f64) -> f64 {
    0.15 + PEAKS
        .iter()
        .map(|&(mu, sigma, amp)| gaussian(energy, mu, sigma, amp))
        .sum::<f64>()
}

/// Deterministic jitter source (splitmix64), so repeated runs write identical
/// sample data.
struct Jitter(u64);

impl Jitter {
    fn unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        (z ^ (z >> 31)) as f64 / u64::MAX as f64
    }

    /// Zero-mean noise in `[-amplitude, amplitude]`, peaked at 0.
    fn noise(&mut self, amplitude: f64) -> f64 {
        (self.unit() + self.unit() - 1.0) * amplitude
    }
}

/// Measurement file with an experimental block (irregular, noisy energies)
/// followed by a theory block that the viewer ignores.
fn measurement_text(jitter: &mut Jitter) -> String {
    let mut text = String::from("LEED I-V sample\n\n\"IV exp (1,0)\n");
    let mut energy = 41.3;
    while energy < 199.0 {
        let intensity = iv_intensity(energy) * 1000.0 + jitter.noise(30.0);
        let _ = writeln!(text, "{energy:.2} {intensity:.3}");
        energy += 0.8 + jitter.unit() * 0.6;
    }
    text.push_str("\n\"IV theory (1,0)\n");
    for e in (40..=200).step_by(2) {
        let _ = writeln!(text, "{e}.00 {:.3}", iv_intensity(e as f64 + 3.0) * 1000.0);
    }
    text
}

/// A hexagonal spot pattern; spots contract as energy rises and their
/// brightness follows the I-V curve.
fn diffraction_pattern(energy: u32, jitter: &mut Jitter) -> RgbImage {
    let e = energy as f64;
    let center = IMAGE_SIZE as f64 / 2.0;
    let radius = 900.0 / e.sqrt();
    let brightness = (iv_intensity(e) / 1.8).min(1.0);

    let spots: Vec<(f64, f64)> = (0..6)
        .map(|k| {
            let angle = k as f64 * std::f64::consts::PI / 3.0;
            (center + radius * angle.cos(), center + radius * angle.sin())
        })
        .collect();

    RgbImage::from_fn(IMAGE_SIZE, IMAGE_SIZE, |x, y| {
        let (px, py) = (x as f64, y as f64);
        let glow: f64 = spots
            .iter()
            .map(|&(sx, sy)| {
                let d2 = (px - sx).powi(2) + (py - sy).powi(2);
                (-d2 / 18.0).exp()
            })
            .sum();
        let noise = jitter.noise(0.06);
        let v = ((glow * brightness + 0.05 + noise).clamp(0.0, 1.0) * 255.0) as u8;
        Rgb([v / 4, v, v / 3])
    })
}

fn main() -> Result<()> {
    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "sample_data".into()));
    let image_dir = out_dir.join("leed_imagens");
    std::fs::create_dir_all(&image_dir)
        .with_context(|| format!("creating {}", image_dir.display()))?;

    let mut jitter = Jitter(42);

    let data_path = out_dir.join("exp.txt");
    std::fs::write(&data_path, measurement_text(&mut jitter))
        .with_context(|| format!("writing {}", data_path.display()))?;

    let mut written = 0;
    for energy in (40..=200).step_by(2) {
        if MISSING_ENERGIES.contains(&energy) {
            continue;
        }
        let path = image_dir.join(format!("{energy}.jpg"));
        diffraction_pattern(energy, &mut jitter)
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        written += 1;
    }

    println!(
        "Wrote {} and {written} LEED images to {} (missing: {MISSING_ENERGIES:?})",
        data_path.display(),
        image_dir.display()
    );
    Ok(())
}
