use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::DataError;
use super::model::MeasurementRecord;

// ---------------------------------------------------------------------------
// Section markers
// ---------------------------------------------------------------------------

/// Line prefixes that open and close the experimental section.
///
/// Matching is case-sensitive and done on the trimmed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionMarkers {
    /// Opens the block whose pairs are kept.
    pub experimental: String,
    /// Opens any other block, which closes collection.
    pub other: String,
}

impl Default for SectionMarkers {
    fn default() -> Self {
        Self {
            experimental: "\"IV exp".to_string(),
            other: "\"IV theory".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Idle,
    Collecting,
}

/// Read `path` and parse its experimental section.
pub fn load_file(path: &Path, markers: &SectionMarkers) -> Result<MeasurementRecord, DataError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    parse_lines(text.lines(), markers)
}

/// Parse measurement lines into the pairs of the experimental section.
///
/// Marker lines and blank lines switch sections and are never data. Inside
/// the experimental section a line must be exactly two floats; anything else
/// is skipped with a warning.
pub fn parse_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    markers: &SectionMarkers,
) -> Result<MeasurementRecord, DataError> {
    let mut section = Section::Idle;
    let mut pairs = Vec::new();

    for (line_no, raw) in lines.into_iter().enumerate() {
        let line = raw.trim();

        if line.starts_with(&markers.experimental) {
            section = Section::Collecting;
            continue;
        }
        if line.is_empty() || line.starts_with(&markers.other) {
            section = Section::Idle;
            continue;
        }
        if section == Section::Idle {
            continue;
        }

        match parse_pair(line) {
            Some(pair) => pairs.push(pair),
            None => log::warn!("Skipping malformed data line {}: {line:?}", line_no + 1),
        }
    }

    let record = MeasurementRecord { pairs };
    if record.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(record)
}

fn parse_pair(line: &str) -> Option<(f64, f64)> {
    let mut tokens = line.split_whitespace();
    let angle = tokens.next()?.parse::<f64>().ok()?;
    let intensity = tokens.next()?.parse::<f64>().ok()?;
    if tokens.next().is_some() || !angle.is_finite() || !intensity.is_finite() {
        return None;
    }
    Some((angle, intensity))
}
