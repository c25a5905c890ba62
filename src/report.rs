//! JSON reports written by the subcommands.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use wavebank_region::Region;
use wavebank_wavelet::{SubBand, TransformConfig};

/// Transform settings echoed in every report.
#[derive(Debug, Serialize)]
pub struct TransformSummary {
    pub family: String,
    pub mode: &'static str,
    pub levels: usize,
    pub subsample_factor: usize,
    pub input_shape: Vec<usize>,
}

impl TransformSummary {
    pub fn new(config: &TransformConfig, mode: &'static str, input_shape: &[usize]) -> Self {
        Self {
            family: config.family().name().to_string(),
            mode,
            levels: config.levels(),
            subsample_factor: config.subsample_factor(),
            input_shape: input_shape.to_vec(),
        }
    }
}

/// Statistics of one sub-band.
#[derive(Debug, Serialize)]
pub struct BandReport {
    pub index: usize,
    pub level: usize,
    pub orientation: String,
    pub shape: Vec<usize>,
    pub mean: f64,
    pub sd: f64,
    pub energy: f64,
    pub max_abs: f64,
}

impl BandReport {
    pub fn new(index: usize, band: &SubBand) -> Self {
        let values = band.values();
        Self {
            index,
            level: band.level(),
            orientation: band.orientation().label(band.ndim()),
            shape: band.extent().to_vec(),
            mean: wavebank_stats::mean(&values),
            sd: wavebank_stats::sd(&values),
            energy: wavebank_stats::energy(&values),
            max_abs: wavebank_stats::max_abs(&values),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DecomposeReport {
    pub transform: TransformSummary,
    /// Shannon entropy of the energy spread over all coefficients.
    pub entropy: f64,
    pub bands: Vec<BandReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Vec<bool>>,
}

#[derive(Debug, Serialize)]
pub struct RoundtripReport {
    pub transform: TransformSummary,
    pub bands: usize,
    pub max_abs_error: f64,
    pub l2_error: f64,
    pub relative_error: f64,
    pub tolerance: f64,
    pub passed: bool,
}

#[derive(Debug, Serialize)]
pub struct RectangleReport {
    pub index: usize,
    pub level: usize,
    pub orientation: String,
    pub origin: Vec<isize>,
    pub extent: Vec<usize>,
}

impl RectangleReport {
    pub fn new(index: usize, band: &SubBand, rect: &Region) -> Self {
        Self {
            index,
            level: band.level(),
            orientation: band.orientation().label(band.ndim()),
            origin: rect.origin().to_vec(),
            extent: rect.extent().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SynopsisReport {
    pub transform: TransformSummary,
    pub ratio: usize,
    pub rectangles: Vec<RectangleReport>,
    pub bit_exact: bool,
}

/// Serializes `report` as pretty JSON to `output`, or to stdout when no
/// path is given.
pub fn write<T: Serialize>(report: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    match output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write report to stdout")?;
        }
    }
    Ok(())
}
