//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};
use ndarray::ArrayD;

use crate::config::*;
use crate::synthetic::{self, Pattern};

use wavebank_filter::WaveletFamily;
use wavebank_synopsis::SynopsisLayout;
use wavebank_wavelet::{Cost, EnergyThreshold, FullyDecomposed, TransformConfig};

/// Decomposition mode of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Pyramid,
    Packet,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Pyramid => "pyramid",
            Mode::Packet => "packet",
        }
    }
}

/// Parses a wavelet family name string into the corresponding enum variant.
pub fn parse_family(s: &str) -> Result<WaveletFamily> {
    WaveletFamily::from_name(s).with_context(|| format!("invalid [transform].family {s:?}"))
}

/// Parses a decomposition mode name string into the corresponding enum variant.
pub fn parse_mode(s: &str) -> Result<Mode> {
    match s.to_lowercase().as_str() {
        "pyramid" => Ok(Mode::Pyramid),
        "packet" => Ok(Mode::Packet),
        other => bail!("unknown transform mode: {other:?}"),
    }
}

/// Parses a synthetic pattern name string into the corresponding enum variant.
pub fn parse_pattern(s: &str) -> Result<Pattern> {
    match s.to_lowercase().as_str() {
        "noise" => Ok(Pattern::Noise),
        "gradient" => Ok(Pattern::Gradient),
        "checkerboard" => Ok(Pattern::Checkerboard),
        other => bail!("unknown input pattern: {other:?}"),
    }
}

/// Builds the synthetic input image. A `seed` given on the command line
/// overrides the configured one.
pub fn build_input_image(input: &InputToml, seed: Option<u64>) -> Result<ArrayD<f64>> {
    let pattern = parse_pattern(&input.pattern)?;
    if input.shape.is_empty() || input.shape.contains(&0) {
        bail!("[input].shape must list at least one non-zero extent, got {:?}", input.shape);
    }
    Ok(synthetic::generate(&input.shape, pattern, seed.unwrap_or(input.seed)))
}

/// Builds a validated [`TransformConfig`] from the TOML transform configuration.
pub fn build_transform_config(transform: &TransformToml) -> Result<TransformConfig> {
    let family = parse_family(&transform.family)?;
    let cfg = TransformConfig::new(family)
        .with_levels(transform.levels)
        .with_subsample_factor(transform.subsample_factor);
    cfg.validate().context("invalid [transform] settings")?;
    Ok(cfg)
}

/// Builds the packet [`Cost`] policy from the TOML packet configuration.
pub fn build_cost(packet: &PacketToml) -> Result<Box<dyn Cost>> {
    match packet.cost.to_lowercase().as_str() {
        "full" => Ok(Box::new(FullyDecomposed::new(packet.max_depth))),
        "energy" => {
            if !packet.min_energy.is_finite() || packet.min_energy < 0.0 {
                bail!(
                    "[packet].min_energy must be finite and non-negative, got {}",
                    packet.min_energy
                );
            }
            Ok(Box::new(EnergyThreshold::new(packet.max_depth, packet.min_energy)))
        }
        other => bail!("unknown packet cost: {other:?}"),
    }
}

/// Builds a [`SynopsisLayout`] for a pyramid of `levels` levels over `shape`.
pub fn build_synopsis_layout(synopsis: &SynopsisToml, shape: &[usize], levels: usize) -> SynopsisLayout {
    SynopsisLayout::new(shape.to_vec())
        .with_ratio(synopsis.ratio)
        .with_levels(levels)
}
