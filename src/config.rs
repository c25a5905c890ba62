use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Wavebank configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WavebankConfig {
    /// Transform settings.
    #[serde(default)]
    pub transform: TransformToml,

    /// Packet cost settings, used when `transform.mode = "packet"`.
    #[serde(default)]
    pub packet: PacketToml,

    /// Synthetic input image.
    #[serde(default)]
    pub input: InputToml,

    /// Synopsis layout settings.
    #[serde(default)]
    pub synopsis: SynopsisToml,
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<WavebankConfig> {
    let toml_str = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformToml {
    #[serde(default = "default_family")]
    pub family: String,
    #[serde(default = "default_levels")]
    pub levels: usize,
    #[serde(default = "default_subsample_factor")]
    pub subsample_factor: usize,
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl Default for TransformToml {
    fn default() -> Self {
        Self {
            family: default_family(),
            levels: default_levels(),
            subsample_factor: default_subsample_factor(),
            mode: default_mode(),
        }
    }
}

fn default_family() -> String {
    "haar".to_string()
}
fn default_levels() -> usize {
    1
}
fn default_subsample_factor() -> usize {
    2
}
fn default_mode() -> String {
    "pyramid".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacketToml {
    #[serde(default = "default_cost")]
    pub cost: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_min_energy")]
    pub min_energy: f64,
}

impl Default for PacketToml {
    fn default() -> Self {
        Self {
            cost: default_cost(),
            max_depth: default_max_depth(),
            min_energy: default_min_energy(),
        }
    }
}

fn default_cost() -> String {
    "full".to_string()
}
fn default_max_depth() -> usize {
    2
}
fn default_min_energy() -> f64 {
    1e-3
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputToml {
    #[serde(default = "default_shape")]
    pub shape: Vec<usize>,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default)]
    pub seed: u64,
}

impl Default for InputToml {
    fn default() -> Self {
        Self {
            shape: default_shape(),
            pattern: default_pattern(),
            seed: 0,
        }
    }
}

fn default_shape() -> Vec<usize> {
    vec![64, 64]
}
fn default_pattern() -> String {
    "noise".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynopsisToml {
    #[serde(default = "default_ratio")]
    pub ratio: usize,
}

impl Default for SynopsisToml {
    fn default() -> Self {
        Self {
            ratio: default_ratio(),
        }
    }
}

fn default_ratio() -> usize {
    2
}
