//! One decomposition engine per run: a pyramid or a packet transform with
//! its cost policy.

use anyhow::{Context, Result};
use ndarray::ArrayD;
use tracing::info;

use wavebank_wavelet::{Cost, DecompositionTree, PacketTransform, PyramidTransform, SubBand, TransformConfig};

use crate::config::WavebankConfig;
use crate::convert::{self, Mode};

pub enum Engine {
    Pyramid(PyramidTransform),
    Packet {
        transform: PacketTransform,
        cost: Box<dyn Cost>,
    },
}

/// Output of a forward transform. `tree` is set in packet mode only.
pub struct Decomposition {
    pub bands: Vec<SubBand>,
    pub tree: Option<DecompositionTree>,
}

impl Engine {
    pub fn from_config(config: &WavebankConfig) -> Result<Self> {
        let transform = convert::build_transform_config(&config.transform)?;
        let engine = match convert::parse_mode(&config.transform.mode)? {
            Mode::Pyramid => Engine::Pyramid(PyramidTransform::new(transform)?),
            Mode::Packet => Engine::Packet {
                transform: PacketTransform::new(transform)?,
                cost: convert::build_cost(&config.packet)?,
            },
        };
        Ok(engine)
    }

    pub fn mode(&self) -> Mode {
        match self {
            Engine::Pyramid(_) => Mode::Pyramid,
            Engine::Packet { .. } => Mode::Packet,
        }
    }

    pub fn config(&self) -> &TransformConfig {
        match self {
            Engine::Pyramid(pyramid) => pyramid.config(),
            Engine::Packet { transform, .. } => transform.config(),
        }
    }

    pub fn forward(&self, image: &ArrayD<f64>) -> Result<Decomposition> {
        let decomposition = match self {
            Engine::Pyramid(pyramid) => Decomposition {
                bands: pyramid.forward(image).context("pyramid forward transform failed")?,
                tree: None,
            },
            Engine::Packet { transform, cost } => {
                let (bands, tree) = transform
                    .forward(image, cost.as_ref())
                    .context("packet forward transform failed")?;
                Decomposition {
                    bands,
                    tree: Some(tree),
                }
            }
        };
        info!(
            mode = self.mode().name(),
            bands = decomposition.bands.len(),
            "forward transform done"
        );
        Ok(decomposition)
    }

    pub fn inverse(&self, decomposition: &Decomposition) -> Result<ArrayD<f64>> {
        let image = match (self, &decomposition.tree) {
            (Engine::Pyramid(pyramid), _) => pyramid
                .inverse(&decomposition.bands)
                .context("pyramid inverse transform failed")?,
            (Engine::Packet { transform, .. }, Some(tree)) => transform
                .inverse(&decomposition.bands, tree)
                .context("packet inverse transform failed")?,
            (Engine::Packet { .. }, None) => anyhow::bail!("packet inverse needs a decomposition tree"),
        };
        info!(mode = self.mode().name(), shape = ?image.shape(), "inverse transform done");
        Ok(image)
    }
}
