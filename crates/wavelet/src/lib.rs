//! # wavebank-wavelet
//!
//! Separable wavelet filter banks for N-dimensional images, with pyramid
//! (multiresolution) and packet (multiscale) decompositions and their exact
//! inverses.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["ArrayD<f64>"] -->|"PyramidTransform::forward"| B["Vec<SubBand>"]
//!     B -->|"PyramidTransform::inverse"| A
//!     A -->|"PacketTransform::forward(&cost)"| C["Vec<SubBand> + DecompositionTree"]
//!     C -->|"PacketTransform::inverse"| A
//! ```
//!
//! ## Sub-sampling Modes
//!
//! | Factor | Scheme | Band extent | Filters at level `ℓ` |
//! |--------|--------|-------------|----------------------|
//! | 1 | undecimated (stationary) | unchanged | dilated by `2^ℓ`, scaled by `1/√2` |
//! | 2 | decimated | `⌈n/2⌉` per level | prototypes |
//!
//! ## Band Order
//!
//! A split yields `2^D` bands ordered by [`Orientation`] mask, axis 0 most
//! significant (`LL, LH, HL, HH` in 2-D). A pyramid lists the final low-pass
//! band, then the details from the coarsest level to the finest.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wavebank_filter::WaveletFamily;
//! use wavebank_wavelet::{PyramidTransform, TransformConfig};
//!
//! let config = TransformConfig::new(WaveletFamily::Db8).with_levels(3).with_subsample_factor(2);
//! let pyramid = PyramidTransform::new(config)?;
//! let bands = pyramid.forward(&image)?;
//! for band in &bands {
//!     println!("level {} {} energy {}", band.level(), band.orientation().label(2), band.energy());
//! }
//! let rebuilt = pyramid.inverse(&bands)?;
//! ```

mod band;
mod bank;
mod cache;
mod config;
mod cost;
mod error;
mod packet;
mod pyramid;
mod tree;

pub use band::{MAX_DIMENSIONS, Orientation, SubBand, extent_at_depth};
pub use bank::SeparableFilterBank;
pub use config::TransformConfig;
pub use cost::{Cost, EnergyThreshold, FullyDecomposed};
pub use error::WaveletError;
pub use packet::PacketTransform;
pub use pyramid::PyramidTransform;
pub use tree::DecompositionTree;
