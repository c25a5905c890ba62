//! # wavebank-filter
//!
//! Wavelet coefficient tables and the derivation of forward and inverse
//! filter operators for separable filter banks.
//!
//! ## Supported Families
//!
//! | Family | Taps | Kind |
//! |--------|------|------|
//! | [`WaveletFamily::Haar`] | 2 | orthogonal |
//! | [`WaveletFamily::Db4`] | 4 | orthogonal |
//! | [`WaveletFamily::Db6`] | 6 | orthogonal |
//! | [`WaveletFamily::Db8`] | 8 | orthogonal |
//! | [`WaveletFamily::Db12`] | 12 | orthogonal |
//! | [`WaveletFamily::Db20`] | 20 | orthogonal |
//! | [`WaveletFamily::Symlet8`] | 8 | orthogonal |
//! | [`WaveletFamily::SplineBiorthogonal24`] | 9 / 3 | biorthogonal |
//! | [`WaveletFamily::SplineBiorthogonal44`] | 9 / 7 | biorthogonal |
//!
//! ## Quick Start
//!
//! ```ignore
//! use wavebank_filter::{Direction, FilterOperatorBuilder, Pass, WaveletFamily};
//!
//! let family = WaveletFamily::from_name("db8")?;
//! let set = FilterOperatorBuilder::new(family).upsample(2).build()?;
//! for (offset, weight) in set.operator(Direction::Forward, Pass::Low).taps() {
//!     println!("{offset}: {weight}");
//! }
//! ```

mod coefficients;
mod error;
mod family;
mod operator;
mod table;

pub use coefficients::CoefficientVector;
pub use error::FilterError;
pub use family::WaveletFamily;
pub use operator::{Direction, FilterOperator, FilterOperatorBuilder, FilterSet, Pass};
pub use table::{AnalysisPair, CoefficientTable};
