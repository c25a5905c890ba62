//! # wavebank-region
//!
//! N-dimensional index regions, their mapping through sub-sampling and
//! up-sampling, and strided iterators over regions of `ndarray` buffers.
//!
//! ## Region Mapping
//!
//! | Operation | Index | Size |
//! |-----------|-------|------|
//! | [`Region::downsampled`] | `i / f` | `(n - 1) / f + 1` |
//! | [`Region::upsampled`] | `i · f` | `(n - 1) · f + 1` |
//! | [`Region::padded`] | `i - r` | `n + 2r` |

mod cursor;
mod error;
mod iter;
mod region;

pub use cursor::{Indices, StridedCursor};
pub use error::RegionError;
pub use iter::{SubsampledRegionIter, SubsampledRegionIterMut, SubsampledRegionIterator};
pub use region::Region;
