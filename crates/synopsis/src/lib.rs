//! # wavebank-synopsis
//!
//! Lays the sub-bands of a decimated pyramid out as one mosaic image, the
//! "synopsis", and splits such a mosaic back into sub-bands.
//!
//! For `levels = 2`, ratio 2 and a 2-D image of extent `[8, 8]` the
//! rectangles are:
//!
//! ```text
//! +----+----+---------+
//! | 0  | 1  |         |
//! +----+----+    4    |
//! | 2  | 3  |         |
//! +----+----+---------+
//! |         |         |
//! |    5    |    6    |
//! |         |         |
//! +---------+---------+
//! ```
//!
//! Index 0 is the coarsest low-pass band; the detail bands follow in
//! pyramid order, coarsest level first. Rows are axis 0.
//!
//! | Index | Pyramid level | Orientation | Origin | Extent |
//! |-------|---------------|-------------|--------|--------|
//! | 0 | 1 | `LL` | `[0, 0]` | `[2, 2]` |
//! | 1 | 1 | `LH` | `[0, 2]` | `[2, 2]` |
//! | 2 | 1 | `HL` | `[2, 0]` | `[2, 2]` |
//! | 3 | 1 | `HH` | `[2, 2]` | `[2, 2]` |
//! | 4 | 0 | `LH` | `[0, 4]` | `[4, 4]` |
//! | 5 | 0 | `HL` | `[4, 0]` | `[4, 4]` |
//! | 6 | 0 | `HH` | `[4, 4]` | `[4, 4]` |

mod error;
mod layout;

pub use error::SynopsisError;
pub use layout::SynopsisLayout;
