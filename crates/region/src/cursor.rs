//! Strided walk over the indices of a region.

use crate::error::RegionError;
use crate::region::Region;

/// Position within the strided indices of a region.
///
/// Visits `origin + k·stride` for `k` in `0..counts[axis]` on every axis,
/// in row-major order with the last axis fastest. The end position is one
/// virtual step past the last visitable index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StridedCursor {
    origin: Vec<usize>,
    strides: Vec<usize>,
    counts: Vec<usize>,
    steps: Vec<usize>,
    index: Vec<usize>,
    offset: usize,
    len: usize,
}

impl StridedCursor {
    /// Creates a cursor over `region` of a buffer of `shape`, positioned at
    /// the beginning.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`RegionError::DimensionMismatch`] | strides, shape and region disagree on axes |
    /// | [`RegionError::InvalidStride`] | a stride is zero |
    /// | [`RegionError::OutOfBounds`] | the region does not lie inside the buffer |
    pub fn new(region: &Region, strides: &[usize], shape: &[usize]) -> Result<Self, RegionError> {
        for len in [strides.len(), shape.len()] {
            if len != region.ndim() {
                return Err(RegionError::DimensionMismatch {
                    expected: region.ndim(),
                    actual: len,
                });
            }
        }
        if let Some(axis) = strides.iter().position(|&s| s == 0) {
            return Err(RegionError::InvalidStride { axis, stride: 0 });
        }
        if !region.is_inside(shape) {
            return Err(RegionError::OutOfBounds {
                origin: region.origin().to_vec(),
                extent: region.extent().to_vec(),
                shape: shape.to_vec(),
            });
        }

        let origin: Vec<usize> = region.origin().iter().map(|&o| o as usize).collect();
        let counts: Vec<usize> = region
            .extent()
            .iter()
            .zip(strides)
            .map(|(&e, &s)| if e == 0 { 0 } else { (e - 1) / s + 1 })
            .collect();
        let len = counts.iter().product();
        Ok(Self {
            index: origin.clone(),
            steps: vec![0; origin.len()],
            origin,
            strides: strides.to_vec(),
            counts,
            offset: 0,
            len,
        })
    }

    /// Returns the number of visitable indices.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no index is visitable.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of visitable indices per axis.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Returns the linear position among visitable indices.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the current buffer index. Meaningless at the end position.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Returns `true` at offset 0. An empty cursor is at begin and end at once.
    pub fn is_at_begin(&self) -> bool {
        self.offset == 0
    }

    /// Returns `true` one past the last visitable index.
    pub fn is_at_end(&self) -> bool {
        self.offset == self.len
    }

    /// Rewinds to the region origin.
    pub fn go_to_begin(&mut self) {
        self.offset = 0;
        self.sync();
    }

    /// Jumps to the end position. [`retreat`](Self::retreat) from here lands
    /// on the last visitable index.
    pub fn go_to_end(&mut self) {
        self.offset = self.len;
    }

    /// Moves to `offset`, where `len()` is the end position.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::OffsetOutOfRange`] if `offset > len()`.
    pub fn set_offset(&mut self, offset: usize) -> Result<(), RegionError> {
        if offset > self.len {
            return Err(RegionError::OffsetOutOfRange {
                offset,
                len: self.len,
            });
        }
        self.offset = offset;
        self.sync();
        Ok(())
    }

    /// Steps forward. Returns `false` (and stays put) at the end position.
    pub fn advance(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.offset += 1;
        if self.is_at_end() {
            return true;
        }
        for axis in (0..self.counts.len()).rev() {
            self.steps[axis] += 1;
            if self.steps[axis] < self.counts[axis] {
                self.index[axis] += self.strides[axis];
                return true;
            }
            self.steps[axis] = 0;
            self.index[axis] = self.origin[axis];
        }
        true
    }

    /// Steps backward. Returns `false` (and stays put) at the beginning.
    pub fn retreat(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        let from_end = self.is_at_end();
        self.offset -= 1;
        if from_end {
            self.sync();
            return true;
        }
        for axis in (0..self.counts.len()).rev() {
            if self.steps[axis] > 0 {
                self.steps[axis] -= 1;
                self.index[axis] -= self.strides[axis];
                return true;
            }
            self.steps[axis] = self.counts[axis] - 1;
            self.index[axis] = self.origin[axis] + self.steps[axis] * self.strides[axis];
        }
        true
    }

    /// Consumes the cursor into an iterator over the remaining indices.
    pub fn indices(self) -> Indices {
        Indices { cursor: self }
    }

    fn sync(&mut self) {
        if self.is_at_end() {
            return;
        }
        let mut rest = self.offset;
        for axis in (0..self.counts.len()).rev() {
            self.steps[axis] = rest % self.counts[axis];
            rest /= self.counts[axis];
            self.index[axis] = self.origin[axis] + self.steps[axis] * self.strides[axis];
        }
    }
}

/// Iterator over the remaining indices of a [`StridedCursor`].
#[derive(Clone, Debug)]
pub struct Indices {
    cursor: StridedCursor,
}

impl Iterator for Indices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_at_end() {
            return None;
        }
        let index = self.cursor.index().to_vec();
        self.cursor.advance();
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.cursor.len() - self.cursor.offset();
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Indices {}
