//! Read and read/write iterators over strided regions of `ndarray` views.

use ndarray::{ArrayViewD, ArrayViewMutD};

use crate::cursor::StridedCursor;
use crate::error::RegionError;
use crate::region::Region;

/// Walks every `stride`-th index of a region inside a borrowed buffer.
///
/// The two flavours are [`SubsampledRegionIter`] (read-only) and
/// [`SubsampledRegionIterMut`] (read/write). Both share the positioning API
/// of [`StridedCursor`].
///
/// # Example
///
/// ```ignore
/// use ndarray::ArrayD;
/// use wavebank_region::{Region, SubsampledRegionIter};
///
/// let image = ArrayD::<f64>::zeros(ndarray::IxDyn(&[8, 8]));
/// let mut it = SubsampledRegionIter::new(image.view(), &Region::from_shape(&[8, 8]), &[2, 2])?;
/// while let Some(value) = it.get() {
///     println!("{:?} = {value}", it.index());
///     it.advance();
/// }
/// ```
#[derive(Debug)]
pub struct SubsampledRegionIterator<V> {
    buffer: V,
    cursor: StridedCursor,
}

/// Read-only strided region iterator.
pub type SubsampledRegionIter<'a, A = f64> = SubsampledRegionIterator<ArrayViewD<'a, A>>;

/// Read/write strided region iterator.
pub type SubsampledRegionIterMut<'a, A = f64> = SubsampledRegionIterator<ArrayViewMutD<'a, A>>;

impl<V> SubsampledRegionIterator<V> {
    /// Returns the underlying cursor.
    pub fn cursor(&self) -> &StridedCursor {
        &self.cursor
    }

    /// Returns the number of visitable indices.
    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    /// Returns `true` if no index is visitable.
    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    /// Returns the current buffer index.
    pub fn index(&self) -> &[usize] {
        self.cursor.index()
    }

    /// Returns the linear position among visitable indices.
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// Moves to `offset`. See [`StridedCursor::set_offset`].
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::OffsetOutOfRange`] if `offset > len()`.
    pub fn set_offset(&mut self, offset: usize) -> Result<(), RegionError> {
        self.cursor.set_offset(offset)
    }

    /// Returns `true` at the first visitable index.
    pub fn is_at_begin(&self) -> bool {
        self.cursor.is_at_begin()
    }

    /// Returns `true` past the last visitable index.
    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Rewinds to the region origin.
    pub fn go_to_begin(&mut self) {
        self.cursor.go_to_begin();
    }

    /// Jumps to the end position.
    pub fn go_to_end(&mut self) {
        self.cursor.go_to_end();
    }

    /// Steps forward. Returns `false` at the end position.
    pub fn advance(&mut self) -> bool {
        self.cursor.advance()
    }

    /// Steps backward. Returns `false` at the first index.
    pub fn retreat(&mut self) -> bool {
        self.cursor.retreat()
    }
}

impl<'a, A: Copy> SubsampledRegionIterator<ArrayViewD<'a, A>> {
    /// Creates a read-only iterator positioned at the beginning.
    ///
    /// # Errors
    ///
    /// See [`StridedCursor::new`].
    pub fn new(buffer: ArrayViewD<'a, A>, region: &Region, strides: &[usize]) -> Result<Self, RegionError> {
        let cursor = StridedCursor::new(region, strides, buffer.shape())?;
        Ok(Self { buffer, cursor })
    }

    /// Returns the value at the current index, `None` at the end.
    pub fn get(&self) -> Option<A> {
        (!self.cursor.is_at_end()).then(|| self.buffer[self.cursor.index()])
    }
}

impl<'a, A: Copy> SubsampledRegionIterator<ArrayViewMutD<'a, A>> {
    /// Creates a read/write iterator positioned at the beginning.
    ///
    /// # Errors
    ///
    /// See [`StridedCursor::new`].
    pub fn new(buffer: ArrayViewMutD<'a, A>, region: &Region, strides: &[usize]) -> Result<Self, RegionError> {
        let cursor = StridedCursor::new(region, strides, buffer.shape())?;
        Ok(Self { buffer, cursor })
    }

    /// Returns the value at the current index, `None` at the end.
    pub fn get(&self) -> Option<A> {
        (!self.cursor.is_at_end()).then(|| self.buffer[self.cursor.index()])
    }

    /// Writes `value` at the current index. Returns `false` at the end.
    pub fn set(&mut self, value: A) -> bool {
        if self.cursor.is_at_end() {
            return false;
        }
        self.buffer[self.cursor.index()] = value;
        true
    }
}
