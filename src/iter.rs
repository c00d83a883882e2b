//! Iterators useful for traversing a minefield.
//!
//! Currently available:
//! - [`Neighborhood`][nb] — the clamped 3x3 block around a position, which is what mine placement increments
//! - [`Rows`][rows] — iterates over the rows of a field, each item being a slice of cells
//!
//! [nb]: struct.Neighborhood.html "Neighborhood — the clamped block of positions around an origin"
//! [rows]: struct.Rows.html "Rows — an iterator over the rows of a field"

use core::{
    iter::FusedIterator,
    num::NonZeroUsize,
    ops::Range,
    slice::Chunks,
};
#[cfg(feature = "serialization")]
use serde::{Serialize, Deserialize};
use crate::{Cell, FieldCoordinates};

/// Which positions count as the neighborhood of a mine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum NeighborhoodMode {
    /// The full clamped 3x3 block, **including** the origin. A mine increments its own count as well as those of its up to 8 neighbors.
    ///
    /// This is the default, and it makes a mined cell's count one higher than the number of mines around it. Since mined cells never display their count, the difference is invisible on the rendered field.
    SelfInclusive,
    /// The conventional 8-neighborhood: the clamped 3x3 block without the origin.
    Moore,
}
impl Default for NeighborhoodMode {
    #[inline(always)]
    /// Returns the `SelfInclusive` variant.
    fn default() -> Self {
        Self::SelfInclusive
    }
}

/// The clamped neighborhood of a position on a square field.
///
/// Covers the inclusive rectangle `[x - 1, x + 1] × [y - 1, y + 1]`, cut off at the edges of the field (there is no wraparound). Positions are produced row by row, top to bottom, left to right. Whether the origin itself is produced depends on the [`NeighborhoodMode`][mode].
///
/// # Usage
/// ```
/// # use minefield::{Minefield, NeighborhoodMode};
/// let field = Minefield::with_mines(3, NeighborhoodMode::SelfInclusive, &[]).unwrap();
/// let corner: Vec<_> = field.neighborhood([0, 0]).unwrap().collect();
/// assert_eq!(corner, [[0, 0], [1, 0], [0, 1], [1, 1]]);
/// ```
///
/// [mode]: enum.NeighborhoodMode.html "NeighborhoodMode — which positions count as the neighborhood of a mine"
#[derive(Clone, Debug)]
pub struct Neighborhood {
    origin: FieldCoordinates,
    columns: Range<usize>,
    rows: Range<usize>,
    next: Option<FieldCoordinates>,
    skip_origin: bool,
}
impl Neighborhood {
    /// Creates the neighborhood of `origin` on a field with the given side length, or `None` if `origin` lies outside the field.
    pub fn new(size: NonZeroUsize, origin: FieldCoordinates, mode: NeighborhoodMode) -> Option<Self> {
        let size = size.get();
        let [x, y] = origin;
        if x >= size || y >= size {
            return None;
        }
        let columns = x.saturating_sub(1)..x.saturating_add(2).min(size);
        let rows = y.saturating_sub(1)..y.saturating_add(2).min(size);
        Some(Self {
            origin,
            next: Some([columns.start, rows.start]),
            columns,
            rows,
            skip_origin: mode == NeighborhoodMode::Moore,
        })
    }
    /// Returns the position the neighborhood was built around.
    #[inline(always)]
    pub const fn origin(&self) -> FieldCoordinates {
        self.origin
    }

    fn advance(&mut self, [x, y]: FieldCoordinates) {
        self.next = if x + 1 < self.columns.end {
            Some([x + 1, y])
        } else if y + 1 < self.rows.end {
            Some([self.columns.start, y + 1])
        } else {
            None
        };
    }
}
impl Iterator for Neighborhood {
    type Item = FieldCoordinates;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.next?;
            self.advance(current);
            if self.skip_origin && current == self.origin {
                continue;
            }
            return Some(current);
        }
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}
impl ExactSizeIterator for Neighborhood {
    fn len(&self) -> usize {
        let [x, y] = match self.next {
            Some(next) => next,
            None => return 0,
        };
        let width = self.columns.end - self.columns.start;
        let remaining = (self.columns.end - x) + (self.rows.end - y - 1) * width;
        // The origin is still ahead if it comes at or after the cursor in row-major order.
        let origin_ahead = (self.origin[1], self.origin[0]) >= (y, x);
        if self.skip_origin && origin_ahead {
            remaining - 1
        } else {
            remaining
        }
    }
}
impl FusedIterator for Neighborhood {}

/// An iterator over the rows of a field, top to bottom. Each row is a slice of cells ordered left to right.
#[derive(Clone, Debug)]
pub struct Rows<'f> {
    chunks: Chunks<'f, Cell>,
}
impl<'f> Rows<'f> {
    #[inline(always)]
    pub(crate) fn new(cells: &'f [Cell], size: NonZeroUsize) -> Self {
        Self { chunks: cells.chunks(size.get()) }
    }
}
impl<'f> Iterator for Rows<'f> {
    type Item = &'f [Cell];
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}
impl DoubleEndedIterator for Rows<'_> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.chunks.next_back()
    }
}
impl ExactSizeIterator for Rows<'_> {}
impl FusedIterator for Rows<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn interior_neighborhood_includes_origin_by_default() {
        let hood: Vec<_> = Neighborhood::new(size(3), [1, 1], NeighborhoodMode::default()).unwrap().collect();
        assert_eq!(hood.len(), 9);
        assert!(hood.contains(&[1, 1]));
    }

    #[test]
    fn moore_neighborhood_skips_origin() {
        let hood: Vec<_> = Neighborhood::new(size(3), [1, 1], NeighborhoodMode::Moore).unwrap().collect();
        assert_eq!(hood, [[0, 0], [1, 0], [2, 0], [0, 1], [2, 1], [0, 2], [1, 2], [2, 2]]);
    }

    #[test]
    fn corners_and_edges_are_clamped() {
        let corner: Vec<_> = Neighborhood::new(size(5), [4, 4], NeighborhoodMode::SelfInclusive).unwrap().collect();
        assert_eq!(corner, [[3, 3], [4, 3], [3, 4], [4, 4]]);

        let edge = Neighborhood::new(size(5), [2, 0], NeighborhoodMode::Moore).unwrap();
        assert_eq!(edge.count(), 5);
    }

    #[test]
    fn single_cell_field() {
        let own: Vec<_> = Neighborhood::new(size(1), [0, 0], NeighborhoodMode::SelfInclusive).unwrap().collect();
        assert_eq!(own, [[0, 0]]);
        assert_eq!(Neighborhood::new(size(1), [0, 0], NeighborhoodMode::Moore).unwrap().count(), 0);
    }

    #[test]
    fn out_of_bounds_origin_has_no_neighborhood() {
        assert!(Neighborhood::new(size(3), [3, 0], NeighborhoodMode::default()).is_none());
        assert!(Neighborhood::new(size(3), [0, 7], NeighborhoodMode::default()).is_none());
    }

    #[test]
    fn len_tracks_remaining_positions() {
        for &mode in &[NeighborhoodMode::SelfInclusive, NeighborhoodMode::Moore] {
            for &origin in &[[0, 0], [1, 1], [2, 1], [3, 3]] {
                let mut hood = Neighborhood::new(size(4), origin, mode).unwrap();
                let mut expected = hood.clone().count();
                assert_eq!(hood.len(), expected);
                while hood.next().is_some() {
                    expected -= 1;
                    assert_eq!(hood.len(), expected);
                }
            }
        }
    }
}
