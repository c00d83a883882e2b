//! The minefield itself.
//!
//! This is the main point of interest of the crate: the grid is built, mines are placed and adjacency counts are computed here, all in one step, so a `Minefield` is never observable in a partially populated state.

use core::{
    fmt::{self, Display, Formatter},
    num::NonZeroUsize,
    ops::Index,
};
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "serialization")]
use serde::{
    Serialize, Deserialize,
    ser::{Serializer, SerializeStruct},
    de::{self, Deserializer, Visitor, MapAccess, SeqAccess},
};
#[cfg(feature = "generation")]
use rand::Rng;
use crate::{
    Cell,
    PlacementIssue, Result,
    Neighborhood, NeighborhoodMode, Rows,
};

/// The coordinates of a cell on a field.
///
/// The first element is the column index (X coordinate), the second one is the row index (Y coordinate). Both start from zero, i.e. `[0, 0]` is the top left corner.
pub type FieldCoordinates = [usize; 2];

/// A square grid of cells with mines placed on it.
///
/// The field owns its cells in a single row-major buffer. Mine placement and adjacency counting happen during construction: every placed mine increments the count of each cell in its [clamped neighborhood][nb], which by default includes the mine's own cell.
///
/// # Usage
/// ```
/// # use minefield::Minefield;
/// let field = Minefield::new(10, 12)?;
/// assert_eq!(field.mine_locations().count(), 12);
/// for row in field.render() {
///     println!("{}", row);
/// }
/// # Ok::<(), minefield::Error>(())
/// ```
///
/// [nb]: struct.Neighborhood.html "Neighborhood — the clamped block of positions around an origin"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minefield {
    size: NonZeroUsize,
    mines: usize,
    neighborhood: NeighborhoodMode,
    cells: Vec<Cell>,
}

/// Checks the side length and the requested mine count, returning the side length and the area of the field.
fn validate_request(size: usize, mines: usize) -> Result<(NonZeroUsize, usize)> {
    let size = NonZeroUsize::new(size).ok_or(PlacementIssue::ZeroSize)?;
    let capacity = size.get()
        .checked_mul(size.get())
        .ok_or(PlacementIssue::AreaOverflow { size: size.get() })?;
    if mines > capacity {
        return Err(PlacementIssue::TooManyMines { mines, capacity }.into());
    }
    Ok((size, capacity))
}

/// Logs a rejected placement request on its way out.
fn rejected<T>(result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        log::warn!("Rejected minefield request: {}", err);
    }
    result
}

impl Minefield {
    /// Creates a `size`×`size` field with `mines` mines placed at distinct random positions, using the thread-local cryptographically secure generator.
    ///
    /// The neighborhood mode is the default [`SelfInclusive`][si].
    ///
    /// # Errors
    /// Fails with [`InvalidPlacementRequest`][ipr] if `size` is zero or `mines` exceeds `size²`.
    ///
    /// [si]: enum.NeighborhoodMode.html#variant.SelfInclusive "SelfInclusive — the 3x3 block including the origin"
    /// [ipr]: enum.Error.html#variant.InvalidPlacementRequest "InvalidPlacementRequest — the placement request cannot be satisfied"
    #[cfg(all(feature = "generation", feature = "std"))]
    pub fn new(size: usize, mines: usize) -> Result<Self> {
        Self::with_rng(size, mines, NeighborhoodMode::default(), &mut rand::thread_rng())
    }
    /// Creates a `size`×`size` field with `mines` mines, drawing positions from the supplied random number generator.
    ///
    /// Passing a seeded generator makes the layout reproducible.
    ///
    /// # Errors
    /// Same as [`new`][m_new].
    ///
    /// [m_new]: #method.new "new — creates a field with randomly placed mines"
    #[cfg(feature = "generation")]
    pub fn with_rng<R: Rng + ?Sized>(
        size: usize,
        mines: usize,
        neighborhood: NeighborhoodMode,
        rng: &mut R,
    ) -> Result<Self> {
        let (size, area) = rejected(validate_request(size, mines))?;
        let mut field = Self::empty(size, area, neighborhood);
        field.populate(mines, rng);
        Ok(field)
    }
    /// Creates a `size`×`size` field with mines at exactly the listed positions.
    ///
    /// # Errors
    /// Fails with [`InvalidPlacementRequest`][ipr] if `size` is zero, a position lies outside the field or a position is listed twice. Nothing is returned in that case, not even a partially populated field.
    ///
    /// [ipr]: enum.Error.html#variant.InvalidPlacementRequest "InvalidPlacementRequest — the placement request cannot be satisfied"
    pub fn with_mines(size: usize, neighborhood: NeighborhoodMode, locations: &[FieldCoordinates]) -> Result<Self> {
        let (size, area) = rejected(validate_request(size, locations.len()))?;
        let side = size.get();
        let mut indices = Vec::with_capacity(locations.len());
        let mut seen = alloc::vec![false; area];
        for &location in locations {
            let [x, y] = location;
            if x >= side || y >= side {
                return rejected(Err(PlacementIssue::OutOfBounds { location }.into()));
            }
            let index = x + y * side;
            if seen[index] {
                return rejected(Err(PlacementIssue::DuplicateMine { location }.into()));
            }
            seen[index] = true;
            indices.push(index);
        }
        let mut field = Self::empty(size, area, neighborhood);
        field.place_mines(indices);
        Ok(field)
    }

    /// Discards the current layout and places `mines` mines at fresh random positions, using the thread-local generator. The size and neighborhood mode are kept.
    ///
    /// # Errors
    /// Fails with [`InvalidPlacementRequest`][ipr] if `mines` exceeds the area of the field. The current layout is left untouched in that case.
    ///
    /// [ipr]: enum.Error.html#variant.InvalidPlacementRequest "InvalidPlacementRequest — the placement request cannot be satisfied"
    #[cfg(all(feature = "generation", feature = "std"))]
    pub fn init(&mut self, mines: usize) -> Result<()> {
        self.init_with_rng(mines, &mut rand::thread_rng())
    }
    /// Same as [`init`][m_init], drawing positions from the supplied random number generator.
    ///
    /// # Errors
    /// Same as [`init`][m_init].
    ///
    /// [m_init]: #method.init "init — re-initializes the field with a fresh random layout"
    #[cfg(feature = "generation")]
    pub fn init_with_rng<R: Rng + ?Sized>(&mut self, mines: usize, rng: &mut R) -> Result<()> {
        let (size, area) = rejected(validate_request(self.size.get(), mines))?;
        *self = Self::empty(size, area, self.neighborhood);
        self.populate(mines, rng);
        Ok(())
    }

    fn empty(size: NonZeroUsize, area: usize, neighborhood: NeighborhoodMode) -> Self {
        Self {
            size,
            mines: 0,
            neighborhood,
            cells: alloc::vec![Cell::default(); area],
        }
    }
    /// Samples `mines` distinct cell indices uniformly and places mines there. The request must already have been validated against the area.
    #[cfg(feature = "generation")]
    fn populate<R: Rng + ?Sized>(&mut self, mines: usize, rng: &mut R) {
        let area = self.cells.len();
        let indices = rand::seq::index::sample(rng, area, mines);
        self.place_mines(indices.into_iter());
        log::debug!(
            "Generated a {side}x{side} minefield with {} mines ({:?} neighborhood)",
            self.mines,
            self.neighborhood,
            side = self.size,
        );
    }
    /// Marks each index as a mine and increments the count of every cell in its neighborhood, the mine's own cell included when the mode says so.
    fn place_mines<I: IntoIterator<Item = usize>>(&mut self, indices: I) {
        let side = self.size.get();
        for index in indices {
            let location = [index % side, index / side];
            log::trace!("Placing a mine at [{}, {}]", location[0], location[1]);
            self.cells[index].place_mine();
            self.mines += 1;
            if let Some(neighborhood) = Neighborhood::new(self.size, location, self.neighborhood) {
                for [x, y] in neighborhood {
                    self.cells[x + y * side].add_adjacent_mine();
                }
            }
        }
    }

    /// Returns the side length of the field.
    #[inline(always)]
    pub const fn size(&self) -> NonZeroUsize {
        self.size
    }
    /// Returns the number of cells on the field.
    #[inline(always)]
    pub fn area(&self) -> usize {
        self.cells.len()
    }
    /// Returns the number of mines on the field.
    #[inline(always)]
    pub const fn mine_count(&self) -> usize {
        self.mines
    }
    /// Returns the neighborhood mode the adjacency counts were computed with.
    #[inline(always)]
    pub const fn neighborhood_mode(&self) -> NeighborhoodMode {
        self.neighborhood
    }
    /// Returns the cell at column `coordinates[0]` and row `coordinates[1]`, or `None` if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, coordinates: FieldCoordinates) -> Option<&Cell> {
        let side = self.size.get();
        let [x, y] = coordinates;
        if x >= side || y >= side {
            return None;
        }
        self.cells.get(x + y * side)
    }
    /// Returns all cells in row-major order.
    #[inline(always)]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    /// Returns an iterator over the rows of the field, top to bottom.
    #[inline(always)]
    pub fn rows(&self) -> Rows<'_> {
        Rows::new(&self.cells, self.size)
    }
    /// Returns the coordinates of every mine, in row-major order.
    pub fn mine_locations(&self) -> impl Iterator<Item = FieldCoordinates> + '_ {
        let side = self.size.get();
        self.cells.iter()
            .enumerate()
            .filter(|(_, cell)| cell.has_mine())
            .map(move |(index, _)| [index % side, index / side])
    }
    /// Returns the clamped neighborhood of a position under this field's neighborhood mode, or `None` if the position is out of bounds.
    #[inline]
    pub fn neighborhood(&self, coordinates: FieldCoordinates) -> Option<Neighborhood> {
        Neighborhood::new(self.size, coordinates, self.neighborhood)
    }

    /// Renders the field as text, one string per row.
    ///
    /// Each row holds the cells' tokens separated by single spaces: `#` for an unrevealed cell, `*` for a revealed mine and the adjacency count for any other revealed cell. Cells are never revealed by this crate, so the output is all `#`.
    #[must_use = "rendering allocates one string per row"]
    pub fn render(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                let mut line = String::with_capacity(row.len() * 2);
                for (column, cell) in row.iter().enumerate() {
                    if column > 0 {
                        line.push(' ');
                    }
                    line.push_str(&cell.to_string());
                }
                line
            })
            .collect()
    }
}
impl Index<FieldCoordinates> for Minefield {
    type Output = Cell;
    /// Returns the cell at column `coordinates[0]` and row `coordinates[1]`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds. For a version which returns an `Option` instead, see `get`.
    #[inline(always)]
    #[cfg_attr(feature = "track_caller", track_caller)]
    fn index(&self, coordinates: FieldCoordinates) -> &Self::Output {
        self.get(coordinates).expect("index out of bounds")
    }
}
impl Display for Minefield {
    /// Writes the [rendered][m_render] rows separated by newlines.
    ///
    /// [m_render]: #method.render "render — renders the field as text, one string per row"
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, row) in self.render().iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

/// Rebuilds a field from deserialized parts, checking every invariant a constructed field upholds.
#[cfg(feature = "serialization")]
fn reassemble<E: de::Error>(
    size: NonZeroUsize,
    mines: usize,
    neighborhood: NeighborhoodMode,
    cells: Vec<Cell>,
) -> core::result::Result<Minefield, E> {
    let (size, area) = validate_request(size.get(), mines).map_err(E::custom)?;
    if cells.len() != area {
        return Err(E::invalid_length(cells.len(), &"a cell buffer matching the field area"));
    }
    if cells.iter().any(Cell::is_revealed) {
        return Err(E::custom("revealed cells are not supported"));
    }
    let locations: Vec<FieldCoordinates> = cells.iter()
        .enumerate()
        .filter(|(_, cell)| cell.has_mine())
        .map(|(index, _)| [index % size.get(), index / size.get()])
        .collect();
    if locations.len() != mines {
        return Err(E::custom(format_args!(
            "field declares {} mines but {} cells hold one",
            mines, locations.len()
        )));
    }
    let expected = Minefield::with_mines(size.get(), neighborhood, &locations).map_err(E::custom)?;
    let consistent = expected.cells.iter()
        .zip(&cells)
        .all(|(expected, actual)| expected.adjacent_mines() == actual.adjacent_mines());
    if !consistent {
        return Err(E::custom("adjacency counts do not match the mine layout"));
    }
    Ok(expected)
}

#[cfg(feature = "serialization")]
impl Serialize for Minefield {
    fn serialize<S: Serializer>(&self, s: S) -> core::result::Result<S::Ok, S::Error> {
        let mut s = s.serialize_struct("Minefield", 4)?;
        s.serialize_field("size", &self.size)?;
        s.serialize_field("mines", &self.mines)?;
        s.serialize_field("neighborhood", &self.neighborhood)?;
        s.serialize_field("cells", &self.cells)?;
        s.end()
    }
}
#[cfg(feature = "serialization")]
impl<'de> Deserialize<'de> for Minefield {
    fn deserialize<D: Deserializer<'de>>(d: D) -> core::result::Result<Self, D::Error> {
        const FIELDS: &[&str] = &["size", "mines", "neighborhood", "cells"];
        enum StructField { Size, Mines, Neighborhood, Cells }

        impl<'de> Deserialize<'de> for StructField {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
                struct StructFieldVisitor;

                impl<'de> Visitor<'de> for StructFieldVisitor {
                    type Value = StructField;

                    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                        formatter.write_str("`size`, `mines`, `neighborhood` or `cells`")
                    }

                    fn visit_str<E: de::Error>(self, value: &str) -> core::result::Result<StructField, E> {
                        match value {
                            "size" => Ok(StructField::Size),
                            "mines" => Ok(StructField::Mines),
                            "neighborhood" => Ok(StructField::Neighborhood),
                            "cells" => Ok(StructField::Cells),
                            _ => Err(de::Error::unknown_field(value, FIELDS)),
                        }
                    }
                }

                deserializer.deserialize_identifier(StructFieldVisitor)
            }
        }

        struct MinefieldVisitor;

        impl<'de> Visitor<'de> for MinefieldVisitor {
            type Value = Minefield;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("struct Minefield")
            }

            fn visit_seq<V: SeqAccess<'de>>(self, mut seq: V) -> core::result::Result<Self::Value, V::Error> {
                let size = seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let mines = seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let neighborhood = seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let cells = seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                reassemble(size, mines, neighborhood, cells)
            }

            fn visit_map<V: MapAccess<'de>>(self, mut map: V) -> core::result::Result<Self::Value, V::Error> {
                let mut size: Option<NonZeroUsize> = None;
                let mut mines: Option<usize> = None;
                let mut neighborhood: Option<NeighborhoodMode> = None;
                let mut cells: Option<Vec<Cell>> = None;
                while let Some(key) = map.next_key()? {
                    match key {
                        StructField::Size => {
                            if size.is_some() {
                                return Err(de::Error::duplicate_field("size"));
                            }
                            size = Some(map.next_value()?);
                        }
                        StructField::Mines => {
                            if mines.is_some() {
                                return Err(de::Error::duplicate_field("mines"));
                            }
                            mines = Some(map.next_value()?);
                        }
                        StructField::Neighborhood => {
                            if neighborhood.is_some() {
                                return Err(de::Error::duplicate_field("neighborhood"));
                            }
                            neighborhood = Some(map.next_value()?);
                        }
                        StructField::Cells => {
                            if cells.is_some() {
                                return Err(de::Error::duplicate_field("cells"));
                            }
                            cells = Some(map.next_value()?);
                        }
                    }
                }
                let size = size.ok_or_else(|| de::Error::missing_field("size"))?;
                let mines = mines.ok_or_else(|| de::Error::missing_field("mines"))?;
                let neighborhood = neighborhood.ok_or_else(|| de::Error::missing_field("neighborhood"))?;
                let cells = cells.ok_or_else(|| de::Error::missing_field("cells"))?;
                reassemble(size, mines, neighborhood, cells)
            }
        }
        d.deserialize_struct("Minefield", FIELDS, MinefieldVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn count_of(field: &Minefield, location: FieldCoordinates) -> u8 {
        field[location].adjacent_mines()
    }

    #[test]
    fn center_mine_counts_all_nine_cells() {
        let field = Minefield::with_mines(3, NeighborhoodMode::SelfInclusive, &[[1, 1]]).unwrap();
        assert_eq!(field.mine_count(), 1);
        assert!(field[[1, 1]].has_mine());
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(count_of(&field, [x, y]), 1, "cell [{}, {}]", x, y);
            }
        }
        assert!(field.render().iter().all(|row| row == "# # #"));
    }

    #[test]
    fn corner_mine_is_clamped() {
        let field = Minefield::with_mines(3, NeighborhoodMode::SelfInclusive, &[[0, 0]]).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                let expected = if x <= 1 && y <= 1 { 1 } else { 0 };
                assert_eq!(count_of(&field, [x, y]), expected, "cell [{}, {}]", x, y);
            }
        }
    }

    #[test]
    fn moore_mode_leaves_the_mine_uncounted() {
        let field = Minefield::with_mines(3, NeighborhoodMode::Moore, &[[1, 1]]).unwrap();
        assert_eq!(count_of(&field, [1, 1]), 0);
        assert_eq!(count_of(&field, [0, 0]), 1);
        assert_eq!(count_of(&field, [2, 1]), 1);
    }

    #[test]
    fn overlapping_neighborhoods_accumulate() {
        let field = Minefield::with_mines(3, NeighborhoodMode::SelfInclusive, &[[0, 0], [1, 0]]).unwrap();
        assert_eq!(count_of(&field, [0, 0]), 2);
        assert_eq!(count_of(&field, [1, 1]), 2);
        assert_eq!(count_of(&field, [2, 0]), 1);
        assert_eq!(count_of(&field, [2, 2]), 0);
    }

    #[test]
    fn fully_mined_interior_reaches_nine() {
        let all: Vec<FieldCoordinates> = (0..3).flat_map(|y| (0..3).map(move |x| [x, y])).collect();
        let field = Minefield::with_mines(3, NeighborhoodMode::SelfInclusive, &all).unwrap();
        assert_eq!(count_of(&field, [1, 1]), 9);
        assert_eq!(count_of(&field, [0, 0]), 4);
        assert_eq!(count_of(&field, [1, 0]), 6);
    }

    #[test]
    fn explicit_layouts_are_validated() {
        let out = Minefield::with_mines(3, NeighborhoodMode::default(), &[[3, 1]]).unwrap_err();
        assert_eq!(out.issue(), PlacementIssue::OutOfBounds { location: [3, 1] });

        let dup = Minefield::with_mines(3, NeighborhoodMode::default(), &[[2, 2], [0, 1], [2, 2]]).unwrap_err();
        assert_eq!(dup.issue(), PlacementIssue::DuplicateMine { location: [2, 2] });

        let zero = Minefield::with_mines(0, NeighborhoodMode::default(), &[]).unwrap_err();
        assert_eq!(zero.issue(), PlacementIssue::ZeroSize);
    }

    #[test]
    fn oversized_requests_are_rejected() {
        assert_eq!(
            validate_request(2, 5),
            Err(Error::InvalidPlacementRequest(PlacementIssue::TooManyMines { mines: 5, capacity: 4 }))
        );
        assert_eq!(
            validate_request(usize::MAX, 1),
            Err(Error::InvalidPlacementRequest(PlacementIssue::AreaOverflow { size: usize::MAX }))
        );
        assert!(validate_request(2, 4).is_ok());
    }

    #[test]
    fn get_and_mine_locations() {
        let field = Minefield::with_mines(4, NeighborhoodMode::default(), &[[3, 0], [0, 2]]).unwrap();
        assert!(field.get([4, 0]).is_none());
        assert!(field.get([0, 4]).is_none());
        assert!(field.get([3, 0]).unwrap().has_mine());
        let mines: Vec<_> = field.mine_locations().collect();
        assert_eq!(mines, [[3, 0], [0, 2]]);
        assert_eq!(field.rows().len(), 4);
        assert_eq!(field.area(), 16);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn indexing_out_of_bounds_panics() {
        let field = Minefield::with_mines(2, NeighborhoodMode::default(), &[]).unwrap();
        let _ = field[[2, 0]];
    }

    #[test]
    fn display_joins_rows() {
        let field = Minefield::with_mines(2, NeighborhoodMode::default(), &[[1, 1]]).unwrap();
        assert_eq!(field.to_string(), "# #\n# #");
    }

    #[cfg(feature = "generation")]
    mod generation {
        use super::*;
        use rand::{rngs::StdRng, SeedableRng};

        #[test]
        fn seeded_generation_is_reproducible() {
            let a = Minefield::with_rng(8, 10, NeighborhoodMode::default(), &mut StdRng::seed_from_u64(7)).unwrap();
            let b = Minefield::with_rng(8, 10, NeighborhoodMode::default(), &mut StdRng::seed_from_u64(7)).unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn generated_counts_match_an_explicit_rebuild() {
            let mut rng = StdRng::seed_from_u64(42);
            for &mode in &[NeighborhoodMode::SelfInclusive, NeighborhoodMode::Moore] {
                let field = Minefield::with_rng(9, 20, mode, &mut rng).unwrap();
                let locations: Vec<_> = field.mine_locations().collect();
                let rebuilt = Minefield::with_mines(9, mode, &locations).unwrap();
                assert_eq!(field, rebuilt);
            }
        }

        #[test]
        fn failed_reinit_keeps_the_layout() {
            let mut rng = StdRng::seed_from_u64(3);
            let mut field = Minefield::with_rng(4, 6, NeighborhoodMode::default(), &mut rng).unwrap();
            let before = field.clone();
            let err = field.init_with_rng(17, &mut rng).unwrap_err();
            assert_eq!(err.issue(), PlacementIssue::TooManyMines { mines: 17, capacity: 16 });
            assert_eq!(field, before);
        }

        #[test]
        fn reinit_replaces_the_layout() {
            let mut rng = StdRng::seed_from_u64(11);
            let mut field = Minefield::with_rng(5, 3, NeighborhoodMode::Moore, &mut rng).unwrap();
            field.init_with_rng(9, &mut rng).unwrap();
            assert_eq!(field.mine_count(), 9);
            assert_eq!(field.mine_locations().count(), 9);
            assert_eq!(field.neighborhood_mode(), NeighborhoodMode::Moore);
        }
    }
}
