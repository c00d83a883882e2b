use core::fmt::{self, Display, Formatter};
#[cfg(feature = "serialization")]
use serde::{Serialize, Deserialize};

/// A single position on a minefield.
///
/// Cells are plain data. Only the owning [`Minefield`][mf] writes to them, while placing mines, so the adjacency count always agrees with the layout it was computed from.
///
/// [mf]: struct.Minefield.html "Minefield — a square grid of cells with mines placed on it"
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Cell {
    mine: bool,
    adjacent_mines: u8,
    revealed: bool,
}
impl Cell {
    /// Returns `true` if a mine occupies this cell.
    #[inline(always)]
    pub const fn has_mine(&self) -> bool {
        self.mine
    }
    /// Returns how many placed mines had this cell in their neighborhood.
    ///
    /// With the default [self-inclusive neighborhood][si] a mine counts itself, so the value ranges from 0 to 9. The count of a mined cell is computed but carries no meaning and is never rendered.
    ///
    /// [si]: enum.NeighborhoodMode.html#variant.SelfInclusive "SelfInclusive — the 3x3 block including the origin"
    #[inline(always)]
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }
    /// Returns `true` if the cell has been revealed. Nothing in this crate reveals cells, so this is always `false` on fields it builds.
    #[inline(always)]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[inline]
    pub(crate) fn place_mine(&mut self) {
        self.mine = true;
    }
    #[inline]
    pub(crate) fn add_adjacent_mine(&mut self) {
        self.adjacent_mines += 1;
    }
}
impl Display for Cell {
    /// Writes the token this cell renders as: `#` while unrevealed, `*` for a revealed mine, the adjacency count otherwise.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.revealed {
            f.write_str("#")
        } else if self.mine {
            f.write_str("*")
        } else {
            write!(f, "{}", self.adjacent_mines)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn default_cell_is_empty_and_hidden() {
        let cell = Cell::default();
        assert!(!cell.has_mine());
        assert_eq!(cell.adjacent_mines(), 0);
        assert!(!cell.is_revealed());
        assert_eq!(cell.to_string(), "#");
    }

    #[test]
    fn revealed_cells_show_their_content() {
        let mut number = Cell { revealed: true, ..Cell::default() };
        number.add_adjacent_mine();
        number.add_adjacent_mine();
        assert_eq!(number.to_string(), "2");

        let mut mine = Cell { revealed: true, ..Cell::default() };
        mine.place_mine();
        mine.add_adjacent_mine();
        assert_eq!(mine.to_string(), "*");
    }

    #[test]
    fn hidden_mine_renders_as_hash() {
        let mut cell = Cell::default();
        cell.place_mine();
        assert_eq!(cell.to_string(), "#");
    }
}
