//! The error type returned when a placement request cannot be satisfied.

use core::fmt::{self, Display, Formatter};
use crate::FieldCoordinates;

/// The error produced when constructing or re-initializing a [`Minefield`][mf].
///
/// There is exactly one kind of failure: the requested layout cannot be realised with distinct in-bounds positions. The [`PlacementIssue`][pi] payload says why.
///
/// [mf]: struct.Minefield.html "Minefield — a square grid of cells with mines placed on it"
/// [pi]: enum.PlacementIssue.html "PlacementIssue — the reason a placement request was rejected"
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The placement request cannot be satisfied. Nothing was placed.
    InvalidPlacementRequest(PlacementIssue),
}

/// The reason a placement request was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementIssue {
    /// The side length of the field is zero.
    ZeroSize,
    /// The area of the field does not fit into a `usize`.
    AreaOverflow {
        /// The requested side length.
        size: usize,
    },
    /// More mines were requested than there are cells on the field.
    TooManyMines {
        /// The requested number of mines.
        mines: usize,
        /// The number of cells on the field.
        capacity: usize,
    },
    /// An explicitly listed mine lies outside the field.
    OutOfBounds {
        /// The offending coordinates.
        location: FieldCoordinates,
    },
    /// The same position was listed twice in an explicit layout.
    DuplicateMine {
        /// The repeated coordinates.
        location: FieldCoordinates,
    },
}

/// Shorthand for results produced by this crate.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Returns the reason for the failure.
    #[inline]
    pub const fn issue(&self) -> PlacementIssue {
        match *self {
            Self::InvalidPlacementRequest(issue) => issue,
        }
    }
}

impl From<PlacementIssue> for Error {
    #[inline(always)]
    fn from(issue: PlacementIssue) -> Self {
        Self::InvalidPlacementRequest(issue)
    }
}

impl Display for PlacementIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "the field size must be at least 1"),
            Self::AreaOverflow { size } => write!(f, "a {size}x{size} field is too large to address", size = size),
            Self::TooManyMines { mines, capacity } => write!(
                f,
                "cannot place {} distinct mines on a field of {} cells",
                mines, capacity
            ),
            Self::OutOfBounds { location } => write!(
                f,
                "mine at [{}, {}] lies outside the field",
                location[0], location[1]
            ),
            Self::DuplicateMine { location } => write!(
                f,
                "mine at [{}, {}] is listed more than once",
                location[0], location[1]
            ),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlacementRequest(issue) => write!(f, "invalid placement request: {}", issue),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
