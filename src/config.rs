//! Settings for building a minefield.

#[cfg(feature = "serialization")]
use serde::{Serialize, Deserialize};
use crate::NeighborhoodMode;
#[cfg(all(feature = "generation", feature = "std"))]
use crate::{Minefield, Result};

/// Everything needed to build a [`Minefield`][mf], in a form a host can keep in its own settings file.
///
/// Missing entries fall back to the defaults when deserializing: a 10x10 field with 12 mines, the self-inclusive neighborhood and no fixed seed.
///
/// # Usage
/// ```
/// # use minefield::MinefieldConfig;
/// let config = MinefieldConfig { size: 4, mines: 3, seed: Some(9), ..MinefieldConfig::default() };
/// assert_eq!(config.build()?, config.build()?);
/// # Ok::<(), minefield::Error>(())
/// ```
///
/// [mf]: struct.Minefield.html "Minefield — a square grid of cells with mines placed on it"
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize), serde(default))]
pub struct MinefieldConfig {
    /// The side length of the field.
    pub size: usize,
    /// The number of mines to place.
    pub mines: usize,
    /// Which positions a mine increments.
    pub neighborhood: NeighborhoodMode,
    /// A fixed seed for reproducible layouts. `None` draws from the thread-local secure generator.
    pub seed: Option<u64>,
}
impl Default for MinefieldConfig {
    fn default() -> Self {
        Self {
            size: 10,
            mines: 12,
            neighborhood: NeighborhoodMode::default(),
            seed: None,
        }
    }
}
impl MinefieldConfig {
    /// Builds a field with randomly placed mines according to the settings.
    ///
    /// # Errors
    /// Fails with [`InvalidPlacementRequest`][ipr] if `size` is zero or `mines` exceeds `size²`.
    ///
    /// [ipr]: enum.Error.html#variant.InvalidPlacementRequest "InvalidPlacementRequest — the placement request cannot be satisfied"
    #[cfg(all(feature = "generation", feature = "std"))]
    pub fn build(&self) -> Result<Minefield> {
        use rand::{rngs::StdRng, SeedableRng};
        match self.seed {
            Some(seed) => {
                log::debug!("Building a minefield from seed {}", seed);
                Minefield::with_rng(self.size, self.mines, self.neighborhood, &mut StdRng::seed_from_u64(seed))
            }
            None => Minefield::with_rng(self.size, self.mines, self.neighborhood, &mut rand::thread_rng()),
        }
    }
}
