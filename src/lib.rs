//! Minesweeper board generation.
//!
//! A [`Minefield`][mf] is a square grid of [`Cell`][cell]s. Building one places the requested number of mines at distinct, uniformly random positions and then, for every mine, increments the adjacency count of each cell in the mine's clamped 3x3 [neighborhood][nb]. By default that neighborhood includes the mine's own cell, so counts range from 0 to 9; [`NeighborhoodMode::Moore`][moore] switches to the conventional 8-neighborhood. The only output is a flat textual dump, one string per row.
//!
//! ```
//! use minefield::Minefield;
//!
//! let field = Minefield::new(3, 2)?;
//! assert_eq!(field.render(), ["# # #", "# # #", "# # #"]);
//! # Ok::<(), minefield::Error>(())
//! ```
//!
//! # Feature gates
//! - `std` — enable a dependency on the hosted standard library (**enabled by default**)
//!
//!   Without this feature, the crate only depends on `core` and `alloc`. [`Minefield::new`][new] and [`MinefieldConfig::build`][build] need the thread-local random number generator and are unavailable; [`Minefield::with_rng`][with_rng] still works with any generator you bring.
//!
//! - `generation` — enable random generation (**enabled by default**)
//!
//!   Enables the dependency on `rand`, used for placing mines. Disable to remove said dependency if you only build fields from explicit layouts with [`Minefield::with_mines`][with_mines].
//!
//! - `serialization` — enable support for field serialization (**enabled by default**, disable to speed up compilation)
//!
//!   Enables the dependency on `serde` and its derive macros. Deserialized fields are checked against the same invariants as freshly built ones.
//!
//! - `track_caller` — use `track_caller` attributes
//!
//!   Places the `track_caller` attribute on indexing operators, improving panic messages. Works on stable Rust.
//!
//! # Logging
//! Generation is reported through the `log` facade: `debug` for every generated field, `trace` for every placed mine and `warn` for rejected requests. No logger is installed by this crate.
//!
//! [mf]: struct.Minefield.html "Minefield — a square grid of cells with mines placed on it"
//! [cell]: struct.Cell.html "Cell — a single position on a minefield"
//! [nb]: struct.Neighborhood.html "Neighborhood — the clamped block of positions around an origin"
//! [moore]: enum.NeighborhoodMode.html#variant.Moore "Moore — the 8-neighborhood without the origin"
//! [new]: struct.Minefield.html#method.new "new — creates a field with randomly placed mines"
//! [with_rng]: struct.Minefield.html#method.with_rng "with_rng — creates a field using the supplied generator"
//! [with_mines]: struct.Minefield.html#method.with_mines "with_mines — creates a field from an explicit layout"
//! [build]: struct.MinefieldConfig.html#method.build "build — builds a field according to the settings"

#![warn(clippy::pedantic, clippy::cargo, clippy::nursery)]
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

mod cell;
pub use cell::*;
mod config;
pub use config::*;
mod error;
pub use error::*;
mod field;
pub use field::*;
pub mod iter;
pub use iter::*;
