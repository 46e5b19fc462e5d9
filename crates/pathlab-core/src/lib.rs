//! **pathlab-core**: grid model for the pathlab stepwise pathfinding
//! visualizer.
//!
//! This crate provides the types every other pathlab crate builds on:
//! grid coordinates, cells with their placement and visualization flags, and
//! the [`GridModel`] that enforces the wall/start/goal placement rules.
//!
//! The grid is passed explicitly (`&GridModel` / `&mut GridModel`) to the
//! search algorithms and to the maze generator. While a search runs, the grid
//! is *busy* and refuses structural edits; see [`GridModel::begin_search`].

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::Cell;
pub use error::EditError;
pub use geom::Pos;
pub use grid::GridModel;
