//! Maze generation for pathlab grids.
//!
//! Provides a randomized Prim's generator ([`PrimMaze`]) that carves a
//! perfect maze into a [`GridModel`](pathlab_core::GridModel) on a two-step
//! lattice and places the start and goal on opposite corners.

pub mod prim;

pub use prim::{MazeStats, PrimMaze};
