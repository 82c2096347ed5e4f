//! Maze generation domain: guaranteed connectivity between the three
//! keypoints, then random wall scattering.

mod generator;
mod model;
mod walk;

pub use generator::{DEFAULT_WALL_PROBABILITY, MazeGenerator};
pub use model::Dungeon;

use crate::types::MapError;

pub fn generate_dungeon(seed: u64, dim: (usize, usize)) -> Result<Dungeon, MapError> {
    MazeGenerator::new(seed, dim).generate()
}
