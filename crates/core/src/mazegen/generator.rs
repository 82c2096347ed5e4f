//! Generation orchestration: keypoint placement, guaranteed paths between
//! them, then independent random closing of the remaining walls.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use super::model::Dungeon;
use super::walk::{carve_path, random_walk};
use crate::grid::GridMap;
use crate::types::{Coord, Dilated, MapError, Marker, WallState};

pub const DEFAULT_WALL_PROBABILITY: f64 = 0.3;

pub struct MazeGenerator {
    seed: u64,
    dim: (usize, usize),
    wall_probability: f64,
    start: Option<Coord>,
    end: Option<Coord>,
    treasure: Option<Coord>,
}

impl MazeGenerator {
    pub fn new(seed: u64, dim: (usize, usize)) -> Self {
        assert!(dim.0 * dim.1 >= 3, "the grid needs room for three distinct keypoints");
        Self {
            seed,
            dim,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            start: None,
            end: None,
            treasure: None,
        }
    }

    /// Probability that a wall off the guaranteed paths ends up closed.
    pub fn wall_probability(mut self, p: f64) -> Self {
        assert!((0.0..=1.0).contains(&p), "wall probability must be within [0, 1]");
        self.wall_probability = p;
        self
    }

    /// Pins the three keypoints instead of sampling them.
    pub fn keypoints(mut self, start: Coord, end: Coord, treasure: Coord) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self.treasure = Some(treasure);
        self
    }

    pub fn generate(self) -> Result<Dungeon, MapError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut map = GridMap::new(self.dim);
        let mut keypoints = Keypoints::default();

        let start = self.start.unwrap_or_else(|| random_free_room(&map, &mut rng));
        keypoints.set(&mut map, Marker::Start, start)?;
        let end = self.end.unwrap_or_else(|| random_free_room(&map, &mut rng));
        keypoints.set(&mut map, Marker::End, end)?;
        let treasure = self.treasure.unwrap_or_else(|| random_free_room(&map, &mut rng));
        keypoints.set(&mut map, Marker::Treasure, treasure)?;

        let mut ensured_open: BTreeSet<Dilated> = BTreeSet::new();
        let to_treasure = random_walk(&map, start, treasure, &mut rng);
        carve_path(&mut map, &to_treasure, &mut ensured_open);
        // A walk that happened to pass through the exit already guarantees
        // treasure -> end connectivity.
        if !to_treasure.contains(&end) {
            let to_end = random_walk(&map, treasure, end, &mut rng);
            carve_path(&mut map, &to_end, &mut ensured_open);
        }

        scatter_walls(&mut map, &ensured_open, self.wall_probability, &mut rng);

        Ok(Dungeon::new(map, start, end, treasure, ensured_open))
    }
}

#[derive(Default)]
struct Keypoints {
    start: Option<Coord>,
    end: Option<Coord>,
    treasure: Option<Coord>,
}

impl Keypoints {
    /// Each keypoint is assigned exactly once, to an unoccupied in-grid room.
    fn set(&mut self, map: &mut GridMap, marker: Marker, coord: Coord) -> Result<(), MapError> {
        let slot = match marker {
            Marker::Start => &mut self.start,
            Marker::End => &mut self.end,
            Marker::Treasure => &mut self.treasure,
        };
        if slot.is_some() {
            return Err(MapError::KeypointAlreadySet(marker));
        }
        map.place_marker(coord, marker)?;
        *slot = Some(coord);
        Ok(())
    }
}

/// Uniform rejection sampling against rooms that already carry a marker.
fn random_free_room(map: &GridMap, rng: &mut ChaCha8Rng) -> Coord {
    let (n, m) = map.dim();
    loop {
        let coord = Coord {
            row: (rng.next_u64() % n as u64) as i32,
            col: (rng.next_u64() % m as u64) as i32,
        };
        if map.marker_at(coord).is_none() {
            return coord;
        }
    }
}

fn scatter_walls(
    map: &mut GridMap,
    ensured_open: &BTreeSet<Dilated>,
    p: f64,
    rng: &mut ChaCha8Rng,
) {
    let (rows, cols) = map.dilated_dim();
    for row in 0..rows as i32 {
        for col in 0..cols as i32 {
            let slot = Dilated { row, col };
            if !map.is_wall(slot) || ensured_open.contains(&slot) {
                continue;
            }
            if map.get_wall(slot) == WallState::Boundary {
                continue;
            }
            if sample_unit(rng) < p {
                map.set_wall(slot, WallState::Closed);
            }
        }
    }
}

/// Uniform draw from [0, 1) using the top 53 bits of the stream.
fn sample_unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
}
