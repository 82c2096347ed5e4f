//! The generated dungeon value: map, keypoints, and the ensured-open walls.
//! Topology is immutable once generation completes.

use std::collections::BTreeSet;
use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::grid::GridMap;
use crate::types::{Coord, Dilated, WallState};

#[derive(Clone, Debug)]
pub struct Dungeon {
    map: GridMap,
    start: Coord,
    end: Coord,
    treasure: Coord,
    ensured_open: BTreeSet<Dilated>,
}

impl Dungeon {
    pub(crate) fn new(
        map: GridMap,
        start: Coord,
        end: Coord,
        treasure: Coord,
        ensured_open: BTreeSet<Dilated>,
    ) -> Self {
        Self { map, start, end, treasure, ensured_open }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn starting_point(&self) -> Coord {
        self.start
    }

    pub fn ending_point(&self) -> Coord {
        self.end
    }

    pub fn treasure_point(&self) -> Coord {
        self.treasure
    }

    /// Walls carved by the guaranteed-path pass; never closed by scattering.
    pub fn ensured_open_walls(&self) -> &BTreeSet<Dilated> {
        &self.ensured_open
    }

    /// Stable hash over dimensions, keypoints, and every wall state, for
    /// determinism verification.
    pub fn layout_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        let (n, m) = self.map.dim();
        hasher.write_u64(n as u64);
        hasher.write_u64(m as u64);
        for point in [self.start, self.end, self.treasure] {
            hasher.write_i32(point.row);
            hasher.write_i32(point.col);
        }
        let (rows, cols) = self.map.dilated_dim();
        for row in 0..rows as i32 {
            for col in 0..cols as i32 {
                let slot = Dilated { row, col };
                if !self.map.is_wall(slot) {
                    continue;
                }
                hasher.write_u8(match self.map.get_wall(slot) {
                    WallState::Open => 0,
                    WallState::Closed => 1,
                    WallState::Boundary => 2,
                });
            }
        }
        hasher.finish()
    }
}
