//! Randomized depth-first walk with backtracking over the room graph.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::grid::GridMap;
use crate::types::{Coord, Dilated, WallState};

/// Walks from `start` to `end`, stepping to a uniformly random eligible
/// neighbour (not on the visited path, not a rejected dead end) and popping
/// the current room into the reject set when stuck. The room graph is
/// connected, so the walk always terminates, and the returned path is simple.
pub(super) fn random_walk(
    map: &GridMap,
    start: Coord,
    end: Coord,
    rng: &mut ChaCha8Rng,
) -> Vec<Coord> {
    assert!(map.contains(start), "walk start {start:?} outside the grid");
    assert!(map.contains(end), "walk end {end:?} outside the grid");
    assert!(start != end, "walk endpoints must differ");

    let mut visited = vec![start];
    let mut rejected: BTreeSet<Coord> = BTreeSet::new();
    let mut current = start;

    while current != end {
        let eligible: Vec<Coord> = map
            .neighbours(current)
            .into_iter()
            .filter(|room| !visited.contains(room) && !rejected.contains(room))
            .collect();
        if eligible.is_empty() {
            let popped = visited.pop();
            debug_assert_eq!(popped, Some(current));
            rejected.insert(current);
            current = visited[visited.len() - 1];
        } else {
            current = choose(rng, &eligible);
            visited.push(current);
        }
    }

    visited
}

/// Opens the wall between every consecutive pair on `path` and records it in
/// the ensured-open set so scattering can never close it again.
pub(super) fn carve_path(
    map: &mut GridMap,
    path: &[Coord],
    ensured_open: &mut BTreeSet<Dilated>,
) {
    for pair in path.windows(2) {
        let wall = map.wall_between(pair[0], pair[1]);
        map.set_wall(wall, WallState::Open);
        ensured_open.insert(wall);
    }
}

fn choose(rng: &mut ChaCha8Rng, slice: &[Coord]) -> Coord {
    slice[rng.next_u64() as usize % slice.len()]
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn walk_yields_a_simple_path_between_its_endpoints() {
        let map = GridMap::new((5, 5));
        let start = Coord { row: 0, col: 0 };
        let end = Coord { row: 4, col: 4 };
        for seed in 0..20_u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let path = random_walk(&map, start, end, &mut rng);

            assert_eq!(path[0], start);
            assert_eq!(path[path.len() - 1], end);

            let unique: BTreeSet<Coord> = path.iter().copied().collect();
            assert_eq!(unique.len(), path.len(), "path revisits a room (seed {seed})");

            for pair in path.windows(2) {
                assert!(map.neighbours(pair[0]).contains(&pair[1]));
            }
        }
    }

    #[test]
    fn carve_opens_and_records_every_wall_on_the_path() {
        let mut map = GridMap::new((3, 3));
        let path = [
            Coord { row: 0, col: 0 },
            Coord { row: 0, col: 1 },
            Coord { row: 1, col: 1 },
        ];
        let mut ensured_open = BTreeSet::new();
        carve_path(&mut map, &path, &mut ensured_open);

        assert_eq!(ensured_open.len(), 2);
        for wall in &ensured_open {
            assert_eq!(map.get_wall(*wall), WallState::Open);
        }
    }
}
