//! Dilated wall/room storage and coordinate geometry. Knows nothing about
//! agents, rewards, or randomness.

use std::collections::BTreeMap;

use crate::types::{Coord, Dilated, Direction, MapError, Marker, WallState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cell {
    Corner,
    Wall(WallState),
    Room(Option<Marker>),
}

/// An `n x m` room grid stored as a row-major `(2n+1) x (2m+1)` array with
/// slots for walls and corners. Rooms live at odd/odd dilated coordinates,
/// walls where exactly one coordinate is even, corners where both are even.
#[derive(Clone, Debug)]
pub struct GridMap {
    dim: (usize, usize),
    cells: Vec<Cell>,
}

impl GridMap {
    /// Builds an empty map: perimeter walls permanently closed, corners
    /// marked, all interior walls open.
    pub fn new(dim: (usize, usize)) -> Self {
        let (n, m) = dim;
        assert!(n >= 1 && m >= 1, "grid must have at least one room per side");
        let (rows, cols) = (2 * n + 1, 2 * m + 1);
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let cell = match (row % 2, col % 2) {
                    (0, 0) => Cell::Corner,
                    (1, 1) => Cell::Room(None),
                    _ => {
                        let perimeter =
                            row == 0 || row == rows - 1 || col == 0 || col == cols - 1;
                        if perimeter {
                            Cell::Wall(WallState::Boundary)
                        } else {
                            Cell::Wall(WallState::Open)
                        }
                    }
                };
                cells.push(cell);
            }
        }
        Self { dim, cells }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    pub fn dilated_dim(&self) -> (usize, usize) {
        (2 * self.dim.0 + 1, 2 * self.dim.1 + 1)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.dim.0
            && (coord.col as usize) < self.dim.1
    }

    pub fn contains_dilated(&self, dilated: Dilated) -> bool {
        let (rows, cols) = self.dilated_dim();
        dilated.row >= 0
            && dilated.col >= 0
            && (dilated.row as usize) < rows
            && (dilated.col as usize) < cols
    }

    /// The `2x + 1` transform from room space into dilated space.
    pub fn dilate(&self, coord: Coord) -> Dilated {
        assert!(self.contains(coord), "room coordinate {coord:?} outside the grid");
        Dilated { row: 2 * coord.row + 1, col: 2 * coord.col + 1 }
    }

    /// Inverse of [`GridMap::dilate`]. Only box positions undilate.
    pub fn undilate(&self, dilated: Dilated) -> Coord {
        assert!(
            self.contains_dilated(dilated) && self.is_box(dilated),
            "dilated coordinate {dilated:?} is not a room position"
        );
        Coord { row: (dilated.row - 1) / 2, col: (dilated.col - 1) / 2 }
    }

    /// Wall position: exactly one dilated coordinate is even.
    pub fn is_wall(&self, dilated: Dilated) -> bool {
        (dilated.row.rem_euclid(2) == 0) ^ (dilated.col.rem_euclid(2) == 0)
    }

    /// Box (room) position: both dilated coordinates are odd.
    pub fn is_box(&self, dilated: Dilated) -> bool {
        dilated.row.rem_euclid(2) == 1 && dilated.col.rem_euclid(2) == 1
    }

    /// Corner position: both dilated coordinates are even. Never queried for
    /// gameplay.
    pub fn is_unreachable(&self, dilated: Dilated) -> bool {
        dilated.row.rem_euclid(2) == 0 && dilated.col.rem_euclid(2) == 0
    }

    pub fn get_wall(&self, dilated: Dilated) -> WallState {
        assert!(self.is_wall(dilated), "{dilated:?} is not a wall position");
        match self.cell_at(dilated) {
            Cell::Wall(state) => state,
            Cell::Corner | Cell::Room(_) => unreachable!("parity already checked"),
        }
    }

    pub(crate) fn set_wall(&mut self, dilated: Dilated, state: WallState) {
        let current = self.get_wall(dilated);
        assert!(current != WallState::Boundary, "perimeter walls are immutable");
        let index = self.index(dilated);
        self.cells[index] = Cell::Wall(state);
    }

    /// The up-to-four cardinal room neighbours that are inside the grid.
    pub fn neighbours(&self, coord: Coord) -> Vec<Coord> {
        assert!(self.contains(coord), "room coordinate {coord:?} outside the grid");
        Direction::ALL
            .into_iter()
            .map(|direction| {
                let (dr, dc) = direction.delta();
                Coord { row: coord.row + dr, col: coord.col + dc }
            })
            .filter(|candidate| self.contains(*candidate))
            .collect()
    }

    /// The dilated midpoint between two mutually adjacent rooms.
    pub fn wall_between(&self, a: Coord, b: Coord) -> Dilated {
        assert!(self.neighbours(a).contains(&b), "{a:?} and {b:?} are not neighbours");
        let da = self.dilate(a);
        let db = self.dilate(b);
        Dilated { row: (da.row + db.row) / 2, col: (da.col + db.col) / 2 }
    }

    /// Wall slot and state in each cardinal direction. Edge rooms see the
    /// perimeter's `Boundary` state; all four slots always exist in the
    /// dilated array.
    pub fn get_walls_around(&self, coord: Coord) -> BTreeMap<Direction, (Dilated, WallState)> {
        let dilated = self.dilate(coord);
        Direction::ALL
            .into_iter()
            .map(|direction| {
                let (dr, dc) = direction.delta();
                let slot = Dilated { row: dilated.row + dr, col: dilated.col + dc };
                (direction, (slot, self.get_wall(slot)))
            })
            .collect()
    }

    pub fn marker_at(&self, coord: Coord) -> Option<Marker> {
        assert!(self.contains(coord), "room coordinate {coord:?} outside the grid");
        match self.cell_at(self.dilate(coord)) {
            Cell::Room(marker) => marker,
            Cell::Corner | Cell::Wall(_) => unreachable!("dilated room is always a box"),
        }
    }

    pub(crate) fn place_marker(&mut self, coord: Coord, marker: Marker) -> Result<(), MapError> {
        if !self.contains(coord) {
            return Err(MapError::OutOfBounds(coord));
        }
        if self.marker_at(coord).is_some() {
            return Err(MapError::KeypointTaken(coord));
        }
        let index = self.index(self.dilate(coord));
        self.cells[index] = Cell::Room(Some(marker));
        Ok(())
    }

    pub(crate) fn cell_at(&self, dilated: Dilated) -> Cell {
        assert!(self.contains_dilated(dilated), "dilated coordinate {dilated:?} out of range");
        self.cells[self.index(dilated)]
    }

    fn index(&self, dilated: Dilated) -> usize {
        let (_, cols) = self.dilated_dim();
        (dilated.row as usize) * cols + (dilated.col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undilate_inverts_dilate_for_every_room() {
        let map = GridMap::new((3, 4));
        for row in 0..3 {
            for col in 0..4 {
                let coord = Coord { row, col };
                assert_eq!(map.undilate(map.dilate(coord)), coord);
            }
        }
    }

    #[test]
    fn parity_classification_partitions_the_dilated_array() {
        let map = GridMap::new((2, 2));
        let (rows, cols) = map.dilated_dim();
        for row in 0..rows as i32 {
            for col in 0..cols as i32 {
                let d = Dilated { row, col };
                let classes =
                    [map.is_wall(d), map.is_box(d), map.is_unreachable(d)];
                assert_eq!(classes.iter().filter(|c| **c).count(), 1, "{d:?}");
            }
        }
    }

    #[test]
    fn fresh_map_has_closed_perimeter_and_open_interior() {
        let map = GridMap::new((3, 3));
        assert_eq!(map.get_wall(Dilated { row: 0, col: 1 }), WallState::Boundary);
        assert_eq!(map.get_wall(Dilated { row: 1, col: 0 }), WallState::Boundary);
        assert_eq!(map.get_wall(Dilated { row: 6, col: 5 }), WallState::Boundary);
        assert_eq!(map.get_wall(Dilated { row: 3, col: 4 }), WallState::Open);
        assert_eq!(map.get_wall(Dilated { row: 2, col: 1 }), WallState::Open);
    }

    #[test]
    fn neighbours_shrink_at_grid_edges() {
        let map = GridMap::new((3, 3));
        assert_eq!(map.neighbours(Coord { row: 0, col: 0 }).len(), 2);
        assert_eq!(map.neighbours(Coord { row: 0, col: 1 }).len(), 3);
        assert_eq!(map.neighbours(Coord { row: 1, col: 1 }).len(), 4);
    }

    #[test]
    fn wall_between_is_the_dilated_midpoint() {
        let map = GridMap::new((3, 3));
        let wall = map.wall_between(Coord { row: 1, col: 1 }, Coord { row: 1, col: 2 });
        assert_eq!(wall, Dilated { row: 3, col: 4 });
        assert!(map.is_wall(wall));
    }

    #[test]
    #[should_panic(expected = "not neighbours")]
    fn wall_between_rejects_diagonal_rooms() {
        let map = GridMap::new((3, 3));
        map.wall_between(Coord { row: 1, col: 1 }, Coord { row: 2, col: 2 });
    }

    #[test]
    #[should_panic(expected = "not a wall position")]
    fn get_wall_rejects_box_positions() {
        let map = GridMap::new((3, 3));
        map.get_wall(Dilated { row: 1, col: 1 });
    }

    #[test]
    fn walls_around_an_edge_room_report_boundary_state() {
        let map = GridMap::new((3, 3));
        let walls = map.get_walls_around(Coord { row: 0, col: 0 });
        assert_eq!(walls[&Direction::Up], (Dilated { row: 0, col: 1 }, WallState::Boundary));
        assert_eq!(walls[&Direction::Left], (Dilated { row: 1, col: 0 }, WallState::Boundary));
        assert_eq!(walls[&Direction::Down], (Dilated { row: 2, col: 1 }, WallState::Open));
        assert_eq!(walls[&Direction::Right], (Dilated { row: 1, col: 2 }, WallState::Open));
    }

    #[test]
    fn marker_placement_rejects_occupied_rooms_and_out_of_grid() {
        let mut map = GridMap::new((3, 3));
        let room = Coord { row: 1, col: 2 };
        assert_eq!(map.place_marker(room, Marker::Start), Ok(()));
        assert_eq!(map.marker_at(room), Some(Marker::Start));
        assert_eq!(map.place_marker(room, Marker::Treasure), Err(MapError::KeypointTaken(room)));
        let outside = Coord { row: 3, col: 0 };
        assert_eq!(map.place_marker(outside, Marker::End), Err(MapError::OutOfBounds(outside)));
    }
}
