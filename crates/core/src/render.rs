//! Tab/newline glyph rendering of maps, dungeons, and live episodes.

use std::fmt;

use crate::env::DungeonEnvironment;
use crate::grid::{Cell, GridMap};
use crate::mazegen::Dungeon;
use crate::types::{Coord, Dilated, Marker, WallState};

pub(crate) fn render(map: &GridMap, agent: Option<Coord>, hide_treasure: bool) -> String {
    let agent_slot = agent.map(|coord| map.dilate(coord));
    let (rows, cols) = map.dilated_dim();
    let mut lines = Vec::with_capacity(rows);
    for row in 0..rows as i32 {
        let glyphs: Vec<&str> = (0..cols as i32)
            .map(|col| glyph(map, Dilated { row, col }, agent_slot, hide_treasure))
            .collect();
        lines.push(glyphs.join("\t"));
    }
    lines.join("\n")
}

fn glyph(
    map: &GridMap,
    slot: Dilated,
    agent_slot: Option<Dilated>,
    hide_treasure: bool,
) -> &'static str {
    if agent_slot == Some(slot) {
        return "#";
    }
    match map.cell_at(slot) {
        Cell::Corner => "+",
        Cell::Wall(WallState::Open) => "",
        // Closed and boundary walls draw by orientation: even row means the
        // wall lies between vertically adjacent rooms.
        Cell::Wall(WallState::Closed | WallState::Boundary) => {
            if slot.row.rem_euclid(2) == 0 {
                "—"
            } else {
                "|"
            }
        }
        Cell::Room(None) => "",
        Cell::Room(Some(Marker::Start)) => "I",
        Cell::Room(Some(Marker::End)) => "O",
        Cell::Room(Some(Marker::Treasure)) => {
            if hide_treasure {
                ""
            } else {
                "T"
            }
        }
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(self, None, false))
    }
}

impl fmt::Display for Dungeon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(self.map(), None, false))
    }
}

impl fmt::Display for DungeonEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(self.dungeon().map(), Some(self.agent_location()), self.collected()))
    }
}
