use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Room coordinate in the logical `n x m` grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

/// Coordinate in the dilated `(2n+1) x (2m+1)` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dilated {
    pub row: i32,
    pub col: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WallState {
    Open,
    Closed,
    /// Outer perimeter wall, closed for the lifetime of the map.
    Boundary,
}

impl WallState {
    pub fn is_open(self) -> bool {
        self == WallState::Open
    }
}

/// Keypoint marker carried by a room cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Marker {
    Start,
    End,
    Treasure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// The closed action set exposed by the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Collect,
    Exit,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Collect,
        Action::Exit,
    ];

    /// The movement direction, for the four move variants.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::MoveUp => Some(Direction::Up),
            Action::MoveDown => Some(Direction::Down),
            Action::MoveLeft => Some(Direction::Left),
            Action::MoveRight => Some(Direction::Right),
            Action::Collect | Action::Exit => None,
        }
    }

    pub fn for_direction(direction: Direction) -> Action {
        match direction {
            Direction::Up => Action::MoveUp,
            Direction::Down => Action::MoveDown,
            Direction::Left => Action::MoveLeft,
            Direction::Right => Action::MoveRight,
        }
    }
}

/// Full structured episode state. `treasure` collapses onto `agent` once the
/// treasure has been collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvState {
    pub agent: Coord,
    pub treasure: Coord,
    pub exit: Coord,
    pub collected: bool,
}

/// What an external policy is allowed to see: the four wall states around the
/// current room plus the collected flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub up: WallState,
    pub down: WallState,
    pub left: WallState,
    pub right: WallState,
    pub collected: bool,
}

impl Observation {
    pub fn wall(&self, direction: Direction) -> WallState {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn open_directions(&self) -> Vec<Direction> {
        Direction::ALL.into_iter().filter(|d| self.wall(*d).is_open()).collect()
    }
}

/// Result of one `step` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub state: EnvState,
    pub reward: i32,
    pub done: bool,
    pub info: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeEvent {
    Moved { from: Coord, to: Coord },
    MoveBlocked { direction: Direction },
    TreasureCollected { at: Coord },
    Exited { at: Coord },
    AttemptRejected { action: Action },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapError {
    OutOfBounds(Coord),
    KeypointTaken(Coord),
    KeypointAlreadySet(Marker),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvError {
    EpisodeOver,
    AlreadyCollected,
    UnknownActionCode(u8),
    MalformedStateCode(String),
}
