pub mod encoding;
pub mod env;
pub mod grid;
pub mod mazegen;
pub mod render;
pub mod types;

pub use encoding::{MAX_ENCODABLE_DIM, STATE_CODE_WIDTH, decode_action, decode_state, encode_state};
pub use env::DungeonEnvironment;
pub use grid::GridMap;
pub use mazegen::{DEFAULT_WALL_PROBABILITY, Dungeon, MazeGenerator, generate_dungeon};
pub use types::*;
