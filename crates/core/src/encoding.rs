//! Fixed-width state and action codes consumed by tabular learners and the
//! console driver.

use crate::types::{Action, Coord, EnvError, EnvState};

/// One decimal digit per coordinate bounds encodable grids to 10 rooms per
/// side.
pub const MAX_ENCODABLE_DIM: usize = 10;

/// `agent_row agent_col treasure_row treasure_col exit_row exit_col collected`.
pub const STATE_CODE_WIDTH: usize = 7;

pub fn encode_state(state: &EnvState) -> String {
    for point in [state.agent, state.treasure, state.exit] {
        debug_assert!((0..10).contains(&point.row) && (0..10).contains(&point.col));
    }
    format!(
        "{}{}{}{}{}{}{}",
        state.agent.row,
        state.agent.col,
        state.treasure.row,
        state.treasure.col,
        state.exit.row,
        state.exit.col,
        u8::from(state.collected),
    )
}

pub fn decode_state(code: &str) -> Result<EnvState, EnvError> {
    let digits: Vec<i32> = code
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as i32)
        .collect();
    if digits.len() != STATE_CODE_WIDTH || code.chars().count() != STATE_CODE_WIDTH {
        return Err(EnvError::MalformedStateCode(code.to_string()));
    }
    let collected = match digits[6] {
        0 => false,
        1 => true,
        _ => return Err(EnvError::MalformedStateCode(code.to_string())),
    };
    Ok(EnvState {
        agent: Coord { row: digits[0], col: digits[1] },
        treasure: Coord { row: digits[2], col: digits[3] },
        exit: Coord { row: digits[4], col: digits[5] },
        collected,
    })
}

/// Integer codes used by the console driver.
pub fn decode_action(code: u8) -> Result<Action, EnvError> {
    match code {
        0 => Ok(Action::Exit),
        1 => Ok(Action::MoveLeft),
        2 => Ok(Action::MoveDown),
        3 => Ok(Action::MoveRight),
        4 => Ok(Action::Collect),
        5 => Ok(Action::MoveUp),
        _ => Err(EnvError::UnknownActionCode(code)),
    }
}
