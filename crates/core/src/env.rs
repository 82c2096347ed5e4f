//! Per-episode state machine layered on a generated dungeon.
//! It does not own maze topology; the dungeon is immutable once built.

use std::collections::{BTreeMap, BTreeSet};

use crate::encoding::MAX_ENCODABLE_DIM;
use crate::mazegen::Dungeon;
use crate::types::{
    Action, Coord, Direction, EnvError, EnvState, EpisodeEvent, Observation, Step,
};

const ILLEGAL_ACTION_PENALTY: i32 = -10;
const MOVE_REWARD: i32 = 1;
const TREASURE_REWARD: i32 = 3;
const FAILED_ATTEMPT_PENALTY: i32 = -5;
const COLLECTED_EXIT_BONUS: i32 = 10;
const TIMEOUT_PENALTY: i32 = -10;

pub struct DungeonEnvironment {
    dungeon: Dungeon,
    timeout: Option<u64>,
    agent: Coord,
    collected: bool,
    elapsed: u64,
    done: bool,
    log: Vec<EpisodeEvent>,
}

impl DungeonEnvironment {
    /// `timeout` is a gameplay step budget (`None` = unlimited); exceeding it
    /// never ends the episode by itself, it only penalizes a later exit.
    pub fn new(dungeon: Dungeon, timeout: Option<u64>) -> Self {
        let (n, m) = dungeon.map().dim();
        assert!(
            n <= MAX_ENCODABLE_DIM && m <= MAX_ENCODABLE_DIM,
            "state encoding holds one digit per coordinate"
        );
        let agent = dungeon.starting_point();
        Self { dungeon, timeout, agent, collected: false, elapsed: 0, done: false, log: Vec::new() }
    }

    /// The only transition back into `Playing`: a fresh episode on the same
    /// maze topology.
    pub fn reset(&mut self) -> Observation {
        self.agent = self.dungeon.starting_point();
        self.collected = false;
        self.elapsed = 0;
        self.done = false;
        self.log.clear();
        self.observation()
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn agent_location(&self) -> Coord {
        self.agent
    }

    pub fn collected(&self) -> bool {
        self.collected
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn timed_out(&self) -> bool {
        self.timeout.is_some_and(|budget| self.elapsed > budget)
    }

    pub fn log(&self) -> &[EpisodeEvent] {
        &self.log
    }

    pub fn observation(&self) -> Observation {
        let walls = self.dungeon.map().get_walls_around(self.agent);
        Observation {
            up: walls[&Direction::Up].1,
            down: walls[&Direction::Down].1,
            left: walls[&Direction::Left].1,
            right: walls[&Direction::Right].1,
            collected: self.collected,
        }
    }

    pub fn state(&self) -> EnvState {
        EnvState {
            agent: self.agent,
            treasure: if self.collected { self.agent } else { self.dungeon.treasure_point() },
            exit: self.dungeon.ending_point(),
            collected: self.collected,
        }
    }

    /// Advances the episode by one action. Illegal-for-current-state actions
    /// are scored, not raised; contract misuse (stepping a finished episode,
    /// collecting twice) is an error.
    pub fn step(&mut self, action: Action) -> Result<Step, EnvError> {
        if self.done {
            return Err(EnvError::EpisodeOver);
        }
        if action == Action::Collect && self.collected {
            return Err(EnvError::AlreadyCollected);
        }

        self.elapsed += 1;
        let legal = self.legal_actions();
        let mut reward = self.score(action, &legal);

        if !legal.contains(&action) {
            match action.direction() {
                Some(direction) => self.log.push(EpisodeEvent::MoveBlocked { direction }),
                None => self.log.push(EpisodeEvent::AttemptRejected { action }),
            }
            return Ok(self.outcome(reward));
        }

        match action {
            Action::MoveUp => self.apply_move(Direction::Up),
            Action::MoveDown => self.apply_move(Direction::Down),
            Action::MoveLeft => self.apply_move(Direction::Left),
            Action::MoveRight => self.apply_move(Direction::Right),
            Action::Collect => {
                self.collected = self.agent == self.dungeon.treasure_point();
                if self.collected {
                    self.log.push(EpisodeEvent::TreasureCollected { at: self.agent });
                }
            }
            Action::Exit => {
                if self.agent == self.dungeon.ending_point() {
                    self.done = true;
                    reward += self.terminal_adjustment();
                    self.log.push(EpisodeEvent::Exited { at: self.agent });
                }
            }
        }

        Ok(self.outcome(reward))
    }

    /// Actions that are legal in the current state: moves through open walls,
    /// collect while the treasure is unclaimed, exit once it is claimed.
    fn legal_actions(&self) -> BTreeSet<Action> {
        let observation = self.observation();
        let mut legal: BTreeSet<Action> = Direction::ALL
            .into_iter()
            .filter(|direction| observation.wall(*direction).is_open())
            .map(Action::for_direction)
            .collect();
        if self.collected {
            legal.insert(Action::Exit);
        } else {
            legal.insert(Action::Collect);
        }
        legal
    }

    fn score(&self, action: Action, legal: &BTreeSet<Action>) -> i32 {
        if !legal.contains(&action) {
            return ILLEGAL_ACTION_PENALTY;
        }
        match action {
            Action::MoveUp => self.score_move(Direction::Up),
            Action::MoveDown => self.score_move(Direction::Down),
            Action::MoveLeft => self.score_move(Direction::Left),
            Action::MoveRight => self.score_move(Direction::Right),
            Action::Collect => {
                if self.agent == self.dungeon.treasure_point() {
                    TREASURE_REWARD
                } else {
                    FAILED_ATTEMPT_PENALTY
                }
            }
            Action::Exit => {
                if self.agent == self.dungeon.ending_point() {
                    TREASURE_REWARD
                } else {
                    FAILED_ATTEMPT_PENALTY
                }
            }
        }
    }

    fn apply_move(&mut self, direction: Direction) {
        let from = self.agent;
        self.agent = self.destination(direction);
        self.log.push(EpisodeEvent::Moved { from, to: self.agent });
    }

    fn score_move(&self, direction: Direction) -> i32 {
        if !self.collected && self.destination(direction) == self.dungeon.treasure_point() {
            TREASURE_REWARD
        } else {
            MOVE_REWARD
        }
    }

    /// Applied once, on successful exit only.
    fn terminal_adjustment(&self) -> i32 {
        if self.timed_out() {
            TIMEOUT_PENALTY
        } else if self.collected {
            COLLECTED_EXIT_BONUS
        } else {
            0
        }
    }

    fn destination(&self, direction: Direction) -> Coord {
        let (dr, dc) = direction.delta();
        Coord { row: self.agent.row + dr, col: self.agent.col + dc }
    }

    fn outcome(&self, reward: i32) -> Step {
        Step { state: self.state(), reward, done: self.done, info: BTreeMap::new() }
    }
}
