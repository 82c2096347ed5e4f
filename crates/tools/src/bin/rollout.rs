use anyhow::Result;
use clap::Parser;
use dungeon_core::{Action, Direction, DungeonEnvironment, MazeGenerator};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;

/// Random-policy rollout harness: one JSON summary line per episode.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 10)]
    episodes: u64,
    #[arg(long, default_value_t = 4)]
    rows: usize,
    #[arg(long, default_value_t = 4)]
    cols: usize,
    #[arg(short, long, default_value_t = 0.3)]
    wall_probability: f64,
    #[arg(short, long, default_value_t = 200)]
    timeout: u64,
    #[arg(long, default_value_t = 500)]
    max_steps: u32,
}

#[derive(Serialize)]
struct EpisodeSummary {
    episode: u64,
    maze_seed: u64,
    layout_hash: u64,
    steps: u64,
    total_reward: i64,
    collected: bool,
    exited: bool,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();

    for episode in 0..args.episodes {
        let maze_seed = args.seed.wrapping_add(episode);
        let dungeon = MazeGenerator::new(maze_seed, (args.rows, args.cols))
            .wall_probability(args.wall_probability)
            .generate()
            .map_err(|e| anyhow::anyhow!("Generation failed: {:?}", e))?;
        let layout_hash = dungeon.layout_hash();

        let mut env = DungeonEnvironment::new(dungeon, Some(args.timeout));
        let mut rng = ChaCha8Rng::seed_from_u64(maze_seed ^ 0x9E37_79B9_7F4A_7C15);
        let mut total_reward = 0_i64;
        let mut collected = false;

        for _ in 0..args.max_steps {
            if env.is_done() {
                break;
            }
            let mut actions: Vec<Action> =
                Direction::ALL.into_iter().map(Action::for_direction).collect();
            if env.collected() {
                actions.push(Action::Exit);
            } else {
                actions.push(Action::Collect);
            }

            let action = choose(&mut rng, &actions);
            let step = env.step(action).expect("rollout issued an action outside the contract");
            total_reward += i64::from(step.reward);
            collected = step.state.collected;

            assert!(
                env.dungeon().map().contains(step.state.agent),
                "Invariant failed: agent left the grid"
            );
        }

        let summary = EpisodeSummary {
            episode,
            maze_seed,
            layout_hash,
            steps: env.elapsed(),
            total_reward,
            collected,
            exited: env.is_done(),
        };
        println!("{}", serde_json::to_string(&summary)?);
    }

    Ok(())
}
