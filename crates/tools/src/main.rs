use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::{Action, DungeonEnvironment, MazeGenerator, decode_action, encode_state};

/// Manual console play against a generated dungeon.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 4)]
    rows: usize,
    #[arg(long, default_value_t = 4)]
    cols: usize,
    #[arg(short, long, default_value_t = 0.3)]
    wall_probability: f64,
    /// Step budget; exceeding it turns the exit bonus into a penalty.
    #[arg(short, long)]
    timeout: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let dungeon = MazeGenerator::new(args.seed, (args.rows, args.cols))
        .wall_probability(args.wall_probability)
        .generate()
        .map_err(|e| anyhow::anyhow!("Generation failed: {:?}", e))?;
    let mut env = DungeonEnvironment::new(dungeon, args.timeout);

    println!("{env}");
    println!("state = {}", encode_state(&env.state()));

    let stdin = io::stdin();
    while !env.is_done() {
        print!("play [0=exit 1=left 2=down 3=right 4=collect 5=up]: ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin.read_line(&mut line).context("Failed to read stdin")?;
        if read == 0 {
            println!();
            break;
        }

        // Bad input is re-prompted; environment contract errors are not
        // swallowed here.
        let Ok(code) = line.trim().parse::<u8>() else {
            println!("not a number, try again");
            continue;
        };
        let action = match decode_action(code) {
            Ok(action) => action,
            Err(_) => {
                println!("unknown action code {code}, try again");
                continue;
            }
        };
        if action == Action::Collect && env.collected() {
            println!("the treasure is already collected");
            continue;
        }

        let previous = encode_state(&env.state());
        let step =
            env.step(action).map_err(|e| anyhow::anyhow!("Step failed: {:?}", e))?;

        println!("{env}");
        println!("previous_state = {previous}");
        println!("new_state = {}", encode_state(&step.state));
        println!("reward = {}", step.reward);
        println!("done = {}", step.done);
    }

    if env.is_done() {
        println!("Episode finished after {} steps.", env.elapsed());
    }
    Ok(())
}
