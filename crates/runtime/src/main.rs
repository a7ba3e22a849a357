//! # Lawnmower Runtime
//!
//! Drives lawnmower episodes with a random policy. Picks a named preset
//! (or a random one), plays the requested number of episodes, optionally
//! printing the grid after every step, and logs a summary per episode.
#![deny(clippy::all, clippy::pedantic)]

mod driver;
mod presets;

use anyhow::Result;
use clap::Parser;
use lawnmower::Env;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::driver::{run_episode, RandomAgent};
use crate::presets::Registry;

#[derive(Parser, Debug)]
#[command(name = "runtime_main", about = "Run lawnmower episodes with a random agent")]
struct Args {
    /// Preset to run; a random built-in preset when omitted.
    #[arg(long)]
    preset: Option<String>,
    /// JSON file with additional presets.
    #[arg(long)]
    presets_file: Option<PathBuf>,
    /// Seed for the environment and the agent.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1)]
    episodes: usize,
    /// Print the grid after every step.
    #[arg(long)]
    render: bool,
    /// Pause between rendered steps, in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
    /// Print one JSON summary line per episode.
    #[arg(long)]
    json: bool,
    /// List the available presets and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut registry = Registry::builtin();
    if let Some(path) = &args.presets_file {
        registry.extend(Registry::load(path)?);
        tracing::info!("Loaded presets from {}", path.display());
    }

    if args.list {
        for name in registry.names() {
            let c = registry.get(name)?;
            println!(
                "{name}: {}x{}, {} obstacles, {} max steps",
                c.width, c.height, c.obstacle_number, c.max_steps
            );
        }
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    let preset = if let Some(name) = &args.preset {
        name.clone()
    } else {
        let names: Vec<&str> = registry.names().collect();
        names[fastrand::Rng::with_seed(seed).usize(..names.len())].to_string()
    };

    let mut world = registry.make(&preset, Some(seed))?;
    tracing::info!("Preset '{preset}', seed {seed}");
    print!("{}", world.describe());

    let mut agent = RandomAgent::new(seed, world.action_size());
    let delay = Duration::from_millis(args.delay_ms);
    for episode in 0..args.episodes {
        let summary = run_episode(&mut world, &mut agent, episode, |step, t| {
            if args.render {
                println!("{}", t.observation);
                println!("Step {step} Reward {} Done {}", t.reward, t.done);
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }
        })?;
        tracing::info!(
            "Episode {} finished after {} steps: reward {}, {}, {:.0}% mowed",
            summary.episode,
            summary.steps,
            summary.total_reward,
            summary.done_reason.as_deref().unwrap_or("not done"),
            summary.mowed_fraction * 100.0
        );
        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        }
    }

    Ok(())
}
