//! Race Env headless driver
//!
//! Runs episodes with a seeded random policy and prints the best runs.
//!
//! Usage: `race-env [episodes] [seed] [max_steps] [settings.json]`

use std::error::Error;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use race_env::sim::Action;
use race_env::{EpisodeRecord, Leaderboard, RaceEnv, Settings};

const DEFAULT_EPISODES: u32 = 10;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_MAX_STEPS: u64 = 1000;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let episodes = match args.next() {
        Some(arg) => arg.parse()?,
        None => DEFAULT_EPISODES,
    };
    let seed: u64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => DEFAULT_SEED,
    };
    let max_steps: u64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => DEFAULT_MAX_STEPS,
    };
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    log::info!("Race Env starting: {episodes} episodes, seed {seed}, max {max_steps} steps");

    let mut env = RaceEnv::new(settings)?;
    let mut board = Leaderboard::new();

    for episode in 0..episodes {
        let episode_seed = seed.wrapping_add(episode as u64);
        let record = run_episode(&mut env, episode_seed, max_steps)?;
        log::info!(
            "Episode {}: reward {:.1}, {} steps, {:?}, {} checkpoints",
            episode,
            record.total_reward,
            record.steps,
            record.outcome,
            record.checkpoints_reached
        );
        if let Some(rank) = board.add(record) {
            log::debug!("Episode {episode} ranked #{rank}");
        }
    }

    println!("{}", serde_json::to_string_pretty(&board)?);
    Ok(())
}

/// Drive one episode with a random policy biased toward full throttle
fn run_episode(
    env: &mut RaceEnv,
    seed: u64,
    max_steps: u64,
) -> Result<EpisodeRecord, Box<dyn Error>> {
    let mut rng = Pcg32::seed_from_u64(seed);
    env.reset();

    let mut total_reward = 0.0;
    for _ in 0..max_steps {
        let action = Action::new(rng.random_range(-0.2..=1.0), rng.random_range(-1.0..=1.0));
        let transition = env.step_action(action)?;
        total_reward += transition.reward;
        if transition.done {
            break;
        }
    }

    Ok(EpisodeRecord::from_state(seed, total_reward, env.state()))
}
