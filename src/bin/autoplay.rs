//! Headless autoplay runner
//!
//! Plays many independent seeded lives with a fixed strategy and reports how
//! they ended. Sessions share nothing, so they run in parallel.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use life_rewind::core::error::Result;
use life_rewind::core::types::{BirthCondition, Era, Nationality, PlayerId};
use life_rewind::core::EngineConfig;
use life_rewind::session::{ChapterMenu, Conclusion, LifeLog, LifeSetup, PlayerAction, Session};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Always take the first option
    First,
    /// Uniform random option, rifting now and then
    Random,
    /// Option with the largest delta sum
    Greedy,
}

/// Headless Life Rewind runner
#[derive(Parser, Debug)]
#[command(name = "autoplay")]
#[command(about = "Play seeded lives automatically and summarize their endings")]
struct Args {
    /// Number of lives to play
    #[arg(long, default_value_t = 100)]
    runs: u64,

    /// First seed; run i uses seed + i (wrapping)
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value = "greedy")]
    strategy: Strategy,

    /// TOML file overriding engine constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every run's log as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RunResult {
    seed: u64,
    setup: LifeSetup,
    chapters: u32,
    final_age: u32,
    conclusion: Option<Conclusion>,
    log: LifeLog,
}

fn pick(menu: &ChapterMenu, strategy: Strategy, rng: &mut ChaCha8Rng) -> PlayerAction {
    match strategy {
        Strategy::First => PlayerAction::Pick(0),
        Strategy::Random => {
            if menu.allows_rift() && rng.gen::<f64>() < 0.1 {
                PlayerAction::Rift
            } else {
                PlayerAction::Pick(rng.gen_range(0..menu.options.len()))
            }
        }
        Strategy::Greedy => {
            let best = menu
                .options
                .iter()
                .enumerate()
                .max_by_key(|(i, option)| (option.delta.total(), std::cmp::Reverse(*i)))
                .map(|(i, _)| i)
                .unwrap_or(0);
            PlayerAction::Pick(best)
        }
    }
}

fn play(config: &EngineConfig, seed: u64, strategy: Strategy) -> Result<RunResult> {
    // Setup and strategy draw from their own stream so the session stream stays untouched
    let mut picker = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed_5eed);
    let setup = LifeSetup {
        birth: BirthCondition::ALL[picker.gen_range(0..BirthCondition::ALL.len())],
        nationality: Nationality::ALL[picker.gen_range(0..Nationality::ALL.len())],
        era: Era::ALL[picker.gen_range(0..Era::ALL.len())],
    };

    let mut session = Session::new(config.clone(), setup, PlayerId::new(), seed)?;
    while !session.is_finished() {
        let menu = session.current_menu()?.clone();
        session.act(pick(&menu, strategy, &mut picker))?;
    }

    Ok(RunResult {
        seed,
        setup,
        chapters: session.state().chapter,
        final_age: session.state().age,
        conclusion: session.conclusion(),
        log: session.log().clone(),
    })
}

/// Seeds for `runs` lives starting at `first`, wrapping past `u64::MAX`
fn run_seeds(first: u64, runs: u64) -> Vec<u64> {
    (0..runs).map(|i| first.wrapping_add(i)).collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    tracing::info!("Playing {} lives with {:?}", args.runs, args.strategy);

    let results: Vec<RunResult> = run_seeds(args.seed, args.runs)
        .into_par_iter()
        .map(|seed| play(&config, seed, args.strategy))
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let mut endings: BTreeMap<String, u32> = BTreeMap::new();
    for result in &results {
        let key = match result.conclusion {
            Some(Conclusion::Special(ending)) => format!("{:?}", ending),
            Some(Conclusion::NaturalEndpoint) => "NaturalEndpoint".to_string(),
            Some(Conclusion::ChapterLimit(class)) => format!("ChapterLimit/{:?}", class),
            None => "Unfinished".to_string(),
        };
        *endings.entry(key).or_default() += 1;
    }

    let total_chapters: u64 = results.iter().map(|r| r.chapters as u64).sum();
    let total_age: u64 = results.iter().map(|r| r.final_age as u64).sum();
    let runs = results.len().max(1) as f64;

    println!("Played {} lives ({:?} strategy)", results.len(), args.strategy);
    println!("Average chapters: {:.2}", total_chapters as f64 / runs);
    println!("Average final age: {:.2}", total_age as f64 / runs);
    println!("\n--- Endings ---");
    for (ending, count) in &endings {
        println!("{:<28} {:>5}", ending, count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_seeds_wrap_at_max() {
        assert_eq!(run_seeds(u64::MAX, 1), vec![u64::MAX]);
        assert_eq!(run_seeds(u64::MAX - 1, 3), vec![u64::MAX - 1, u64::MAX, 0]);
    }

    #[test]
    fn test_run_seeds_count() {
        assert_eq!(run_seeds(10, 4), vec![10, 11, 12, 13]);
        assert!(run_seeds(5, 0).is_empty());
    }

    #[test]
    fn test_play_at_max_seed() {
        let result = play(&EngineConfig::default(), u64::MAX, Strategy::Greedy).expect("run completes");
        assert_eq!(result.seed, u64::MAX);
        assert!(result.conclusion.is_some());
    }
}
