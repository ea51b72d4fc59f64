//! Life Rewind - Entry Point
//!
//! Interactive terminal front end: pick a birth, nationality and era, then
//! play chapters until the life ends. Pass a seed for a reproducible run.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use life_rewind::core::error::Result;
use life_rewind::core::types::{BirthCondition, Era, Nationality, PlayerId};
use life_rewind::core::EngineConfig;
use life_rewind::session::{ChapterMenu, ChapterReport, LifeSetup, PlayerAction, Session};

/// Life Rewind - live a randomized life, one chapter at a time
#[derive(Parser, Debug)]
#[command(name = "life-rewind")]
struct Args {
    /// Random seed for deterministic runs
    seed: Option<u64>,

    /// TOML file overriding engine constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player name shown in the greeting
    #[arg(long, default_value = "traveler")]
    player: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
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
    let seed = args.seed.unwrap_or_else(rand::random);
    let player = PlayerId::new();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("=== Life Rewind ===");
    println!("Welcome, {}.", args.player);

    let birth_labels: Vec<&str> = BirthCondition::ALL.iter().map(|b| b.label()).collect();
    let nation_labels: Vec<&str> = Nationality::ALL.iter().map(|n| n.label()).collect();
    let era_labels: Vec<&str> = Era::ALL.iter().map(|e| e.label()).collect();

    let Some(birth) = choose(&mut input, "1) Choose your birth status", &birth_labels)? else {
        return Ok(());
    };
    let Some(nation) = choose(&mut input, "2) Choose your nationality", &nation_labels)? else {
        return Ok(());
    };
    let Some(era) = choose(&mut input, "3) Choose your starting era", &era_labels)? else {
        return Ok(());
    };

    let setup = LifeSetup {
        birth: BirthCondition::ALL[birth],
        nationality: Nationality::ALL[nation],
        era: Era::ALL[era],
    };
    let mut session = Session::new(config, setup, player, seed)?;

    if let Some(first) = session.log().lines().first() {
        println!("\n{}", first);
    }
    print_stats(&session);

    while !session.is_finished() {
        let menu = session.current_menu()?.clone();
        print_menu(&menu);

        let action = loop {
            let Some(line) = prompt(&mut input, &menu_prompt(&menu))? else {
                println!("\nInput closed. Your story pauses here.");
                return Ok(());
            };
            match parse_action(&line, &menu) {
                Some(action) => break action,
                None => println!("Invalid choice, try again."),
            }
        };

        match session.act(action) {
            Ok(report) => print_report(&report),
            Err(e) if e.is_recoverable() => println!("{}", e),
            Err(e) => return Err(e),
        }
    }

    print_conclusion(&session);
    Ok(())
}

/// Read one trimmed line; `None` on end of input
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

/// Numbered selection from a closed list; returns the zero-based index
fn choose(input: &mut impl BufRead, title: &str, labels: &[&str]) -> Result<Option<usize>> {
    println!("\n{}", title);
    for (i, label) in labels.iter().enumerate() {
        println!("  {}) {}", i + 1, label);
    }
    loop {
        let Some(line) = prompt(input, &format!("Pick 1..{}: ", labels.len()))? else {
            return Ok(None);
        };
        match line.parse::<usize>() {
            Ok(n) if (1..=labels.len()).contains(&n) => return Ok(Some(n - 1)),
            _ => println!("Invalid choice, try again."),
        }
    }
}

fn menu_prompt(menu: &ChapterMenu) -> String {
    let rift = if menu.allows_rift() {
        " (or 'r' for time rift)"
    } else {
        ""
    };
    format!("Choose 1..{}{}: ", menu.options.len(), rift)
}

fn parse_action(line: &str, menu: &ChapterMenu) -> Option<PlayerAction> {
    if line == "r" && menu.allows_rift() {
        return Some(PlayerAction::Rift);
    }
    // Range is checked by the session, which re-prompts on a bad index
    line.parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .map(|n| PlayerAction::Pick(n - 1))
}

fn print_stats(session: &Session) {
    println!("Age: {}   Stats: {}", session.state().age, session.state().stats);
}

fn print_menu(menu: &ChapterMenu) {
    println!(
        "\n--- Chapter {}: {} years old ({}) ---",
        menu.chapter, menu.age, menu.band
    );
    for (i, option) in menu.options.iter().enumerate() {
        println!("  {}) {} {}", i + 1, option.sign_hint(), option.text);
        println!("      preview: {}", option.preview());
    }
}

fn print_report(report: &ChapterReport) {
    if let Some(rift) = &report.rift {
        println!("Time Rift: {}", rift.label);
        println!("You tumble into {}!", rift.to.label());
    }
    if report.auto_picked {
        println!("(Auto-picked after rift) {}", report.choice.text);
    }

    println!("{}", report.choice.text);
    if !report.note.is_empty() {
        println!("  Event note: {}", report.note);
    }
    println!("  Result: {}", report.option_delta);
    if let Some(variation) = &report.variation {
        println!("  Random variation: {}", variation);
    }
    println!("  Total this turn: {}", report.total);
    println!("Age: {}   Stats: {}", report.age, report.stats);

    if let Some(env) = &report.environment {
        println!("\nEnvironment: {}", env.text);
        println!("  Environment impact: {}", env.impact);
        println!("Age: {}   Stats: {}", report.age, env.stats);
    }

    if let Some(step) = report.age_step {
        println!("Time passes: +{} years. Age is now {}.", step, report.new_age);
    }
}

fn print_conclusion(session: &Session) {
    let Some(conclusion) = session.conclusion() else {
        return;
    };
    println!("\n=== {} ===", conclusion.title());
    if matches!(conclusion, life_rewind::session::Conclusion::ChapterLimit(_)) {
        let state = session.state();
        println!(
            "Era at rest: {}   Nation: {}",
            state.era.label(),
            state.nationality.label()
        );
        print_stats(session);
        println!();
    }
    println!("{}", conclusion.text());

    println!("\n--- Life Log ---");
    for line in session.log().lines() {
        println!("* {}", line);
    }
    println!("\n(seed {})", session.seed());
}
