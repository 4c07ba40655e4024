mod play;

use crate::play::play;

use anyhow::{Context, Result};
use clap::Parser;
use klondike_common::{DrawMode, Game, Options, ScoringMode};
use rand::SeedableRng;
use rand::rngs::StdRng;

use std::{
    io::{stdin, stdout},
    path::PathBuf,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Cards drawn per turn (1 or 3)
    #[arg(short, long, value_name = "NUM", default_value_t = 1)]
    draw: usize,
    /// Scoring mode: standard, vegas or none
    #[arg(short, long, value_name = "MODE", default_value_t = ScoringMode::Standard)]
    scoring: ScoringMode,
    /// Carry the Vegas score over into the next game
    #[arg(short, long)]
    cumulative: bool,
    /// Max times the talon may be turned back into the stock
    #[arg(short, long, value_name = "NUM")]
    max_passes: Option<u32>,
    /// Seed for a reproducible deal
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Print the initial game state and exit
    #[arg(short, long)]
    preview: bool,
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Path to a game state file to load
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let Cli {
        draw,
        scoring,
        cumulative,
        max_passes,
        seed,
        preview,
        verbose,
        file,
    } = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    let options = Options::default()
        .with_draw_mode(DrawMode::from_count(draw)?)
        .with_scoring(scoring)
        .with_cumulative(cumulative)
        .with_max_passes(max_passes);

    let mut game = if let Some(file) = file {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        Game::parse(&content, options).context("Failed to parse board")?
    } else if let Some(seed) = seed {
        Game::with_rng(options, &mut StdRng::seed_from_u64(seed))
    } else {
        Game::new(options)
    };

    if preview {
        println!("{}", game.pretty_print());
        return Ok(());
    }

    play(&mut game, stdin().lock(), stdout().lock())
}
