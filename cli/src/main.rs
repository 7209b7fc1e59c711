use std::io;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::{CellCount, Coord, GameConfig, GameSession, RandomMinefieldGenerator};

use crate::shell::{OutputMode, Shell};

mod command;
mod render;
mod shell;

/// Clear the minefield without stepping on a mine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of rows
    #[arg(long, default_value_t = 9)]
    rows: Coord,
    /// Number of columns
    #[arg(long, default_value_t = 9)]
    cols: Coord,
    /// Number of mines, must leave at least one safe cell
    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,
    /// Seed for mine placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// How results are written to stdout
    #[arg(long, value_enum, default_value_t)]
    output: OutputMode,
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(cli.verbosity.tracing_level_filter())
        .init();

    let config =
        GameConfig::new((cli.rows, cli.cols), cli.mines).context("Invalid game parameters")?;
    let generator = match cli.seed {
        Some(seed) => RandomMinefieldGenerator::new(seed),
        None => RandomMinefieldGenerator::from_clock(),
    };
    log::info!(
        "Starting {}x{} game with {} mines, seed {}",
        config.rows(),
        config.cols(),
        config.mines(),
        generator.seed()
    );

    let game = GameSession::with_generator(config, generator)
        .context("Could not place mines")?;
    let mut shell = Shell::new(game, cli.output, io::stdout().lock());
    shell.run(io::stdin().lock())?;

    log::info!("Game ended with status {:?}", shell.game().status());
    Ok(())
}
