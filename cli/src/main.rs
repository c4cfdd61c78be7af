use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use minefield_core::{
    CellCount, Coord, Game, GameConfig, MinefieldGenerator, RandomMinefieldGenerator,
};

use crate::console::Console;
use crate::render::Renderer;

mod console;
mod input;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Single-player minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Side of the square grid, asked for interactively when absent
    #[arg(long)]
    size: Option<Coord>,

    /// Number of mines, asked for interactively when absent
    #[arg(long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Plain output without colors or screen clearing
    #[arg(long)]
    no_color: bool,
}

fn resolve_config<R: io::BufRead, W: io::Write>(
    args: &Args,
    console: &mut Console<R, W>,
) -> Result<GameConfig> {
    let size = match args.size {
        Some(size) => GameConfig::validate_size(size).context("Invalid --size")?,
        None => console.ask_size()?,
    };
    match args.mines {
        Some(mines) => Ok(GameConfig::new(size, mines).context("Invalid --mines")?),
        None => console.ask_mines(size),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), Renderer::new(!args.no_color));

    let config = resolve_config(&args, &mut console)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("config: {:?}, seed: {}", config, seed);

    let mut game = Game::new(RandomMinefieldGenerator::new(seed).generate(config));
    let state = console.play(&mut game)?;
    log::info!("Game finished: {:?}", state);

    Ok(())
}
