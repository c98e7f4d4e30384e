//! Tournament CLI
//!
//! Run a match between two configured engines.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tournament::{ArenaConfig, MatchRunner};
use tracing::info;

/// Play two engines against each other.
#[derive(Debug, Parser)]
#[command(name = "tournament", version, about)]
struct Args {
    /// Arena config (TOML). Without it a default minimax vs MCTS match is played.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of games
    #[arg(short, long)]
    games: Option<u32>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut config = match &args.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    if let Some(games) = args.games {
        config.games = games;
    }

    let mut engine1 = config.engine1.build()?;
    let mut engine2 = config.engine2.build()?;

    info!(
        engine1 = engine1.name(),
        engine2 = engine2.name(),
        games = config.games,
        max_moves = config.max_moves,
        "starting match"
    );

    let runner = MatchRunner::new(config.match_config());
    let result = runner.run_match(engine1.as_mut(), engine2.as_mut())?;

    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws",
        engine1.name(),
        result.wins,
        result.losses,
        result.draws
    );
    println!("Score: {:.1}%", result.score() * 100.0);

    for engine in [&engine1, &engine2] {
        let diagnostics = engine.diagnostics();
        info!(
            engine = %diagnostics.engine,
            nodes = diagnostics.nodes_evaluated,
            config = %diagnostics.config,
            "engine statistics"
        );
    }

    Ok(())
}
