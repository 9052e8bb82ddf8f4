use anyhow::Result;
use clap::Parser;
use snake_duel::game::GameConfig;
use snake_duel::logging;
use snake_duel::modes::VersusMode;
use snake_duel::render::stop_reason_text;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_duel")]
#[command(version, about = "Snake duel against an autonomous bot in the terminal")]
struct Cli {
    /// TOML config file; missing keys use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for the bot policy
    #[arg(long)]
    seed: Option<u64>,

    /// Write diagnostics here (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    // Config file first, then CLI overrides
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let summary = VersusMode::new(config).run()?;

    println!("Game over: {}", stop_reason_text(summary.reason));
    for report in &summary.actors {
        println!("{:?} {} length: {}", report.kind, report.id, report.trail_len);
    }

    Ok(())
}
