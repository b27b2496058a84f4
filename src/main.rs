use anyhow::Result;
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::logging::init_file_logging;
use grid_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal, with bombs and power-ups")]
struct Cli {
    /// Which hazards are in play
    #[arg(long, default_value = "all")]
    variant: Variant,

    /// Width and height of the square grid
    #[arg(long, default_value = "20")]
    grid_size: usize,

    /// Tick interval at the start of a game, in milliseconds
    #[arg(long)]
    initial_speed: Option<u64>,

    /// Seed for food and hazard placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    /// Walls and your own tail only
    Classic,
    /// A new bomb every 30 points
    Bombs,
    /// Occasional power-ups granting invincibility
    PowerUps,
    /// Bombs and power-ups
    All,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        let mut config = GameConfig::new(self.grid_size);
        config.bombs_enabled = matches!(self.variant, Variant::Bombs | Variant::All);
        config.power_ups_enabled = matches!(self.variant, Variant::PowerUps | Variant::All);
        if let Some(speed) = self.initial_speed {
            config.initial_speed_ms = speed;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    // Create game configuration from CLI arguments
    let config = cli.game_config();
    config.validate()?;
    tracing::info!(?config, seed = ?cli.seed, "starting");

    let mut human_mode = HumanMode::new(config, cli.seed);
    human_mode.run().await?;

    Ok(())
}
