use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use grid_snake::game::{BoundaryPolicy, GameConfig};
use grid_snake::modes::HumanMode;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid-based snake game for the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// What happens at the left and right edges
    #[arg(long)]
    boundary: Option<Boundary>,

    /// Milliseconds between game ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Skip the title menu and start playing immediately
    #[arg(long)]
    no_menu: bool,

    /// Where to write the log (the terminal is busy drawing the game)
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log debug messages too
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum Boundary {
    /// Every wall is fatal
    Solid,
    /// Left and right edges wrap around
    Wrap,
}

impl From<Boundary> for BoundaryPolicy {
    fn from(boundary: Boundary) -> Self {
        match boundary {
            Boundary::Solid => BoundaryPolicy::Solid,
            Boundary::Wrap => BoundaryPolicy::WrapHorizontal,
        }
    }
}

impl Cli {
    /// Defaults, then the config file, then explicit flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(boundary) = &self.boundary {
            config.boundary = boundary.clone().into();
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.no_menu {
            config.show_menu = false;
        }

        config
            .validate()
            .map_err(|e| anyhow!(e))
            .context("Invalid game settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(level, Config::default(), log_file).context("Failed to initialize logger")?;

    let config = cli.game_config()?;
    info!("Starting grid_snake with {:?}", config);

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["grid_snake"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "grid_snake",
            "--width",
            "30",
            "--height",
            "15",
            "--boundary",
            "wrap",
            "--tick-ms",
            "100",
            "--no-menu",
        ]);
        let config = cli.game_config().unwrap();

        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.boundary, BoundaryPolicy::WrapHorizontal);
        assert_eq!(config.tick_interval_ms, 100);
        assert!(!config.show_menu);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let cli = Cli::parse_from(["grid_snake", "--width", "3"]);
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("grid_snake_cli_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "grid_width": 25, "tick_interval_ms": 200 }"#).unwrap();

        let cli = Cli::parse_from([
            "grid_snake",
            "--config",
            path.to_str().unwrap(),
            "--tick-ms",
            "120",
        ]);
        let config = cli.game_config().unwrap();

        assert_eq!(config.grid_width, 25);
        assert_eq!(config.tick_interval_ms, 120);

        std::fs::remove_file(&path).unwrap();
    }
}
