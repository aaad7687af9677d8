use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_pilot::game::GameConfig;
use snake_pilot::modes::{BenchConfig, BenchMode, PlayMode};
use snake_pilot::pathfinding::StrategyKind;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_pilot")]
#[command(version, about = "Snake with a route-finding autopilot")]
struct Cli {
    /// Run mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Route search used by the autopilot
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Milliseconds per simulation tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for target placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of sessions to play (bench)
    #[arg(long, default_value = "100")]
    games: usize,

    /// Tick cap per session (bench)
    #[arg(long, default_value = "5000")]
    max_steps: usize,

    /// Write logs here (play mode keeps the terminal for the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play in the terminal, manually or with the autopilot
    Play,
    /// Run autopilot sessions headless and print statistics
    Bench,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_rate_ms = tick_ms;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_logging(cli: &Cli) -> Result<()> {
    match (&cli.mode, &cli.log_file) {
        (_, Some(path)) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (Mode::Bench, None) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
        // The TUI draws on stderr; without a log file, logs are dropped
        (Mode::Play, None) => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;

    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(config, cli.seed)?;
            play_mode.run().await?;
        }
        Mode::Bench => {
            let strategy = config.strategy;
            let bench_config = BenchConfig {
                games: cli.games,
                max_steps: cli.max_steps,
                seed: cli.seed,
                ..BenchConfig::new(config)
            };

            let stats = BenchMode::new(bench_config).run()?;

            println!("{}", "=".repeat(70));
            println!("Autopilot benchmark ({:?})", strategy);
            println!("{}", "=".repeat(70));
            println!("{}", stats.format_summary());
        }
    }

    Ok(())
}
