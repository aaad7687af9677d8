//! Headless autopilot benchmark
//!
//! Plays a batch of sessions with the autopilot steering and no terminal UI,
//! then reports how far the chosen route search gets on average. Handy for
//! comparing BFS against DFS on the same seeds.
//!
//! # Example
//!
//! ```rust
//! use snake_pilot::game::GameConfig;
//! use snake_pilot::modes::{BenchConfig, BenchMode};
//!
//! let config = BenchConfig {
//!     games: 3,
//!     max_steps: 200,
//!     seed: Some(7),
//!     ..BenchConfig::new(GameConfig::small())
//! };
//! let stats = BenchMode::new(config).run()?;
//! assert_eq!(stats.total_runs(), 3);
//! # Ok::<(), snake_pilot::game::ConfigError>(())
//! ```

use tracing::{debug, info};

use crate::game::{ConfigError, GameConfig, StepOutcome};
use crate::metrics::{RunEnd, RunStats};
use crate::session::{Session, SessionEvent, SessionPhase};

/// Configuration for a benchmark batch
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of sessions to play
    pub games: usize,
    /// Tick cap per session; an autopilot circling forever is cut off here
    pub max_steps: usize,
    /// Base seed; session `i` uses `seed + i` so batches are repeatable
    pub seed: Option<u64>,
    /// Log progress every N sessions
    pub log_frequency: usize,
    /// Rolling window for mean score and length
    pub window: usize,
    pub game_config: GameConfig,
}

impl BenchConfig {
    pub fn new(game_config: GameConfig) -> Self {
        Self {
            games: 100,
            max_steps: 5_000,
            seed: None,
            log_frequency: 10,
            window: 100,
            game_config,
        }
    }
}

pub struct BenchMode {
    config: BenchConfig,
    stats: RunStats,
}

impl BenchMode {
    pub fn new(config: BenchConfig) -> Self {
        let stats = RunStats::new(config.window);
        Self { config, stats }
    }

    /// Play every session and return the collected statistics
    pub fn run(mut self) -> Result<RunStats, ConfigError> {
        info!(
            games = self.config.games,
            strategy = ?self.config.game_config.strategy,
            width = self.config.game_config.grid_width,
            height = self.config.game_config.grid_height,
            "bench started"
        );

        for game in 0..self.config.games {
            let seed = self.config.seed.map(|seed| seed.wrapping_add(game as u64));
            let (score, steps, end) = self.run_session(seed)?;
            self.stats.record_run(score, steps, end);
            debug!(game, score, steps, ?end, "session finished");

            if self.config.log_frequency > 0 && (game + 1) % self.config.log_frequency == 0 {
                info!("{}", self.stats.format_summary());
            }
        }

        Ok(self.stats)
    }

    fn run_session(&self, seed: Option<u64>) -> Result<(u32, usize, RunEnd), ConfigError> {
        let mut session = Session::from_config(self.config.game_config.clone(), seed)?;
        session.handle_event(SessionEvent::Start);
        session.handle_event(SessionEvent::ToggleAutopilot);

        let mut steps = 0;
        while steps < self.config.max_steps {
            let Some(report) = session.tick() else {
                break;
            };
            steps += 1;

            if report.game_over {
                let end = match report.outcome {
                    StepOutcome::Collided(kind) => RunEnd::Collided(kind),
                    _ => RunEnd::BoardFull,
                };
                return Ok((session.score(), steps, end));
            }
        }

        debug_assert_eq!(session.phase(), SessionPhase::Playing);
        Ok((session.score(), steps, RunEnd::StepLimit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::StrategyKind;

    fn bench(strategy: StrategyKind, games: usize) -> RunStats {
        let mut game_config = GameConfig::small();
        game_config.strategy = strategy;
        let config = BenchConfig {
            games,
            max_steps: 300,
            seed: Some(17),
            log_frequency: 0,
            ..BenchConfig::new(game_config)
        };
        BenchMode::new(config).run().unwrap()
    }

    #[test]
    fn test_bench_config_defaults() {
        let config = BenchConfig::new(GameConfig::default());
        assert_eq!(config.games, 100);
        assert_eq!(config.max_steps, 5_000);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_runs_requested_number_of_games() {
        let stats = bench(StrategyKind::Bfs, 4);
        assert_eq!(stats.total_runs(), 4);
        assert!(stats.total_steps() > 0);
        assert_eq!(
            stats.wall_collisions()
                + stats.self_collisions()
                + stats.board_full()
                + stats.step_limited(),
            4
        );
    }

    #[test]
    fn test_seeded_batches_repeat() {
        let a = bench(StrategyKind::Dfs, 3);
        let b = bench(StrategyKind::Dfs, 3);
        assert_eq!(a.format_summary(), b.format_summary());
    }

    #[test]
    fn test_bfs_scores_on_open_board() {
        let stats = bench(StrategyKind::Bfs, 3);
        assert!(stats.best_score() > 0);
    }

    #[test]
    fn test_step_cap_applies() {
        let config = BenchConfig {
            games: 1,
            max_steps: 1,
            seed: Some(1),
            log_frequency: 0,
            ..BenchConfig::new(GameConfig::small())
        };
        let stats = BenchMode::new(config).run().unwrap();
        assert_eq!(stats.total_steps(), 1);
        assert_eq!(stats.step_limited(), 1);
    }

    #[test]
    fn test_invalid_grid_is_reported() {
        let config = BenchConfig {
            games: 1,
            log_frequency: 0,
            ..BenchConfig::new(GameConfig::new(1, 1))
        };
        assert!(matches!(
            BenchMode::new(config).run(),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }
}
