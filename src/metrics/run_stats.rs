//! Aggregates for headless autopilot runs
//!
//! Scores and per-run tick counts are kept in rolling windows so long
//! benchmark runs show recent behaviour; end-reason counters and the best
//! score cover every run.

use std::collections::VecDeque;

use crate::game::CollisionType;

/// Why a benchmark run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Collided(CollisionType),
    /// The snake filled every cell
    BoardFull,
    /// Hit the per-run step cap while still alive
    StepLimit,
}

/// Rolling statistics over finished runs
///
/// # Example
///
/// ```rust
/// use snake_pilot::game::CollisionType;
/// use snake_pilot::metrics::{RunEnd, RunStats};
///
/// let mut stats = RunStats::new(100);
/// stats.record_run(12, 340, RunEnd::Collided(CollisionType::SelfCollision));
///
/// assert_eq!(stats.total_runs(), 1);
/// assert_eq!(stats.best_score(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct RunStats {
    scores: VecDeque<u32>,
    run_steps: VecDeque<usize>,
    total_runs: usize,
    total_steps: usize,
    best_score: u32,
    wall_collisions: usize,
    self_collisions: usize,
    board_full: usize,
    step_limited: usize,
    window_size: usize,
}

impl RunStats {
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            scores: VecDeque::with_capacity(window_size),
            run_steps: VecDeque::with_capacity(window_size),
            total_runs: 0,
            total_steps: 0,
            best_score: 0,
            wall_collisions: 0,
            self_collisions: 0,
            board_full: 0,
            step_limited: 0,
            window_size,
        }
    }

    /// Record one finished run
    pub fn record_run(&mut self, score: u32, steps: usize, end: RunEnd) {
        Self::push_deque(&mut self.scores, score, self.window_size);
        Self::push_deque(&mut self.run_steps, steps, self.window_size);
        self.total_runs += 1;
        self.total_steps += steps;
        self.best_score = self.best_score.max(score);

        match end {
            RunEnd::Collided(CollisionType::Wall) => self.wall_collisions += 1,
            RunEnd::Collided(CollisionType::SelfCollision) => self.self_collisions += 1,
            RunEnd::BoardFull => self.board_full += 1,
            RunEnd::StepLimit => self.step_limited += 1,
        }
    }

    /// Mean score over the rolling window
    pub fn mean_score(&self) -> f32 {
        Self::mean(self.scores.iter().map(|&s| s as f32), self.scores.len())
    }

    /// Mean run length in ticks over the rolling window
    pub fn mean_run_steps(&self) -> f32 {
        Self::mean(self.run_steps.iter().map(|&s| s as f32), self.run_steps.len())
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn total_runs(&self) -> usize {
        self.total_runs
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn wall_collisions(&self) -> usize {
        self.wall_collisions
    }

    pub fn self_collisions(&self) -> usize {
        self.self_collisions
    }

    pub fn board_full(&self) -> usize {
        self.board_full
    }

    pub fn step_limited(&self) -> usize {
        self.step_limited
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Runs: {} | Steps: {} | Score: {:.2} | Best: {} | Ticks: {:.1} | Wall: {} | Self: {} | Full: {} | Capped: {}",
            self.total_runs,
            self.total_steps,
            self.mean_score(),
            self.best_score,
            self.mean_run_steps(),
            self.wall_collisions,
            self.self_collisions,
            self.board_full,
            self.step_limited,
        )
    }

    fn mean(values: impl Iterator<Item = f32>, count: usize) -> f32 {
        if count == 0 {
            0.0
        } else {
            values.sum::<f32>() / count as f32
        }
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
