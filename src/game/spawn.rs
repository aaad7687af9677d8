//! Target placement
//!
//! The engine only asks for "some free cell"; how that cell is chosen lives
//! behind [`TargetSpawner`] so games can be replayed with a seed or scripted
//! in tests.

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use std::collections::HashSet;

use super::state::Position;

/// Picks a cell for the next target
pub trait TargetSpawner: Send {
    /// Return a cell inside the `cols` x `rows` grid that is not in `occupied`,
    /// or `None` when every cell is taken
    fn spawn(&mut self, occupied: &HashSet<Position>, cols: i32, rows: i32) -> Option<Position>;
}

fn free_cells<'a>(
    occupied: &'a HashSet<Position>,
    cols: i32,
    rows: i32,
) -> impl Iterator<Item = Position> + 'a {
    (0..rows)
        .flat_map(move |y| (0..cols).map(move |x| Position::new(x, y)))
        .filter(move |pos| !occupied.contains(pos))
}

/// Uniformly random free cell
pub struct RandomSpawner {
    rng: StdRng,
}

impl RandomSpawner {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible placement sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetSpawner for RandomSpawner {
    fn spawn(&mut self, occupied: &HashSet<Position>, cols: i32, rows: i32) -> Option<Position> {
        free_cells(occupied, cols, rows).choose(&mut self.rng)
    }
}

/// First free cell in row-major order
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanSpawner;

impl TargetSpawner for ScanSpawner {
    fn spawn(&mut self, occupied: &HashSet<Position>, cols: i32, rows: i32) -> Option<Position> {
        free_cells(occupied, cols, rows).next()
    }
}
