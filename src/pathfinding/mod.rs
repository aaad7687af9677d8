//! Grid route search
//!
//! A [`PathfindingStrategy`] answers one question: which cells lead from
//! `start` to `goal` without touching a blocked cell. Routes include both
//! endpoints. `None` means the goal is unreachable, which is a normal answer
//! and not an error.
//!
//! Two strategies ship with the crate:
//!
//! - [`Bfs`]: level-order search, always returns a shortest route
//! - [`Dfs`]: stack-based search, returns some route with no length guarantee
//!
//! Both enumerate neighbours in the fixed order +x, -x, +y, -y, so the same
//! inputs always produce the same route.

mod bfs;
mod dfs;

pub use bfs::Bfs;
pub use dfs::Dfs;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::game::Position;

/// Search algorithm used to route from the snake's head to a goal cell
pub trait PathfindingStrategy: Send + Sync {
    /// Short display name, e.g. for the HUD
    fn name(&self) -> &'static str;

    /// Route from `start` to `goal` (both inclusive) avoiding `blocked`, on a
    /// `cols` x `rows` grid. `blocked` must not contain `start`.
    fn find_path(
        &self,
        start: Position,
        goal: Position,
        blocked: &HashSet<Position>,
        cols: i32,
        rows: i32,
    ) -> Option<Vec<Position>>;
}

/// Selects a built-in strategy from config or the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Breadth-first search (shortest route)
    Bfs,
    /// Depth-first search (any route)
    Dfs,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn PathfindingStrategy> {
        match self {
            StrategyKind::Bfs => Box::new(Bfs),
            StrategyKind::Dfs => Box::new(Dfs),
        }
    }
}

/// In-bounds, unblocked neighbours of `pos` in +x, -x, +y, -y order
pub(crate) fn open_neighbors<'a>(
    pos: Position,
    blocked: &'a HashSet<Position>,
    cols: i32,
    rows: i32,
) -> impl Iterator<Item = Position> + 'a {
    pos.neighbors()
        .into_iter()
        .filter(move |next| next.in_bounds(cols, rows) && !blocked.contains(next))
}

/// Walk parent links back from `goal` and return the route start-first
pub(crate) fn reconstruct(
    parents: &HashMap<Position, Option<Position>>,
    goal: Position,
) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = Some(goal);

    while let Some(pos) = current {
        path.push(pos);
        current = parents.get(&pos).copied().flatten();
    }

    path.reverse();
    path
}
