use std::collections::{HashMap, HashSet};

use super::{PathfindingStrategy, open_neighbors, reconstruct};
use crate::game::Position;

/// Depth-first search over a LIFO frontier.
///
/// Finds a route whenever one exists but makes no promise about its length.
/// Useful as a contrast to [`super::Bfs`] when comparing autopilot behaviour.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dfs;

impl PathfindingStrategy for Dfs {
    fn name(&self) -> &'static str {
        "DFS"
    }

    fn find_path(
        &self,
        start: Position,
        goal: Position,
        blocked: &HashSet<Position>,
        cols: i32,
        rows: i32,
    ) -> Option<Vec<Position>> {
        let mut stack = vec![start];
        let mut parents = HashMap::from([(start, None)]);

        while let Some(current) = stack.pop() {
            if current == goal {
                return Some(reconstruct(&parents, goal));
            }

            for next in open_neighbors(current, blocked, cols, rows) {
                if !parents.contains_key(&next) {
                    parents.insert(next, Some(current));
                    stack.push(next);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::Bfs;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_finds_adjacent_goal() {
        let path = Dfs.find_path(p(2, 2), p(2, 1), &HashSet::new(), 5, 5).unwrap();
        assert_eq!(path, vec![p(2, 2), p(2, 1)]);
    }

    #[test]
    fn test_can_be_longer_than_bfs() {
        // Last-pushed neighbour (-y) is explored first, so DFS wanders before
        // coming back for a goal one step to the right
        let blocked = HashSet::new();
        let dfs = Dfs.find_path(p(1, 2), p(3, 2), &blocked, 5, 5).unwrap();
        let bfs = Bfs.find_path(p(1, 2), p(3, 2), &blocked, 5, 5).unwrap();

        assert_eq!(bfs.len(), 3);
        assert_eq!(
            dfs,
            vec![p(1, 2), p(1, 1), p(1, 0), p(2, 0), p(3, 0), p(3, 1), p(3, 2)]
        );
    }
}
