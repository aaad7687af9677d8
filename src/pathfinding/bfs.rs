use std::collections::{HashMap, HashSet, VecDeque};

use super::{PathfindingStrategy, open_neighbors, reconstruct};
use crate::game::Position;

/// Breadth-first search over a FIFO frontier.
///
/// Cells are marked when enqueued, so each is visited at most once and the
/// first time `goal` is dequeued its parent chain is a shortest route.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bfs;

impl PathfindingStrategy for Bfs {
    fn name(&self) -> &'static str {
        "BFS"
    }

    fn find_path(
        &self,
        start: Position,
        goal: Position,
        blocked: &HashSet<Position>,
        cols: i32,
        rows: i32,
    ) -> Option<Vec<Position>> {
        let mut frontier = VecDeque::from([start]);
        let mut parents = HashMap::from([(start, None)]);

        while let Some(current) = frontier.pop_front() {
            if current == goal {
                return Some(reconstruct(&parents, goal));
            }

            for next in open_neighbors(current, blocked, cols, rows) {
                if !parents.contains_key(&next) {
                    parents.insert(next, Some(current));
                    frontier.push_back(next);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_straight_line() {
        let path = Bfs.find_path(p(0, 0), p(3, 0), &HashSet::new(), 5, 5).unwrap();
        assert_eq!(path, vec![p(0, 0), p(1, 0), p(2, 0), p(3, 0)]);
    }

    #[test]
    fn test_detour_around_wall() {
        // Wall at x=1 for rows 0..3, open at row 3
        let blocked: HashSet<Position> = (0..3).map(|y| p(1, y)).collect();
        let path = Bfs.find_path(p(0, 0), p(2, 0), &blocked, 4, 4).unwrap();

        // Down 3, right 2, up 3
        assert_eq!(path.len(), 9);
        assert_eq!(path[3], p(0, 3));
        assert_eq!(path[5], p(2, 3));
    }

    #[test]
    fn test_prefers_positive_x_on_ties() {
        let path = Bfs.find_path(p(0, 0), p(1, 1), &HashSet::new(), 3, 3).unwrap();
        assert_eq!(path, vec![p(0, 0), p(1, 0), p(1, 1)]);
    }
}
