//! Autopilot steering
//!
//! Each tick the autopilot routes from the snake's head to the target with the
//! injected [`PathfindingStrategy`] and turns the first step of that route
//! into a heading. The body is treated as a wall, except for the tail, which
//! moves out of its cell during the same tick.
//!
//! When there is no usable route it falls back to any safe adjacent cell,
//! trying Up, Down, Left, Right in that order. If even that fails the snake
//! keeps its heading.

use std::collections::HashSet;
use tracing::debug;

use crate::game::{Direction, Position, Snake};
use crate::pathfinding::PathfindingStrategy;

/// What the autopilot wants the snake to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// First step of a route to the target
    Route(Direction),
    /// No route; this neighbour is at least free right now
    Fallback(Direction),
    /// Keep the current heading (no safe move, or the route asked for a reversal)
    Keep,
}

impl Decision {
    /// The heading to apply, if any
    pub fn heading(&self) -> Option<Direction> {
        match self {
            Decision::Route(direction) | Decision::Fallback(direction) => Some(*direction),
            Decision::Keep => None,
        }
    }
}

/// Route-following controller for the snake
pub struct Autopilot {
    strategy: Box<dyn PathfindingStrategy>,
}

impl Autopilot {
    pub fn new(strategy: Box<dyn PathfindingStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Cells the route may not cross: every segment but the head, and the tail
    /// too once the snake has one distinct from the head
    pub fn obstacles(snake: &Snake) -> HashSet<Position> {
        let body = snake.body_segments();
        let mut obstacles: HashSet<Position> = body.iter().copied().collect();
        if snake.len() >= 2 {
            obstacles.remove(&snake.tail());
        }
        obstacles
    }

    /// Pick a heading that moves the snake toward `target`
    pub fn decide(&self, snake: &Snake, target: Position, cols: i32, rows: i32) -> Decision {
        let head = snake.head();
        if !head.in_bounds(cols, rows) || !target.in_bounds(cols, rows) {
            return Decision::Keep;
        }

        let obstacles = Self::obstacles(snake);
        let route = self
            .strategy
            .find_path(head, target, &obstacles, cols, rows)
            .filter(|route| route.len() >= 2);

        let Some(route) = route else {
            let decision = Self::fallback(snake, &obstacles, cols, rows)
                .map_or(Decision::Keep, Decision::Fallback);
            debug!(strategy = self.strategy.name(), ?head, ?target, ?decision, "no route");
            return decision;
        };

        let next = route[1];
        let Some(desired) = Direction::from_delta(next.x - head.x, next.y - head.y) else {
            return Decision::Keep;
        };

        if desired.is_opposite(snake.direction) {
            debug!(?desired, current = ?snake.direction, "route starts with a reversal");
            return Decision::Keep;
        }

        debug!(
            strategy = self.strategy.name(),
            ?desired,
            route_len = route.len(),
            "following route"
        );
        Decision::Route(desired)
    }

    /// First non-reversing neighbour that is inside the grid and not an obstacle
    fn fallback(
        snake: &Snake,
        obstacles: &HashSet<Position>,
        cols: i32,
        rows: i32,
    ) -> Option<Direction> {
        let head = snake.head();
        Direction::ALL.into_iter().find(|direction| {
            let next = head.moved_in_direction(*direction);
            !direction.is_opposite(snake.direction)
                && next.in_bounds(cols, rows)
                && !obstacles.contains(&next)
        })
    }
}
