use std::collections::HashSet;

use super::action::Direction;

/// A cell on the game grid (`x` is the column, `y` the row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Whether the position lies inside a `cols` x `rows` grid
    pub fn in_bounds(&self, cols: i32, rows: i32) -> bool {
        self.x >= 0 && self.x < cols && self.y >= 0 && self.y < rows
    }

    /// The four axis-aligned neighbours, ordered +x, -x, +y, -y
    pub fn neighbors(&self) -> [Position; 4] {
        [
            self.moved_by(1, 0),
            self.moved_by(-1, 0),
            self.moved_by(0, 1),
            self.moved_by(0, -1),
        ]
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// What a single [`Snake::update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved one cell, no growth
    Advanced,
    /// Head landed on the target; a segment was added at the old tail cell
    Grew,
    /// Head left the grid or ran into the body. Ends the session.
    Collided(CollisionType),
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, tail at index 0 and head last
    body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given head position and direction; the body
    /// trails behind the head, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let length = length.max(1) as i32;

        let body = (0..length)
            .rev()
            .map(|back| head.moved_by(-dx * back, -dy * back))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit segments, tail first. Returns `None` for an
    /// empty body.
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            body: segments,
            direction,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get the tail position (first segment)
    pub fn tail(&self) -> Position {
        self.body[0]
    }

    /// All segments, tail first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[..self.body.len() - 1]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Every occupied cell
    pub fn occupied(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Change heading unless the request is a 180-degree turn.
    /// Returns whether the heading was accepted.
    pub fn try_set_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance one tick along `heading`.
    ///
    /// Every body segment steps into the cell its front neighbour held before
    /// the tick, then the head moves. Walls are checked against the new head,
    /// self-collision against the post-move body, and reaching `target` grows
    /// the snake by re-adding the vacated tail cell. The caller is expected to
    /// have filtered reversals out of `heading` already.
    pub fn update(
        &mut self,
        heading: Direction,
        target: Position,
        cols: i32,
        rows: i32,
    ) -> StepOutcome {
        self.direction = heading;

        // Shifting must read pre-move positions only
        let previous = self.body.clone();

        let head_index = self.body.len() - 1;
        for i in 0..head_index {
            self.body[i] = previous[i + 1];
        }
        self.body[head_index] = previous[head_index].moved_in_direction(heading);

        let head = self.head();

        if !head.in_bounds(cols, rows) {
            return StepOutcome::Collided(CollisionType::Wall);
        }

        if self.collides_with_body(head) {
            return StepOutcome::Collided(CollisionType::SelfCollision);
        }

        if head == target {
            self.body.insert(0, previous[0]);
            return StepOutcome::Grew;
        }

        StepOutcome::Advanced
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete state of one game in progress
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub target: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, target: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            target,
            grid_width,
            grid_height,
            steps: 0,
            is_alive: true,
        }
    }

    pub fn cols(&self) -> i32 {
        self.grid_width as i32
    }

    pub fn rows(&self) -> i32 {
        self.grid_height as i32
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.cols(), self.rows())
    }
}
