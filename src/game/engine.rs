use tracing::{debug, info};

use super::{
    action::{Action, Direction},
    config::{ConfigError, GameConfig},
    spawn::{RandomSpawner, TargetSpawner},
    state::{CollisionType, GameState, Position, Snake, StepOutcome},
};

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// What the snake did this step
    pub outcome: StepOutcome,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Set when the snake grew but no free cell was left for a new target
    pub board_full: bool,
}

impl StepResult {
    pub fn grew(&self) -> bool {
        self.outcome == StepOutcome::Grew
    }

    pub fn collision_type(&self) -> Option<CollisionType> {
        match self.outcome {
            StepOutcome::Collided(kind) => Some(kind),
            _ => None,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    spawner: Box<dyn TargetSpawner>,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_spawner(config, Box::new(RandomSpawner::new()))
    }

    /// Engine whose target placement is reproducible from `seed`
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_spawner(config, Box::new(RandomSpawner::seeded(seed)))
    }

    /// Rejects configurations whose starting snake would not fit the grid
    pub fn with_spawner(
        config: GameConfig,
        spawner: Box<dyn TargetSpawner>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, spawner })
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let head_x = self.config.start_column() as i32;
        let head_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(head_x, head_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        // The config was validated on construction, so the snake leaves free cells
        let (cols, rows) = (self.config.grid_width as i32, self.config.grid_height as i32);
        let target = self
            .spawn_target(&snake, cols, rows)
            .unwrap_or(Position::new(0, 0));

        GameState::new(snake, target, self.config.grid_width, self.config.grid_height)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult {
                outcome: StepOutcome::Advanced,
                terminated: true,
                board_full: false,
            };
        }

        // Update direction based on action (prevent 180° turns)
        if let Action::Move(new_direction) = action {
            if !state.snake.try_set_direction(new_direction) {
                debug!(?new_direction, current = ?state.snake.direction, "ignored reversal");
            }
        }

        let heading = state.snake.direction;
        let (cols, rows) = (state.cols(), state.rows());
        let outcome = state.snake.update(heading, state.target, cols, rows);
        state.steps += 1;

        match outcome {
            StepOutcome::Collided(kind) => {
                state.is_alive = false;
                info!(?kind, head = ?state.snake.head(), steps = state.steps, "snake collided");
                StepResult {
                    outcome,
                    terminated: true,
                    board_full: false,
                }
            }
            StepOutcome::Grew => match self.spawn_target(&state.snake, cols, rows) {
                Some(target) => {
                    state.target = target;
                    StepResult {
                        outcome,
                        terminated: false,
                        board_full: false,
                    }
                }
                None => {
                    state.is_alive = false;
                    info!(length = state.snake.len(), "snake filled the board");
                    StepResult {
                        outcome,
                        terminated: true,
                        board_full: true,
                    }
                }
            },
            StepOutcome::Advanced => StepResult {
                outcome,
                terminated: false,
                board_full: false,
            },
        }
    }

    /// Place the target on a cell the snake does not occupy
    fn spawn_target(&mut self, snake: &Snake, cols: i32, rows: i32) -> Option<Position> {
        self.spawner.spawn(&snake.occupied(), cols, rows)
    }
}
