//! Session state machine
//!
//! ```text
//!   Menu --Start--> Playing --collision--> GameOver --Acknowledge--> Menu
//!                      |
//!                      +------Abort------> Menu
//! ```
//!
//! The session owns the score, the manual/autopilot flag and the board. It is
//! passive: front-ends feed it [`SessionEvent`]s and call [`Session::tick`]
//! at a fixed rate.

use tracing::info;

use crate::autopilot::{Autopilot, Decision};
use crate::game::{
    Action, ConfigError, Direction, GameConfig, GameEngine, GameState, StepOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Menu,
    Playing,
    GameOver,
}

/// Input the session reacts to, independent of any key binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Move(Direction),
    ToggleAutopilot,
    Start,
    Acknowledge,
    Abort,
    Quit,
}

/// What happened during one playing tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: StepOutcome,
    /// The autopilot's choice, when it was steering
    pub decision: Option<Decision>,
    /// This tick ended the session
    pub game_over: bool,
    /// The session ended because the snake filled the grid
    pub board_full: bool,
}

pub struct Session {
    engine: GameEngine,
    autopilot: Autopilot,
    state: GameState,
    phase: SessionPhase,
    score: u32,
    autopilot_enabled: bool,
    pending_direction: Option<Direction>,
    should_quit: bool,
}

impl Session {
    pub fn new(mut engine: GameEngine, autopilot: Autopilot) -> Self {
        let state = engine.reset();
        Self {
            engine,
            autopilot,
            state,
            phase: SessionPhase::Menu,
            score: 0,
            autopilot_enabled: false,
            pending_direction: None,
            should_quit: false,
        }
    }

    /// Session using the configured strategy, with optional seeded target placement
    pub fn from_config(config: GameConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let autopilot = Autopilot::new(config.strategy.build());
        let engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed)?,
            None => GameEngine::new(config)?,
        };
        Ok(Self::new(engine, autopilot))
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot_enabled
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn strategy_name(&self) -> &'static str {
        self.autopilot.strategy_name()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        match (self.phase, event) {
            (_, SessionEvent::Quit) => {
                info!(phase = ?self.phase, "quit requested");
                self.should_quit = true;
            }
            (SessionPhase::Menu, SessionEvent::Start) => {
                let state = self.engine.reset();
                self.start_from(state);
            }
            (SessionPhase::Playing, SessionEvent::Move(direction)) => {
                // Reversals are dropped on arrival, never queued
                if !self.state.snake.direction.is_opposite(direction) {
                    self.pending_direction = Some(direction);
                }
            }
            (SessionPhase::Playing, SessionEvent::ToggleAutopilot) => {
                self.autopilot_enabled = !self.autopilot_enabled;
                info!(autopilot = self.autopilot_enabled, "steering mode changed");
            }
            (SessionPhase::Playing, SessionEvent::Abort) => {
                self.transition(SessionPhase::Menu);
            }
            (SessionPhase::GameOver, SessionEvent::Acknowledge) => {
                self.transition(SessionPhase::Menu);
            }
            _ => {}
        }
    }

    /// Begin playing on a prepared board. Resets score, steering mode and any
    /// queued heading.
    pub fn start_from(&mut self, state: GameState) {
        self.state = state;
        self.score = 0;
        self.autopilot_enabled = false;
        self.pending_direction = None;
        self.transition(SessionPhase::Playing);
    }

    /// Advance the simulation by one tick. Does nothing outside `Playing`.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.phase != SessionPhase::Playing {
            return None;
        }

        let manual = self.pending_direction.take();
        let (action, decision) = if self.autopilot_enabled {
            let decision = self.autopilot.decide(
                &self.state.snake,
                self.state.target,
                self.state.cols(),
                self.state.rows(),
            );
            (Action::from(decision.heading()), Some(decision))
        } else {
            (Action::from(manual), None)
        };

        let result = self.engine.step(&mut self.state, action);

        if result.grew() {
            self.score += 1;
        }

        if result.terminated {
            info!(
                score = self.score,
                steps = self.state.steps,
                collision = ?result.collision_type(),
                board_full = result.board_full,
                "game over"
            );
            self.transition(SessionPhase::GameOver);
        }

        Some(TickReport {
            outcome: result.outcome,
            decision,
            game_over: result.terminated,
            board_full: result.board_full,
        })
    }

    fn transition(&mut self, to: SessionPhase) {
        info!(from = ?self.phase, ?to, "session transition");
        self.phase = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Position, ScanSpawner, Snake};
    use crate::pathfinding::StrategyKind;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn scripted_session(config: GameConfig) -> Session {
        let autopilot = Autopilot::new(config.strategy.build());
        let engine = GameEngine::with_spawner(config, Box::new(ScanSpawner)).unwrap();
        Session::new(engine, autopilot)
    }

    fn corner_board() -> GameState {
        let snake = Snake::new(p(2, 0), Direction::Right, 3);
        GameState::new(snake, p(4, 0), 5, 5)
    }

    #[test]
    fn test_starts_in_menu() {
        let mut session = scripted_session(GameConfig::small());
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert_eq!(session.tick(), None);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut session = scripted_session(GameConfig::small());

        session.handle_event(SessionEvent::Start);
        assert_eq!(session.phase(), SessionPhase::Playing);

        // Run straight into the right wall
        let mut last = None;
        for _ in 0..10 {
            last = session.tick();
            if session.phase() == SessionPhase::GameOver {
                break;
            }
        }
        let report = last.unwrap();
        assert!(report.game_over);
        assert_eq!(report.outcome, StepOutcome::Collided(CollisionType::Wall));
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.tick(), None);

        session.handle_event(SessionEvent::Acknowledge);
        assert_eq!(session.phase(), SessionPhase::Menu);
    }

    #[test]
    fn test_abort_returns_to_menu() {
        let mut session = scripted_session(GameConfig::small());
        session.handle_event(SessionEvent::Start);
        session.handle_event(SessionEvent::Abort);
        assert_eq!(session.phase(), SessionPhase::Menu);
    }

    #[test]
    fn test_events_outside_their_phase_are_ignored() {
        let mut session = scripted_session(GameConfig::small());

        session.handle_event(SessionEvent::Acknowledge);
        session.handle_event(SessionEvent::Abort);
        session.handle_event(SessionEvent::ToggleAutopilot);
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert!(!session.autopilot_enabled());

        session.handle_event(SessionEvent::Start);
        session.handle_event(SessionEvent::Start);
        session.handle_event(SessionEvent::Acknowledge);
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let mut session = scripted_session(GameConfig::small());
        session.handle_event(SessionEvent::Start);
        session.handle_event(SessionEvent::Quit);
        assert!(session.should_quit());
    }

    #[test]
    fn test_manual_turn_applies_on_next_tick() {
        let mut session = scripted_session(GameConfig::new(5, 5));
        session.start_from(corner_board());

        session.handle_event(SessionEvent::Move(Direction::Down));
        assert_eq!(session.state().snake.direction, Direction::Right);

        session.tick();
        assert_eq!(session.state().snake.head(), p(2, 1));
        assert_eq!(session.state().snake.direction, Direction::Down);
    }

    #[test]
    fn test_last_manual_request_wins() {
        let mut session = scripted_session(GameConfig::new(5, 5));
        session.start_from(corner_board());

        session.handle_event(SessionEvent::Move(Direction::Down));
        session.handle_event(SessionEvent::Move(Direction::Up));
        session.tick();

        // Up runs off the top edge
        assert_eq!(session.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn test_manual_reversal_is_discarded() {
        let mut session = scripted_session(GameConfig::new(5, 5));
        session.start_from(corner_board());

        session.handle_event(SessionEvent::Move(Direction::Down));
        session.handle_event(SessionEvent::Move(Direction::Left));
        session.tick();

        // The reversal did not replace the earlier request
        assert_eq!(session.state().snake.direction, Direction::Down);

        session.handle_event(SessionEvent::Move(Direction::Up));
        let report = session.tick().unwrap();
        assert_eq!(report.outcome, StepOutcome::Advanced);
        assert_eq!(session.state().snake.direction, Direction::Down);
    }

    #[test]
    fn test_autopilot_reversal_never_changes_direction() {
        let mut session = scripted_session(GameConfig::new(5, 5));
        let snake = Snake::from_segments(vec![p(1, 0), p(2, 0)], Direction::Right).unwrap();
        session.start_from(GameState::new(snake, p(0, 0), 5, 1));
        session.handle_event(SessionEvent::ToggleAutopilot);

        let report = session.tick().unwrap();
        assert_eq!(report.decision, Some(Decision::Keep));
        assert_eq!(session.state().snake.direction, Direction::Right);
        assert_eq!(session.state().snake.head(), p(3, 0));
    }

    #[test]
    fn test_autopilot_eats_and_scores() {
        // 5x5 grid, snake (0,0)-(1,0)-(2,0) heading right, target at (4,0)
        let mut session = scripted_session(GameConfig::new(5, 5));
        session.start_from(corner_board());
        session.handle_event(SessionEvent::ToggleAutopilot);
        assert!(session.autopilot_enabled());

        let first = session.tick().unwrap();
        assert_eq!(first.outcome, StepOutcome::Advanced);
        assert_eq!(first.decision, Some(Decision::Route(Direction::Right)));
        assert_eq!(session.state().snake.head(), p(3, 0));
        assert_eq!(session.state().snake.len(), 3);
        assert_eq!(session.score(), 0);

        let second = session.tick().unwrap();
        assert_eq!(second.outcome, StepOutcome::Grew);
        assert_eq!(session.state().snake.head(), p(4, 0));
        assert_eq!(session.state().snake.len(), 4);
        assert_eq!(session.score(), 1);

        let target = session.state().target;
        assert!(!session.state().snake.occupies(target));
        assert!(session.state().is_in_bounds(target));
        assert_eq!(target, p(0, 0));
    }

    #[test]
    fn test_autopilot_ignores_manual_requests() {
        let mut session = scripted_session(GameConfig::new(5, 5));
        session.start_from(corner_board());
        session.handle_event(SessionEvent::ToggleAutopilot);
        session.handle_event(SessionEvent::Move(Direction::Down));

        session.tick();
        assert_eq!(session.state().snake.head(), p(3, 0));
    }

    #[test]
    fn test_score_freezes_after_game_over() {
        let mut session = scripted_session(GameConfig::new(5, 5));
        let snake = Snake::new(p(3, 0), Direction::Right, 2);
        session.start_from(GameState::new(snake, p(4, 0), 5, 5));

        session.tick();
        assert_eq!(session.score(), 1);
        session.tick();
        assert_eq!(session.phase(), SessionPhase::GameOver);
        session.tick();
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_new_session_resets_everything() {
        let mut session = scripted_session(GameConfig::new(5, 5));
        let snake = Snake::new(p(3, 0), Direction::Right, 2);
        session.start_from(GameState::new(snake, p(4, 0), 5, 5));
        session.handle_event(SessionEvent::ToggleAutopilot);
        session.tick();
        session.handle_event(SessionEvent::Abort);

        session.handle_event(SessionEvent::Start);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.score(), 0);
        assert!(!session.autopilot_enabled());
        assert_eq!(session.state().snake.len(), 3);
        assert_eq!(session.state().steps, 0);
    }

    #[test]
    fn test_strategy_is_injected() {
        let mut config = GameConfig::small();
        config.strategy = StrategyKind::Dfs;
        let session = Session::from_config(config, Some(11)).unwrap();
        assert_eq!(session.strategy_name(), "DFS");
    }

    #[test]
    fn test_autopilot_survives_many_ticks() {
        let mut session = Session::from_config(GameConfig::small(), Some(3)).unwrap();
        session.handle_event(SessionEvent::Start);
        session.handle_event(SessionEvent::ToggleAutopilot);

        for _ in 0..50 {
            session.tick();
        }
        // BFS on an open 10x10 board reaches its first target well within 50 ticks
        assert!(session.score() > 0);
    }

    #[test]
    fn test_from_config_rejects_unplayable_grid() {
        let mut config = GameConfig::new(2, 1);
        config.initial_snake_length = 2;
        assert!(Session::from_config(config, Some(0)).is_err());
    }
}
