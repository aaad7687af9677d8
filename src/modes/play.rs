//! Interactive terminal mode
//!
//! Drives a [`Session`] from keyboard input and a fixed-rate tick timer, and
//! redraws the screen at 30 FPS independently of the simulation rate.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::game::{ConfigError, GameConfig};
use crate::input::InputHandler;
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::session::{Session, SessionEvent, SessionPhase};

pub struct PlayMode {
    session: Session,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let tick_interval = Duration::from_millis(config.tick_rate_ms);

        Ok(Self {
            session: Session::from_config(config, seed)?,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        info!(tick_ms = self.tick_interval.as_millis() as u64, "play mode started");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.session.handle_event(SessionEvent::Quit);
                }
            }

            if self.session.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let Some(session_event) = self.input_handler.handle_key_event(key) {
            self.dispatch(session_event);
        }
    }

    /// Forward an event to the session and keep the HUD metrics in step with
    /// any phase change it causes
    fn dispatch(&mut self, event: SessionEvent) {
        let before = self.session.phase();
        self.session.handle_event(event);

        match (before, self.session.phase()) {
            (SessionPhase::Menu, SessionPhase::Playing) => self.metrics.on_session_start(),
            (SessionPhase::Playing, SessionPhase::Menu) => {
                self.metrics.on_session_end(self.session.score())
            }
            _ => {}
        }
    }

    fn update_game(&mut self) {
        if let Some(report) = self.session.tick() {
            if report.game_over {
                self.metrics.on_session_end(self.session.score());
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
