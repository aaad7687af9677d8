use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, Position};
use crate::metrics::GameMetrics;
use crate::session::{Session, SessionPhase};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &Session, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(chunks[0], session, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match session.phase() {
            SessionPhase::Menu => frame.render_widget(self.render_menu(session), game_area),
            SessionPhase::Playing => {
                frame.render_widget(self.render_grid(game_area, session.state()), game_area)
            }
            SessionPhase::GameOver => frame.render_widget(
                self.render_game_over(session.score(), metrics),
                game_area,
            ),
        }

        // Render footer with controls
        let controls = self.render_controls(chunks[2], session.phase());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();
        let head = state.snake.head();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    // Snake body
                    Span::styled("□ ", Style::default().fg(Color::White))
                } else if pos == state.target {
                    // Target
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, session: &Session, metrics: &GameMetrics) -> Paragraph<'_> {
        let mode = if session.autopilot_enabled() {
            Span::styled("AUTO", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("MANUAL", Style::default().fg(Color::White))
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Mode: ", Style::default().fg(Color::Yellow)),
            mode,
            Span::raw(format!(" ({})", session.strategy_name())),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(&self, session: &Session) -> Paragraph<'_> {
        let hint = Style::default().fg(Color::Gray);
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", hint),
                Span::styled("Enter", key),
                Span::styled(" to start", hint),
            ]),
            Line::from(vec![
                Span::styled("Press ", hint),
                Span::styled("A", key),
                Span::styled(
                    format!(" in-game to toggle the {} autopilot", session.strategy_name()),
                    hint,
                ),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_game_over(&self, score: u32, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games Played: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for the menu or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect, phase: SessionPhase) -> Paragraph<'_> {
        let spans = match phase {
            SessionPhase::Menu => vec![
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" to start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            SessionPhase::Playing => vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("A", Style::default().fg(Color::Cyan)),
                Span::raw(" autopilot | "),
                Span::styled("Esc", Style::default().fg(Color::Cyan)),
                Span::raw(" menu | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            SessionPhase::GameOver => vec![
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" to continue | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
        };

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use crate::session::SessionEvent;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(session: &Session) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| Renderer::new().render(frame, session, &metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_menu_screen() {
        let session = Session::from_config(GameConfig::small(), Some(1)).unwrap();
        let screen = draw(&session);
        assert!(screen.contains("SNAKE"));
        assert!(screen.contains("BFS"));
    }

    #[test]
    fn test_playing_screen_shows_mode() {
        let mut session = Session::from_config(GameConfig::small(), Some(1)).unwrap();
        session.handle_event(SessionEvent::Start);
        let screen = draw(&session);
        assert!(screen.contains("MANUAL"));
        assert!(screen.contains("■"));

        session.handle_event(SessionEvent::ToggleAutopilot);
        assert!(draw(&session).contains("AUTO"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut session = Session::from_config(GameConfig::small(), Some(1)).unwrap();
        session.handle_event(SessionEvent::Start);
        while session.phase() == SessionPhase::Playing {
            session.tick();
        }
        let screen = draw(&session);
        assert!(screen.contains("GAME OVER"));
    }
}
