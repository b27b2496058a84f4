use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::theme::{Palette, Theme};
use crate::game::{Cell, CollisionType, GameOverReason, GameSnapshot, Phase, Position};
use crate::metrics::GameMetrics;

pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot, metrics: &GameMetrics) {
        let palette = self.theme.palette();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics, &palette);
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

        match snapshot.phase {
            Phase::GameOver => {
                let game_over = self.render_game_over(snapshot, metrics, &palette);
                frame.render_widget(game_over, game_area);
            }
            Phase::NotStarted | Phase::Paused => {
                frame.render_widget(self.render_grid(snapshot, &palette), game_area);
                let popup = centered(game_area, 36, 6);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_prompt(snapshot.phase, &palette), popup);
            }
            Phase::Running => {
                frame.render_widget(self.render_grid(snapshot, &palette), game_area);
            }
        }

        let controls = self.render_controls(&palette);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &GameSnapshot, palette: &Palette) -> Paragraph<'_> {
        let snake_color = if snapshot.invincible {
            palette.invincible
        } else {
            palette.body
        };

        let mut lines = Vec::with_capacity(snapshot.grid_size);
        for y in 0..snapshot.grid_size {
            let spans: Vec<Span> = (0..snapshot.grid_size)
                .map(|x| {
                    let pos = Position::new(x as i32, y as i32);
                    match snapshot.cell_at(pos) {
                        Cell::Head => Span::styled(
                            "■ ",
                            Style::default().fg(palette.head).add_modifier(Modifier::BOLD),
                        ),
                        Cell::Body => Span::styled("□ ", Style::default().fg(snake_color)),
                        Cell::Food => Span::styled(
                            "O ",
                            Style::default().fg(palette.food).add_modifier(Modifier::BOLD),
                        ),
                        Cell::Bomb => Span::styled(
                            "X ",
                            Style::default().fg(palette.bomb).add_modifier(Modifier::BOLD),
                        ),
                        Cell::PowerUp => Span::styled(
                            "* ",
                            Style::default()
                                .fg(palette.power_up)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Cell::Empty => Span::styled(". ", Style::default().fg(palette.empty)),
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(palette.border))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
        palette: &Palette,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(palette.label);
        let value = Style::default().fg(palette.text);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(snapshot.level.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.speed_ms), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ];

        if snapshot.invincible {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("INVINCIBLE {}s", snapshot.invincibility_secs),
                Style::default()
                    .fg(palette.invincible)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_prompt(&self, phase: Phase, palette: &Palette) -> Paragraph<'_> {
        let (title, hint) = match phase {
            Phase::Paused => ("PAUSED", "Press SPACE to resume"),
            _ => ("Press SPACE to start", "Use arrow keys to control the snake"),
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(palette.label)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(hint, Style::default().fg(palette.muted))),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        )
    }

    fn render_game_over(
        &self,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
        palette: &Palette,
    ) -> Paragraph<'_> {
        let cause = match snapshot.game_over_reason {
            Some(GameOverReason::Collision(CollisionType::Wall)) => "You hit the wall",
            Some(GameOverReason::Collision(CollisionType::SelfCollision)) => "You bit yourself",
            Some(GameOverReason::Collision(CollisionType::Bomb)) => "You hit a bomb",
            Some(GameOverReason::BoardFull) => "The board is full",
            None => "",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(palette.alert).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause, Style::default().fg(palette.muted))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(palette.label)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(palette.label)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(palette.text),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(palette.muted)),
                Span::styled(
                    "R",
                    Style::default().fg(palette.body).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(palette.muted)),
                Span::styled(
                    "Q",
                    Style::default().fg(palette.alert).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(palette.muted)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.alert)),
        )
    }

    fn render_controls(&self, palette: &Palette) -> Paragraph<'_> {
        let key = Style::default().fg(palette.head);
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw(" or "),
            Span::styled("WASD", key),
            Span::raw(" to move | "),
            Span::styled("Space", key),
            Span::raw(" start/pause | "),
            Span::styled("R", key),
            Span::raw(" restart | "),
            Span::styled("T", key),
            Span::raw(" theme | "),
            Span::styled("Q", Style::default().fg(palette.alert)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle in the middle of `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(renderer: &Renderer, engine: &GameEngine) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, &engine.snapshot(), &metrics))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_start_prompt_shown_before_start() {
        let engine = GameEngine::with_seed(GameConfig::default(), 1);
        let screen = draw(&Renderer::new(), &engine);
        assert!(screen.contains("Press SPACE to start"));
        assert!(screen.contains("Score:"));
    }

    #[test]
    fn test_running_game_has_no_prompt() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        engine.start();
        let screen = draw(&Renderer::new(), &engine);
        assert!(!screen.contains("Press SPACE"));
        assert!(screen.contains("Snake"));
    }

    #[test]
    fn test_paused_prompt() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        engine.start();
        engine.toggle_pause();
        let screen = draw(&Renderer::new(), &engine);
        assert!(screen.contains("PAUSED"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        engine.start();
        // Head starts at (10, 10) moving right; ten ticks reach the wall
        for _ in 0..10 {
            engine.tick();
        }
        assert_eq!(engine.phase(), Phase::GameOver);

        let screen = draw(&Renderer::new(), &engine);
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("You hit the wall"));
    }

    #[test]
    fn test_theme_toggle() {
        let mut renderer = Renderer::new();
        assert_eq!(renderer.theme(), Theme::Dark);
        renderer.toggle_theme();
        assert_eq!(renderer.theme(), Theme::Light);
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        let popup = centered(area, 36, 6);
        assert_eq!(popup, area);

        let popup = centered(Rect::new(0, 0, 40, 20), 20, 10);
        assert_eq!(popup, Rect::new(10, 5, 20, 10));
    }
}
