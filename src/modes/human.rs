use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

use super::clock::Clock;
use super::terminal::{TerminalGuard, TuiTerminal};
use crate::game::{Command, GameConfig, GameEngine, Phase, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Invincibility is counted down in whole seconds
const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Render at 30 FPS (33ms per frame)
const RENDER_PERIOD: Duration = Duration::from_millis(33);

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        Self::from_engine(engine)
    }

    fn from_engine(engine: GameEngine) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut guard = TerminalGuard::acquire()?;
        tracing::info!(grid = self.engine.config().grid_size, "session started");

        let result = self.run_game_loop(guard.terminal_mut()).await;

        tracing::info!(
            games = self.metrics.games_played,
            best = self.metrics.high_score,
            "session ended"
        );
        result
    }

    /// Timers and the event stream live only as long as this call
    async fn run_game_loop(&mut self, terminal: &mut TuiTerminal) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_clock = Clock::new(self.engine.tick_interval());
        let mut countdown_clock = Clock::new(COUNTDOWN_PERIOD);
        let mut render_timer = interval(RENDER_PERIOD);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event) {
                                // Fresh game: nothing scheduled for the old one may fire
                                tick_clock = Clock::new(self.engine.tick_interval());
                                countdown_clock.restart();
                            }
                        }
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_clock.tick() => {
                    self.on_tick(&mut tick_clock, &mut countdown_clock);
                }

                _ = countdown_clock.tick() => {
                    self.engine.count_down_invincibility();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine.snapshot(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Returns true when the game was reset and the clocks need re-arming
    fn handle_event(&mut self, event: Event) -> bool {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return false;
            }

            let action = self.input_handler.handle_key_event(key);
            return self.apply_key_action(action);
        }

        false
    }

    fn apply_key_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::GameCommand(command) => {
                let before = self.engine.phase();
                self.engine.apply(command);
                self.sync_metrics(before);
                command == Command::Reset
            }
            KeyAction::ToggleTheme => {
                self.renderer.toggle_theme();
                tracing::debug!(theme = self.renderer.theme().name(), "theme toggled");
                false
            }
            KeyAction::Quit => {
                self.should_quit = true;
                false
            }
            KeyAction::None => false,
        }
    }

    /// Advance the game and bring the clocks in line with what happened
    fn on_tick(&mut self, tick_clock: &mut Clock, countdown_clock: &mut Clock) -> TickOutcome {
        let outcome = self.update_game();
        if outcome.speed_changed {
            tick_clock.rearm(self.engine.tick_interval());
        }
        // A fresh power-up gets whole seconds, not the tail of the current one
        if outcome.collected_power_up {
            countdown_clock.restart();
        }
        outcome
    }

    fn update_game(&mut self) -> TickOutcome {
        let before = self.engine.phase();
        let outcome = self.engine.tick();
        self.sync_metrics(before);
        outcome
    }

    /// Keep the play clock and session stats in step with phase changes
    fn sync_metrics(&mut self, before: Phase) {
        let after = self.engine.phase();
        if before == after {
            return;
        }

        match after {
            Phase::Running => self.metrics.resume_clock(),
            Phase::Paused => self.metrics.pause_clock(),
            Phase::GameOver => self.metrics.on_game_over(self.engine.state().score),
            Phase::NotStarted => self.metrics.on_reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameState, Position, Snake};
    use crate::render::Theme;
    use tokio::time::Instant;

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::default(), Some(42))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.engine.phase(), Phase::NotStarted);
        assert_eq!(mode.engine.state().score, 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_space_starts_then_pauses() {
        let mut mode = mode();
        mode.apply_key_action(KeyAction::GameCommand(Command::StartOrPause));
        assert_eq!(mode.engine.phase(), Phase::Running);

        mode.apply_key_action(KeyAction::GameCommand(Command::StartOrPause));
        assert_eq!(mode.engine.phase(), Phase::Paused);
    }

    #[test]
    fn test_turn_reaches_engine() {
        let mut mode = mode();
        mode.apply_key_action(KeyAction::GameCommand(Command::StartOrPause));
        mode.apply_key_action(KeyAction::GameCommand(Command::Turn(Direction::Up)));
        assert_eq!(mode.engine.pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.apply_key_action(KeyAction::GameCommand(Command::StartOrPause));
        // Drive into the right wall
        while mode.engine.phase() == Phase::Running {
            mode.update_game();
        }
        assert_eq!(mode.metrics.games_played, 1);

        let needs_rearm = mode.apply_key_action(KeyAction::GameCommand(Command::Reset));

        assert!(needs_rearm);
        assert_eq!(mode.engine.phase(), Phase::NotStarted);
        assert_eq!(mode.engine.state().score, 0);
    }

    #[test]
    fn test_theme_and_quit() {
        let mut mode = mode();
        assert!(!mode.apply_key_action(KeyAction::ToggleTheme));
        assert_eq!(mode.renderer.theme(), Theme::Light);

        mode.apply_key_action(KeyAction::Quit);
        assert!(mode.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_rearms_clocks() {
        let mut state = GameState::new(
            Snake::new(Position::new(10, 10), Direction::Right, 1),
            Position::new(11, 10),
            20,
            150,
        );
        state.score = 40;
        state.power_up = Some(Position::new(12, 10));
        state.phase = Phase::Running;
        let engine = GameEngine::with_state(GameConfig::default(), state, 3);
        let mut mode = HumanMode::from_engine(engine);

        let mut tick_clock = Clock::new(mode.engine.tick_interval());
        let mut countdown_clock = Clock::new(COUNTDOWN_PERIOD);
        tokio::time::advance(Duration::from_millis(600)).await;

        // Food at 50 points speeds the game up
        let outcome = mode.on_tick(&mut tick_clock, &mut countdown_clock);
        assert!(outcome.speed_changed);
        assert_eq!(tick_clock.period(), Duration::from_millis(145));

        // The power-up restarts the countdown instead of sharing its second
        let outcome = mode.on_tick(&mut tick_clock, &mut countdown_clock);
        assert!(outcome.collected_power_up);
        let start = Instant::now();
        countdown_clock.tick().await;
        assert_eq!(start.elapsed(), COUNTDOWN_PERIOD);
    }
}
