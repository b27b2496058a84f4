use std::collections::HashSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::{Command, Direction},
    config::GameConfig,
    difficulty,
    placement::random_free_cell,
    snapshot::GameSnapshot,
    state::{CollisionType, GameOverReason, GameState, Phase, Position, Snake},
};

/// What happened during a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Whether the snake actually advanced
    pub moved: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    pub spawned_bomb: bool,
    pub spawned_power_up: bool,
    pub collected_power_up: bool,
    /// Whether the tick interval changed; the clock must be re-armed
    pub speed_changed: bool,
    /// Set when this tick ended the game
    pub game_over: Option<GameOverReason>,
}

/// The game engine that owns the state and applies every transition
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    state: GameState,
    pending_direction: Option<Direction>,
}

impl GameEngine {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose random placements are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Resume from an existing state, e.g. to replay a position
    pub fn with_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        debug_assert!(!state.snake.is_empty());
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            state,
            pending_direction: None,
        }
    }

    fn from_rng(config: GameConfig, rng: StdRng) -> Self {
        let state = Self::initial_state(&config);
        Self {
            config,
            rng,
            state,
            pending_direction: None,
        }
    }

    /// Fixed starting layout: a one-cell snake in the centre heading right,
    /// food three quarters of the way across
    fn initial_state(config: &GameConfig) -> GameState {
        let centre = (config.grid_size / 2) as i32;
        let food = (config.grid_size * 3 / 4) as i32;

        let snake = Snake::new(Position::new(centre, centre), Direction::Right, 1);

        GameState::new(
            snake,
            Position::new(food, food),
            config.grid_size,
            difficulty::speed_for_score(config, 0),
        )
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Direction the snake is currently travelling in
    pub fn direction(&self) -> Direction {
        self.state.snake.direction
    }

    /// Latest accepted direction request not yet consumed by a tick
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Interval at which the clock should call `tick`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.speed_ms)
    }

    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            grid_size: self.state.grid_size,
            snake: &self.state.snake.body,
            food: self.state.food,
            bombs: &self.state.bombs,
            power_up: self.state.power_up,
            score: self.state.score,
            level: difficulty::level_for_score(&self.config, self.state.score),
            speed_ms: self.state.speed_ms,
            phase: self.state.phase,
            game_over_reason: self.state.game_over_reason,
            invincible: self.state.invincibility.is_active(),
            invincibility_secs: self.state.invincibility.remaining_secs(),
        }
    }

    /// Dispatch a player command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => {
                self.handle_direction(direction);
            }
            Command::StartOrPause => {
                if self.state.phase == Phase::NotStarted {
                    self.start();
                } else {
                    self.toggle_pause();
                }
            }
            Command::Reset => self.reset(),
        }
    }

    /// Begin play; only valid before the first tick
    pub fn start(&mut self) -> bool {
        if self.state.phase != Phase::NotStarted {
            return false;
        }
        self.state.phase = Phase::Running;
        tracing::info!("game started");
        true
    }

    /// Switch between running and paused; anything else is left alone
    pub fn toggle_pause(&mut self) -> bool {
        self.state.phase = match self.state.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::NotStarted | Phase::GameOver => return false,
        };
        tracing::debug!(phase = ?self.state.phase, "pause toggled");
        true
    }

    /// Record a direction request for the next tick
    ///
    /// Requests outside `Running` and reversals of the current heading are
    /// dropped. Only the latest accepted request is kept.
    pub fn handle_direction(&mut self, direction: Direction) -> bool {
        if self.state.phase != Phase::Running || self.direction().is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Reinitialise everything and go back to `NotStarted`
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config);
        self.pending_direction = None;
        tracing::info!("game reset");
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.state.phase != Phase::Running {
            return outcome;
        }

        // Re-check against the heading in effect now, not when the key was pressed
        if let Some(next) = self.pending_direction.take() {
            if !self.direction().is_opposite(next) {
                self.state.snake.direction = next;
            }
        }

        let new_head = self.state.snake.head().moved_in_direction(self.direction());

        if let Some(collision) = self.check_collision(new_head) {
            let reason = GameOverReason::Collision(collision);
            self.end_game(reason);
            outcome.game_over = Some(reason);
            return outcome;
        }

        self.state.snake.push_head(new_head);
        outcome.moved = true;

        if new_head == self.state.food {
            outcome.ate_food = true;
            self.eat_food(&mut outcome);
            if outcome.game_over.is_some() {
                return outcome;
            }
        } else {
            self.state.snake.pop_tail();
        }

        if self.state.power_up == Some(new_head) {
            self.state.power_up = None;
            self.state
                .invincibility
                .activate(self.config.invincibility_secs);
            outcome.collected_power_up = true;
            tracing::info!(secs = self.config.invincibility_secs, "power-up collected");
        }

        debug_assert!(!self.state.snake.is_empty());
        debug_assert!(self.state.is_in_bounds(self.state.snake.head()));

        outcome
    }

    /// One second of invincibility elapses; returns true when it just ran out
    pub fn count_down_invincibility(&mut self) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        let expired = self.state.invincibility.count_down();
        if expired {
            tracing::info!("invincibility expired");
        }
        expired
    }

    /// Check if the new head position causes a fatal collision
    ///
    /// Order matters: wall, then body, then bombs. The body is checked before
    /// it grows, so moving into the current tail cell is fatal too.
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.state.is_occupied_by_snake(pos) && !self.state.invincibility.is_active() {
            return Some(CollisionType::SelfCollision);
        }

        if self.state.is_bomb(pos) {
            return Some(CollisionType::Bomb);
        }

        None
    }

    fn eat_food(&mut self, outcome: &mut TickOutcome) {
        let previous_score = self.state.score;
        self.state.score = previous_score.saturating_add(self.config.food_reward);
        tracing::debug!(score = self.state.score, "food eaten");

        // The old food cell is now the head, so only the rest of the board counts
        let occupied: HashSet<Position> = self
            .state
            .snake
            .body
            .iter()
            .copied()
            .chain(self.state.bombs.iter().copied())
            .chain(self.state.power_up)
            .collect();
        match random_free_cell(&mut self.rng, self.config.grid_size, &occupied) {
            Some(food) => self.state.food = food,
            None => {
                self.end_game(GameOverReason::BoardFull);
                outcome.game_over = Some(GameOverReason::BoardFull);
                return;
            }
        }

        if difficulty::crosses_bomb_threshold(&self.config, previous_score, self.state.score) {
            if let Some(bomb) = self.free_cell() {
                self.state.bombs.push(bomb);
                outcome.spawned_bomb = true;
                tracing::info!(x = bomb.x, y = bomb.y, bombs = self.state.bombs.len(), "bomb placed");
            }
        }

        let speed = difficulty::speed_for_score(&self.config, self.state.score);
        if speed != self.state.speed_ms {
            tracing::info!(from = self.state.speed_ms, to = speed, "speed changed");
            self.state.speed_ms = speed;
            outcome.speed_changed = true;
        }

        if self.config.power_ups_enabled
            && self.state.power_up.is_none()
            && self.rng.gen_bool(self.config.power_up_chance)
        {
            if let Some(power_up) = self.free_cell() {
                self.state.power_up = Some(power_up);
                outcome.spawned_power_up = true;
                tracing::debug!(x = power_up.x, y = power_up.y, "power-up placed");
            }
        }
    }

    /// A random cell clear of the snake, food, bombs and power-up
    fn free_cell(&mut self) -> Option<Position> {
        let occupied: HashSet<Position> = self.state.occupied_cells().collect();
        random_free_cell(&mut self.rng, self.config.grid_size, &occupied)
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.state.phase = Phase::GameOver;
        self.state.game_over_reason = Some(reason);
        self.pending_direction = None;
        tracing::info!(?reason, score = self.state.score, "game over");
    }
}
