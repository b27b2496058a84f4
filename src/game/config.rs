use anyhow::{Result, bail};

/// Largest grid that still fits a terminal and keeps per-frame work small
pub const MAX_GRID_SIZE: usize = 100;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Width and height of the square game grid
    pub grid_size: usize,

    // Pacing
    /// Tick interval at score 0, in milliseconds
    pub initial_speed_ms: u64,
    /// Fastest tick interval the game will ever reach
    pub min_speed_ms: u64,
    /// How much the tick interval shrinks at each speed threshold
    pub speed_decrement_ms: u64,
    /// Score distance between two speed thresholds (also one "level")
    pub speed_score_interval: u32,

    // Scoring
    /// Points awarded for eating food
    pub food_reward: u32,

    // Hazards
    /// Whether bombs are spawned as the score grows
    pub bombs_enabled: bool,
    /// Score distance between two bomb spawns
    pub bomb_score_interval: u32,
    /// Whether power-ups may appear after eating food
    pub power_ups_enabled: bool,
    /// Probability of a power-up appearing when food is eaten
    pub power_up_chance: f64,
    /// How long a collected power-up keeps the snake invincible
    pub invincibility_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_speed_ms: 150,
            min_speed_ms: 50,
            speed_decrement_ms: 5,
            speed_score_interval: 50,
            food_reward: 10,
            bombs_enabled: true,
            bomb_score_interval: 30,
            power_ups_enabled: true,
            power_up_chance: 0.2,
            invincibility_secs: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Plain snake: no bombs, no power-ups
    pub fn classic() -> Self {
        Self {
            bombs_enabled: false,
            power_ups_enabled: false,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 4 {
            bail!("grid size must be at least 4, got {}", self.grid_size);
        }
        if self.grid_size > MAX_GRID_SIZE {
            bail!(
                "grid size must be at most {MAX_GRID_SIZE}, got {}",
                self.grid_size
            );
        }
        if self.min_speed_ms == 0 {
            bail!("minimum speed must be positive");
        }
        if self.min_speed_ms > self.initial_speed_ms {
            bail!(
                "minimum speed {}ms is slower than the initial speed {}ms",
                self.min_speed_ms,
                self.initial_speed_ms
            );
        }
        if self.speed_score_interval == 0 || self.bomb_score_interval == 0 {
            bail!("score intervals must be positive");
        }
        if self.food_reward == 0 {
            bail!("food reward must be positive");
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            bail!(
                "power-up chance must be within [0, 1], got {}",
                self.power_up_chance
            );
        }
        Ok(())
    }
}
