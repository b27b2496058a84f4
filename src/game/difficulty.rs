//! Scoring and pacing rules
//!
//! Everything here is a pure function of the cumulative score, so a game
//! restored to a given score always runs at the same pace.

use super::config::GameConfig;

/// Tick interval in milliseconds for a given score
pub fn speed_for_score(config: &GameConfig, score: u32) -> u64 {
    let thresholds = u64::from(score / config.speed_score_interval);
    config
        .initial_speed_ms
        .saturating_sub(thresholds.saturating_mul(config.speed_decrement_ms))
        .max(config.min_speed_ms)
}

/// Level shown to the player, starting at 1
pub fn level_for_score(config: &GameConfig, score: u32) -> u32 {
    score / config.speed_score_interval + 1
}

/// How many bombs a game should have spawned once it reaches `score`
pub fn bombs_due(config: &GameConfig, score: u32) -> u32 {
    if config.bombs_enabled {
        score / config.bomb_score_interval
    } else {
        0
    }
}

/// Whether going from `before` to `after` crosses a bomb threshold
pub fn crosses_bomb_threshold(config: &GameConfig, before: u32, after: u32) -> bool {
    bombs_due(config, after) > bombs_due(config, before)
}
