use super::state::{GameOverReason, Phase, Position};

/// What occupies a single cell, as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Head,
    Body,
    Food,
    Bomb,
    PowerUp,
    Empty,
}

/// Read-only view of the engine handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot<'a> {
    pub grid_size: usize,
    /// Snake cells, head first
    pub snake: &'a [Position],
    pub food: Position,
    pub bombs: &'a [Position],
    pub power_up: Option<Position>,
    pub score: u32,
    pub level: u32,
    pub speed_ms: u64,
    pub phase: Phase,
    pub game_over_reason: Option<GameOverReason>,
    pub invincible: bool,
    pub invincibility_secs: u32,
}

impl GameSnapshot<'_> {
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    /// Classify a cell; the head wins over everything else
    pub fn cell_at(&self, pos: Position) -> Cell {
        if pos == self.head() {
            Cell::Head
        } else if self.snake[1..].contains(&pos) {
            Cell::Body
        } else if pos == self.food {
            Cell::Food
        } else if self.bombs.contains(&pos) {
            Cell::Bomb
        } else if self.power_up == Some(pos) {
            Cell::PowerUp
        } else {
            Cell::Empty
        }
    }
}
