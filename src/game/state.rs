use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position lies on a square grid of the given size
    pub fn is_within(&self, grid_size: usize) -> bool {
        let size = grid_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least a head");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if position collides with any segment, head and tail included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front without touching the tail
    pub fn push_head(&mut self, new_head: Position) {
        self.body.insert(0, new_head);
    }

    /// Drop the last segment; the head is never removed
    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake ran into a bomb
    Bomb,
}

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Why a game reached `Phase::GameOver`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Collision(CollisionType),
    /// No free cell was left for the next piece of food
    BoardFull,
}

/// Remaining invincibility granted by a power-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Invincibility {
    remaining_secs: u32,
}

impl Invincibility {
    pub fn activate(&mut self, secs: u32) {
        self.remaining_secs = secs;
    }

    pub fn is_active(&self) -> bool {
        self.remaining_secs > 0
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Take one second off; returns true when this call ended the effect
    pub fn count_down(&mut self) -> bool {
        if self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        self.remaining_secs == 0
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub bombs: Vec<Position>,
    pub power_up: Option<Position>,
    pub grid_size: usize,
    pub score: u32,
    pub speed_ms: u64,
    pub invincibility: Invincibility,
    pub phase: Phase,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameState {
    /// Create a new game state, not started yet
    pub fn new(snake: Snake, food: Position, grid_size: usize, speed_ms: u64) -> Self {
        Self {
            snake,
            food,
            bombs: Vec::new(),
            power_up: None,
            grid_size,
            score: 0,
            speed_ms,
            invincibility: Invincibility::default(),
            phase: Phase::NotStarted,
            game_over_reason: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.grid_size)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn is_bomb(&self, pos: Position) -> bool {
        self.bombs.contains(&pos)
    }

    /// Every cell currently taken by something on the board
    pub fn occupied_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake
            .body
            .iter()
            .copied()
            .chain(std::iter::once(self.food))
            .chain(self.bombs.iter().copied())
            .chain(self.power_up)
    }
}
