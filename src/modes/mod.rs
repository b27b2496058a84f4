pub mod clock;
pub mod human;
pub mod terminal;

pub use clock::Clock;
pub use human::HumanMode;
pub use terminal::TerminalGuard;
