pub mod constants;
pub mod engine;
pub mod error;
pub mod rules;
pub mod state;

pub use engine::{random_position, start_new_game, validate_ticks};
pub use error::GameError;
pub use rules::MoveRules;
pub use state::{GameState, Position, Snake, Tick, ValidateRequest, ValidateResponse};

/// Source of uniformly distributed integers used for fruit placement.
///
/// Implementations must return a value in the inclusive range `[min, max]`.
/// The server uses a thread-local generator; tests substitute a fixed sequence.
pub trait RandomSource {
    fn random_int(&self, min: i32, max: i32) -> i32;
}

/// Opaque unique identifier allocation for new games.
pub trait IdGenerator {
    fn generate_id(&self) -> String;
}
