use thiserror::Error;

/// Every way a game operation can be rejected.
///
/// Detection is synchronous and aborts the whole operation; no partial
/// state is ever handed back alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Width or height missing, non-numeric, below 1 or above the limit.
    #[error("Invalid width or height")]
    InvalidDimensions,

    /// Structurally invalid request: missing fields, bad state, oversized batch.
    #[error("Invalid request: {0}")]
    MalformedRequest(String),

    /// A velocity component outside {-1, 0, 1}.
    #[error("Invalid velocity values")]
    InvalidVelocity,

    /// Illegal heading change for the active ruleset.
    #[error("Invalid move")]
    InvalidMove,

    /// The snake left the grid.
    #[error("Game Over")]
    GameOver,

    /// The batch did not finish on the fruit.
    #[error("Fruit not found")]
    FruitNotFound,

    /// Unexpected failure. The detail is for logs only.
    #[error("Internal server error")]
    Internal(String),
}

impl GameError {
    /// Stable machine-readable name, used in logs and by the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::InvalidDimensions => "invalid_dimensions",
            GameError::MalformedRequest(_) => "malformed_request",
            GameError::InvalidVelocity => "invalid_velocity",
            GameError::InvalidMove => "invalid_move",
            GameError::GameOver => "game_over",
            GameError::FruitNotFound => "fruit_not_found",
            GameError::Internal(_) => "internal",
        }
    }

    /// Whether the error ends the game rather than rejecting one request.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameError::GameOver)
    }
}
