// Limits shared by the validator and anything that builds requests for it.

/// Maximum number of ticks accepted in a single validation batch
pub const MAX_TICKS: usize = 10_000;

/// Largest accepted board width or height (cells)
pub const MAX_DIMENSION: i64 = 10_000;

/// Snake head position at game start
pub const INITIAL_SNAKE_X: i32 = 0;
pub const INITIAL_SNAKE_Y: i32 = 0;

/// Snake heading at game start: moving right
pub const INITIAL_VEL_X: i32 = 1;
pub const INITIAL_VEL_Y: i32 = 0;

/// Velocity components must be one of these
pub const VELOCITY_DOMAIN: [i32; 3] = [-1, 0, 1];

/// Response message for an accepted tick batch
pub const VALID_TICKS_MESSAGE: &str = "Valid state & ticks";

/// Response message for a freshly started game
pub const NEW_GAME_MESSAGE: &str = "New game started";
