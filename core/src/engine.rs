use crate::constants::*;
use crate::error::GameError;
use crate::rules::MoveRules;
use crate::state::{GameState, Position, Snake, Tick};
use crate::{IdGenerator, RandomSource};

/// Create a fresh game on a `width` x `height` board.
///
/// The snake starts at the origin heading right, the fruit lands on a
/// uniformly random cell. The fruit cell is not excluded from the snake's
/// starting cell.
pub fn start_new_game(
    width: i64,
    height: i64,
    rng: &impl RandomSource,
    ids: &impl IdGenerator,
) -> Result<GameState, GameError> {
    if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
        return Err(GameError::InvalidDimensions);
    }
    // Bounded by MAX_DIMENSION above
    let (width, height) = (width as i32, height as i32);

    let fruit = random_position(width, height, rng)?;
    let game_id = ids.generate_id();
    if game_id.is_empty() {
        return Err(GameError::Internal("id generator returned an empty id".into()));
    }

    Ok(GameState {
        game_id,
        width,
        height,
        score: 0,
        fruit,
        snake: Snake {
            x: INITIAL_SNAKE_X,
            y: INITIAL_SNAKE_Y,
            vel_x: INITIAL_VEL_X,
            vel_y: INITIAL_VEL_Y,
        },
    })
}

/// Replay `ticks` on `state` and return the resulting state.
///
/// Ticks are applied strictly in order. Per tick: velocity domain, move
/// legality, apply heading and position, bounds, and on the last tick only,
/// the fruit check. The first failure aborts the batch and the error is all
/// the caller gets back. An empty batch returns the state unchanged.
pub fn validate_ticks(
    mut state: GameState,
    ticks: &[Tick],
    rules: MoveRules,
    rng: &impl RandomSource,
) -> Result<GameState, GameError> {
    if ticks.len() > MAX_TICKS {
        return Err(GameError::MalformedRequest(format!(
            "too many ticks: {} (max {})",
            ticks.len(),
            MAX_TICKS
        )));
    }
    state.check()?;

    let last = ticks.len().saturating_sub(1);
    for (i, tick) in ticks.iter().enumerate() {
        rules.check(&state.snake, tick)?;

        // In-bounds position plus a unit step cannot overflow i32
        state.snake.vel_x = tick.vel_x;
        state.snake.vel_y = tick.vel_y;
        state.snake.x += tick.vel_x;
        state.snake.y += tick.vel_y;

        if !state.contains(state.snake.x, state.snake.y) {
            return Err(GameError::GameOver);
        }

        if i == last {
            if state.snake.position() != state.fruit {
                return Err(GameError::FruitNotFound);
            }
            state.score = state
                .score
                .checked_add(1)
                .ok_or_else(|| GameError::MalformedRequest(format!("score {} cannot grow", state.score)))?;
            state.fruit = random_position(state.width, state.height, rng)?;
        }
    }

    Ok(state)
}

/// Draw a fruit cell uniformly over the board.
pub fn random_position(width: i32, height: i32, rng: &impl RandomSource) -> Result<Position, GameError> {
    let pos = Position {
        x: rng.random_int(0, width - 1),
        y: rng.random_int(0, height - 1),
    };
    if pos.x < 0 || pos.y < 0 || pos.x >= width || pos.y >= height {
        return Err(GameError::Internal(format!(
            "random source produced ({}, {}) outside {}x{}",
            pos.x, pos.y, width, height
        )));
    }
    Ok(pos)
}
