use serde::{Deserialize, Serialize};

use crate::constants::VELOCITY_DOMAIN;
use crate::error::GameError;

/// A grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Snake head and heading. The model tracks no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snake {
    pub x: i32,
    pub y: i32,
    pub vel_x: i32,
    pub vel_y: i32,
}

impl Snake {
    pub fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }
}

/// One proposed movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    pub vel_x: i32,
    pub vel_y: i32,
}

impl Tick {
    pub const fn new(vel_x: i32, vel_y: i32) -> Self {
        Self { vel_x, vel_y }
    }
}

/// Full game snapshot. Owned by the client and resubmitted on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game_id: String,
    pub width: i32,
    pub height: i32,
    pub score: u32,
    pub fruit: Position,
    pub snake: Snake,
}

impl GameState {
    /// Inclusive bounds test against `[0, width-1] x [0, height-1]`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Sanity-check a state received from a client before replaying on it.
    pub fn check(&self) -> Result<(), GameError> {
        if self.width < 1 || self.height < 1 {
            return Err(GameError::MalformedRequest(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.contains(self.fruit.x, self.fruit.y) {
            return Err(GameError::MalformedRequest(format!(
                "fruit at ({}, {}) is outside the board",
                self.fruit.x, self.fruit.y
            )));
        }
        if !VELOCITY_DOMAIN.contains(&self.snake.vel_x) || !VELOCITY_DOMAIN.contains(&self.snake.vel_y) {
            return Err(GameError::InvalidVelocity);
        }
        // A snake already off the board has lost.
        if !self.contains(self.snake.x, self.snake.y) {
            return Err(GameError::GameOver);
        }
        Ok(())
    }
}

/// Body of a validation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub state: GameState,
    pub ticks: Vec<Tick>,
}

/// Success envelope for game operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameState>,
}

impl ValidateResponse {
    pub fn ok(message: &str, state: GameState) -> Self {
        Self {
            message: message.into(),
            game_state: Some(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: i32, height: i32) -> GameState {
        GameState {
            game_id: "g".into(),
            width,
            height,
            score: 0,
            fruit: Position { x: 0, y: 0 },
            snake: Snake { x: 0, y: 0, vel_x: 1, vel_y: 0 },
        }
    }

    #[test]
    fn test_contains_is_inclusive_of_last_cell() {
        let state = board(3, 2);
        assert!(state.contains(0, 0));
        assert!(state.contains(2, 1));
        assert!(!state.contains(3, 1));
        assert!(!state.contains(2, 2));
        assert!(!state.contains(-1, 0));
    }

    #[test]
    fn test_check_rejects_fruit_off_board() {
        let mut state = board(3, 3);
        state.fruit = Position { x: 3, y: 0 };
        assert!(matches!(state.check(), Err(GameError::MalformedRequest(_))));
    }

    #[test]
    fn test_check_rejects_empty_board() {
        let state = board(0, 3);
        assert!(matches!(state.check(), Err(GameError::MalformedRequest(_))));
    }

    #[test]
    fn test_check_snake_off_board_is_game_over() {
        let mut state = board(3, 3);
        state.snake.y = -1;
        assert_eq!(state.check(), Err(GameError::GameOver));
    }

    #[test]
    fn test_check_rejects_bad_heading() {
        let mut state = board(3, 3);
        state.snake.vel_x = 2;
        assert_eq!(state.check(), Err(GameError::InvalidVelocity));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(board(4, 5)).unwrap();
        assert_eq!(json["gameId"], "g");
        assert_eq!(json["snake"]["velX"], 1);
        assert_eq!(json["snake"]["velY"], 0);

        let tick: Tick = serde_json::from_str(r#"{"velX":-1,"velY":0}"#).unwrap();
        assert_eq!(tick, Tick::new(-1, 0));
    }

    #[test]
    fn test_response_omits_missing_state() {
        let resp = ValidateResponse {
            message: "nothing".into(),
            game_state: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"message":"nothing"}"#);
    }
}
