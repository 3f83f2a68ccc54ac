use serde::{Deserialize, Serialize};

use crate::constants::VELOCITY_DOMAIN;
use crate::error::GameError;
use crate::state::{Snake, Tick};

/// Movement legality ruleset applied to every tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MoveRules {
    /// Only an immediate 180° reversal is illegal; diagonal and null ticks pass
    Classic,
    /// Classic, and every tick must move along exactly one axis
    AxisAligned,
}

impl Default for MoveRules {
    fn default() -> Self {
        MoveRules::Classic
    }
}

impl std::str::FromStr for MoveRules {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(MoveRules::Classic),
            "axis-aligned" | "axis_aligned" | "strict" => Ok(MoveRules::AxisAligned),
            _ => Err(format!(
                "Invalid move rules: '{}'. Must be 'classic' or 'axis-aligned'",
                s
            )),
        }
    }
}

impl std::fmt::Display for MoveRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveRules::Classic => write!(f, "classic"),
            MoveRules::AxisAligned => write!(f, "axis-aligned"),
        }
    }
}

impl MoveRules {
    /// Check a tick against the snake's current heading.
    ///
    /// Runs the velocity domain check first, then legality, so a tick that is
    /// both out of domain and a reversal reports `InvalidVelocity`.
    pub fn check(&self, heading: &Snake, tick: &Tick) -> Result<(), GameError> {
        if !VELOCITY_DOMAIN.contains(&tick.vel_x) || !VELOCITY_DOMAIN.contains(&tick.vel_y) {
            return Err(GameError::InvalidVelocity);
        }

        if is_reversal(heading, tick) {
            return Err(GameError::InvalidMove);
        }

        if *self == MoveRules::AxisAligned && !is_axis_aligned(tick) {
            return Err(GameError::InvalidMove);
        }

        Ok(())
    }
}

fn is_reversal(heading: &Snake, tick: &Tick) -> bool {
    (tick.vel_x != 0 && heading.vel_x == -tick.vel_x) || (tick.vel_y != 0 && heading.vel_y == -tick.vel_y)
}

fn is_axis_aligned(tick: &Tick) -> bool {
    (tick.vel_x == 0) != (tick.vel_y == 0)
}
