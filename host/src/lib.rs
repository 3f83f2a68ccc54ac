use rand::Rng;
use snake_core::constants::{NEW_GAME_MESSAGE, VALID_TICKS_MESSAGE};
use snake_core::{
    GameError, GameState, IdGenerator, MoveRules, RandomSource, Tick, ValidateRequest, ValidateResponse,
};

/// Fruit placement backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn random_int(&self, min: i32, max: i32) -> i32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Random (v4) UUID game ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Entry point for both game operations.
///
/// Holds no game state: every call works on what the caller passes in.
/// The capabilities are generic so tests can pin down fruit placement and ids.
#[derive(Debug, Clone)]
pub struct GameService<R = ThreadRandom, G = UuidIds> {
    rules: MoveRules,
    rng: R,
    ids: G,
}

impl GameService {
    pub fn new(rules: MoveRules) -> Self {
        Self::with_capabilities(rules, ThreadRandom, UuidIds)
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new(MoveRules::default())
    }
}

impl<R: RandomSource, G: IdGenerator> GameService<R, G> {
    pub fn with_capabilities(rules: MoveRules, rng: R, ids: G) -> Self {
        Self { rules, rng, ids }
    }

    pub fn rules(&self) -> MoveRules {
        self.rules
    }

    /// Start a game on a `width` x `height` board.
    pub fn start_new_game(&self, width: i64, height: i64) -> Result<GameState, GameError> {
        match snake_core::start_new_game(width, height, &self.rng, &self.ids) {
            Ok(state) => {
                tracing::info!(
                    "Started game {} ({}x{}), fruit at ({}, {})",
                    state.game_id,
                    state.width,
                    state.height,
                    state.fruit.x,
                    state.fruit.y
                );
                Ok(state)
            }
            Err(e) => {
                tracing::warn!("Rejected new game {}x{}: {}", width, height, e.kind());
                Err(e)
            }
        }
    }

    /// Start a game and wrap it in the response envelope.
    pub fn start_new_game_response(&self, width: i64, height: i64) -> Result<ValidateResponse, GameError> {
        self.start_new_game(width, height)
            .map(|state| ValidateResponse::ok(NEW_GAME_MESSAGE, state))
    }

    /// Replay a tick batch against a client-held state.
    pub fn validate_ticks(&self, state: GameState, ticks: &[Tick]) -> Result<ValidateResponse, GameError> {
        let game_id = state.game_id.clone();
        tracing::debug!(
            "Validating {} ticks for game {} with {} rules",
            ticks.len(),
            game_id,
            self.rules
        );

        match snake_core::validate_ticks(state, ticks, self.rules, &self.rng) {
            Ok(next) => {
                tracing::info!(
                    "Accepted {} ticks for game {} (score: {})",
                    ticks.len(),
                    game_id,
                    next.score
                );
                Ok(ValidateResponse::ok(VALID_TICKS_MESSAGE, next))
            }
            Err(e) => {
                match &e {
                    GameError::Internal(detail) => {
                        tracing::error!("Internal failure validating game {}: {}", game_id, detail)
                    }
                    _ => tracing::warn!("Rejected ticks for game {}: {}", game_id, e.kind()),
                }
                Err(e)
            }
        }
    }

    pub fn validate_request(&self, req: ValidateRequest) -> Result<ValidateResponse, GameError> {
        self.validate_ticks(req.state, &req.ticks)
    }
}

/// Parse a JSON validation request.
///
/// Any structural problem (bad JSON, missing `state` or `ticks`, `ticks` not
/// an array, non-integer velocities) is a `MalformedRequest`.
pub fn parse_request(raw: &str) -> Result<ValidateRequest, GameError> {
    serde_json::from_str(raw).map_err(|e| GameError::MalformedRequest(e.to_string()))
}
