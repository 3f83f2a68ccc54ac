// Replays saved validation requests from tests/fixtures through the service
use host::{parse_request, GameService};
use snake_core::{GameError, IdGenerator, MoveRules, Position, RandomSource, ValidateRequest};
use std::sync::atomic::{AtomicU32, Ordering};

/// Always places fruit in the bottom-right corner.
struct CornerRandom;

impl RandomSource for CornerRandom {
    fn random_int(&self, _min: i32, max: i32) -> i32 {
        max
    }
}

struct SequentialIds(AtomicU32);

impl IdGenerator for SequentialIds {
    fn generate_id(&self) -> String {
        format!("seq-{}", self.0.fetch_add(1, Ordering::Relaxed))
    }
}

fn service(rules: MoveRules) -> GameService<CornerRandom, SequentialIds> {
    GameService::with_capabilities(rules, CornerRandom, SequentialIds(AtomicU32::new(0)))
}

fn load_request(name: &str) -> ValidateRequest {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    let raw = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));

    parse_request(&raw).unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
}

#[test]
fn test_batch_ending_on_fruit_scores() {
    let req = load_request("eat_fruit.json");

    let resp = service(MoveRules::Classic)
        .validate_request(req)
        .expect("Batch should be accepted");

    assert_eq!(resp.message, "Valid state & ticks");
    let state = resp.game_state.expect("Accepted batch returns the state");
    assert_eq!(state.game_id, "7b0e2c1a-eat");
    assert_eq!(state.score, 3, "Expected score to go from 2 to 3");
    assert_eq!((state.snake.x, state.snake.y), (2, 1));
    assert_eq!((state.snake.vel_x, state.snake.vel_y), (0, 1), "Heading follows the last tick");
    assert_eq!(state.fruit, Position { x: 4, y: 4 }, "Fruit respawned via the random source");
}

#[test]
fn test_same_batch_under_axis_aligned_rules() {
    let req = load_request("eat_fruit.json");

    let resp = service(MoveRules::AxisAligned)
        .validate_request(req)
        .expect("Axis-aligned path passes strict rules too");

    assert_eq!(resp.game_state.map(|s| s.score), Some(3));
}

#[test]
fn test_reversal_rejected() {
    let req = load_request("reversal.json");

    let err = service(MoveRules::Classic).validate_request(req).unwrap_err();
    assert_eq!(err, GameError::InvalidMove);
}

#[test]
fn test_running_into_wall_ends_game() {
    let req = load_request("wall.json");

    let err = service(MoveRules::Classic).validate_request(req).unwrap_err();
    assert_eq!(err, GameError::GameOver);
    assert!(err.is_terminal());
}

#[test]
fn test_batch_missing_fruit_rejected() {
    let req = load_request("missed_fruit.json");

    let err = service(MoveRules::Classic).validate_request(req).unwrap_err();
    assert_eq!(err, GameError::FruitNotFound);
}

#[test]
fn test_diagonal_moves_depend_on_rules() {
    let classic = service(MoveRules::Classic)
        .validate_request(load_request("diagonal.json"))
        .expect("Classic rules allow diagonal ticks");
    let state = classic.game_state.expect("state");
    assert_eq!((state.snake.x, state.snake.y), (2, 2));
    assert_eq!(state.score, 1);

    let strict = service(MoveRules::AxisAligned)
        .validate_request(load_request("diagonal.json"))
        .unwrap_err();
    assert_eq!(strict, GameError::InvalidMove);
}

#[test]
fn test_bad_velocity_after_legal_tick() {
    let req = load_request("bad_velocity.json");

    let err = service(MoveRules::Classic).validate_request(req).unwrap_err();
    assert_eq!(err, GameError::InvalidVelocity);
}

#[test]
fn test_new_game_then_eat() {
    let svc = service(MoveRules::Classic);
    let state = svc.start_new_game(3, 1).expect("3x1 board is valid");

    assert_eq!(state.game_id, "seq-0");
    assert_eq!(state.fruit, Position { x: 2, y: 0 });
    assert_eq!(state.score, 0);

    let ticks: Vec<snake_core::Tick> = serde_json::from_str(r#"[{"velX":1,"velY":0},{"velX":1,"velY":0}]"#)
        .expect("ticks parse");
    let resp = svc.validate_ticks(state, &ticks).expect("Snake reaches the fruit");
    let next = resp.game_state.expect("state");
    assert_eq!(next.score, 1);
    assert_eq!(next.game_id, "seq-0", "Game id never changes");

    let again = svc.start_new_game(3, 1).expect("second game");
    assert_ne!(again.game_id, next.game_id);
}

#[test]
fn test_new_game_response_envelope() {
    let resp = service(MoveRules::Classic)
        .start_new_game_response(2, 2)
        .expect("valid board");
    assert_eq!(resp.message, "New game started");
    assert!(resp.game_state.is_some());

    let err = service(MoveRules::Classic).start_new_game(0, 5).unwrap_err();
    assert_eq!(err, GameError::InvalidDimensions);
    let err = service(MoveRules::Classic).start_new_game(-1, 5).unwrap_err();
    assert_eq!(err, GameError::InvalidDimensions);
}
