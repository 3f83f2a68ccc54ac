use anyhow::{bail, Context};
use host::{parse_request, GameService};
use snake_core::{GameState, MoveRules, ValidateRequest, ValidateResponse};
use std::env;
use std::fs;
use std::str::FromStr;
use std::time::Instant;

// Request files larger than this are refused before reading
const MAX_REQUEST_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    println!("🐍 Snake Tick Replay");
    println!("{}", "=".repeat(70));
    println!();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "new" => {
            if args.len() < 4 {
                eprintln!("Usage: {} new <width> <height> [output_file]", args[0]);
                std::process::exit(1);
            }

            let output_file = args.get(4).map(|s| s.as_str());

            new_command(&args[2], &args[3], output_file);
        }

        "validate" => {
            if args.len() < 3 {
                eprintln!("Usage: {} validate <request_file> [--rules <rules>] [output_file]", args[0]);
                eprintln!("Error: Missing required argument");
                std::process::exit(1);
            }

            let request_file = &args[2];

            let mut rules = MoveRules::default();
            let mut output_file_idx = 3;

            if args.len() > 3 && (args[3] == "--rules" || args[3] == "-r") {
                if args.len() < 5 {
                    eprintln!("❌ Error: --rules requires a value (classic|axis-aligned)");
                    std::process::exit(1);
                }
                rules = MoveRules::from_str(&args[4]).unwrap_or_else(|e| {
                    eprintln!("❌ Error: {}", e);
                    std::process::exit(1);
                });
                output_file_idx = 5;
            }

            let output_file = args.get(output_file_idx).map(|s| s.as_str());

            validate_command(request_file, rules, output_file);
        }

        "--help" | "-h" => {
            print_usage(&args[0]);
            std::process::exit(0);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  new <width> <height> [output_file]");
    eprintln!("      Start a new game and save its state");
    eprintln!("      - output_file: Optional file to save the state (JSON)");
    eprintln!("                     Defaults to: snake-state_<game_id>.json");
    eprintln!();
    eprintln!("  validate <request_file> [--rules <rules>] [output_file]");
    eprintln!("      Replay a tick batch against a saved state");
    eprintln!("      - request_file: JSON file with {{\"state\": ..., \"ticks\": [...]}}");
    eprintln!("      - --rules: Optional movement rules (classic|axis-aligned)");
    eprintln!("                 Default: classic");
    eprintln!("      - output_file: Optional file to save the resulting state (JSON)");
    eprintln!();
    eprintln!("Example workflow:");
    eprintln!("  1. Start a game:   {} new 20 20 game.json", program);
    eprintln!("  2. Add ticks to a request wrapping game.json, then:");
    eprintln!("                     {} validate request.json next.json", program);
}

fn new_command(width: &str, height: &str, output_file: Option<&str>) {
    let service = GameService::default();

    // Non-numeric input is rejected the same way as out-of-range input
    let width = width.trim().parse::<i64>().unwrap_or(0);
    let height = height.trim().parse::<i64>().unwrap_or(0);

    let (message, state) = match service.start_new_game_response(width, height) {
        Ok(ValidateResponse { message, game_state: Some(state) }) => (message, state),
        Ok(ValidateResponse { message, game_state: None }) => {
            eprintln!("❌ {}: no state returned", message);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let default_filename = format!("snake-state_{}.json", state.game_id);
    let file_to_save = output_file.unwrap_or(&default_filename);

    match save_json(&state, file_to_save) {
        Ok(()) => {
            print_state(&format!("✅ {}", message), &state);
            println!();
            println!("💾 State saved to: {}", file_to_save);
            println!("{}", "=".repeat(70));
        }
        Err(e) => {
            eprintln!("❌ Error saving state: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn validate_command(request_file: &str, rules: MoveRules, output_file: Option<&str>) {
    println!("📋 Validating tick batch");
    println!("  Request file: {}", request_file);
    println!("  Move rules: {}", rules);
    println!();

    let request = load_request(request_file).unwrap_or_else(|e| {
        eprintln!("❌ Error loading request: {:#}", e);
        std::process::exit(1);
    });

    println!("📦 Loaded {} ticks", request.ticks.len());
    println!("  Game ID: {}", request.state.game_id);
    println!();

    let service = GameService::new(rules);
    let start = Instant::now();
    let result = service.validate_request(request);
    let duration = start.elapsed();
    println!("  Replay time: {:.3}ms", duration.as_secs_f64() * 1000.0);
    println!();

    match result {
        Ok(ValidateResponse { message, game_state: Some(state) }) => {
            print_state(&format!("✅ {}", message), &state);
            if let Some(path) = output_file {
                if let Err(e) = save_json(&state, path) {
                    eprintln!("❌ Error saving state: {:#}", e);
                    std::process::exit(1);
                }
                println!();
                println!("💾 State saved to: {}", path);
            }
            println!("{}", "=".repeat(70));
        }
        Ok(ValidateResponse { message, game_state: None }) => {
            println!("✅ {}", message);
        }
        Err(e) => {
            eprintln!("❌ Rejected: {}", e);
            eprintln!("   Kind: {}", e.kind());
            if e.is_terminal() {
                eprintln!("   The game is over; start a new one.");
            }
            eprintln!("{}", "=".repeat(70));
            std::process::exit(1);
        }
    }
}

fn print_state(headline: &str, state: &GameState) {
    println!("{}", headline);
    println!("  Game ID: {}", state.game_id);
    println!("  Board: {}x{}", state.width, state.height);
    println!("  Score: {}", state.score);
    println!(
        "  Snake: ({}, {}) heading ({}, {})",
        state.snake.x, state.snake.y, state.snake.vel_x, state.snake.vel_y
    );
    println!("  Fruit: ({}, {})", state.fruit.x, state.fruit.y);
}

fn load_request(path: &str) -> anyhow::Result<ValidateRequest> {
    let metadata = fs::metadata(path).with_context(|| format!("accessing '{}'", path))?;
    if metadata.len() > MAX_REQUEST_SIZE {
        bail!(
            "request file too large: {} bytes (max {} bytes)",
            metadata.len(),
            MAX_REQUEST_SIZE
        );
    }

    let raw = fs::read_to_string(path).with_context(|| format!("reading '{}'", path))?;
    Ok(parse_request(&raw)?)
}

fn save_json<T: serde::Serialize>(value: &T, path: &str) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing '{}'", path))?;
    Ok(())
}
