mod config;
mod error;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use config::ServerConfig;
use error::ApiError;
use host::GameService;
use serde::Deserialize;
use snake_core::{GameError, ValidateRequest};
use std::panic::{catch_unwind, AssertUnwindSafe};

// Request types

#[derive(Debug, Deserialize)]
struct NewGameQuery {
    /// Board width; kept as text so bad input maps to a dimension error
    w: Option<String>,
    /// Board height
    h: Option<String>,
}

// API Handlers

/// GET /new?w=<width>&h=<height>
/// Start a new game
async fn new_game(
    req: HttpRequest,
    query: web::Query<NewGameQuery>,
    service: web::Data<GameService>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!("Received new game request: w={:?}, h={:?}", query.w, query.h);

    let (width, height) = match (parse_dimension(query.w.as_deref()), parse_dimension(query.h.as_deref())) {
        (Some(w), Some(h)) => (w, h),
        _ => return Err(ApiError::from_game(&GameError::InvalidDimensions, &req)),
    };

    let state = guarded(|| service.start_new_game(width, height))
        .map_err(|e| ApiError::from_game(&e, &req))?;

    Ok(HttpResponse::Ok().json(state))
}

/// POST /validate
/// Replay a tick batch against the submitted state
async fn validate(
    req: HttpRequest,
    body: web::Json<ValidateRequest>,
    service: web::Data<GameService>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    tracing::info!(
        "Received validate request for game: {}, ticks: {}",
        request.state.game_id,
        request.ticks.len()
    );

    let response = guarded(|| service.validate_request(request))
        .map_err(|e| ApiError::from_game(&e, &req))?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /health
/// Health check endpoint
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "snake-validator-api"
    }))
}

async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::method_not_allowed(&req))
}

async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::not_found(&req))
}

fn parse_dimension(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok()
}

/// Run a game operation, turning a panic into an internal error.
fn guarded<T>(op: impl FnOnce() -> Result<T, GameError>) -> Result<T, GameError> {
    catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|_| {
        tracing::error!("Game operation panicked");
        Err(GameError::Internal("panic in game operation".into()))
    })
}

fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, req| {
            tracing::warn!("Rejected malformed body on {}: {}", req.path(), err);
            ApiError::from_game(&GameError::MalformedRequest(err.to_string()), req).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|_, req| ApiError::from_game(&GameError::InvalidDimensions, req).into())
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/health")
            .route(web::get().to(health))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/new")
            .route(web::get().to(new_game))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/validate")
            .route(web::post().to(validate))
            .default_service(web::to(method_not_allowed)),
    );
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Snake Validator API Server");

    let config = ServerConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    tracing::info!("Move rules: {}", config.rules);
    tracing::info!("Binding to {}", config.bind_address);

    let service = web::Data::new(GameService::new(config.rules));
    let json_limit = config.json_limit;

    HttpServer::new(move || {
        // Configure CORS to allow all origins
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .expose_any_header()
            .max_age(86400);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(service.clone())
            .app_data(json_config(json_limit))
            .app_data(query_config())
            .configure(routes)
            .default_service(web::to(not_found))
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await
}
