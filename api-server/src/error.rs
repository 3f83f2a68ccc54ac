use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use snake_core::GameError;

/// Error body returned for every non-2xx response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope<'a> {
    status_code: u16,
    message: &'a str,
    timestamp: String,
    path: &'a str,
}

/// An HTTP-facing failure: status, public message and the request path.
#[derive(Debug, thiserror::Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
    path: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, req: &HttpRequest) -> Self {
        Self {
            status,
            message: message.into(),
            path: request_path(req),
        }
    }

    pub fn from_game(err: &GameError, req: &HttpRequest) -> Self {
        Self::new(status_for(err), public_message(err), req)
    }

    pub fn method_not_allowed(req: &HttpRequest) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed", req)
    }

    pub fn not_found(req: &HttpRequest) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("Cannot {} {}", req.method(), req.path()), req)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ErrorEnvelope {
            status_code: self.status.as_u16(),
            message: &self.message,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            path: &self.path,
        })
    }
}

/// Status code for each rejection kind.
pub fn status_for(err: &GameError) -> StatusCode {
    match err {
        GameError::InvalidDimensions | GameError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
        GameError::InvalidVelocity | GameError::InvalidMove | GameError::GameOver => StatusCode::IM_A_TEAPOT,
        GameError::FruitNotFound => StatusCode::NOT_FOUND,
        GameError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// Parser and internal details stay in the logs
fn public_message(err: &GameError) -> String {
    match err {
        GameError::MalformedRequest(_) => "Invalid request".to_string(),
        other => other.to_string(),
    }
}

fn request_path(req: &HttpRequest) -> String {
    req.uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.path().to_string())
}
