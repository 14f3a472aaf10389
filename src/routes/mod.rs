// Route exports
pub mod catalog;
pub mod sse;
pub mod stream;

use crate::config::StreamingSettings;
use crate::core::DecisionClient;
use crate::models::ErrorResponse;
use crate::services::{CatalogSource, StoreError};
use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<DecisionClient>,
    pub catalog: Arc<dyn CatalogSource>,
    pub pacing: StreamPacing,
}

/// Delay inserted between events on each stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamPacing {
    pub filter: Duration,
    pub copy: Duration,
}

impl From<&StreamingSettings> for StreamPacing {
    fn from(settings: &StreamingSettings) -> Self {
        Self {
            filter: Duration::from_millis(settings.filter_pacing_ms),
            copy: Duration::from_millis(settings.copy_pacing_ms),
        }
    }
}

/// JSON error returned by every handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.to_string(),
                message: message.into(),
                status_code: status.as_u16(),
            },
        }
    }

    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.body.error, self.body.message)
    }
}

impl std::error::Error for ApiError {}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => {
                Self::new(StatusCode::NOT_FOUND, "not_found", format!("No record with {}", what))
            }
            other => {
                tracing::error!("Catalog unavailable: {}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "catalog_unavailable", other.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::bad_request("validation_failed", errors.to_string())
    }
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ApiError::bad_request("invalid_query", format!("Invalid query: {}", err)).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .configure(catalog::configure)
        .configure(stream::configure);
}
