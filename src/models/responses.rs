use serde::{Deserialize, Serialize};
use crate::models::domain::{Product, UserProfile};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Users and products available to the demo front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub users: Vec<UserProfile>,
    pub products: Vec<Product>,
}

/// Cumulative recommendation copy pushed on each update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyUpdate {
    pub text: String,
}
