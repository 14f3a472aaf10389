use super::{ApiError, AppState};
use crate::models::{CatalogResponse, HealthResponse, UserQuery};
use actix_web::{web, HttpResponse};
use validator::Validate;

/// Configure lookup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/catalog", web::get().to(list_catalog))
        .route("/get_user_profile", web::get().to(get_user_profile));
}

/// Health check endpoint
///
/// Reports `degraded` when either data file cannot be loaded.
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let users_ok = state.catalog.load_users().await.is_ok();
    let products_ok = state.catalog.load_products().await.is_ok();

    let status = if users_ok && products_ok { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// All users and products, for the demo front page
///
/// GET /catalog
async fn list_catalog(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = state.catalog.load_users().await?;
    let products = state.catalog.load_products().await?;

    Ok(HttpResponse::Ok().json(CatalogResponse { users, products }))
}

/// Single user record
///
/// GET /get_user_profile?user_id={userId}
async fn get_user_profile(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let user = state.catalog.get_user(&query.user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}
