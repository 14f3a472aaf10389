use super::{sse, ApiError, AppState};
use crate::core::{DecisionClient, Orchestrator};
use crate::models::{CopyUpdate, Product, UserProductQuery, UserProfile, UserQuery};
use crate::services::find_user;
use actix_web::web::{self, Bytes};
use actix_web::HttpResponse;
use async_stream::try_stream;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

/// Configure event-stream routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/filter_stream", web::get().to(filter_stream))
        .route("/copywriting_stream", web::get().to(copywriting_stream));
}

async fn pause(pacing: Duration) {
    if !pacing.is_zero() {
        tokio::time::sleep(pacing).await;
    }
}

/// Filter the whole product pool for one user
///
/// GET /filter_stream?user_id={userId}
///
/// Emits `start`, one `update` per product carrying
/// `{product, result, reason}`, then `done`.
async fn filter_stream(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let users = state.catalog.load_users().await?;
    let user = find_user(users, &query.user_id)?;
    let products = state.catalog.load_products().await?;

    tracing::info!(
        "Streaming filter results for user {} over {} products",
        user.user_id,
        products.len()
    );

    let orchestrator = Orchestrator::new(Arc::clone(&state.client));
    Ok(sse::response(filter_events(
        orchestrator,
        user,
        products,
        state.pacing.filter,
    )))
}

fn filter_events(
    orchestrator: Orchestrator,
    user: UserProfile,
    products: Vec<Product>,
    pacing: Duration,
) -> impl Stream<Item = Result<Bytes, actix_web::Error>> {
    try_stream! {
        yield sse::empty(sse::START);

        let updates = orchestrator.stream_updates(user, products);
        futures::pin_mut!(updates);

        while let Some(update) = updates.next().await {
            yield sse::event(sse::UPDATE, &update)?;
            pause(pacing).await;
        }

        yield sse::empty(sse::DONE);
    }
}

/// Stream one sentence of recommendation copy for a user/product pair
///
/// GET /copywriting_stream?user_id={userId}&product_id={productId}
///
/// Emits `start`, one `update` per character carrying the cumulative
/// `{text}`, then `done`. A model that returns nothing yields no updates.
async fn copywriting_stream(
    state: web::Data<AppState>,
    query: web::Query<UserProductQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let user = state.catalog.get_user(&query.user_id).await?;
    let product = state.catalog.get_product(&query.product_id).await?;

    tracing::info!(
        "Streaming recommendation copy for user {} and product {}",
        user.user_id,
        product.product_id
    );

    Ok(sse::response(copy_events(
        Arc::clone(&state.client),
        user,
        product,
        state.pacing.copy,
    )))
}

fn copy_events(
    client: Arc<DecisionClient>,
    user: UserProfile,
    product: Product,
    pacing: Duration,
) -> impl Stream<Item = Result<Bytes, actix_web::Error>> {
    try_stream! {
        yield sse::empty(sse::START);

        match client.recommendation_copy(&user, &product).await {
            Some(text) => {
                let mut streamed = String::with_capacity(text.len());
                for ch in text.chars() {
                    streamed.push(ch);
                    yield sse::event(sse::UPDATE, &CopyUpdate { text: streamed.clone() })?;
                    pause(pacing).await;
                }
            }
            None => {
                tracing::warn!(
                    "No recommendation copy for user {} and product {}",
                    user.user_id,
                    product.product_id
                );
            }
        }

        yield sse::empty(sse::DONE);
    }
}
