use crate::core::decision::DecisionClient;
use crate::models::{FilterRecord, FilterUpdate, Product, UserProfile};
use crate::services::output::{OutputError, OutputPaths, ResultWriter};
use crate::services::store::{find_user, CatalogSource, StoreError};
use async_stream::stream;
use futures::Stream;
use std::sync::Arc;
use thiserror::Error;

/// Fatal errors that abort a filtering run
#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Outcome of a batch run
#[derive(Debug)]
pub struct BatchReport {
    pub records: Vec<FilterRecord>,
    pub paths: OutputPaths,
}

/// Sequences decision calls across the product pool for one user
///
/// Products are visited in source order and every product gets exactly one
/// verdict, fallback verdicts included.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    client: Arc<DecisionClient>,
}

impl Orchestrator {
    pub fn new(client: Arc<DecisionClient>) -> Self {
        Self { client }
    }

    /// Decide every product for `user`, one record per product
    pub async fn decide_all(&self, user: &UserProfile, products: &[Product]) -> Vec<FilterRecord> {
        let mut records = Vec::with_capacity(products.len());

        for product in products {
            let verdict = self.client.decide(user, product).await;
            let record = FilterRecord::new(user, product, verdict);

            tracing::info!(
                "[{}] {} -> {}  | {}",
                record.user_id,
                record.product_name,
                record.result,
                record.reason
            );

            records.push(record);
        }

        records
    }

    /// Filter the whole pool for one user and write both result files
    ///
    /// An unknown `user_id` aborts before any decision call or file write.
    pub async fn run_for_user(
        &self,
        user_id: &str,
        source: &dyn CatalogSource,
        writer: &ResultWriter,
    ) -> Result<BatchReport, FilterError> {
        let users = source.load_users().await?;
        let user = find_user(users, user_id)?;
        let products = source.load_products().await?;

        tracing::info!(
            "Filtering {} products for user {} (type {})",
            products.len(),
            user.user_id,
            user.user_type.as_deref().unwrap_or("unknown")
        );

        let records = self.decide_all(&user, &products).await;
        let paths = writer.write(user_id, &records)?;

        tracing::info!(
            "Saved {} records to {} and {}",
            records.len(),
            paths.jsonl.display(),
            paths.json.display()
        );

        Ok(BatchReport { records, paths })
    }

    /// Yield one update per product as soon as it has been decided
    pub fn stream_updates(
        &self,
        user: UserProfile,
        products: Vec<Product>,
    ) -> impl Stream<Item = FilterUpdate> + Send + 'static {
        let client = Arc::clone(&self.client);

        stream! {
            for product in products {
                let verdict = client.decide(&user, &product).await;
                yield FilterUpdate::new(product, verdict);
            }
        }
    }
}
