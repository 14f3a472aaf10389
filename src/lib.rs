//! Product Filter - LLM-backed recommendation filter for e-commerce products
//!
//! For one user, every product in the pool is sent to a chat-completion
//! gateway together with a fixed rule set; the model's two-line answer is
//! parsed into a verdict. Results are streamed as server-sent events or
//! written to disk in batch mode.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CredentialPool, DecisionClient, Orchestrator};
pub use crate::models::{FilterRecord, FilterUpdate, Product, UserProfile, Verdict};

use std::sync::Arc;

/// Build the decision client described by the LLM settings
pub fn build_decision_client(settings: &config::LlmSettings) -> anyhow::Result<DecisionClient> {
    let transport =
        services::HttpChatTransport::new(settings.endpoint.clone(), settings.auth_scheme.clone())?;
    let credentials = CredentialPool::new(settings.api_keys.clone())?;

    Ok(DecisionClient::new(
        Arc::new(transport),
        credentials,
        settings.model.clone(),
    ))
}
