use crate::core::credentials::{CredentialPool, KeyPicker, RandomPicker};
use crate::core::parser::parse_filter_output;
use crate::core::prompt::{
    build_copy_prompt, build_filter_prompt, COPY_SYSTEM_PROMPT, FILTER_SYSTEM_PROMPT,
};
use crate::models::{Product, UserProfile, Verdict};
use crate::services::chat::{ChatError, ChatMessage, ChatRequest, ChatTransport};
use std::sync::Arc;
use std::time::Duration;

/// Attempts per call before giving up
pub const MAX_ATTEMPTS: usize = 3;

/// Bound on a single attempt
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sampling temperature for filtering calls
pub const FILTER_TEMPERATURE: f32 = 0.0;

/// Sampling temperature for recommendation copy
pub const COPY_TEMPERATURE: f32 = 0.5;

/// LLM-backed decision client
///
/// Formats prompts, calls the chat-completion gateway with retry and a freshly
/// drawn credential per attempt, and turns the answer into a [`Verdict`].
#[derive(Clone)]
pub struct DecisionClient {
    transport: Arc<dyn ChatTransport>,
    credentials: CredentialPool,
    picker: Arc<dyn KeyPicker>,
    model: String,
}

impl DecisionClient {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        credentials: CredentialPool,
        model: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials,
            picker: Arc::new(RandomPicker),
            model: model.into(),
        }
    }

    /// Replace the credential picker
    pub fn with_picker(mut self, picker: Arc<dyn KeyPicker>) -> Self {
        self.picker = picker;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Decide whether `product` may be recommended to `user`
    ///
    /// Never fails: exhausted retries and malformed answers degrade to a
    /// `not recommendable` verdict with an explanatory reason.
    pub async fn decide(&self, user: &UserProfile, product: &Product) -> Verdict {
        let prompt = build_filter_prompt(user, product);
        let content = self
            .query(FILTER_SYSTEM_PROMPT, &prompt, FILTER_TEMPERATURE)
            .await;

        parse_filter_output(content.as_deref())
    }

    /// Generate one sentence of recommendation copy, if the model answers
    pub async fn recommendation_copy(
        &self,
        user: &UserProfile,
        product: &Product,
    ) -> Option<String> {
        let prompt = build_copy_prompt(user, product);
        self.query(COPY_SYSTEM_PROMPT, &prompt, COPY_TEMPERATURE)
            .await
    }

    /// Run one chat completion under the retry policy
    ///
    /// Returns `None` once every attempt has failed.
    pub async fn query(&self, system: &str, user: &str, temperature: f32) -> Option<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            temperature,
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        };

        for attempt in 1..=MAX_ATTEMPTS {
            match self.attempt(&request).await {
                Ok(content) => return Some(content),
                Err(ChatError::Status(code)) => {
                    tracing::warn!("HTTP {}, retry {}/{}", code, attempt, MAX_ATTEMPTS);
                }
                Err(e) => {
                    tracing::error!("{}, retry {}/{}", e, attempt, MAX_ATTEMPTS);
                }
            }
        }

        tracing::error!("Chat completion failed after {} attempts", MAX_ATTEMPTS);
        None
    }

    async fn attempt(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let credential = self.credentials.draw(self.picker.as_ref());
        self.transport
            .complete(request, credential, REQUEST_TIMEOUT)
            .await
    }
}

impl std::fmt::Debug for DecisionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionClient")
            .field("model", &self.model)
            .field("credentials", &self.credentials)
            .finish()
    }
}
