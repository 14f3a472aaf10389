use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from a single chat-completion attempt
///
/// Every variant is transient from the caller's point of view: the decision
/// client retries on any of them.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("gateway returned HTTP {0}")]
    Status(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// One outbound chat-completion attempt with a given credential
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn complete(
        &self,
        request: &ChatRequest,
        credential: &str,
        timeout: Duration,
    ) -> Result<String, ChatError>;
}

/// Chat-completion gateway client over HTTP
///
/// Sends the credential in the `Authorization` header, optionally prefixed by
/// a scheme such as `Bearer`.
pub struct HttpChatTransport {
    endpoint: String,
    auth_scheme: Option<String>,
    client: Client,
}

impl HttpChatTransport {
    pub fn new(endpoint: String, auth_scheme: Option<String>) -> Result<Self, ChatError> {
        let client = Client::builder().build()?;

        Ok(Self {
            endpoint,
            auth_scheme: auth_scheme.filter(|s| !s.trim().is_empty()),
            client,
        })
    }

    fn authorization(&self, credential: &str) -> String {
        match &self.auth_scheme {
            Some(scheme) => format!("{} {}", scheme.trim(), credential),
            None => credential.to_string(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn complete(
        &self,
        request: &ChatRequest,
        credential: &str,
        timeout: Duration,
    ) -> Result<String, ChatError> {
        let body = serde_json::to_vec(request)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json;charset=UTF-8")
            .header(AUTHORIZATION, self.authorization(credential))
            .timeout(timeout)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ChatError::Status(status.as_u16()));
        }

        let parsed: ChatResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatError::InvalidResponse("missing choices[0].message.content".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest {
            model: "deepseek-v3".to_string(),
            temperature: 0.0,
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hello")],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "deepseek-v3");
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_authorization_header() {
        let raw = HttpChatTransport::new("http://gateway.test".into(), None).unwrap();
        assert_eq!(raw.authorization("k1"), "k1");

        let bearer =
            HttpChatTransport::new("http://gateway.test".into(), Some("Bearer".into())).unwrap();
        assert_eq!(bearer.authorization("k1"), "Bearer k1");

        let blank = HttpChatTransport::new("http://gateway.test".into(), Some(" ".into())).unwrap();
        assert_eq!(blank.authorization("k1"), "k1");
    }
}
