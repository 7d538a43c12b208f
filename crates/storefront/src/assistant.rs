//! Beauty concierge assistant client (Gemini API).
//!
//! A fire-and-forget request/response collaborator outside the order
//! lifecycle: it reads catalog summaries for context and returns free
//! text. Conversation state, transcription, and rendering are not this
//! crate's concern.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::Catalog;
use crate::config::AssistantConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Errors that can occur talking to the assistant API.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The model returned no usable text.
    #[error("empty response from model")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini API client for the MayGloss beauty concierge.
#[derive(Clone)]
pub struct AssistantClient {
    inner: Arc<AssistantClientInner>,
}

struct AssistantClientInner {
    client: reqwest::Client,
    model: String,
    api_key: SecretString,
}

impl AssistantClient {
    /// Create a new assistant client.
    #[must_use]
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            inner: Arc::new(AssistantClientInner {
                client: reqwest::Client::new(),
                model: config.model.clone(),
                api_key: config.api_key.clone(),
            }),
        }
    }

    /// Send a shopper utterance and get the concierge's reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects it, or the
    /// model returns no text.
    #[instrument(skip(self, utterance, catalog), fields(model = %self.inner.model))]
    pub async fn ask(&self, utterance: &str, catalog: &Catalog) -> Result<String, AssistantError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(utterance, catalog),
                }],
            }],
        };

        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.inner.model);
        let response = self
            .inner
            .client
            .post(&url)
            .query(&[("key", self.inner.api_key.expose_secret())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(AssistantError::EmptyResponse)
    }
}

/// Build the concierge prompt: persona, catalog context, then the
/// shopper's question.
fn build_prompt(utterance: &str, catalog: &Catalog) -> String {
    format!(
        "You are the MayGloss Beauty Assistant. You are elegant, helpful, \
         and an expert in our products.\n\
         Use this product list for context:\n\
         {}\n\n\
         Answer user questions about lip gloss, beauty tips, and our \
         catalog. Keep responses concise and luxurious.\n\n\
         User: {utterance}",
        catalog.summaries()
    )
}
