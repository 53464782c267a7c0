//! Blocking client for an OpenAI-compatible Chat Completions endpoint

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::EMPTY_SUMMARY_FALLBACK;
use crate::error::ServiceError;

use super::Summarizer;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const MAX_ATTEMPTS: usize = 3;
const RETRY_BACKOFF_MS: u64 = 500;
/// Longest error body echoed back to the user
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub(crate) struct OpenAiClient {
    agent: ureq::Agent,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub(crate) fn new(api_key: &str, model: Option<&str>, base_url: Option<&str>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();

        let base = base_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        let base = base.strip_suffix("/v1").unwrap_or(base);

        Self {
            agent,
            api_key: api_key.to_string(),
            model: model
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_MODEL)
                .to_string(),
            endpoint: format!("{base}/v1/chat/completions"),
        }
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send_once(&self, request: &ChatRequest<'_>) -> Result<String, ServiceError> {
        let response = self
            .agent
            .post(self.endpoint.as_str())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send_json(request)
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();
        let text = body
            .read_to_string()
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        debug!(status, bytes = text.len(), "completion response");

        match status {
            200..=299 => Ok(text),
            401 | 403 => Err(ServiceError::AuthFailed),
            _ => Err(ServiceError::Status {
                status,
                body: truncate(text.trim(), MAX_ERROR_BODY),
            }),
        }
    }
}

impl Summarizer for OpenAiClient {
    fn summarize(&self, instructions: &str, content: &str) -> Result<String, ServiceError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: instructions,
                },
                ChatMessage {
                    role: "user",
                    content,
                },
            ],
        };
        debug!(endpoint = %self.endpoint, model = %self.model, chars = content.len(), "requesting summary");

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.send_once(&request) {
                Ok(text) => return parse_completion(&text),
                Err(e) if is_retryable(&e) && attempt < MAX_ATTEMPTS => {
                    warn!("summary request failed (attempt {attempt}/{MAX_ATTEMPTS}): {e}");
                    std::thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64));
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn is_retryable(err: &ServiceError) -> bool {
    match err {
        ServiceError::Request(_) => true,
        ServiceError::Status { status, .. } => *status == 429 || *status >= 500,
        ServiceError::AuthFailed | ServiceError::MalformedResponse(_) => false,
    }
}

/// Extract the reply text; an empty body or empty reply becomes the fallback.
fn parse_completion(text: &str) -> Result<String, ServiceError> {
    if text.trim().is_empty() {
        return Ok(EMPTY_SUMMARY_FALLBACK.to_string());
    }
    let response: ChatResponse =
        serde_json::from_str(text).map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|c| !c.trim().is_empty());

    Ok(content.unwrap_or_else(|| EMPTY_SUMMARY_FALLBACK.to_string()))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}
