//! Remote summarization
//!
//! The completion service is reached through the [`Summarizer`] trait. The
//! concrete client is derived from the config on demand and handed to the
//! orchestrator explicitly; nothing here holds global state.

mod client;
mod prompt;

use crate::config::Config;
use crate::error::ServiceError;

pub(crate) use client::OpenAiClient;
pub(crate) use prompt::{SUMMARY_INSTRUCTIONS, build_user_content};

pub(crate) trait Summarizer {
    /// Send `content` with the fixed system `instructions`, returning the reply text
    fn summarize(&self, instructions: &str, content: &str) -> Result<String, ServiceError>;
}

/// Build a client from the config; None when no API key is set.
pub(crate) fn derive_client(config: &Config) -> Option<OpenAiClient> {
    if !config.has_api_key() {
        return None;
    }
    Some(OpenAiClient::new(
        config.api_key.trim(),
        config.model.as_deref(),
        config.base_url.as_deref(),
    ))
}
