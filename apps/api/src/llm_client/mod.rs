//! Model client — the single point of entry for all provider API calls in
//! Solace.
//!
//! ARCHITECTURAL RULE: No other module may call the provider API directly.
//! All model interactions MUST go through the `ModelClient` trait, held in
//! `AppState` as `Arc<dyn ModelClient>` so handlers and tests can swap the
//! backend without touching dispatch code.
//!
//! Every capability call is a single bounded request: failures surface to the
//! caller as-is and are never retried here.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub mod openai;

pub use openai::OpenAiClient;

/// Model for plain-text chat completions.
/// Intentionally hardcoded to prevent accidental drift.
pub const CHAT_MODEL: &str = "gpt-3.5-turbo";
/// Model for vision (text + image) chat completions.
pub const VISION_MODEL: &str = "gpt-4o-mini";
pub const TRANSCRIBE_MODEL: &str = "whisper-1";
pub const SPEECH_MODEL: &str = "tts-1";
pub const SPEECH_VOICE: &str = "alloy";
pub const IMAGE_MODEL: &str = "dall-e-3";

/// Output-token cap for plain-text completions.
pub const CHAT_MAX_TOKENS: u32 = 150;
/// Output-token cap for vision completions.
pub const VISION_MAX_TOKENS: u32 = 300;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model returned empty content")]
    EmptyContent,
}

/// User-side payload of a chat completion: either plain text or a vision
/// request pairing text with raw image bytes and their declared content type.
#[derive(Debug, Clone)]
pub enum UserContent {
    Text(String),
    Vision {
        text: String,
        image: Bytes,
        content_type: String,
    },
}

/// The four provider capabilities the dispatch core depends on.
///
/// `system` may be empty for calls that carry no system prompt (the vision
/// path sends user content only).
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn chat_complete(
        &self,
        system: &str,
        content: UserContent,
        max_tokens: u32,
    ) -> Result<String, LlmError>;

    async fn transcribe(
        &self,
        audio: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<String, LlmError>;

    async fn synthesize_speech(&self, text: &str) -> Result<Bytes, LlmError>;

    /// Returns the URL of the generated image.
    async fn generate_image(&self, prompt: &str) -> Result<String, LlmError>;
}
