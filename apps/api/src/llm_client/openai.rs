//! Low-level OpenAI API client. No wrappers; just reqwest and Rust.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::{
    LlmError, ModelClient, UserContent, CHAT_MODEL, IMAGE_MODEL, SPEECH_MODEL, SPEECH_VOICE,
    TRANSCRIBE_MODEL, VISION_MODEL,
};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: serde_json::Value,
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

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenAI-backed implementation of [`ModelClient`].
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        let api_base =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            api_base,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// Converts a non-success response into an [`LlmError::Api`], pulling the
    /// provider's error message out of the body when it parses.
    async fn api_error(response: reqwest::Response) -> LlmError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        LlmError::Api { status, message }
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn chat_complete(
        &self,
        system: &str,
        content: UserContent,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let (model, user_content) = match content {
            UserContent::Text(text) => (CHAT_MODEL, serde_json::Value::String(text)),
            UserContent::Vision {
                text,
                image,
                content_type,
            } => {
                let data_url = format!("data:{content_type};base64,{}", BASE64.encode(&image));
                (
                    VISION_MODEL,
                    json!([
                        {"type": "text", "text": text},
                        {"type": "image_url", "image_url": {"url": data_url, "detail": "auto"}}
                    ]),
                )
            }
        };

        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: serde_json::Value::String(system.to_string()),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user_content,
        });

        let response = self
            .client
            .post(self.url("/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": model,
                "messages": messages,
                "max_tokens": max_tokens,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let chat: ChatResponse = response.json().await?;
        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)?;

        debug!("Chat completion succeeded (model: {model})");
        Ok(text.trim().to_string())
    }

    async fn transcribe(
        &self,
        audio: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<String, LlmError> {
        let part = Part::bytes(audio.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = Form::new()
            .text("model", TRANSCRIBE_MODEL)
            .text("response_format", "text")
            .part("file", part);

        let response = self
            .client
            .post(self.url("/audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let transcript = response.text().await?;
        Ok(transcript.trim().to_string())
    }

    async fn synthesize_speech(&self, text: &str) -> Result<Bytes, LlmError> {
        let response = self
            .client
            .post(self.url("/audio/speech"))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": SPEECH_MODEL,
                "voice": SPEECH_VOICE,
                "input": text,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(response.bytes().await?)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.url("/images/generations"))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": IMAGE_MODEL,
                "prompt": prompt,
                "size": "1024x1024",
                "quality": "standard",
                "n": 1,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let images: ImageResponse = response.json().await?;
        images
            .data
            .into_iter()
            .next()
            .map(|d| d.url)
            .ok_or(LlmError::EmptyContent)
    }
}
