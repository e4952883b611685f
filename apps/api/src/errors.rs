use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Capability failures (chat, transcription, synthesis, image generation,
/// extraction) carry the upstream message and are never retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No input provided")]
    NoInput,

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("A document is required when restricting replies to a document")]
    MissingDocument,

    #[error("Chat completion failed: {0}")]
    Completion(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Speech synthesis failed: {0}")]
    SpeechSynthesis(String),

    #[error("Image generation failed: {0}")]
    ImageGeneration(String),

    #[error("Document extraction failed: {0}")]
    Extraction(String),

    #[error("Mood storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NoInput => (StatusCode::BAD_REQUEST, "NO_INPUT", self.to_string()),
            AppError::UnsupportedFormat(_) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                self.to_string(),
            ),
            AppError::MissingDocument => (
                StatusCode::BAD_REQUEST,
                "MISSING_DOCUMENT",
                self.to_string(),
            ),
            AppError::Completion(msg) => {
                tracing::error!("Chat completion failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "COMPLETION_ERROR",
                    self.to_string(),
                )
            }
            AppError::Transcription(msg) => {
                tracing::error!("Transcription failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TRANSCRIPTION_ERROR",
                    self.to_string(),
                )
            }
            AppError::SpeechSynthesis(msg) => {
                tracing::error!("Speech synthesis failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SPEECH_SYNTHESIS_ERROR",
                    self.to_string(),
                )
            }
            AppError::ImageGeneration(msg) => {
                tracing::error!("Image generation failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IMAGE_GENERATION_ERROR",
                    self.to_string(),
                )
            }
            AppError::Extraction(msg) => {
                tracing::error!("Document extraction failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    self.to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Mood storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
