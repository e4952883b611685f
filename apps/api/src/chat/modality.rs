//! Modality extraction: collapse the mutually-exclusive inputs of a
//! [`ChatRequest`] into a single logical request.
//!
//! Priority: image (vision) over everything, then video transcript, audio
//! transcript, document text, and finally the raw text field. Empty
//! transcripts and empty extracted text pass through unchanged.

use crate::chat::extract::extract_document_text;
use crate::chat::prompts::DEFAULT_IMAGE_PROMPT;
use crate::chat::{Attachment, ChatRequest};
use crate::errors::AppError;
use crate::llm_client::ModelClient;

/// The resolved form of one inbound request: exactly one of a vision request
/// or a plain text payload.
#[derive(Debug, Clone)]
pub enum ResolvedInput {
    Vision { text: String, image: Attachment },
    Plain(String),
}

pub async fn resolve(llm: &dyn ModelClient, req: &ChatRequest) -> Result<ResolvedInput, AppError> {
    if let Some(image) = &req.image {
        let text = if req.text.is_empty() {
            DEFAULT_IMAGE_PROMPT.to_string()
        } else {
            req.text.clone()
        };
        return Ok(ResolvedInput::Vision {
            text,
            image: image.clone(),
        });
    }

    if let Some(video) = &req.video {
        return Ok(ResolvedInput::Plain(transcribe(llm, video).await?));
    }

    if let Some(audio) = &req.audio {
        return Ok(ResolvedInput::Plain(transcribe(llm, audio).await?));
    }

    if let Some(document) = &req.document {
        let text = extract_document_text(&document.bytes, &document.filename)?;
        return Ok(ResolvedInput::Plain(text));
    }

    if !req.text.is_empty() {
        return Ok(ResolvedInput::Plain(req.text.clone()));
    }

    Err(AppError::NoInput)
}

async fn transcribe(llm: &dyn ModelClient, attachment: &Attachment) -> Result<String, AppError> {
    llm.transcribe(
        attachment.bytes.clone(),
        &attachment.filename,
        &attachment.content_type,
    )
    .await
    .map_err(|e| AppError::Transcription(e.to_string()))
}
