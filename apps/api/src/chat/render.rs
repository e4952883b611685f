//! Response rendering: turn a reply string into the final payload for the
//! requested output kind, invoking speech synthesis or image generation as
//! needed.

use std::path::Path;

use uuid::Uuid;

use crate::chat::language::detect_language;
use crate::chat::{ChatReply, OutputKind};
use crate::errors::AppError;
use crate::llm_client::ModelClient;

/// Renders `reply_text` as the requested output kind.
///
/// `image_prompt` is the prompt handed to image generation — the reply text
/// in both dispatch branches (in the vision branch the reply *is* the
/// model's description of the uploaded image).
pub async fn render(
    llm: &dyn ModelClient,
    media_dir: &Path,
    reply_text: String,
    kind: OutputKind,
    image_prompt: &str,
) -> Result<ChatReply, AppError> {
    match kind {
        OutputKind::Text => {
            let language = detect_language(&reply_text);
            Ok(ChatReply::text(reply_text, language))
        }
        OutputKind::Speech => {
            let audio = llm
                .synthesize_speech(&reply_text)
                .await
                .map_err(|e| AppError::SpeechSynthesis(e.to_string()))?;
            let path = media_dir.join(format!("audio_{}.mp3", Uuid::new_v4().simple()));
            tokio::fs::write(&path, &audio).await.map_err(|e| {
                AppError::SpeechSynthesis(format!("failed to write audio artifact: {e}"))
            })?;
            Ok(ChatReply {
                response: reply_text,
                language: None,
                audio_url: Some(path.to_string_lossy().into_owned()),
                image_url: None,
            })
        }
        OutputKind::Image => {
            let url = llm
                .generate_image(image_prompt)
                .await
                .map_err(|e| AppError::ImageGeneration(e.to_string()))?;
            Ok(ChatReply {
                response: "Image generated".to_string(),
                language: None,
                audio_url: None,
                image_url: Some(url),
            })
        }
    }
}
