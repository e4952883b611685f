use anyhow::anyhow;
use axum::extract::{Multipart, State};
use axum::Json;

use crate::chat::dispatch::dispatch_chat;
use crate::chat::{Attachment, ChatReply, ChatRequest, OutputKind};
use crate::errors::AppError;
use crate::state::AppState;

/// Fallback identity when the form carries no `user_id` field.
const DEFAULT_USER_ID: &str = "default_user";

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ChatReply>, AppError> {
    let req = decode_chat_request(multipart).await?;
    let reply = dispatch_chat(
        state.llm.as_ref(),
        &state.mood,
        &state.config.media_dir,
        req,
    )
    .await?;
    Ok(Json(reply))
}

/// Decodes the multipart form into a [`ChatRequest`]. Unknown fields are
/// ignored, and empty file parts (no filename, no bytes) are treated as
/// absent.
async fn decode_chat_request(mut multipart: Multipart) -> Result<ChatRequest, AppError> {
    let mut req = ChatRequest {
        user_id: DEFAULT_USER_ID.to_string(),
        ..Default::default()
    };

    while let Some(field) = next_field(&mut multipart).await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "text" => req.text = field_text(field).await?.trim().to_string(),
            "output_type" => req.output_kind = OutputKind::parse(field_text(field).await?.trim()),
            "restrict_scope" => req.restrict_to_document = flag(&field_text(field).await?),
            "mh_mode" => req.mental_health_mode = flag(&field_text(field).await?),
            "user_id" => {
                let value = field_text(field).await?.trim().to_string();
                if !value.is_empty() {
                    req.user_id = value;
                }
            }
            "image" | "video" | "audio" | "document" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Internal(anyhow!("malformed multipart field: {e}")))?;
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                let attachment = Attachment {
                    filename,
                    content_type,
                    bytes,
                };
                match name.as_str() {
                    "image" => req.image = Some(attachment),
                    "video" => req.video = Some(attachment),
                    "audio" => req.audio = Some(attachment),
                    _ => req.document = Some(attachment),
                }
            }
            _ => {}
        }
    }

    Ok(req)
}

async fn next_field(
    multipart: &mut Multipart,
) -> Result<Option<axum::extract::multipart::Field<'_>>, AppError> {
    multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(anyhow!("malformed multipart body: {e}")))
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Internal(anyhow!("malformed multipart field: {e}")))
}

/// HTML checkbox fields arrive as `"on"`.
fn flag(value: &str) -> bool {
    matches!(value.trim(), "on" | "true" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_accepts_checkbox_values() {
        assert!(flag("on"));
        assert!(flag("true"));
        assert!(flag("1"));
        assert!(!flag("off"));
        assert!(!flag(""));
    }
}
