//! Chat dispatch: one inbound request walks an ordered guard table, first
//! match wins.
//!
//! 1. Mental-health mode with non-empty text → three-part labeled reply
//!    (mood-log confirmation, coping suggestion, companion), renderer
//!    bypassed.
//! 2. Image attached → vision completion, then the requested output kind.
//! 3. Restrict-to-document → completion grounded in the extracted document
//!    (fails before any capability call when no document was uploaded).
//! 4. Any other resolvable input → multilingual completion, then the
//!    requested output kind.
//! 5. Nothing resolvable → `NoInput`.

use std::path::Path;

use tracing::info;

use crate::chat::extract::extract_document_text;
use crate::chat::language::detect_language;
use crate::chat::modality::{resolve, ResolvedInput};
use crate::chat::prompts::{
    COMPANION_SYSTEM, MULTILINGUAL_SYSTEM, RESTRICTED_SYSTEM_TEMPLATE, SUGGESTION_SYSTEM,
};
use crate::chat::render::render;
use crate::chat::{ChatReply, ChatRequest};
use crate::errors::AppError;
use crate::llm_client::{ModelClient, UserContent, CHAT_MAX_TOKENS, VISION_MAX_TOKENS};
use crate::mood::store::MoodStore;

/// How many trailing mood entries feed the coping-suggestion prompt.
const RECENT_MOOD_ENTRIES: usize = 5;

pub async fn dispatch_chat(
    llm: &dyn ModelClient,
    mood: &MoodStore,
    media_dir: &Path,
    req: ChatRequest,
) -> Result<ChatReply, AppError> {
    if req.mental_health_mode && !req.text.is_empty() {
        return mental_health_reply(llm, mood, &req).await;
    }

    if req.image.is_some() {
        return vision_reply(llm, media_dir, &req).await;
    }

    if req.restrict_to_document {
        return restricted_reply(llm, media_dir, &req).await;
    }

    let ResolvedInput::Plain(user_input) = resolve(llm, &req).await? else {
        // No image attached, so the extractor cannot produce a vision request.
        unreachable!("plain resolution produced a vision request");
    };

    let reply = llm
        .chat_complete(
            MULTILINGUAL_SYSTEM,
            UserContent::Text(user_input),
            CHAT_MAX_TOKENS,
        )
        .await
        .map_err(|e| AppError::Completion(e.to_string()))?;

    render(llm, media_dir, reply.clone(), req.output_kind, &reply).await
}

/// Guard 1: log the mood, then compose the three labeled sections in fixed
/// order. Always rendered as text; language detected on the combined reply.
async fn mental_health_reply(
    llm: &dyn ModelClient,
    mood: &MoodStore,
    req: &ChatRequest,
) -> Result<ChatReply, AppError> {
    info!("Mental-health mode reply for user {}", req.user_id);

    let confirmation = mood.store_mood(&req.user_id, &req.text).await?;

    let history = mood.get_mood_history(&req.user_id).await;
    let recent: Vec<String> = history
        .iter()
        .rev()
        .take(RECENT_MOOD_ENTRIES)
        .map(|e| format!("{}: {}", e.date(), e.mood))
        .collect();
    let suggestion_prompt = format!(
        "{}\n\nRecent mood entries:\n{}",
        req.text,
        recent.join("\n")
    );

    let suggestion = llm
        .chat_complete(
            SUGGESTION_SYSTEM,
            UserContent::Text(suggestion_prompt),
            CHAT_MAX_TOKENS,
        )
        .await
        .map_err(|e| AppError::Completion(e.to_string()))?;

    let companion = llm
        .chat_complete(
            COMPANION_SYSTEM,
            UserContent::Text(req.text.clone()),
            CHAT_MAX_TOKENS,
        )
        .await
        .map_err(|e| AppError::Completion(e.to_string()))?;

    let combined =
        format!("MoodTracker: {confirmation}\n\nSuggestion: {suggestion}\n\nCompanion: {companion}");
    let language = detect_language(&combined);
    Ok(ChatReply::text(combined, language))
}

/// Guard 2: vision completion over the combined text + image content.
async fn vision_reply(
    llm: &dyn ModelClient,
    media_dir: &Path,
    req: &ChatRequest,
) -> Result<ChatReply, AppError> {
    let ResolvedInput::Vision { text, image } = resolve(llm, req).await? else {
        unreachable!("image attachment resolved to plain input");
    };

    let reply = llm
        .chat_complete(
            "",
            UserContent::Vision {
                text,
                image: image.bytes,
                content_type: image.content_type,
            },
            VISION_MAX_TOKENS,
        )
        .await
        .map_err(|e| AppError::Completion(e.to_string()))?;

    render(llm, media_dir, reply.clone(), req.output_kind, &reply).await
}

/// Guard 3: the system prompt embeds the extracted document text verbatim;
/// the user's text rides along as the question.
async fn restricted_reply(
    llm: &dyn ModelClient,
    media_dir: &Path,
    req: &ChatRequest,
) -> Result<ChatReply, AppError> {
    let Some(document) = &req.document else {
        return Err(AppError::MissingDocument);
    };

    let document_text = extract_document_text(&document.bytes, &document.filename)?;
    let system = RESTRICTED_SYSTEM_TEMPLATE.replace("{document_text}", &document_text);

    let reply = llm
        .chat_complete(&system, UserContent::Text(req.text.clone()), CHAT_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Completion(e.to_string()))?;

    render(llm, media_dir, reply.clone(), req.output_kind, &reply).await
}
