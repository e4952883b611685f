//! Chat dispatch core: one inbound multimodal request in, one structured
//! reply (or error) out.

use bytes::Bytes;
use serde::Serialize;

pub mod dispatch;
pub mod extract;
pub mod handlers;
pub mod language;
pub mod modality;
pub mod prompts;
pub mod render;

/// An uploaded attachment: raw payload plus the declared content type and
/// filename from the multipart field.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Requested output modality. Unknown values fall back to `Text` at parse
/// time, so downstream code never sees an unrecognized kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    #[default]
    Text,
    Speech,
    Image,
}

impl OutputKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "speech" => OutputKind::Speech,
            "image" => OutputKind::Image,
            _ => OutputKind::Text,
        }
    }
}

/// One inbound chat call, decoded from the multipart form.
/// At most one attachment is meaningful per request; when several are sent
/// the extractor's priority order decides (image wins outright).
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub user_id: String,
    pub text: String,
    pub image: Option<Attachment>,
    pub video: Option<Attachment>,
    pub audio: Option<Attachment>,
    pub document: Option<Attachment>,
    pub output_kind: OutputKind,
    pub restrict_to_document: bool,
    pub mental_health_mode: bool,
}

/// The structured reply returned to the caller: `response` plus whichever
/// artifact fields the requested output kind produced.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ChatReply {
    pub fn text(response: String, language: String) -> Self {
        Self {
            response,
            language: Some(language),
            audio_url: None,
            image_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_kind_parses_known_values() {
        assert_eq!(OutputKind::parse("text"), OutputKind::Text);
        assert_eq!(OutputKind::parse("speech"), OutputKind::Speech);
        assert_eq!(OutputKind::parse("image"), OutputKind::Image);
    }

    #[test]
    fn test_output_kind_unknown_defaults_to_text() {
        assert_eq!(OutputKind::parse("hologram"), OutputKind::Text);
        assert_eq!(OutputKind::parse(""), OutputKind::Text);
    }

    #[test]
    fn test_reply_serializes_without_absent_fields() {
        let reply = ChatReply::text("Bonjour".into(), "fr".into());
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["response"], "Bonjour");
        assert_eq!(json["language"], "fr");
        assert!(json.get("audio_url").is_none());
        assert!(json.get("image_url").is_none());
    }
}
