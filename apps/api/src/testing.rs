//! Test support: a recording mock for the provider seam and a ready-made
//! `AppState` fixture over temp directories.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::chat::Attachment;
use crate::config::Config;
use crate::llm_client::{LlmError, ModelClient, UserContent};
use crate::mood::store::MoodStore;
use crate::mood::trend::SvgTrendRenderer;
use crate::state::AppState;

/// One recorded chat completion, kept simple enough for test assertions.
#[derive(Debug, Clone)]
pub struct ChatCall {
    pub system: String,
    pub text: String,
    pub vision: bool,
}

/// Mock [`ModelClient`] that records every capability call in order.
/// Chat replies pop from a queue (`with_reply`), falling back to a default.
#[derive(Default)]
pub struct MockClient {
    calls: Mutex<Vec<String>>,
    chat_calls: Mutex<Vec<ChatCall>>,
    replies: Mutex<VecDeque<String>>,
    transcript: String,
    fail_chat: bool,
    fail_transcription: bool,
    fail_speech: bool,
    fail_image: bool,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: &str) -> Self {
        self.replies.lock().unwrap().push_back(reply.to_string());
        self
    }

    pub fn with_transcript(mut self, transcript: &str) -> Self {
        self.transcript = transcript.to_string();
        self
    }

    pub fn fail_chat(mut self) -> Self {
        self.fail_chat = true;
        self
    }

    pub fn fail_transcription(mut self) -> Self {
        self.fail_transcription = true;
        self
    }

    pub fn fail_speech(mut self) -> Self {
        self.fail_speech = true;
        self
    }

    pub fn fail_image(mut self) -> Self {
        self.fail_image = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn chat_calls(&self) -> Vec<ChatCall> {
        self.chat_calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn fail(message: &str) -> LlmError {
        LlmError::Api {
            status: 500,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl ModelClient for MockClient {
    async fn chat_complete(
        &self,
        system: &str,
        content: UserContent,
        _max_tokens: u32,
    ) -> Result<String, LlmError> {
        self.record("chat");
        let (text, vision) = match content {
            UserContent::Text(text) => (text, false),
            UserContent::Vision { text, .. } => (text, true),
        };
        self.chat_calls.lock().unwrap().push(ChatCall {
            system: system.to_string(),
            text,
            vision,
        });
        if self.fail_chat {
            return Err(Self::fail("mock chat failure"));
        }
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "mock reply".to_string()))
    }

    async fn transcribe(
        &self,
        _audio: Bytes,
        filename: &str,
        _content_type: &str,
    ) -> Result<String, LlmError> {
        self.record(format!("transcribe:{filename}"));
        if self.fail_transcription {
            return Err(Self::fail("mock transcription failure"));
        }
        Ok(self.transcript.clone())
    }

    async fn synthesize_speech(&self, _text: &str) -> Result<Bytes, LlmError> {
        self.record("synthesize_speech");
        if self.fail_speech {
            return Err(Self::fail("mock speech failure"));
        }
        Ok(Bytes::from_static(b"mock-audio-bytes"))
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, LlmError> {
        self.record(format!("generate_image:{prompt}"));
        if self.fail_image {
            return Err(Self::fail("mock image failure"));
        }
        Ok("https://images.example/1".to_string())
    }
}

/// Builds an attachment from inline bytes.
pub fn attachment(filename: &str, content_type: &str, bytes: &[u8]) -> Attachment {
    Attachment {
        filename: filename.to_string(),
        content_type: content_type.to_string(),
        bytes: Bytes::copy_from_slice(bytes),
    }
}

/// An `AppState` over temp storage. Keep the returned guard alive for the
/// duration of the test — dropping it deletes the backing directories.
pub fn test_state(llm: MockClient) -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let media_dir = dir.path().join("media");
    std::fs::create_dir_all(&media_dir).unwrap();
    let mood_log_path = dir.path().join("mood_log.json");

    let config = Config {
        openai_api_key: "test-key".to_string(),
        mood_log_path: mood_log_path.clone(),
        media_dir: media_dir.clone(),
        port: 0,
        rust_log: "info".to_string(),
    };

    let state = AppState {
        llm: Arc::new(llm),
        mood: MoodStore::new(mood_log_path),
        trend: Arc::new(SvgTrendRenderer::new(media_dir)),
        config,
    };

    (state, dir)
}
