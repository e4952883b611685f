use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelClient;
use crate::mood::store::MoodStore;
use crate::mood::trend::TrendChartRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Provider capability seam. Default: `OpenAiClient`. Tests inject a mock.
    pub llm: Arc<dyn ModelClient>,
    pub mood: MoodStore,
    /// Chart-rendering capability seam. Default: `SvgTrendRenderer`.
    pub trend: Arc<dyn TrendChartRenderer>,
    pub config: Config,
}
