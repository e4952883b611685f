//! Trend reporting over mood history: a human-readable summary, numeric
//! rating extraction, and a pluggable chart renderer.
//!
//! Chart rendering is a capability seam: `AppState` holds an
//! `Arc<dyn TrendChartRenderer>` so the backend can be swapped without
//! touching the handlers.

use std::path::PathBuf;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::mood::MoodEntry;

/// A numeric rating extracted from a mood entry, paired with its timestamp.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    pub timestamp: String,
    pub rating: f64,
}

/// Pulls the first number out of a free-text mood entry ("4 out of 10" → 4).
pub fn extract_rating(mood: &str) -> Option<f64> {
    static RATING: OnceLock<Regex> = OnceLock::new();
    let re = RATING.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid rating regex"));
    re.find(mood).and_then(|m| m.as_str().parse().ok())
}

/// Entries with a parseable inline rating, in log order.
pub fn trend_points(entries: &[MoodEntry]) -> Vec<TrendPoint> {
    entries
        .iter()
        .filter_map(|e| {
            extract_rating(&e.mood).map(|rating| TrendPoint {
                timestamp: e.timestamp.clone(),
                rating,
            })
        })
        .collect()
}

/// One line per entry, `YYYY-MM-DD: <mood>`, oldest first.
pub fn trend_summary(entries: &[MoodEntry]) -> String {
    if entries.is_empty() {
        return "No mood history found.".to_string();
    }
    let lines: Vec<String> = entries
        .iter()
        .map(|e| format!("{}: {}", e.date(), e.mood))
        .collect();
    format!("Your mood history:\n{}", lines.join("\n"))
}

/// Renders a trend chart from numeric points, returning the artifact path.
#[async_trait]
pub trait TrendChartRenderer: Send + Sync {
    async fn render(&self, points: &[TrendPoint]) -> Result<PathBuf, AppError>;
}

/// Default renderer: a minimal SVG polyline written to the media dir.
pub struct SvgTrendRenderer {
    media_dir: PathBuf,
}

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 320.0;
const CHART_MARGIN: f64 = 20.0;

impl SvgTrendRenderer {
    pub fn new(media_dir: PathBuf) -> Self {
        Self { media_dir }
    }
}

#[async_trait]
impl TrendChartRenderer for SvgTrendRenderer {
    async fn render(&self, points: &[TrendPoint]) -> Result<PathBuf, AppError> {
        let min = points.iter().map(|p| p.rating).fold(f64::INFINITY, f64::min);
        let max = points
            .iter()
            .map(|p| p.rating)
            .fold(f64::NEG_INFINITY, f64::max);
        let span = if (max - min).abs() < f64::EPSILON {
            1.0
        } else {
            max - min
        };
        let step = if points.len() > 1 {
            (CHART_WIDTH - 2.0 * CHART_MARGIN) / (points.len() - 1) as f64
        } else {
            0.0
        };

        let coords: Vec<String> = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let x = CHART_MARGIN + step * i as f64;
                let y = CHART_HEIGHT
                    - CHART_MARGIN
                    - (p.rating - min) / span * (CHART_HEIGHT - 2.0 * CHART_MARGIN);
                format!("{x:.1},{y:.1}")
            })
            .collect();

        let svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="{w}" height="{h}" fill="white"/><polyline points="{points}" fill="none" stroke="#0d6efd" stroke-width="2"/></svg>"##,
            w = CHART_WIDTH,
            h = CHART_HEIGHT,
            points = coords.join(" "),
        );

        let path = self
            .media_dir
            .join(format!("trend_{}.svg", Uuid::new_v4().simple()));
        tokio::fs::write(&path, svg)
            .await
            .map_err(|e| AppError::Storage(format!("failed to write trend chart: {e}")))?;
        Ok(path)
    }
}
