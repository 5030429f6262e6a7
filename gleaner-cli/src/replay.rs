//! Headless replay of recorded strokes against a capture

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use gleaner_core::{GestureEvent, Point, ScanSession, Viewport};

/// A viewport and the strokes drawn on it, each a list of points
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub viewport: Viewport,
    #[serde(default)]
    pub strokes: Vec<Vec<Point>>,
}

impl ReplayScript {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse script: {}", path.display()))
    }
}

/// Lay out the session, play every stroke and return the resulting quote
pub fn replay(session: &mut ScanSession, script: &ReplayScript) -> String {
    session.on_layout(script.viewport);

    for stroke in &script.strokes {
        let Some((first, rest)) = stroke.split_first() else {
            continue;
        };
        session.handle_gesture(GestureEvent::start(first.x, first.y));
        for point in rest {
            session.handle_gesture(GestureEvent::move_to(point.x, point.y));
        }
        session.handle_gesture(GestureEvent::End);
    }

    let stats = session.stats();
    info!(
        strokes = script.strokes.len(),
        detected = stats.detected,
        selected = stats.selected,
        "replay finished"
    );
    session.quote().to_string()
}
