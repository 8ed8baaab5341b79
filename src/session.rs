//! Recorded dashboard sessions.
//!
//! A session file lists sections in the order they were rendered, each with
//! its card groups and charts:
//!
//! ```json
//! {"sections": [{"name": "Overview", "card_groups": [...], "charts": [...]}]}
//! ```
//!
//! Replaying a session runs every section through the capture registry the
//! way a live render pass would.

use powerdeck_core::{Chart, CardGroup, ExportError, Registry, RenderCache};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSection {
    pub name: String,
    #[serde(default)]
    pub card_groups: Vec<CardGroup>,
    #[serde(default)]
    pub charts: Vec<Chart>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub sections: Vec<SessionSection>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("Failed to read session from '{}': {}", path.display(), e))
        })?;
        Self::from_json(&source)
    }

    /// Captures every section into a fresh registry.
    ///
    /// Charts go through `cache` with on-screen controls stripped. A section
    /// listed twice keeps only its last pass.
    pub fn replay(&self, cache: &RenderCache) -> Registry {
        let mut registry = Registry::new();
        for section in &self.sections {
            let handle = registry.begin(&section.name);
            for group in &section.card_groups {
                registry.capture_cards(&handle, group.cards.clone(), &group.title);
            }
            for chart in &section.charts {
                registry.capture_rendered(&handle, chart, cache, true);
            }
            log::debug!(
                "Replayed section '{}': {} charts, {} card groups",
                section.name,
                section.charts.len(),
                section.card_groups.len()
            );
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SESSION: &str = r#"{
        "sections": [
            {"name": "Overview", "charts": [{"title": "Old"}]},
            {
                "name": "Expenses",
                "card_groups": [{"title": "Totals", "cards": [{"label": "Cost", "value": "Rs 10"}]}],
                "charts": [
                    {"title": "Cost", "layout": {"controls": [{"label": "Range", "options": ["1M", "1Y"]}]}},
                    {"title": "Rate"}
                ]
            },
            {"name": "Overview", "charts": [{"title": "New"}]}
        ]
    }"#;

    #[test]
    fn replay_keeps_the_last_pass_of_each_section() {
        let session = Session::from_json(SESSION).unwrap();
        let registry = session.replay(&RenderCache::new(Duration::from_secs(60)));

        let overview: Vec<_> = registry.get_charts("Overview").iter().map(|c| c.title.clone()).collect();
        assert_eq!(overview, vec![Some("New".to_string())]);
        assert_eq!(registry.get_charts("Expenses").len(), 2);
        assert_eq!(registry.get_cards("Expenses")[0].cards[0].label, "Cost");
    }

    #[test]
    fn replayed_charts_lose_their_controls() {
        let session = Session::from_json(SESSION).unwrap();
        let registry = session.replay(&RenderCache::new(Duration::from_secs(60)));
        assert!(registry.get_charts("Expenses")[0].layout.controls.is_empty());
    }

    #[test]
    fn missing_files_are_config_errors() {
        assert!(matches!(
            Session::from_file("/nonexistent/session.json"),
            Err(ExportError::Config(_))
        ));
    }
}
