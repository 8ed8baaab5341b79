use crate::cache::RenderCache;
use powerdeck_model::{Card, CardGroup, Chart};
use std::collections::HashMap;
use std::sync::Arc;

/// Bucket for captures whose section is no longer active.
pub const FALLBACK_SECTION: &str = "Page";

/// Proof that a section was begun, tied to that specific render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHandle {
    name: Arc<str>,
    generation: u64,
}

impl SectionHandle {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Everything one render pass captured for a section.
#[derive(Debug, Default)]
pub struct Section {
    generation: u64,
    charts: Vec<Arc<Chart>>,
    card_groups: Vec<CardGroup>,
}

impl Section {
    pub fn charts(&self) -> &[Arc<Chart>] {
        &self.charts
    }

    pub fn card_groups(&self) -> &[CardGroup] {
        &self.card_groups
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty() && self.card_groups.is_empty()
    }
}

/// Session-scoped store of captured sections.
#[derive(Debug, Default)]
pub struct Registry {
    sections: HashMap<String, Section>,
    next_generation: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh pass for `name`, dropping its previous charts and cards together.
    pub fn begin(&mut self, name: &str) -> SectionHandle {
        self.next_generation += 1;
        let generation = self.next_generation;
        let section = self.sections.entry(name.to_string()).or_default();
        section.generation = generation;
        section.charts.clear();
        section.card_groups.clear();
        log::debug!("Began capture for section '{}' (pass {})", name, generation);
        SectionHandle {
            name: Arc::from(name),
            generation,
        }
    }

    /// A handle to the fallback bucket, valid until that bucket is begun anew.
    pub fn fallback_section(&mut self) -> SectionHandle {
        let section = self.sections.entry(FALLBACK_SECTION.to_string()).or_default();
        SectionHandle {
            name: Arc::from(FALLBACK_SECTION),
            generation: section.generation,
        }
    }

    pub fn capture_chart(&mut self, handle: &SectionHandle, chart: impl Into<Arc<Chart>>) {
        self.target(handle).charts.push(chart.into());
    }

    pub fn capture_cards(&mut self, handle: &SectionHandle, cards: Vec<Card>, group_title: &str) {
        self.target(handle)
            .card_groups
            .push(CardGroup::new(group_title, cards));
    }

    /// Prepares `chart` for display through `cache` and captures the prepared chart.
    pub fn capture_rendered(
        &mut self,
        handle: &SectionHandle,
        chart: &Chart,
        cache: &RenderCache,
        export_clean: bool,
    ) -> Arc<Chart> {
        let prepared = cache.prepare(chart, export_clean);
        self.capture_chart(handle, Arc::clone(&prepared));
        prepared
    }

    pub fn get_charts(&self, name: &str) -> &[Arc<Chart>] {
        self.sections.get(name).map(Section::charts).unwrap_or(&[])
    }

    pub fn get_cards(&self, name: &str) -> &[CardGroup] {
        self.sections.get(name).map(Section::card_groups).unwrap_or(&[])
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Resolves the section a capture lands in. A handle from an earlier pass is
    /// redirected to the fallback bucket so a section never mixes two passes.
    fn target(&mut self, handle: &SectionHandle) -> &mut Section {
        let current = self
            .sections
            .get(handle.name())
            .map(|s| s.generation == handle.generation)
            .unwrap_or(false);
        if current {
            return self
                .sections
                .entry(handle.name().to_string())
                .or_default();
        }

        log::warn!(
            "Capture for section '{}' uses a handle from an earlier pass; storing it under '{}'",
            handle.name(),
            FALLBACK_SECTION
        );
        self.sections
            .entry(FALLBACK_SECTION.to_string())
            .or_default()
    }
}
