//! Which captured sections make up the consolidated report.

use crate::config::ReportConfig;
use powerdeck_capture::Registry;
use powerdeck_model::{CardGroup, Chart};
use std::sync::Arc;

/// One section's share of the consolidated report.
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub name: String,
    pub charts: Vec<Arc<Chart>>,
    pub card_groups: Vec<CardGroup>,
}

/// Collects the sections of the consolidated report, in report order.
///
/// When the combined section has captured charts it is the whole report.
/// Otherwise every configured section with at least one chart is included,
/// except the excluded one. An empty result means there is nothing to export.
pub fn collect_report(registry: &Registry, config: &ReportConfig) -> Vec<ReportSection> {
    let take = |name: &str| ReportSection {
        name: name.to_string(),
        charts: registry.get_charts(name).to_vec(),
        card_groups: registry.get_cards(name).to_vec(),
    };

    if !registry.get_charts(&config.combined_section).is_empty() {
        log::debug!("Using combined section '{}' for the report", config.combined_section);
        return vec![take(&config.combined_section)];
    }

    config
        .sections
        .iter()
        .filter(|name| !name.eq_ignore_ascii_case(&config.excluded))
        .filter(|name| !registry.get_charts(name).is_empty())
        .map(|name| take(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerdeck_model::Card;

    fn chart(title: &str) -> Chart {
        Chart::new(title)
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        for (section, titles) in [
            ("Comparison", vec!["Year over year"]),
            ("Overview", vec!["Generation", "Mix"]),
            ("Forecasting", vec!["Forecast"]),
            ("Expenses", vec![]),
        ] {
            let handle = registry.begin(section);
            for title in titles {
                registry.capture_chart(&handle, chart(title));
            }
        }
        let handle = registry.begin("Solar Savings");
        registry.capture_cards(&handle, vec![Card::new("Savings", "Rs 1,200")], "Highlights");
        registry.capture_chart(&handle, chart("Savings"));
        registry
    }

    #[test]
    fn follows_report_order_and_skips_excluded_and_empty() {
        let mut config = ReportConfig::default();
        config.sections.insert(3, "Forecasting".to_string());
        let sections = collect_report(&registry(), &config);

        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Overview", "Solar Savings", "Comparison"]);
        assert_eq!(sections[0].charts.len(), 2);
        assert_eq!(sections[1].card_groups.len(), 1);
    }

    #[test]
    fn combined_section_wins_when_populated() {
        let mut registry = registry();
        let handle = registry.begin("Report");
        registry.capture_chart(&handle, chart("Everything"));

        let sections = collect_report(&registry, &ReportConfig::default());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Report");
    }

    #[test]
    fn nothing_captured_is_empty() {
        assert!(collect_report(&Registry::new(), &ReportConfig::default()).is_empty());
    }
}
