use crate::model::{NarrativeDocument, Paragraph, Run};
use powerdeck_model::Chart;
use powerdeck_narrative::describe_chart;
use std::sync::Arc;

const SECTION_STACK_NOTE: &str =
    "\u{2022} Where stacked bars are shown, combined monthly totals are labeled on top for quick comparison.";
const REPORT_STACK_NOTE: &str = "\u{2022} For stacked bars, combined totals are labeled on top where applicable.";
const NO_DATA: &str = "\u{2022} No chart data available for this figure.";

/// Names used in the greeting and sign-off.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentVoice {
    pub dashboard: String,
    pub organization: String,
    pub team: String,
}

impl Default for DocumentVoice {
    fn default() -> Self {
        Self {
            dashboard: "Powerhouse Dashboard".to_string(),
            organization: "PETPAK & GPAK".to_string(),
            team: "Technical Analytics Team".to_string(),
        }
    }
}

/// The charts of one section, in capture order.
#[derive(Debug, Clone)]
pub struct ChartSection {
    pub name: String,
    pub charts: Vec<Arc<Chart>>,
}

impl ChartSection {
    pub fn new(name: impl Into<String>, charts: Vec<Arc<Chart>>) -> Self {
        Self {
            name: name.into(),
            charts,
        }
    }
}

impl NarrativeDocument {
    /// Narrative for a single section.
    pub fn for_section(title: &str, charts: &[Arc<Chart>], voice: &DocumentVoice) -> Self {
        let mut doc = Self::opening(title, voice);
        for (i, chart) in charts.iter().enumerate() {
            let idx = i + 1;
            let heading = chart
                .title()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Figure {}", idx));
            doc.push_chart(idx, &heading, chart, SECTION_STACK_NOTE);
        }
        doc.closing(voice);
        doc
    }

    /// Narrative for several sections. Empty sections are left out; the
    /// others get a heading and restart figure numbering.
    pub fn for_report(title: &str, sections: &[ChartSection], voice: &DocumentVoice) -> Self {
        let mut doc = Self::opening(title, voice);
        for section in sections.iter().filter(|s| !s.charts.is_empty()) {
            doc.push(Paragraph::new(vec![Run::bold(&section.name).sized(14.0)]));
            for (i, chart) in section.charts.iter().enumerate() {
                let idx = i + 1;
                let heading = chart
                    .title()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} \u{2014} Figure {}", section.name, idx));
                doc.push_chart(idx, &heading, chart, REPORT_STACK_NOTE);
            }
        }
        doc.closing(voice);
        doc
    }

    fn opening(title: &str, voice: &DocumentVoice) -> Self {
        let mut doc = NarrativeDocument::default();
        doc.push(Paragraph::new(vec![Run::bold(title).sized(16.0)]).centered());
        doc.push(
            Paragraph::new(vec![
                Run::plain("Dear Sir,\n\nThis document summarizes insights from the "),
                Run::bold(title),
                Run::plain(format!(
                    " tab of the {} for {}. It provides a concise narrative of every chart and series \
                     displayed, highlighting highs, lows, trends, and totals to support informed decision-making.",
                    voice.dashboard, voice.organization
                )),
            ])
            .space_after(8.0),
        );
        doc
    }

    fn push_chart(&mut self, idx: usize, heading: &str, chart: &Chart, stack_note: &str) {
        self.push(Paragraph::new(vec![Run::bold(format!("{}. {}", idx, heading)).sized(12.0)]));
        if chart.traces.is_empty() {
            self.push(Paragraph::text(NO_DATA));
            return;
        }
        for sentence in describe_chart(chart).traces {
            self.push(Paragraph::text(format!("\u{2022} {}", sentence)));
        }
        self.push(Paragraph::text(stack_note));
    }

    fn closing(&mut self, voice: &DocumentVoice) {
        self.push(Paragraph::text(format!(
            "If you require deeper drill-downs (e.g., per asset, per shift, or rate sensitivity), kindly advise.\n\nRegards,\n{}",
            voice.team
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerdeck_model::Trace;

    fn solar() -> Arc<Chart> {
        Arc::new(Chart::new("Solar generation").with_trace(Trace::line(
            "Solar",
            ["2025-01-01", "2025-02-01", "2025-03-01"],
            vec![Some(10.0), Some(50.0), Some(30.0)],
        )))
    }

    #[test]
    fn section_document_flow() {
        let charts = vec![solar(), Arc::new(Chart::default())];
        let doc = NarrativeDocument::for_section("Solar Savings", &charts, &DocumentVoice::default());
        let lines = doc.plain_lines();

        assert_eq!(lines[0], "Solar Savings");
        assert!(lines[1].starts_with("Dear Sir,\n\nThis document summarizes insights from the Solar Savings tab"));
        assert!(lines[1].contains("Powerhouse Dashboard for PETPAK & GPAK"));
        assert_eq!(lines[2], "1. Solar generation");
        assert_eq!(
            lines[3],
            "\u{2022} Solar: peak 50 in Feb 2025, lowest 10 in Jan 2025, average 30, total 90."
        );
        assert_eq!(lines[4], SECTION_STACK_NOTE);
        assert_eq!(lines[5], "2. Figure 2");
        assert_eq!(lines[6], NO_DATA);
        assert!(lines[7].ends_with("Regards,\nTechnical Analytics Team"));
        assert_eq!(lines.len(), 8);

        assert!(doc.paragraphs[1].runs[1].bold);
        assert_eq!(doc.paragraphs[0].runs[0].size, Some(16.0));
    }

    #[test]
    fn report_groups_by_section_and_skips_empty_ones() {
        let untitled = Arc::new(Chart::default().with_trace(Trace::bar("Gas", ["Jan"], vec![Some(3.0)])));
        let sections = vec![
            ChartSection::new("Overview", vec![solar()]),
            ChartSection::new("Energy Sources", vec![]),
            ChartSection::new("Gas Consumption", vec![untitled]),
        ];
        let doc = NarrativeDocument::for_report("Full Report", &sections, &DocumentVoice::default());
        let lines = doc.plain_lines();

        assert!(lines.contains(&"Overview".to_string()));
        assert!(!lines.contains(&"Energy Sources".to_string()));
        assert!(lines.contains(&"1. Gas Consumption \u{2014} Figure 1".to_string()));
        assert_eq!(lines.iter().filter(|l| l.as_str() == REPORT_STACK_NOTE).count(), 2);
    }
}
