use crate::error::NarrativeError;
use crate::format::{format_value, MISSING};
use crate::stats::SeriesStats;
use powerdeck_model::{AxisKind, Chart, Trace, XValue};

/// The sentences written for one chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartNarrative {
    /// `Overview: <title>` when the chart has a title.
    pub overview: Option<String>,
    /// One sentence per trace, in trace order.
    pub traces: Vec<String>,
}

impl ChartNarrative {
    pub fn sentences(&self) -> Vec<String> {
        self.overview.iter().chain(self.traces.iter()).cloned().collect()
    }
}

pub(crate) fn display_name(trace: &Trace) -> &str {
    trace.name().unwrap_or(match trace {
        Trace::Pie(_) => "Share",
        _ => "Series",
    })
}

pub(crate) fn neutral_sentence(trace: &Trace) -> String {
    format!("{}: no numeric values available.", display_name(trace))
}

/// Describes every trace of `chart`. A trace that fails to summarize gets the
/// neutral sentence; the others are unaffected.
pub fn describe_chart(chart: &Chart) -> ChartNarrative {
    let axis = chart.layout.x_axis.kind;
    let traces = chart
        .traces
        .iter()
        .map(|trace| {
            describe_trace(trace, axis).unwrap_or_else(|e| {
                log::debug!("Narrative for trace downgraded: {}", e);
                neutral_sentence(trace)
            })
        })
        .collect();

    ChartNarrative {
        overview: chart.title().map(|t| format!("Overview: {}", t)),
        traces,
    }
}

/// One sentence for one trace. `axis` decides whether numeric x values are dates.
pub fn describe_trace(trace: &Trace, axis: AxisKind) -> Result<String, NarrativeError> {
    let name = display_name(trace);
    match trace {
        Trace::Pie(pie) => describe_composition(name, &pie.labels, &pie.values),
        Trace::Line(series) | Trace::Bar(series) => describe_series(name, &series.x, &series.y, axis),
        Trace::ScatterText(text) => describe_series(name, &text.x, &text.y, axis),
    }
}

fn describe_series(
    name: &str,
    xs: &[XValue],
    ys: &[Option<f64>],
    axis: AxisKind,
) -> Result<String, NarrativeError> {
    let Some(stats) = SeriesStats::compute(ys) else {
        return Ok(format!("{}: no numeric values available.", name));
    };
    if !stats.is_finite() {
        return Err(NarrativeError::NonFinite(name.to_string()));
    }

    let at = |i: usize| xs.get(i).map(|x| x.label(axis)).unwrap_or_else(|| MISSING.to_string());
    Ok(format!(
        "{}: peak {} in {}, lowest {} in {}, average {}, total {}.",
        name,
        format_value(Some(stats.max)),
        at(stats.argmax),
        format_value(Some(stats.min)),
        at(stats.argmin),
        format_value(Some(stats.mean)),
        format_value(Some(stats.sum)),
    ))
}

fn describe_composition(
    name: &str,
    labels: &[String],
    values: &[Option<f64>],
) -> Result<String, NarrativeError> {
    if labels.is_empty() || values.is_empty() {
        return Ok(format!("{} shows composition data.", name));
    }

    let pairs: Vec<(&String, Option<f64>)> = labels
        .iter()
        .zip(values.iter().map(|v| v.filter(|v| v.is_finite())))
        .collect();
    let present: Vec<f64> = pairs.iter().filter_map(|(_, v)| *v).collect();
    let total = if present.is_empty() {
        None
    } else {
        let sum: f64 = present.iter().sum();
        if !sum.is_finite() {
            return Err(NarrativeError::NonFinite(name.to_string()));
        }
        Some(sum)
    };

    let parts: Vec<String> = pairs
        .iter()
        .map(|(label, v)| format!("{}: {}", label, format_value(*v)))
        .collect();
    Ok(format!(
        "{} shows composition \u{2014} total {}; {}",
        name,
        format_value(total),
        parts.join("; ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerdeck_model::{PieTrace, TextTrace};

    fn monthly(values: Vec<Option<f64>>) -> Chart {
        Chart::new("Solar generation").with_trace(Trace::line(
            "Solar",
            ["2025-01-01", "2025-02-01", "2025-03-01"],
            values,
        ))
    }

    #[test]
    fn numeric_trace_cites_peak_and_low_months() {
        let narrative = describe_chart(&monthly(vec![Some(10.0), Some(50.0), Some(30.0)]));
        assert_eq!(narrative.overview.as_deref(), Some("Overview: Solar generation"));
        assert_eq!(
            narrative.traces,
            vec!["Solar: peak 50 in Feb 2025, lowest 10 in Jan 2025, average 30, total 90."]
        );
        assert_eq!(narrative.sentences().len(), 2);
    }

    #[test]
    fn category_axes_use_plain_labels() {
        let chart = Chart::default().with_trace(Trace::bar(
            "",
            ["Solar", "Gas", "LESCO"],
            vec![Some(1500.5), Some(250.25), Some(4000.0)],
        ));
        let narrative = describe_chart(&chart);
        assert_eq!(narrative.overview, None);
        assert_eq!(
            narrative.traces[0],
            "Series: peak 4,000 in LESCO, lowest 250.25 in Gas, average 1,917, total 5,751."
        );
    }

    #[test]
    fn pie_lists_every_pair_and_total() {
        let chart = Chart::new("Mix").with_trace(Trace::pie("", &["A", "B"], vec![Some(60.0), Some(40.0)]));
        let sentence = &describe_chart(&chart).traces[0];
        assert_eq!(sentence, "Share shows composition \u{2014} total 100; A: 60; B: 40");
    }

    #[test]
    fn pie_with_missing_values_and_no_pairs() {
        let partial = Trace::Pie(PieTrace {
            name: Some("Sources".into()),
            labels: vec!["A".into(), "B".into()],
            values: vec![Some(5.0), None],
            ..Default::default()
        });
        assert_eq!(
            describe_trace(&partial, AxisKind::Category).unwrap(),
            "Sources shows composition \u{2014} total 5; A: 5; B: \u{2014}"
        );

        let empty = Trace::Pie(PieTrace::default());
        assert_eq!(describe_trace(&empty, AxisKind::Category).unwrap(), "Share shows composition data.");
    }

    #[test]
    fn traces_without_numbers_get_the_neutral_sentence() {
        let chart = Chart::default().with_trace(Trace::line("Gas", ["Jan", "Feb"], vec![None, None]));
        assert_eq!(describe_chart(&chart).traces[0], "Gas: no numeric values available.");
    }

    #[test]
    fn one_failing_trace_does_not_spoil_the_others() {
        let chart = Chart::new("Mixed")
            .with_trace(Trace::line("Broken", ["Jan", "Feb"], vec![Some(f64::MAX), Some(f64::MAX)]))
            .with_trace(Trace::line("Fine", ["Jan", "Feb"], vec![Some(1.0), Some(3.0)]));
        let narrative = describe_chart(&chart);
        assert_eq!(narrative.traces[0], "Broken: no numeric values available.");
        assert_eq!(narrative.traces[1], "Fine: peak 3 in Feb, lowest 1 in Jan, average 2, total 4.");
    }

    #[test]
    fn missing_x_positions_render_as_dash() {
        let trace = Trace::ScatterText(TextTrace {
            name: Some("Totals".into()),
            x: vec![],
            y: vec![Some(2.0)],
            text: vec!["2".into()],
            color: None,
        });
        assert_eq!(
            describe_trace(&trace, AxisKind::Category).unwrap(),
            "Totals: peak 2 in \u{2014}, lowest 2 in \u{2014}, average 2, total 2."
        );
    }
}
