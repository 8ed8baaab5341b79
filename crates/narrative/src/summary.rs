use crate::describe::display_name;
use crate::format::{format_integer, format_signed};
use crate::stats::SeriesStats;
use powerdeck_model::{Chart, Trace};

pub const LOW_VARIABILITY_NOTE: &str = "No significant variability detected; continue monitoring.";

/// Bullets for a slide explaining `chart`: an overview line, then one
/// latest/delta/average/range line per trace.
///
/// When fewer than two bullets result, the low-variability note is appended.
pub fn summary_points(chart: &Chart) -> Vec<String> {
    let mut points = Vec::new();
    if let Some(title) = chart.title() {
        points.push(format!("Overview: {}", title));
    }

    for trace in &chart.traces {
        let name = display_name(trace);
        let point = match trace {
            Trace::Pie(pie) => composition_point(name, &pie.values),
            Trace::Line(series) | Trace::Bar(series) => trend_point(name, &series.y),
            Trace::ScatterText(text) => trend_point(name, &text.y),
        };
        points.push(point.unwrap_or_else(|| {
            format!("{}: values shown; insufficient numeric history for stats.", name)
        }));
    }

    if points.len() < 2 {
        points.push(LOW_VARIABILITY_NOTE.to_string());
    }
    points
}

fn trend_point(name: &str, values: &[Option<f64>]) -> Option<String> {
    let stats = SeriesStats::compute(values).filter(SeriesStats::is_finite)?;
    Some(format!(
        "{}: latest {} (\u{0394} {}); avg {}, range {}\u{2013}{}.",
        name,
        format_integer(stats.last),
        format_signed(stats.last_delta()),
        format_integer(stats.mean),
        format_integer(stats.min),
        format_integer(stats.max),
    ))
}

fn composition_point(name: &str, values: &[Option<f64>]) -> Option<String> {
    let stats = SeriesStats::compute(values).filter(SeriesStats::is_finite)?;
    Some(format!(
        "{}: composition total {} across {} segments.",
        name,
        format_integer(stats.sum),
        stats.count
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_bullets_use_the_last_two_points() {
        let chart = Chart::new("Gas consumption").with_trace(Trace::bar(
            "Gas kWh",
            ["Jan", "Feb", "Mar"],
            vec![Some(1200.0), Some(3400.0), Some(2150.0)],
        ));
        assert_eq!(
            summary_points(&chart),
            vec![
                "Overview: Gas consumption".to_string(),
                "Gas kWh: latest 2,150 (\u{0394} -1,250); avg 2,250, range 1,200\u{2013}3,400.".to_string(),
            ]
        );
    }

    #[test]
    fn sparse_charts_get_the_filler_bullet() {
        let chart = Chart::default().with_trace(Trace::line("Solar", ["Jan"], vec![None]));
        let points = summary_points(&chart);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], "Solar: values shown; insufficient numeric history for stats.");
        assert_eq!(points[1], LOW_VARIABILITY_NOTE);

        assert_eq!(summary_points(&Chart::default()), vec![LOW_VARIABILITY_NOTE.to_string()]);
    }

    #[test]
    fn pies_summarize_composition() {
        let chart = Chart::new("Mix").with_trace(Trace::pie("Sources", &["A", "B", "C"], vec![Some(60.0), Some(40.0), None]));
        assert_eq!(summary_points(&chart)[1], "Sources: composition total 100 across 2 segments.");
    }

    #[test]
    fn single_point_delta_is_zero() {
        let chart = Chart::new("One").with_trace(Trace::line("kWh", ["Jan"], vec![Some(5.0)]));
        assert_eq!(summary_points(&chart)[1], "kWh: latest 5 (\u{0394} +0); avg 5, range 5\u{2013}5.");
    }
}
