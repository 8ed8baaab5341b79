use powerdeck::model::DeltaPolarity;
use powerdeck::{Card, Chart, Registry, Trace};
use serde_json::{json, Value};

pub const MONTHS: [&str; 3] = ["2025-01-01", "2025-02-01", "2025-03-01"];

/// A monthly line chart over January to March.
pub fn line_chart(title: &str, values: [f64; 3]) -> Chart {
    Chart::new(title).with_trace(Trace::line(
        "kWh",
        MONTHS,
        values.iter().copied().map(Some).collect(),
    ))
}

pub fn pie_chart(title: &str) -> Chart {
    Chart::new(title).with_trace(Trace::pie("Mix", &["A", "B"], vec![Some(60.0), Some(40.0)]))
}

/// A section captured with `count` line charts and one card group.
pub fn capture_section(registry: &mut Registry, name: &str, count: usize) {
    let handle = registry.begin(name);
    registry.capture_cards(
        &handle,
        vec![Card::new("Total", "1,200 kWh").with_delta("+5%", DeltaPolarity::Normal)],
        "Highlights",
    );
    for i in 0..count {
        let base = (i + 1) as f64;
        registry.capture_chart(&handle, line_chart(&format!("{} {}", name, i + 1), [base, base * 5.0, base * 3.0]));
    }
}

/// A session file covering three report sections and the excluded one.
pub fn sample_session() -> Value {
    json!({
        "sections": [
            {
                "name": "Overview",
                "card_groups": [
                    {"title": "Generation", "cards": [{"label": "Solar", "value": "1,200 kWh", "delta": "+4%"}]}
                ],
                "charts": [
                    {"title": "Monthly Generation", "traces": [
                        {"type": "line", "name": "Solar", "x": MONTHS, "y": [10, 50, 30]}
                    ]},
                    {"title": "Energy Mix", "traces": [
                        {"type": "pie", "labels": ["A", "B"], "values": [60, 40]}
                    ]}
                ]
            },
            {
                "name": "Expenses",
                "charts": [
                    {"title": "Cost", "traces": [{"type": "bar", "x": MONTHS, "y": [5, 7, 6]}]}
                ]
            },
            {
                "name": "Forecasting",
                "charts": [
                    {"title": "Forecast", "traces": [{"type": "line", "x": MONTHS, "y": [1, 2, 3]}]}
                ]
            }
        ]
    })
}
