use crate::dates;
use crate::trace::{Trace, XValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    #[default]
    Linear,
    Category,
    /// Numeric x values are epoch milliseconds.
    Date,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tick_format: Option<String>,
    #[serde(default)]
    pub kind: AxisKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    #[default]
    Group,
    Stack,
}

/// An on-screen selector (dropdown or button row). Exports drop these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlMenu {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    #[serde(default)]
    pub x_axis: Axis,
    #[serde(default)]
    pub y_axis: Axis,
    #[serde(default)]
    pub bar_mode: BarMode,
    #[serde(default)]
    pub controls: Vec<ControlMenu>,
}

/// A finished, styled chart as the dashboard shows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub traces: Vec<Trace>,
    #[serde(default)]
    pub layout: ChartLayout,
}

impl Chart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }

    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    /// The title, if set and not blank.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn caption_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title().unwrap_or(fallback)
    }

    pub fn without_controls(&self) -> Chart {
        let mut clean = self.clone();
        clean.layout.controls.clear();
        clean
    }

    /// Rewrites date x values to `Mon YYYY` category labels.
    ///
    /// Detection looks at the first cartesian trace; when it holds at least one
    /// date, every cartesian trace is relabeled and the x axis becomes
    /// categorical. Otherwise the chart is returned unchanged.
    pub fn with_month_labels(&self) -> Chart {
        let axis = self.layout.x_axis.kind;
        let has_dates = self
            .traces
            .iter()
            .find(|t| !t.x().is_empty())
            .is_some_and(|t| t.x().iter().any(|x| x.as_date(axis).is_some()));
        if !has_dates {
            return self.clone();
        }

        let mut relabeled = self.clone();
        for trace in relabeled.traces.iter_mut() {
            if let Some(xs) = trace.x_mut() {
                for x in xs.iter_mut() {
                    let label = match x.as_date(axis) {
                        Some(date) => dates::month_label(date),
                        None => x.to_string(),
                    };
                    *x = XValue::Text(label);
                }
            }
        }
        relabeled.layout.x_axis.kind = AxisKind::Category;
        log::debug!(
            "Normalized month labels for chart '{}'",
            self.title().unwrap_or("<untitled>")
        );
        relabeled
    }
}
