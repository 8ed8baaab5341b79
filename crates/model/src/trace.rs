use crate::chart::AxisKind;
use crate::dates;
use chrono::NaiveDate;
use powerdeck_types::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single x coordinate. Month axes arrive either as date text or, on
/// `AxisKind::Date` axes, as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Text(String),
}

impl XValue {
    pub fn as_date(&self, axis: AxisKind) -> Option<NaiveDate> {
        match self {
            XValue::Text(s) => dates::parse_date_text(s),
            XValue::Number(n) if axis == AxisKind::Date => dates::from_epoch_millis(*n),
            XValue::Number(_) => None,
        }
    }

    /// Human label: dates become `Mon YYYY`, everything else its plain text.
    pub fn label(&self, axis: AxisKind) -> String {
        if let Some(date) = self.as_date(axis) {
            return dates::month_label(date);
        }
        self.to_string()
    }
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            XValue::Number(n) => write!(f, "{}", n),
            XValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for XValue {
    fn from(s: &str) -> Self {
        XValue::Text(s.to_string())
    }
}

impl From<String> for XValue {
    fn from(s: String) -> Self {
        XValue::Text(s)
    }
}

impl From<f64> for XValue {
    fn from(n: f64) -> Self {
        XValue::Number(n)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    #[default]
    None,
    /// Filled down to zero: an area chart.
    ToZero,
}

/// An x/y series, shared by line, area and bar traces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesTrace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub x: Vec<XValue>,
    /// `None` marks a missing value.
    #[serde(default)]
    pub y: Vec<Option<f64>>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub fill: Fill,
}

impl SeriesTrace {
    pub fn new<X, I>(name: &str, x: I, y: Vec<Option<f64>>) -> Self
    where
        X: Into<XValue>,
        I: IntoIterator<Item = X>,
    {
        Self {
            name: Some(name.to_string()),
            x: x.into_iter().map(Into::into).collect(),
            y,
            color: None,
            fill: Fill::None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }
}

/// A pie or, when `hole > 0`, a donut.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PieTrace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<Option<f64>>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub hole: f32,
}

/// Text drawn at data coordinates, e.g. totals above stacked bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextTrace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub x: Vec<XValue>,
    #[serde(default)]
    pub y: Vec<Option<f64>>,
    #[serde(default)]
    pub text: Vec<String>,
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    Line,
    Bar,
    Pie,
    ScatterText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    Line(SeriesTrace),
    Bar(SeriesTrace),
    Pie(PieTrace),
    ScatterText(TextTrace),
}

impl Trace {
    pub fn line<X, I>(name: &str, x: I, y: Vec<Option<f64>>) -> Self
    where
        X: Into<XValue>,
        I: IntoIterator<Item = X>,
    {
        Trace::Line(SeriesTrace::new(name, x, y))
    }

    pub fn bar<X, I>(name: &str, x: I, y: Vec<Option<f64>>) -> Self
    where
        X: Into<XValue>,
        I: IntoIterator<Item = X>,
    {
        Trace::Bar(SeriesTrace::new(name, x, y))
    }

    pub fn pie(name: &str, labels: &[&str], values: Vec<Option<f64>>) -> Self {
        Trace::Pie(PieTrace {
            name: Some(name.to_string()),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values,
            colors: Vec::new(),
            hole: 0.0,
        })
    }

    pub fn kind(&self) -> TraceKind {
        match self {
            Trace::Line(_) => TraceKind::Line,
            Trace::Bar(_) => TraceKind::Bar,
            Trace::Pie(_) => TraceKind::Pie,
            Trace::ScatterText(_) => TraceKind::ScatterText,
        }
    }

    /// The display name, if one was set and is not blank.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Trace::Line(s) | Trace::Bar(s) => s.name.as_deref(),
            Trace::Pie(p) => p.name.as_deref(),
            Trace::ScatterText(t) => t.name.as_deref(),
        };
        name.filter(|n| !n.trim().is_empty())
    }

    /// The x values of cartesian traces; empty for pies.
    pub fn x(&self) -> &[XValue] {
        match self {
            Trace::Line(s) | Trace::Bar(s) => &s.x,
            Trace::ScatterText(t) => &t.x,
            Trace::Pie(_) => &[],
        }
    }

    pub(crate) fn x_mut(&mut self) -> Option<&mut Vec<XValue>> {
        match self {
            Trace::Line(s) | Trace::Bar(s) => Some(&mut s.x),
            Trace::ScatterText(t) => Some(&mut t.x),
            Trace::Pie(_) => None,
        }
    }
}
