//! Data model shared by the capture registry and every exporter.
//!
//! A [`Chart`] is an immutable, already-styled visual: an ordered list of
//! [`Trace`]s plus title and axis metadata. [`CardGroup`]s hold the KPI tiles
//! rendered above the charts of a section.

mod card;
mod chart;
pub mod dates;
mod trace;

pub use card::{Card, CardGroup, DeltaPolarity, DeltaTone};
pub use chart::{Axis, AxisKind, BarMode, Chart, ChartLayout, ControlMenu};
pub use trace::{Fill, PieTrace, SeriesTrace, TextTrace, Trace, TraceKind, XValue};
