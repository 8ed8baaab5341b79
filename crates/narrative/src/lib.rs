//! Turns charts into short statistical prose.
//!
//! [`describe_chart`] writes the narrative-document sentences (peak, low,
//! average, total per trace); [`summary_points`] writes the denser bullets
//! used on slide-deck explanation slides. Both are total over arbitrary trace
//! content: a trace that cannot be summarized yields a neutral sentence.

mod describe;
mod error;
pub mod format;
mod stats;
mod summary;

pub use describe::{describe_chart, describe_trace, ChartNarrative};
pub use error::NarrativeError;
pub use stats::SeriesStats;
pub use summary::{summary_points, LOW_VARIABILITY_NOTE};
