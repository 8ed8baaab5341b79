//! Section capture for dashboard exports.
//!
//! The UI begins a section, gets a [`SectionHandle`] back, and hands every
//! chart and card group it renders to the [`Registry`] with that handle.
//! Exporters then read a section's lists, which always belong to a single
//! render pass.

mod cache;
mod registry;

pub use cache::{RenderCache, DEFAULT_CACHE_TTL};
pub use registry::{Registry, Section, SectionHandle, FALLBACK_SECTION};
