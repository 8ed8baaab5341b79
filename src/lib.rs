//! # powerdeck
//!
//! Captures what each dashboard section rendered and exports it as a
//! paginated PDF, a narrative Word document or a branded slide deck.
//!
//! The export engine lives in [`powerdeck_core`] and is re-exported here.
//! This crate adds [`session`] files, which record a dashboard run so it can
//! be replayed into a [`Registry`] outside the dashboard, and the
//! `powerdeck` command line tool built on them.

pub mod session;

pub use powerdeck_core::*;
pub use session::{Session, SessionSection};
