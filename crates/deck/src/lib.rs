//! Branded slide decks.
//!
//! A deck is assembled in two steps. [`DeckBuilder`] turns charts into a
//! [`Deck`]: a title slide, a chart slide and an explanation slide per chart,
//! and a closing recommendations slide, each numbered `i / total`. The total
//! is fixed before the first slide is made. [`write_pptx`] then serializes the
//! deck as a PowerPoint package.

mod deck;
mod error;
pub mod geometry;
mod parts;
mod shapes;
mod writer;

pub use deck::{
    Conclusion, Deck, DeckBrand, DeckBuilder, DeckChart, Picture, Slide, SlideContent, CONCLUSION_CAPTION,
    MAX_BULLETS, NO_DATA_BULLET,
};
pub use error::DeckError;
pub use writer::{write_pptx, IMAGE_UNAVAILABLE, PPTX_MIME};
