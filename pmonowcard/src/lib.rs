//! Now-playing SVG card renderer for PMONowPlaying
//!
//! This crate turns the latest track snapshot into a self-contained SVG
//! card, served over a single catch-all HTTP endpoint.
//!
//! # Features
//!
//! - **Self-contained output**: artwork is fetched and embedded inline as
//!   base64, no external asset references
//! - **Derived palettes**: a 4-swatch background gradient and a 2-swatch
//!   text gradient are extracted from the artwork on every render
//! - **Animated bars**: 84 equalizer bars with fresh random animation
//!   parameters per render
//! - **Theme selection**: embedded templates chosen by a YAML file re-read
//!   per render, with a documented fallback
//! - **Style overrides**: `background_color` / `border_color` query
//!   parameters, defaulting to a fixed constant
//!
//! # Example
//!
//! ```no_run
//! use pmonowcard::{api_rest, CardRenderer, CardState};
//! use pmonowfeed::SnapshotStore;
//! use std::{sync::Arc, time::Duration};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SnapshotStore::new();
//! let renderer = CardRenderer::new("templates.yaml", Duration::from_secs(10))?;
//!
//! let router = api_rest::create_router(CardState {
//!     store,
//!     renderer: Arc::new(renderer),
//! });
//! # Ok(())
//! # }
//! ```

pub mod api_rest;
pub mod artwork;
pub mod bars;
pub mod error;
pub mod escape;
pub mod render;
pub mod style;
pub mod template;

// Re-exports
pub use api_rest::{CardParams, CardState};
pub use bars::BAR_COUNT;
pub use error::{Error, Result};
pub use render::{
    render_with_artwork, CardRenderer, BAR_PALETTE_SIZE, SONG_PALETTE_SIZE, STATUS_LABEL,
};
pub use style::{RenderStyle, DEFAULT_COLOR};
pub use template::{TemplateSelector, FALLBACK_THEME};
