//! Dominant color extraction for PMONowPlaying
//!
//! Given the raw bytes of an artwork image, this crate computes a small
//! ordered palette of representative colors. The renderer asks for two
//! palettes per card: four swatches for the background gradient and two for
//! the track-text gradient.
//!
//! The algorithm is the classic median-cut quantization: pixels are
//! subsampled, near-transparent and near-white pixels are filtered out, and
//! the remaining color space is recursively split until the requested number
//! of boxes exists. Swatches are ordered by box population, most dominant
//! first. Extraction is pure and deterministic for a given input.
//!
//! # Example
//!
//! ```no_run
//! use pmopalette::extract_palette;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("cover.jpg")?;
//! let palette = extract_palette(&bytes, 4)?;
//! assert_eq!(palette.len(), 4);
//! println!("dominant: {}", palette[0].to_css());
//! # Ok(())
//! # }
//! ```

mod quantize;

pub use quantize::median_cut;

/// Result type alias for palette operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during palette extraction
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bytes are not a supported image format, or are truncated/corrupt
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// A palette of zero swatches was requested
    #[error("invalid swatch count: {0}")]
    InvalidCount(usize),
}

/// One palette swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Format as a CSS `rgb(r,g,b)` color
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Only every Nth pixel is considered; artwork is large and dominant colors
/// survive subsampling
const SAMPLE_STEP: usize = 10;

/// Pixels more transparent than this are ignored
const MIN_ALPHA: u8 = 125;

/// Pixels with all channels above this are considered background white and
/// ignored
const WHITE_CUTOFF: u8 = 250;

/// Extract an ordered palette of exactly `color_count` swatches
///
/// Fails with [`Error::Decode`] if the bytes are not a decodable image; the
/// caller must not substitute a default palette, since artwork and palette
/// are both mandatory for a valid card. For degenerate inputs (e.g. a
/// single-color image) the last swatch is repeated to reach the requested
/// count.
pub fn extract_palette(bytes: &[u8], color_count: usize) -> Result<Vec<Rgb>> {
    if color_count == 0 {
        return Err(Error::InvalidCount(color_count));
    }

    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();

    let opaque: Vec<[u8; 3]> = rgba
        .pixels()
        .step_by(SAMPLE_STEP)
        .filter(|p| p.0[3] >= MIN_ALPHA)
        .map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();

    let filtered: Vec<[u8; 3]> = opaque
        .iter()
        .copied()
        .filter(|p| !(p[0] > WHITE_CUTOFF && p[1] > WHITE_CUTOFF && p[2] > WHITE_CUTOFF))
        .collect();

    // A fully white or transparent artwork still needs a palette; fall back
    // to the unfiltered samples, then to opaque white
    let pixels = if !filtered.is_empty() {
        filtered
    } else if !opaque.is_empty() {
        opaque
    } else {
        vec![[255, 255, 255]]
    };

    Ok(median_cut(&pixels, color_count))
}
