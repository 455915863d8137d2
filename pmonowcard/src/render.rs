//! Card rendering pipeline
//!
//! One render turns a track snapshot and a style into a self-contained SVG
//! document: the artwork is fetched and embedded inline, two palettes are
//! derived from it, text fields are escaped, the decorative bars are
//! generated and everything is substituted into the selected template.

use crate::artwork::{encode_base64, fetch_artwork, DEFAULT_USER_AGENT};
use crate::bars::{bar_css, bar_markup};
use crate::error::Result;
use crate::escape::escape_markup;
use crate::style::RenderStyle;
use crate::template::{fill_template, TemplateSelector};
use pmonowfeed::TrackSnapshot;
use pmopalette::extract_palette;
use std::path::PathBuf;
use std::time::Duration;

/// Swatch count for the background/bar gradient
pub const BAR_PALETTE_SIZE: usize = 4;

/// Swatch count for the track-text gradient
pub const SONG_PALETTE_SIZE: usize = 2;

/// Fixed status label shown on every card
pub const STATUS_LABEL: &str = "Currently Playing:";

/// Renderer for now-playing cards
///
/// Stateless apart from its HTTP connection pool; every render fetches the
/// artwork and recomputes the palettes, so concurrent renders never
/// serialize on shared mutable state.
pub struct CardRenderer {
    client: reqwest::Client,
    selector: TemplateSelector,
    artwork_timeout: Duration,
}

impl CardRenderer {
    /// Create a renderer
    ///
    /// * `theme_file` - path of the theme selection file, re-read per render
    /// * `artwork_timeout` - bound on each artwork fetch
    pub fn new(theme_file: impl Into<PathBuf>, artwork_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            selector: TemplateSelector::new(theme_file),
            artwork_timeout,
        })
    }

    /// Render one card for the given snapshot and style
    ///
    /// Artwork fetch and palette failures propagate; a partially rendered
    /// card is never produced.
    pub async fn render(&self, snapshot: &TrackSnapshot, style: &RenderStyle) -> Result<String> {
        let artwork = fetch_artwork(&self.client, &snapshot.thumbnail, self.artwork_timeout).await?;
        let template = self.selector.select();
        render_with_artwork(snapshot, style, &artwork, template)
    }
}

/// Fill a template from a snapshot, style and already-fetched artwork bytes
///
/// This is the deterministic core of a render (deterministic in everything
/// but the bar animation parameters): same snapshot, style, artwork and
/// template produce byte-identical escaped text, palettes, embedded artwork
/// and colors.
pub fn render_with_artwork(
    snapshot: &TrackSnapshot,
    style: &RenderStyle,
    artwork: &[u8],
    template: &str,
) -> Result<String> {
    let image = encode_base64(artwork);

    // Two independent extractions on the same bytes, one per gradient
    let bar_palette = extract_palette(artwork, BAR_PALETTE_SIZE)?;
    let song_palette = extract_palette(artwork, SONG_PALETTE_SIZE)?;

    let song_name = escape_markup(&snapshot.title);
    let artist = escape_markup(&snapshot.artist);
    let artist_name = escape_markup(&snapshot.channel);
    let song_uri = escape_markup(&snapshot.url);
    let artist_uri = escape_markup(&snapshot.channel_url);

    let content_bar = bar_markup();
    let bar_css = bar_css();

    let bar_palette_css: Vec<String> = bar_palette.iter().map(|c| c.to_css()).collect();
    let song_palette_css: Vec<String> = song_palette.iter().map(|c| c.to_css()).collect();

    let values: Vec<(&str, &str)> = vec![
        ("content_bar", content_bar.as_str()),
        ("bar_css", bar_css.as_str()),
        ("artist", artist.as_str()),
        ("artist_name", artist_name.as_str()),
        ("song_name", song_name.as_str()),
        ("song_uri", song_uri.as_str()),
        ("artist_uri", artist_uri.as_str()),
        ("image", image.as_str()),
        ("status", STATUS_LABEL),
        ("background_color", style.background_color.as_str()),
        ("border_color", style.border_color.as_str()),
        ("bar_palette_0", bar_palette_css[0].as_str()),
        ("bar_palette_1", bar_palette_css[1].as_str()),
        ("bar_palette_2", bar_palette_css[2].as_str()),
        ("bar_palette_3", bar_palette_css[3].as_str()),
        ("song_palette_0", song_palette_css[0].as_str()),
        ("song_palette_1", song_palette_css[1].as_str()),
        ("duration", snapshot.duration_fresh.as_str()),
        ("views", snapshot.views.as_str()),
    ];

    Ok(fill_template(template, &values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> TrackSnapshot {
        TrackSnapshot {
            title: "A & B".to_string(),
            artist: "X".to_string(),
            channel: "Y".to_string(),
            url: "u1".to_string(),
            channel_url: "u2".to_string(),
            thumbnail: "img1".to_string(),
            duration_fresh: "3:21".to_string(),
            views: "100".to_string(),
        }
    }

    // A 1x1 red PNG, enough for palette extraction
    fn artwork() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([200, 10, 10, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        bytes
    }

    #[test]
    fn test_escaped_title_in_output() {
        let svg = render_with_artwork(
            &snapshot(),
            &RenderStyle::default(),
            &artwork(),
            "<t>{{song_name}}</t>",
        )
        .unwrap();
        assert_eq!(svg, "<t>A &amp; B</t>");
    }

    #[test]
    fn test_deterministic_except_bars() {
        // No {{bar_css}} placeholder: everything else must be byte-identical
        let template =
            "{{song_name}}|{{artist}}|{{artist_name}}|{{song_uri}}|{{artist_uri}}|{{image}}|\
             {{bar_palette_0}}|{{bar_palette_3}}|{{song_palette_1}}|{{background_color}}";

        let first =
            render_with_artwork(&snapshot(), &RenderStyle::default(), &artwork(), template)
                .unwrap();
        let second =
            render_with_artwork(&snapshot(), &RenderStyle::default(), &artwork(), template)
                .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_bad_artwork_fails_render() {
        let result = render_with_artwork(
            &snapshot(),
            &RenderStyle::default(),
            b"not an image",
            "{{song_name}}",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_status_label_substituted() {
        let svg = render_with_artwork(
            &snapshot(),
            &RenderStyle::default(),
            &artwork(),
            "{{status}}",
        )
        .unwrap();
        assert_eq!(svg, "Currently Playing:");
    }
}
