//! Markup escaping for snapshot text fields
//!
//! The card is an SVG document, so text taken from the feed must not leak
//! reserved markup characters into the output.

/// Escape reserved markup characters
///
/// `&` is replaced first so already-produced entities are not mangled.
pub fn escape_markup(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
