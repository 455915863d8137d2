//! Per-request presentation parameters

/// Default card color (background and border), hex without `#`
pub const DEFAULT_COLOR: &str = "181414";

/// Style overrides applied to one render
///
/// Both colors are raw hex strings without the leading `#`; they are
/// substituted into the template as-is. Derived fresh from request
/// parameters on every render, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    pub background_color: String,
    pub border_color: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_COLOR.to_string(),
            border_color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl RenderStyle {
    /// Build a style from optional request parameters
    ///
    /// An absent or empty parameter falls back to [`DEFAULT_COLOR`].
    pub fn from_params(background_color: Option<String>, border_color: Option<String>) -> Self {
        Self {
            background_color: background_color
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            border_color: border_color
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        }
    }
}
