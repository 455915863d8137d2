//! Card templates and theme selection
//!
//! Templates are SVG documents embedded in the binary. Which one is used is
//! decided per render by a small YAML theme file deployed next to the
//! binary, so the look can be switched without a restart. Any problem with
//! that file (missing, malformed, unknown theme) degrades to the fallback
//! theme; theme configuration is never a render error.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Theme used whenever the theme file cannot be resolved
pub const FALLBACK_THEME: &str = "yt";

const TEMPLATE_YT: &str = include_str!("../templates/yt.svg");
const TEMPLATE_VINYL: &str = include_str!("../templates/vinyl.svg");

/// Look up an embedded template by theme id
pub fn template_by_name(name: &str) -> Option<&'static str> {
    match name {
        "yt" => Some(TEMPLATE_YT),
        "vinyl" => Some(TEMPLATE_VINYL),
        _ => None,
    }
}

/// Shape of the theme selection file
///
/// ```yaml
/// templates:
///   yt: yt
///   vinyl: vinyl
/// current-theme: yt
/// ```
#[derive(Debug, Deserialize)]
struct ThemeFile {
    templates: HashMap<String, String>,
    #[serde(rename = "current-theme")]
    current_theme: String,
}

/// Per-render theme resolution with a documented fallback
#[derive(Debug, Clone)]
pub struct TemplateSelector {
    theme_file: PathBuf,
}

impl TemplateSelector {
    /// Create a selector reading the given theme file
    pub fn new(theme_file: impl Into<PathBuf>) -> Self {
        Self {
            theme_file: theme_file.into(),
        }
    }

    /// Select the current template
    ///
    /// The theme file is re-read on every call so edits take effect on the
    /// next render. Every failure path falls back to [`FALLBACK_THEME`].
    pub fn select(&self) -> &'static str {
        let name = match self.resolve_theme() {
            Ok(name) => name,
            Err(e) => {
                warn!(
                    theme_file = %self.theme_file.display(),
                    "Failed to load themes, using fallback '{}': {}",
                    FALLBACK_THEME,
                    e
                );
                return template_by_name(FALLBACK_THEME).expect("fallback theme is embedded");
            }
        };

        template_by_name(&name).unwrap_or_else(|| {
            warn!(
                "Theme '{}' is not embedded, using fallback '{}'",
                name, FALLBACK_THEME
            );
            template_by_name(FALLBACK_THEME).expect("fallback theme is embedded")
        })
    }

    fn resolve_theme(&self) -> anyhow::Result<String> {
        let raw = std::fs::read_to_string(&self.theme_file)?;
        let doc: ThemeFile = serde_yaml::from_str(&raw)?;

        doc.templates
            .get(&doc.current_theme)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("current-theme '{}' not in templates", doc.current_theme))
    }
}

/// Substitute `{{key}}` placeholders in a template
///
/// Single pass over the template: substituted values are never themselves
/// scanned for placeholders, so feed text cannot inject one. Unknown
/// placeholders are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(close) = rest[start..].find("}}") else {
            break;
        };
        let end = start + close;
        let key = &rest[start + 2..end];

        output.push_str(&rest[..start]);
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => output.push_str(value),
            None => output.push_str(&rest[start..end + 2]),
        }
        rest = &rest[end + 2..];
    }

    output.push_str(rest);
    output
}
