//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a sparse user file in the config directory; anything the
//! user leaves out keeps its default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [content]
//! location = "data/portfolio.json"  # Relative path or http(s) URL
//!
//! [slider]
//! interval_ms = 4000        # Auto-advance period (4000-8000)
//! fade_ms = 100             # Delay between source swap and fade-in
//!
//! [categories]
//! truncate_at = 200         # Description excerpt length (characters)
//! navigation = "direct-url" # "direct-url" or "detail-page"
//! detail_page = "category.html"
//!
//! [fallback]
//! placeholder = "https://placehold.co/150x150.webp?text=No+Image"
//!
//! [contact]
//! default_email = "hello@example.com"
//! ```
//!
//! The content document's own settings win over these at render time where
//! both exist (the fallback image and the contact address).
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Placeholder shown for images that fail to load when nothing else is configured.
pub const DEFAULT_PLACEHOLDER: &str = "https://placehold.co/150x150.webp?text=No+Image";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where the content document lives.
    pub content: ContentConfig,
    /// Hero slider timing.
    pub slider: SliderConfig,
    /// Category card excerpt length and click navigation.
    pub categories: CategoriesConfig,
    /// Broken-image placeholder.
    pub fallback: FallbackConfig,
    /// Contact form recipient.
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4000..=8000).contains(&self.slider.interval_ms) {
            return Err(ConfigError::Validation(
                "slider.interval_ms must be 4000-8000".into(),
            ));
        }
        if self.categories.truncate_at == 0 {
            return Err(ConfigError::Validation(
                "categories.truncate_at must be non-zero".into(),
            ));
        }
        if self.categories.detail_page.trim().is_empty() {
            return Err(ConfigError::Validation(
                "categories.detail_page must not be empty".into(),
            ));
        }
        if self.fallback.placeholder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fallback.placeholder must not be empty".into(),
            ));
        }
        if self.content.location.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content.location must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Relative path or `http(s)://` URL of the JSON content document.
    pub location: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            location: "data/portfolio.json".to_string(),
        }
    }
}

/// Hero slider timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderConfig {
    /// Auto-advance period in milliseconds.
    pub interval_ms: u64,
    /// Delay between swapping the source and fading the image back in.
    pub fade_ms: u64,
}

impl SliderConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            interval_ms: 4000,
            fade_ms: 100,
        }
    }
}

/// How a category card click resolves to a destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationMode {
    /// Follow the category's own `url`. Cards without one don't navigate.
    #[default]
    DirectUrl,
    /// Open the detail page with the category's position as a query parameter.
    DetailPage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoriesConfig {
    /// Descriptions longer than this many characters are cut to an excerpt.
    pub truncate_at: usize,
    pub navigation: NavigationMode,
    /// Detail page used by [`NavigationMode::DetailPage`].
    pub detail_page: String,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            truncate_at: 200,
            navigation: NavigationMode::DirectUrl,
            detail_page: "category.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FallbackConfig {
    /// Used when the content document has no `settings.fallback-image`.
    pub placeholder: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Recipient when the content document has no `settings.email`.
    pub default_email: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            default_email: "hello@example.com".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(dir = %dir.display(), "loaded site config");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Content document
# ---------------------------------------------------------------------------
[content]
# Relative path or http(s) URL of the JSON content document.
location = "data/portfolio.json"

# ---------------------------------------------------------------------------
# Hero slider
# ---------------------------------------------------------------------------
[slider]
# Auto-advance period in milliseconds (4000-8000).
interval_ms = 4000

# Delay between swapping the image source and fading it back in.
fade_ms = 100

# ---------------------------------------------------------------------------
# Category cards
# ---------------------------------------------------------------------------
[categories]
# Descriptions longer than this (in characters) show an excerpt and a
# Read More control.
truncate_at = 200

# Where a card click goes:
#   "direct-url"  -> the category's own "url" field
#   "detail-page" -> detail_page?category=<position in the list>
navigation = "direct-url"
detail_page = "category.html"

# ---------------------------------------------------------------------------
# Broken images
# ---------------------------------------------------------------------------
[fallback]
# Shown once in place of an image that fails to load. The content document's
# settings.fallback-image takes precedence.
placeholder = "https://placehold.co/150x150.webp?text=No+Image"

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Recipient of the composed mailto: link when the content document has no
# settings.email.
default_email = "hello@example.com"
"##
}
