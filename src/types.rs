//! The content document and the records it carries.
//!
//! The document is the single data source for every section of the page. It is
//! parsed once per page load, shared as an `Arc`, and never mutated.
//!
//! Every field is optional. A missing key, an explicit `null`, or a value of the
//! wrong shape all degrade to the field's default so one bad section can never
//! take the rest of the page down with it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Root of the JSON content document. Keys are kebab-case on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContentDocument {
    /// Hero slider images, in display order.
    #[serde(default, deserialize_with = "lenient")]
    pub slider_images: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slider_content: Option<SliderContent>,
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Vec<Category>,
    /// Collage gallery images, in display order.
    #[serde(default, deserialize_with = "lenient")]
    pub gallery_images: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub settings: Option<Settings>,
    #[serde(default, deserialize_with = "lenient")]
    pub about: Option<About>,
    /// Older documents carry the logo at the top level instead of in `settings`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl ContentDocument {
    /// Logo URL, preferring `settings.logo-url` over the legacy top-level key.
    pub fn logo_url(&self) -> Option<&str> {
        self.settings
            .as_ref()
            .and_then(|s| s.logo_url.as_deref())
            .or(self.logo_url.as_deref())
    }

    /// Site title shown in the navbar, footer and `<title>`.
    pub fn navbar_title(&self) -> Option<&str> {
        self.settings.as_ref().and_then(|s| s.navbar_title.as_deref())
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.settings.as_ref().and_then(|s| s.email.as_deref())
    }

    pub fn fallback_image(&self) -> Option<&str> {
        self.settings
            .as_ref()
            .and_then(|s| s.fallback_image.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Hero text shown over the slider, with per-element visibility flags.
///
/// Flags default to visible when absent; only an explicit `false` hides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SliderContent {
    pub heading: Option<String>,
    pub description: Option<String>,
    pub show_heading: Option<bool>,
    pub show_description: Option<bool>,
    pub show_latest_collections_button: Option<bool>,
}

impl SliderContent {
    pub fn heading_visible(&self) -> bool {
        self.show_heading != Some(false)
    }

    pub fn description_visible(&self) -> bool {
        self.show_description != Some(false)
    }

    pub fn button_visible(&self) -> bool {
        self.show_latest_collections_button != Some(false)
    }
}

/// A navigable content grouping.
///
/// `url` is only consulted in direct-URL navigation mode; in detail-page mode
/// the category's position in the list addresses it instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Site metadata: branding, contact details and social links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub logo_url: Option<String>,
    pub navbar_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub instagram_url: Option<String>,
    pub instagram_username: Option<String>,
    pub fallback_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub title: Option<String>,
    pub description: Option<String>,
    pub card: Option<AboutCard>,
}

/// The boxed highlight next to the about text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AboutCard {
    pub is_card_visible: Option<bool>,
    /// Card image URL.
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub sub_description: Option<String>,
}

impl AboutCard {
    pub fn visible(&self) -> bool {
        self.is_card_visible != Some(false)
    }
}

/// Deserialize `T`, falling back to `T::default()` when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::warn!("ignoring malformed content field: {err}");
        T::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_case_keys() {
        let doc: ContentDocument = serde_json::from_str(
            r#"{
                "slider-images": ["a.jpg", "b.jpg"],
                "gallery-images": ["g.jpg"],
                "settings": {"navbar-title": "Studio", "fallback-image": "f.webp"}
            }"#,
        )
        .unwrap();
        assert_eq!(doc.slider_images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(doc.gallery_images, vec!["g.jpg"]);
        assert_eq!(doc.navbar_title(), Some("Studio"));
        assert_eq!(doc.fallback_image(), Some("f.webp"));
    }

    #[test]
    fn empty_object_is_default_document() {
        let doc: ContentDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, ContentDocument::default());
    }

    #[test]
    fn wrongly_typed_section_degrades_to_default() {
        let doc: ContentDocument = serde_json::from_str(
            r#"{"categories": "not a list", "gallery-images": ["g.jpg"]}"#,
        )
        .unwrap();
        assert!(doc.categories.is_empty());
        assert_eq!(doc.gallery_images, vec!["g.jpg"]);
    }

    #[test]
    fn null_section_is_absent() {
        let doc: ContentDocument =
            serde_json::from_str(r#"{"about": null, "slider-images": null}"#).unwrap();
        assert!(doc.about.is_none());
        assert!(doc.slider_images.is_empty());
    }

    #[test]
    fn category_missing_fields_default_to_empty() {
        let doc: ContentDocument =
            serde_json::from_str(r#"{"categories": [{"title": "Weddings"}]}"#).unwrap();
        let category = &doc.categories[0];
        assert_eq!(category.title, "Weddings");
        assert_eq!(category.description, "");
        assert_eq!(category.url, None);
    }

    #[test]
    fn logo_prefers_settings_over_legacy_key() {
        let doc: ContentDocument = serde_json::from_str(
            r#"{"logo-url": "old.png", "settings": {"logo-url": "new.png"}}"#,
        )
        .unwrap();
        assert_eq!(doc.logo_url(), Some("new.png"));

        let legacy: ContentDocument = serde_json::from_str(r#"{"logo-url": "old.png"}"#).unwrap();
        assert_eq!(legacy.logo_url(), Some("old.png"));
    }

    #[test]
    fn visibility_flags_default_to_visible() {
        let content = SliderContent::default();
        assert!(content.heading_visible());
        assert!(content.description_visible());
        assert!(content.button_visible());

        let hidden: SliderContent =
            serde_json::from_str(r#"{"show-heading": false, "show-latest-collections-button": false}"#)
                .unwrap();
        assert!(!hidden.heading_visible());
        assert!(hidden.description_visible());
        assert!(!hidden.button_visible());
    }

    #[test]
    fn about_card_hidden_only_when_flag_is_false() {
        let card: AboutCard = serde_json::from_str(r#"{"is-card-visible": false}"#).unwrap();
        assert!(!card.visible());
        assert!(AboutCard::default().visible());
    }

    #[test]
    fn empty_fallback_image_is_ignored() {
        let doc: ContentDocument =
            serde_json::from_str(r#"{"settings": {"fallback-image": ""}}"#).unwrap();
        assert_eq!(doc.fallback_image(), None);
    }
}
