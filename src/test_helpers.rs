//! Shared test utilities for the folio test suite.
//!
//! Provides record builders, a representative content document, and small
//! markup probes for asserting on rendered HTML without pinning attribute order.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let doc = sample_document();
//! let page = Page::mount(Some(Arc::new(doc)), &SiteConfig::default());
//!
//! let html = page.render_section(Section::Categories).into_string();
//! assert!(!opening_tag(&html, "Read More").contains("hidden"));
//! ```

use crate::types::{About, AboutCard, Category, ContentDocument, Settings, SliderContent};

// =========================================================================
// Record builders
// =========================================================================

pub fn category(title: &str, description: &str, image: &str, url: Option<&str>) -> Category {
    Category {
        title: title.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        url: url.map(str::to_string),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A document exercising every section.
///
/// - slider: `a.jpg`, `b.jpg`, `c.jpg` with custom hero text
/// - one "Weddings" category whose 250-char description truncates
/// - gallery: `g0.jpg`, `g1.jpg`, `g2.jpg`
/// - settings with logo, title and contact email `studio@example.com`
/// - an about section with a visible card
pub fn sample_document() -> ContentDocument {
    ContentDocument {
        slider_images: strings(&["a.jpg", "b.jpg", "c.jpg"]),
        slider_content: Some(SliderContent {
            heading: Some("Golden Hour".to_string()),
            description: Some("Light, patiently.".to_string()),
            ..Default::default()
        }),
        categories: vec![category(
            "Weddings",
            &"A".repeat(250),
            "w.jpg",
            Some("/weddings"),
        )],
        gallery_images: strings(&["g0.jpg", "g1.jpg", "g2.jpg"]),
        settings: Some(Settings {
            logo_url: Some("logo.png".to_string()),
            navbar_title: Some("Studio North".to_string()),
            email: Some("studio@example.com".to_string()),
            phone: Some("+1 555 0100".to_string()),
            ..Default::default()
        }),
        about: Some(About {
            title: Some("About".to_string()),
            description: Some("Ten years behind the lens.".to_string()),
            card: Some(AboutCard {
                url: Some("card.jpg".to_string()),
                title: Some("500+".to_string()),
                description: Some("Sessions".to_string()),
                ..Default::default()
            }),
        }),
        logo_url: None,
    }
}

// =========================================================================
// Markup probes
// =========================================================================

/// The `<button ...>` opening tag of the button labelled `label`.
///
/// Panics when no such button exists, which fails the calling test.
pub fn opening_tag<'a>(html: &'a str, label: &str) -> &'a str {
    let end = html
        .find(&format!(">{label}</button>"))
        .unwrap_or_else(|| panic!("no button labelled {label:?} in:\n{html}"));
    let start = html[..end]
        .rfind("<button")
        .unwrap_or_else(|| panic!("no <button before {label:?}"));
    &html[start..=end]
}

/// Number of elements carrying `class` among their classes.
pub fn count_class(html: &str, class: &str) -> usize {
    html.match_indices("class=\"")
        .filter(|(i, _)| {
            let rest = &html[i + 7..];
            rest.split('"')
                .next()
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
        })
        .count()
}
