//! Broken-image fallback.
//!
//! Every image element the page inserts is registered with the
//! [`FallbackImageGuard`] at insertion time. Registration attaches at most one
//! failure handler per element for the lifetime of the page: registering the
//! same element again only records its new source.
//!
//! When a registered image fails to load, the guard swaps its source to the
//! placeholder once. A failure of the placeholder itself is ignored, so an
//! unreachable placeholder cannot start a failure loop.
//!
//! Statically rendered images carry the same contract in the markup: a
//! `data-fallback-applied` marker and an inline `onerror` handler that only
//! swaps when the element is not already showing the placeholder.

use crate::config::DEFAULT_PLACEHOLDER;
use maud::{Markup, html};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of an image element on the page (its DOM id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn slider() -> Self {
        Self::new("slider-image")
    }

    pub fn lightbox() -> Self {
        Self::new("modal-img")
    }

    pub fn logo() -> Self {
        Self::new("site-logo")
    }

    pub fn about_card() -> Self {
        Self::new("about-card-image")
    }

    pub fn category(index: usize) -> Self {
        Self(format!("category-image-{index}"))
    }

    pub fn gallery(index: usize) -> Self {
        Self(format!("gallery-image-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
struct ImageSlot {
    src: String,
    failed: bool,
}

#[derive(Debug, Clone)]
pub struct FallbackImageGuard {
    placeholder: String,
    /// `placeholder` as a JS string literal for inline handlers.
    placeholder_js: String,
    slots: BTreeMap<ImageId, ImageSlot>,
}

impl FallbackImageGuard {
    /// Guard with the given placeholder, or the built-in default when `None`.
    pub fn new(placeholder: Option<&str>) -> Self {
        let placeholder = placeholder
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_PLACEHOLDER)
            .to_string();
        let placeholder_js = serde_json::Value::String(placeholder.clone()).to_string();
        Self {
            placeholder,
            placeholder_js,
            slots: BTreeMap::new(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Register an image element showing `src`.
    ///
    /// Returns `true` when this call attached the failure handler, `false` when
    /// the element was already guarded (its source is still updated).
    pub fn register(&mut self, id: ImageId, src: &str) -> bool {
        match self.slots.get_mut(&id) {
            Some(slot) => {
                if slot.src != src {
                    slot.src = src.to_string();
                    slot.failed = false;
                }
                false
            }
            None => {
                self.slots.insert(
                    id,
                    ImageSlot {
                        src: src.to_string(),
                        failed: false,
                    },
                );
                true
            }
        }
    }

    /// Register every image of a freshly inserted container. Returns how many
    /// elements gained a handler.
    pub fn register_all<'a, I>(&mut self, images: I) -> usize
    where
        I: IntoIterator<Item = (ImageId, &'a str)>,
    {
        images
            .into_iter()
            .filter(|(id, src)| self.register(id.clone(), src))
            .count()
    }

    pub fn is_guarded(&self, id: &ImageId) -> bool {
        self.slots.contains_key(id)
    }

    pub fn guarded_count(&self) -> usize {
        self.slots.len()
    }

    /// Handle a load failure. Returns the replacement source, or `None` when the
    /// element is unguarded, already swapped, or is the placeholder itself.
    pub fn on_error(&mut self, id: &ImageId) -> Option<String> {
        let slot = self.slots.get_mut(id)?;
        if slot.failed || slot.src == self.placeholder {
            tracing::debug!(%id, "placeholder failed to load; leaving as is");
            return None;
        }
        slot.failed = true;
        tracing::debug!(%id, src = %slot.src, "image failed; showing placeholder");
        Some(self.placeholder.clone())
    }

    /// The source the element currently shows: the placeholder after a failure
    /// of `requested`, otherwise `requested`.
    pub fn effective_src<'a>(&'a self, id: &ImageId, requested: &'a str) -> &'a str {
        match self.slots.get(id) {
            Some(slot) if slot.failed && slot.src == requested => &self.placeholder,
            _ => requested,
        }
    }

    /// Inline `onerror` handler for statically rendered images.
    ///
    /// Compares the `src` attribute as written, not the resolved `this.src`,
    /// so a relative placeholder is recognised after the swap. Assigning a new
    /// source re-arms the handler without touching it.
    pub fn onerror_handler(&self) -> String {
        format!(
            "if(this.getAttribute('src')!=={p}){{this.src={p}}}",
            p = self.placeholder_js
        )
    }

    /// Render a guarded `img` element.
    pub fn img(&self, id: &ImageId, src: &str, alt: &str, class: &str) -> Markup {
        self.guarded_img(id, Some(self.effective_src(id, src)), alt, class)
    }

    /// Render a guarded `img` element whose source is assigned later by script.
    pub fn empty_img(&self, id: &ImageId, alt: &str, class: &str) -> Markup {
        self.guarded_img(id, None, alt, class)
    }

    fn guarded_img(&self, id: &ImageId, src: Option<&str>, alt: &str, class: &str) -> Markup {
        html! {
            img id=(id.as_str()) class=(class) src=[src] alt=(alt)
                loading="lazy" data-fallback-applied="true" onerror=(self.onerror_handler());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_swaps_to_placeholder_once() {
        let mut guard = FallbackImageGuard::new(None);
        let id = ImageId::gallery(0);
        guard.register(id.clone(), "broken.jpg");

        assert_eq!(
            guard.on_error(&id).as_deref(),
            Some("https://placehold.co/150x150.webp?text=No+Image")
        );
        // The placeholder failing too is a no-op.
        assert_eq!(guard.on_error(&id), None);
        assert_eq!(
            guard.effective_src(&id, "broken.jpg"),
            "https://placehold.co/150x150.webp?text=No+Image"
        );
    }

    #[test]
    fn element_already_showing_placeholder_never_swaps() {
        let mut guard = FallbackImageGuard::new(Some("ph.webp"));
        let id = ImageId::logo();
        guard.register(id.clone(), "ph.webp");
        assert_eq!(guard.on_error(&id), None);
    }

    #[test]
    fn unregistered_element_has_no_handler() {
        let mut guard = FallbackImageGuard::new(None);
        assert_eq!(guard.on_error(&ImageId::slider()), None);
    }

    #[test]
    fn registration_attaches_once() {
        let mut guard = FallbackImageGuard::new(None);
        assert!(guard.register(ImageId::slider(), "a.jpg"));
        assert!(!guard.register(ImageId::slider(), "a.jpg"));
        assert!(!guard.register(ImageId::slider(), "b.jpg"));
        assert_eq!(guard.guarded_count(), 1);
    }

    #[test]
    fn new_source_rearms_the_handler() {
        let mut guard = FallbackImageGuard::new(Some("ph.webp"));
        let id = ImageId::slider();
        guard.register(id.clone(), "a.jpg");
        assert!(guard.on_error(&id).is_some());

        guard.register(id.clone(), "b.jpg");
        assert_eq!(guard.effective_src(&id, "b.jpg"), "b.jpg");
        assert_eq!(guard.on_error(&id).as_deref(), Some("ph.webp"));
    }

    #[test]
    fn register_all_counts_new_elements() {
        let mut guard = FallbackImageGuard::new(None);
        guard.register(ImageId::gallery(0), "0.jpg");
        let attached = guard.register_all(vec![
            (ImageId::gallery(0), "0.jpg"),
            (ImageId::gallery(1), "1.jpg"),
            (ImageId::gallery(2), "2.jpg"),
        ]);
        assert_eq!(attached, 2);
        assert!(guard.is_guarded(&ImageId::gallery(2)));
    }

    #[test]
    fn blank_placeholder_falls_back_to_default() {
        let guard = FallbackImageGuard::new(Some(" "));
        assert_eq!(guard.placeholder(), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn img_markup_carries_marker_and_handler() {
        let guard = FallbackImageGuard::new(Some("ph.webp"));
        let html = guard
            .img(&ImageId::gallery(3), "g.jpg", "Gallery image 4", "gallery-img")
            .into_string();
        assert!(html.contains(r#"id="gallery-image-3""#));
        assert!(html.contains(r#"data-fallback-applied="true""#));
        assert!(html.contains("onerror="));
        assert!(html.contains("ph.webp"));
    }

    #[test]
    fn handler_compares_the_written_attribute() {
        // `this.src` resolves against the page URL and never equals a relative
        // placeholder, which would re-assign it on every failure.
        let guard = FallbackImageGuard::new(Some("images/missing.webp"));
        assert_eq!(
            guard.onerror_handler(),
            r#"if(this.getAttribute('src')!=="images/missing.webp"){this.src="images/missing.webp"}"#
        );
        assert!(!guard.onerror_handler().contains("this.src!=="));
    }

    #[test]
    fn empty_img_is_guarded_without_source() {
        let guard = FallbackImageGuard::new(Some("ph.webp"));
        let html = guard
            .empty_img(&ImageId::lightbox(), "", "modal-img")
            .into_string();
        assert!(html.contains(r#"id="modal-img""#));
        assert!(html.contains(r#"data-fallback-applied="true""#));
        assert!(html.contains("onerror="));
        assert!(!html.contains("src=\""));
    }
}
