//! The page: every controller, one event entry point.
//!
//! [`Page`] is constructed once per page load from the (possibly absent)
//! content document. All UI state lives in the controllers it owns; nothing is
//! kept at module scope. Interaction is a pure step function:
//!
//! ```text
//! PageEvent ──▶ Page::handle ──▶ Vec<Effect>
//! ```
//!
//! Effects are instructions for whoever hosts the page: navigate somewhere,
//! swap an image source, re-render a section, or wake the page up again after
//! a delay. Rendering is a projection of the current state and never mutates.

use crate::categories::{CardClick, CategoryBoard};
use crate::config::SiteConfig;
use crate::contact::ContactForm;
use crate::fallback::{FallbackImageGuard, ImageId};
use crate::gallery::{Key, Lightbox, LightboxClick, render_gallery};
use crate::generate;
use crate::slider::{FadeTicket, SliderController};
use crate::types::ContentDocument;
use maud::Markup;
use std::sync::Arc;
use std::time::Duration;

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The auto-advance interval elapsed.
    SliderTick,
    IndicatorClicked(usize),
    /// A fade delay scheduled by [`Effect::ScheduleFade`] ran out.
    FadeElapsed(FadeTicket),
    CardClicked { card: usize, click: CardClick },
    TileClicked(usize),
    Lightbox(LightboxClick),
    KeyPressed(Key),
    ImageFailed(ImageId),
    ContactSubmitted(ContactForm),
}

/// Independently re-renderable parts of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Categories,
    Gallery,
    Lightbox,
}

/// An instruction for the page's host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Navigate(String),
    SetImageSource { id: ImageId, src: String },
    Rerender(Section),
    /// Deliver [`PageEvent::FadeElapsed`] with `ticket` after `after`.
    ScheduleFade { ticket: FadeTicket, after: Duration },
}

pub struct Page {
    document: Option<Arc<ContentDocument>>,
    config: SiteConfig,
    slider: SliderController,
    categories: CategoryBoard,
    lightbox: Lightbox,
    guard: FallbackImageGuard,
}

impl Page {
    /// Build every controller from the document.
    ///
    /// With no document each section stays in its static default state. The
    /// fallback guard is set up either way.
    pub fn mount(document: Option<Arc<ContentDocument>>, config: &SiteConfig) -> Self {
        let doc = document.as_deref();
        let placeholder = doc
            .and_then(ContentDocument::fallback_image)
            .unwrap_or(&config.fallback.placeholder);
        let mut guard = FallbackImageGuard::new(Some(placeholder));

        let slider = SliderController::new(doc.map(|d| d.slider_images.clone()).unwrap_or_default());
        let categories = CategoryBoard::new(
            doc.map(|d| d.categories.as_slice()).unwrap_or_default(),
            &config.categories,
        );
        let gallery_images = doc.map(|d| d.gallery_images.clone()).unwrap_or_default();

        if let Some(src) = slider.current_image() {
            guard.register(ImageId::slider(), src);
        }
        guard.register_all(categories.images());
        guard.register_all(
            gallery_images
                .iter()
                .enumerate()
                .map(|(i, src)| (ImageId::gallery(i), src.as_str())),
        );
        if let Some(logo) = doc.and_then(ContentDocument::logo_url) {
            guard.register(ImageId::logo(), logo);
        }
        if let Some(card_image) = doc
            .and_then(|d| d.about.as_ref())
            .and_then(|a| a.card.as_ref())
            .and_then(|c| c.url.as_deref())
        {
            guard.register(ImageId::about_card(), card_image);
        }

        tracing::debug!(
            content = doc.is_some(),
            guarded = guard.guarded_count(),
            "page mounted"
        );

        Self {
            document,
            config: config.clone(),
            slider,
            categories,
            lightbox: Lightbox::new(gallery_images),
            guard,
        }
    }

    pub fn document(&self) -> Option<&ContentDocument> {
        self.document.as_deref()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn slider(&self) -> &SliderController {
        &self.slider
    }

    pub fn categories(&self) -> &CategoryBoard {
        &self.categories
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn guard(&self) -> &FallbackImageGuard {
        &self.guard
    }

    pub fn slider_images(&self) -> &[String] {
        self.document
            .as_deref()
            .map(|d| d.slider_images.as_slice())
            .unwrap_or_default()
    }

    pub fn gallery_images(&self) -> &[String] {
        self.document
            .as_deref()
            .map(|d| d.gallery_images.as_slice())
            .unwrap_or_default()
    }

    pub fn slider_interval(&self) -> Duration {
        self.config.slider.interval()
    }

    /// Recipient of the contact form: the document's email, else the configured default.
    pub fn recipient(&self) -> &str {
        self.document()
            .and_then(ContentDocument::contact_email)
            .unwrap_or(&self.config.contact.default_email)
    }

    pub fn handle(&mut self, event: PageEvent) -> Vec<Effect> {
        match event {
            PageEvent::SliderTick => {
                let ticket = self.slider.advance();
                self.slider_transition(ticket)
            }
            PageEvent::IndicatorClicked(index) => {
                let ticket = self.slider.go_to(index);
                self.slider_transition(ticket)
            }
            PageEvent::FadeElapsed(ticket) => {
                if self.slider.finish_fade(ticket) {
                    vec![Effect::Rerender(Section::Hero)]
                } else {
                    Vec::new()
                }
            }
            PageEvent::CardClicked { card, click } => {
                let was_expanded = self.categories.card(card).map(|c| c.is_expanded());
                match self.categories.click(card, click) {
                    Some(target) => vec![Effect::Navigate(target.href())],
                    None if self.categories.card(card).map(|c| c.is_expanded()) != was_expanded => {
                        vec![Effect::Rerender(Section::Categories)]
                    }
                    None => Vec::new(),
                }
            }
            PageEvent::TileClicked(index) => {
                let opened = self.lightbox.open(index);
                self.lightbox_changed(opened)
            }
            PageEvent::Lightbox(click) => {
                let changed = self.lightbox.click(click);
                self.lightbox_changed(changed)
            }
            PageEvent::KeyPressed(key) => {
                let changed = self.lightbox.handle_key(key);
                self.lightbox_changed(changed)
            }
            PageEvent::ImageFailed(id) => match self.guard.on_error(&id) {
                Some(src) => vec![Effect::SetImageSource { id, src }],
                None => Vec::new(),
            },
            PageEvent::ContactSubmitted(form) => {
                vec![Effect::Navigate(form.mailto_uri(self.recipient()))]
            }
        }
    }

    fn slider_transition(&mut self, ticket: Option<FadeTicket>) -> Vec<Effect> {
        let Some(ticket) = ticket else {
            return Vec::new();
        };
        if let Some(src) = self.slider.current_image() {
            self.guard.register(ImageId::slider(), src);
        }
        vec![
            Effect::Rerender(Section::Hero),
            Effect::ScheduleFade {
                ticket,
                after: self.config.slider.fade(),
            },
        ]
    }

    fn lightbox_changed(&mut self, changed: bool) -> Vec<Effect> {
        if !changed {
            return Vec::new();
        }
        if let Some(src) = self.lightbox.current_image() {
            self.guard.register(ImageId::lightbox(), src);
        }
        vec![Effect::Rerender(Section::Lightbox)]
    }

    /// Render one section from the current state.
    pub fn render_section(&self, section: Section) -> Markup {
        match section {
            Section::Hero => self.slider.render(
                self.document().and_then(|d| d.slider_content.as_ref()),
                &self.guard,
            ),
            Section::Categories => self.categories.render(&self.guard),
            Section::Gallery => render_gallery(self.gallery_images(), &self.guard),
            Section::Lightbox => self.lightbox.render(&self.guard),
        }
    }

    /// Render the whole HTML document.
    pub fn render(&self) -> Markup {
        generate::render_page(self)
    }
}
