//! HTML page generation.
//!
//! Takes a mounted [`Page`] and writes a static snapshot of it: the full HTML
//! document plus the client script that replays the page's behaviour in the
//! browser.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html      # The rendered page
//! ├── site.js         # Slider, cards, lightbox and contact behaviour
//! └── content.json    # Snapshot of the content document (when one loaded)
//! ```
//!
//! ## Page Layout
//!
//! Header (logo and navbar title), hero slider, about, categories, featured
//! work gallery, lightbox, contact, footer. Each section is a projection of the
//! page state; see [`Page::render_section`].
//!
//! The client script is embedded at compile time from `static/site.js` and
//! reads its settings from a JSON block in the document, so the script itself
//! never changes between sites.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::contact::{ContactDetails, render_contact};
use crate::fallback::{FallbackImageGuard, ImageId};
use crate::page::{Page, Section};
use crate::types::{About, ContentDocument};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const JS: &str = include_str!("../static/site.js");

/// `<title>` and navbar text when the content has no `navbar-title`.
pub const DEFAULT_TITLE: &str = "Photography Portfolio";

/// What [`generate`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub slides: usize,
    pub categories: usize,
    pub gallery_images: usize,
    pub guarded_images: usize,
}

pub fn generate(page: &Page, output_dir: &Path) -> Result<GenerateSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let mut files = Vec::new();

    let index = output_dir.join("index.html");
    fs::write(&index, page.render().into_string())?;
    files.push(index);

    let script = output_dir.join("site.js");
    fs::write(&script, JS)?;
    files.push(script);

    if let Some(doc) = page.document() {
        let snapshot = output_dir.join("content.json");
        fs::write(&snapshot, serde_json::to_string_pretty(doc)?)?;
        files.push(snapshot);
    }

    tracing::debug!(dir = %output_dir.display(), files = files.len(), "page written");

    Ok(GenerateSummary {
        output_dir: output_dir.to_path_buf(),
        files,
        slides: page.slider().len(),
        categories: page.categories().len(),
        gallery_images: page.gallery_images().len(),
        guarded_images: page.guard().guarded_count(),
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, icon: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if let Some(icon) = icon {
                    link rel="icon" href=(icon);
                    link rel="apple-touch-icon" href=(icon);
                }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with logo, title and section links
fn site_header(title: &str, logo: Option<&str>, guard: &FallbackImageGuard) -> Markup {
    html! {
        header.site-header {
            a.brand href="#hero" {
                @if let Some(logo) = logo {
                    (guard.img(&ImageId::logo(), logo, title, "site-logo"))
                }
                span.navbar-title { (title) }
            }
            nav.site-nav {
                input.nav-toggle type="checkbox" id="nav-toggle";
                label.nav-hamburger for="nav-toggle" {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                ul.nav-panel {
                    li { a href="#hero" { "Home" } }
                    li { a href="#about" { "About" } }
                    li { a href="#categories" { "Categories" } }
                    li { a href="#featured-work" { "Gallery" } }
                    li { a href="#contact" { "Contact" } }
                }
            }
        }
    }
}

/// Renders the about section. The card only appears when it is present and
/// not switched off.
fn render_about(about: Option<&About>, guard: &FallbackImageGuard) -> Markup {
    let card = about
        .and_then(|a| a.card.as_ref())
        .filter(|card| card.visible());
    html! {
        section.about id="about" {
            @if let Some(about) = about {
                div.about-text {
                    @if let Some(title) = &about.title {
                        h2 { (title) }
                    }
                    @if let Some(description) = &about.description {
                        p.about-description { (description) }
                    }
                }
            }
            @if let Some(card) = card {
                div.about-card {
                    @if let Some(url) = &card.url {
                        (guard.img(&ImageId::about_card(), url, card.title.as_deref().unwrap_or(""), "about-card-img"))
                    }
                    @if let Some(title) = &card.title {
                        h3 { (title) }
                    }
                    @if let Some(description) = &card.description {
                        p { (description) }
                    }
                    @if let Some(sub) = &card.sub_description {
                        p.about-card-sub { (sub) }
                    }
                }
            }
        }
    }
}

fn site_footer(title: &str) -> Markup {
    html! {
        footer.site-footer {
            p { (title) }
        }
    }
}

fn contact_details(page: &Page) -> ContactDetails<'_> {
    let settings = page.document().and_then(|d| d.settings.as_ref());
    ContactDetails {
        recipient: page.recipient(),
        phone: settings.and_then(|s| s.phone.as_deref()),
        address: settings.and_then(|s| s.address.as_deref()),
        instagram_url: settings.and_then(|s| s.instagram_url.as_deref()),
        instagram_username: settings.and_then(|s| s.instagram_username.as_deref()),
    }
}

/// Settings for the client script, as JSON safe to inline in a `<script>` block.
fn page_data(page: &Page) -> String {
    let slider = &page.config().slider;
    let data = serde_json::json!({
        "sliderImages": page.slider_images(),
        "galleryImages": page.gallery_images(),
        "intervalMs": slider.interval_ms,
        "fadeMs": slider.fade_ms,
        "placeholder": page.guard().placeholder(),
    });
    data.to_string().replace("</", "<\\/")
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the complete page document
pub fn render_page(page: &Page) -> Markup {
    let doc = page.document();
    let title = doc
        .and_then(ContentDocument::navbar_title)
        .unwrap_or(DEFAULT_TITLE);
    let logo = doc.and_then(ContentDocument::logo_url);

    let content = html! {
        (site_header(title, logo, page.guard()))
        main {
            (page.render_section(Section::Hero))
            (render_about(doc.and_then(|d| d.about.as_ref()), page.guard()))
            section.categories id="categories" {
                h2 { "Categories" }
                (page.render_section(Section::Categories))
            }
            (page.render_section(Section::Gallery))
            (page.render_section(Section::Lightbox))
            (render_contact(&contact_details(page)))
        }
        (site_footer(title))
        script type="application/json" id="folio-data" { (PreEscaped(page_data(page))) }
        script src="site.js" defer {}
    };

    base_document(title, logo, content)
}
