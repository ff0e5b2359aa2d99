//! # Folio
//!
//! The rendering layer of a photography portfolio site. One JSON content
//! document drives every section of a single page: the hero slider, the
//! category cards, the featured-work collage with its lightbox, the about and
//! contact sections.
//!
//! # Architecture: Load, Mount, Step
//!
//! ```text
//! 1. Load    content.json  →  Option<Arc<ContentDocument>>   (one shared fetch)
//! 2. Mount   document      →  Page                           (controllers + fallback guard)
//! 3. Step    PageEvent     →  Vec<Effect>                    (pure state transition)
//! ```
//!
//! Rendering is a projection of the page state into [maud] markup and never
//! mutates anything. The CLI renders a static snapshot; the [`runtime`] loop
//! drives the same page from live events and timers.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Loads the content document once and shares the snapshot |
//! | [`types`] | The content document and its records, with lenient parsing |
//! | [`slider`] | Hero slider: cyclic index, fade tickets, indicators |
//! | [`categories`] | Category cards: truncation, Read More / Show Less, navigation targets |
//! | [`gallery`] | Collage tile spans and the lightbox viewer |
//! | [`fallback`] | Broken-image guard: swap to the placeholder at most once |
//! | [`contact`] | Contact section and `mailto:` composition |
//! | [`page`] | All controllers behind one `handle(event) -> effects` entry point |
//! | [`runtime`] | Single-task event loop with the auto-advance interval and fade timers |
//! | [`generate`] | Full document rendering and writing the page to disk |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Absence Is Not an Error
//!
//! Every field of the content document is optional. A missing key, an explicit
//! `null` or a value of the wrong shape degrades to the field's default, and a
//! document that fails to load at all leaves each section in its static
//! default state. The page always renders.
//!
//! ## State Lives in the Controllers
//!
//! The current slide, the fade generation, per-card expansion and the lightbox
//! position are fields of their controllers, owned by [`page::Page`]. There is
//! no module-level mutable state, so two pages never observe each other.
//!
//! ## Last Write Wins for Fades
//!
//! Each slider transition issues a new [`slider::FadeTicket`]. Completing a
//! fade with an older ticket is a no-op, so a manual indicator click during a
//! pending auto-advance fade can never be overwritten by the stale timer.
//!
//! ## Explicit Image Registration
//!
//! Every image element the page inserts goes through
//! [`fallback::FallbackImageGuard`], which attaches one failure handler per
//! element. Nothing watches the rendered tree for changes.

pub mod categories;
pub mod config;
pub mod contact;
pub mod content;
pub mod fallback;
pub mod gallery;
pub mod generate;
pub mod output;
pub mod page;
pub mod runtime;
pub mod slider;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
