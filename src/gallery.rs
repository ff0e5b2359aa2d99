//! Collage gallery and lightbox.
//!
//! Tiles get their size from their position alone (see [`TileSpan`]), so the
//! same image list always lays out the same way. Clicking a tile opens the
//! [`Lightbox`] on that image; from there next/previous wrap around the list in
//! both directions.

use crate::fallback::{FallbackImageGuard, ImageId};
use maud::{Markup, html};

/// Grid footprint of a gallery tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSpan {
    /// 2 columns × 2 rows.
    Large,
    /// 1 column × 2 rows.
    Tall,
    /// 2 columns × 1 row.
    Wide,
    Standard,
}

impl TileSpan {
    /// Span of the tile at zero-based `position`.
    ///
    /// Every 6th tile is large, then every 5th tall, then every 4th wide. The
    /// first tile (position 0) is always large.
    pub fn for_position(position: usize) -> Self {
        if position % 6 == 0 {
            TileSpan::Large
        } else if position % 5 == 0 {
            TileSpan::Tall
        } else if position % 4 == 0 {
            TileSpan::Wide
        } else {
            TileSpan::Standard
        }
    }

    pub fn columns(self) -> u8 {
        match self {
            TileSpan::Large | TileSpan::Wide => 2,
            TileSpan::Tall | TileSpan::Standard => 1,
        }
    }

    pub fn rows(self) -> u8 {
        match self {
            TileSpan::Large | TileSpan::Tall => 2,
            TileSpan::Wide | TileSpan::Standard => 1,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            TileSpan::Large => "tile-large",
            TileSpan::Tall => "tile-tall",
            TileSpan::Wide => "tile-wide",
            TileSpan::Standard => "tile-standard",
        }
    }
}

/// Render the collage: one tile per image, in order.
pub fn render_gallery(images: &[String], guard: &FallbackImageGuard) -> Markup {
    html! {
        section.featured-work id="featured-work" {
            div.gallery-grid id="gallery" {
                @for (i, src) in images.iter().enumerate() {
                    @let span = TileSpan::for_position(i);
                    div class={ "gallery-tile " (span.class()) } data-index=(i) {
                        (guard.img(&ImageId::gallery(i), src, &format!("Gallery image {}", i + 1), "gallery-img"))
                    }
                }
            }
        }
    }
}

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowRight" => Key::ArrowRight,
            "ArrowLeft" => Key::ArrowLeft,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Which part of the open modal received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxClick {
    /// The displayed image itself. Does nothing.
    Image,
    /// The dimmed area around the image. Closes the modal.
    Backdrop,
    Next,
    Prev,
    Close,
}

/// Full-size image modal over the gallery.
#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    images: Vec<String>,
    current: Option<usize>,
}

impl Lightbox {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            current: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Index of the displayed image while open.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.images.get(i))
            .map(String::as_str)
    }

    /// 1-based position and total, for the modal counter.
    pub fn counter(&self) -> Option<(usize, usize)> {
        self.current.map(|i| (i + 1, self.images.len()))
    }

    /// Open on `index`. Never opens on an empty gallery or a missing index.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.current = Some(index);
        true
    }

    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn next(&mut self) -> bool {
        self.step(|i, len| (i + 1) % len)
    }

    pub fn prev(&mut self) -> bool {
        self.step(|i, len| (i + len - 1) % len)
    }

    fn step(&mut self, f: impl FnOnce(usize, usize) -> usize) -> bool {
        let len = self.images.len();
        match self.current {
            Some(i) if len > 0 => {
                self.current = Some(f(i, len));
                true
            }
            _ => false,
        }
    }

    /// Keyboard navigation. Keys are ignored while the modal is closed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            Key::ArrowRight => self.next(),
            Key::ArrowLeft => self.prev(),
            Key::Escape => self.close(),
            Key::Other => false,
        }
    }

    /// Returns whether the modal state changed.
    pub fn click(&mut self, click: LightboxClick) -> bool {
        match click {
            LightboxClick::Image => false,
            LightboxClick::Backdrop | LightboxClick::Close => self.close(),
            LightboxClick::Next => self.next(),
            LightboxClick::Prev => self.prev(),
        }
    }

    pub fn render(&self, guard: &FallbackImageGuard) -> Markup {
        let (position, total) = self.counter().unwrap_or((0, self.images.len()));
        html! {
            div.image-modal.hidden[!self.is_open()] id="image-modal" role="dialog" aria-modal="true" {
                button.modal-close id="close-modal" type="button" aria-label="Close" { "×" }
                button.modal-prev id="prev-modal" type="button" aria-label="Previous image" { "‹" }
                @if let Some(src) = self.current_image() {
                    (guard.img(&ImageId::lightbox(), src, &format!("Gallery image {position}"), "modal-img"))
                } @else {
                    (guard.empty_img(&ImageId::lightbox(), "", "modal-img"))
                }
                button.modal-next id="next-modal" type="button" aria-label="Next image" { "›" }
                div.modal-counter {
                    span id="current-image" { (position) }
                    " / "
                    span id="total-images" { (total) }
                }
            }
        }
    }
}
