//! Hero slider.
//!
//! [`SliderController`] owns the slider state: the image list, the current
//! index and the fade phase. The auto-advance timer and indicator clicks both
//! end up in [`SliderController::go_to`].
//!
//! ## Transitions
//!
//! A transition fades the image out, swaps the source and fades back in after
//! a fixed delay. Every transition bumps a generation counter and hands back a
//! [`FadeTicket`]; only the ticket of the latest transition restores
//! visibility, so a burst of clicks resolves to the last requested image with
//! nothing queued behind it.

use crate::fallback::{FallbackImageGuard, ImageId};
use crate::types::SliderContent;
use maud::{Markup, html};

const DEFAULT_HEADING: &str = "Capturing Moments";
const DEFAULT_DESCRIPTION: &str = "Portraits, weddings and landscapes, told one frame at a time.";

/// Anchor the "Explore Latest Collections" button scrolls to.
pub const GALLERY_ANCHOR: &str = "#featured-work";

/// Proof that a fade-out was started; redeem with [`SliderController::finish_fade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeTicket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Visible,
    FadingOut,
}

#[derive(Debug, Clone)]
pub struct SliderController {
    images: Vec<String>,
    current_index: usize,
    phase: FadePhase,
    generation: u64,
}

impl SliderController {
    pub fn new(images: Vec<String>) -> Self {
        let mut slider = Self {
            images: Vec::new(),
            current_index: 0,
            phase: FadePhase::Visible,
            generation: 0,
        };
        slider.initialize(images);
        slider
    }

    /// Show the first image and rebuild the indicators. An empty list is a no-op.
    pub fn initialize(&mut self, images: Vec<String>) {
        self.images = images;
        self.current_index = 0;
        self.phase = FadePhase::Visible;
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The image the slider displays, `None` while there are no images.
    pub fn current_image(&self) -> Option<&str> {
        self.images.get(self.current_index).map(String::as_str)
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Move to the next image, wrapping to the first after the last.
    pub fn advance(&mut self) -> Option<FadeTicket> {
        if self.images.is_empty() {
            return None;
        }
        self.go_to(self.current_index + 1)
    }

    /// Jump to `index` (reduced modulo the image count) and start a fade.
    pub fn go_to(&mut self, index: usize) -> Option<FadeTicket> {
        if self.images.is_empty() {
            return None;
        }
        self.current_index = index % self.images.len();
        self.generation += 1;
        self.phase = FadePhase::FadingOut;
        tracing::debug!(index = self.current_index, "slider transition");
        Some(FadeTicket(self.generation))
    }

    /// Fade back in if `ticket` belongs to the latest transition.
    ///
    /// Returns `false` for superseded tickets; the newer transition owns the
    /// fade-in.
    pub fn finish_fade(&mut self, ticket: FadeTicket) -> bool {
        if ticket.0 != self.generation || self.phase == FadePhase::Visible {
            return false;
        }
        self.phase = FadePhase::Visible;
        true
    }

    /// One `(index, active)` pair per indicator.
    pub fn indicators(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.images.len()).map(move |i| (i, i == self.current_index))
    }

    /// Render the hero: slider image, indicators and the overlay text.
    pub fn render(&self, content: Option<&SliderContent>, guard: &FallbackImageGuard) -> Markup {
        let heading = content.and_then(|c| c.heading.as_deref()).unwrap_or(DEFAULT_HEADING);
        let description = content
            .and_then(|c| c.description.as_deref())
            .unwrap_or(DEFAULT_DESCRIPTION);
        let show_heading = content.is_none_or(SliderContent::heading_visible);
        let show_description = content.is_none_or(SliderContent::description_visible);
        let show_button = content.is_none_or(SliderContent::button_visible);
        let image_class = match self.phase {
            FadePhase::Visible => "slider-image fade",
            FadePhase::FadingOut => "slider-image",
        };

        html! {
            section.hero id="hero" {
                @if let Some(src) = self.current_image() {
                    @let alt = format!("Slide {}", self.current_index + 1);
                    (guard.img(&ImageId::slider(), src, &alt, image_class))
                }
                div.hero-content {
                    h1 id="heroHeading" hidden[!show_heading] { (heading) }
                    p id="heroDescription" hidden[!show_description] { (description) }
                    a.hero-button id="heroButton" href=(GALLERY_ANCHOR) hidden[!show_button] {
                        "Explore Latest Collections"
                    }
                }
                div.slider-dots id="dots" {
                    @for (i, active) in self.indicators() {
                        button.slider-dot.active[active] type="button" data-index=(i)
                            aria-label={ "Show slide " (i + 1) } {}
                    }
                }
            }
        }
    }
}
