//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity (slide,
//! category, gallery tile) leads with its positional index and its identity;
//! sources, links and descriptions follow as indented context lines. The
//! result reads as a content inventory of the page.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Content: data/portfolio.json
//!
//! Slider (3 images)
//! 001 a.jpg
//! 002 b.jpg
//!
//! Categories
//! 001 Weddings
//!     Image: w.jpg
//!     Link: /weddings
//!     Description: Every couple has a story. We tell it wi...
//!
//! Gallery (3 images)
//! 001 g0.jpg [large]
//!
//! Settings
//!     Title: Studio North
//!     Email: studio@example.com
//! ```
//!
//! ## Render
//!
//! ```text
//! dist/index.html
//! dist/site.js
//! Rendered 3 slides, 1 category, 3 gallery images (8 images guarded)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::categories::{CategoryBoard, truncate_description};
use crate::config::SiteConfig;
use crate::content::ContentSource;
use crate::gallery::TileSpan;
use crate::generate::GenerateSummary;
use crate::types::ContentDocument;

/// Descriptions in the inventory are cut to this many characters.
const DESCRIPTION_WIDTH: usize = 40;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Section header with an image count.
///
/// ```text
/// Slider (3 images)
/// Gallery (1 image)
/// ```
fn counted_header(title: &str, count: usize) -> String {
    format!("{} ({} {})", title, count, plural(count, "image", "images"))
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn context_line(label: &str, value: &str) -> String {
    format!("{}{}: {}", indent(1), label, value)
}

// ============================================================================
// Check
// ============================================================================

/// Format the content inventory for `folio check`.
pub fn format_check_output(
    source: &ContentSource,
    doc: Option<&ContentDocument>,
    config: &SiteConfig,
) -> Vec<String> {
    let mut lines = Vec::new();

    let Some(doc) = doc else {
        lines.push(format!("Content: {} (unavailable)", source));
        lines.push("The page renders with every section in its default state.".to_string());
        return lines;
    };
    lines.push(format!("Content: {}", source));

    lines.push(String::new());
    lines.push(counted_header("Slider", doc.slider_images.len()));
    for (i, src) in doc.slider_images.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), src));
    }

    lines.push(String::new());
    lines.push("Categories".to_string());
    let board = CategoryBoard::new(&doc.categories, &config.categories);
    for card in board.cards() {
        let category = card.category();
        lines.push(format!("{} {}", format_index(card.index() + 1), category.title));
        lines.push(context_line("Image", &category.image));
        match card.target() {
            Some(target) => lines.push(context_line("Link", &target.href())),
            None => lines.push(context_line("Link", "(none)")),
        }
        if !category.description.is_empty() {
            let desc = truncate_description(&category.description, DESCRIPTION_WIDTH)
                .unwrap_or_else(|| category.description.clone());
            lines.push(context_line("Description", &desc));
        }
    }

    lines.push(String::new());
    lines.push(counted_header("Gallery", doc.gallery_images.len()));
    for (i, src) in doc.gallery_images.iter().enumerate() {
        let span = match TileSpan::for_position(i) {
            TileSpan::Large => " [large]",
            TileSpan::Tall => " [tall]",
            TileSpan::Wide => " [wide]",
            TileSpan::Standard => "",
        };
        lines.push(format!("{} {}{}", format_index(i + 1), src, span));
    }

    if let Some(settings) = &doc.settings {
        lines.push(String::new());
        lines.push("Settings".to_string());
        let fields = [
            ("Title", &settings.navbar_title),
            ("Logo", &settings.logo_url),
            ("Email", &settings.email),
            ("Phone", &settings.phone),
            ("Address", &settings.address),
            ("Instagram", &settings.instagram_url),
            ("Fallback image", &settings.fallback_image),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                lines.push(context_line(label, value));
            }
        }
    }

    lines
}

/// Print the content inventory to stdout.
pub fn print_check_output(
    source: &ContentSource,
    doc: Option<&ContentDocument>,
    config: &SiteConfig,
) {
    for line in format_check_output(source, doc, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Render
// ============================================================================

/// Format the result of `folio render`.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .files
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    lines.push(format!(
        "Rendered {} {}, {} {}, {} gallery {} ({} {} guarded)",
        summary.slides,
        plural(summary.slides, "slide", "slides"),
        summary.categories,
        plural(summary.categories, "category", "categories"),
        summary.gallery_images,
        plural(summary.gallery_images, "image", "images"),
        summary.guarded_images,
        plural(summary.guarded_images, "image", "images"),
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
