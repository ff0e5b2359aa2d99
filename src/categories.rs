//! Category cards.
//!
//! Each category record becomes one card: image, title, and a description that
//! is cut to an excerpt when it runs past the configured length. Expandable
//! cards get a Read More / Show Less pair whose state lives on the card only;
//! the record itself is never touched.
//!
//! A click on the card body navigates to the category's target. Clicks on the
//! toggle controls are consumed by the toggle and never reach the card.
//!
//! Where a click goes is a configuration choice, not something inferred from
//! the record: [`NavigationMode::DirectUrl`] follows the category's `url`,
//! [`NavigationMode::DetailPage`] addresses the category by its position.

use crate::config::{CategoriesConfig, NavigationMode};
use crate::fallback::{FallbackImageGuard, ImageId};
use crate::types::Category;
use maud::{Markup, html};

/// Appended to truncated descriptions.
pub const ELLIPSIS: &str = "...";

/// Cut `text` to `limit` characters plus [`ELLIPSIS`].
///
/// Returns `None` when the text fits and should be shown as is.
pub fn truncate_description(text: &str, limit: usize) -> Option<String> {
    if text.chars().count() <= limit {
        return None;
    }
    let mut excerpt: String = text.chars().take(limit).collect();
    excerpt.push_str(ELLIPSIS);
    Some(excerpt)
}

/// Where a card click leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Url(String),
    DetailPage { page: String, index: usize },
}

impl NavTarget {
    pub fn href(&self) -> String {
        match self {
            NavTarget::Url(url) => url.clone(),
            NavTarget::DetailPage { page, index } => format!("{page}?category={index}"),
        }
    }
}

/// Which part of a card received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardClick {
    Body,
    ReadMore,
    ShowLess,
}

#[derive(Debug, Clone)]
pub struct CategoryCard {
    index: usize,
    category: Category,
    excerpt: Option<String>,
    expanded: bool,
    target: Option<NavTarget>,
}

impl CategoryCard {
    fn new(index: usize, category: &Category, config: &CategoriesConfig) -> Self {
        let target = match config.navigation {
            NavigationMode::DirectUrl => category
                .url
                .as_deref()
                .filter(|url| !url.is_empty())
                .map(|url| NavTarget::Url(url.to_string())),
            NavigationMode::DetailPage => Some(NavTarget::DetailPage {
                page: config.detail_page.clone(),
                index,
            }),
        };
        Self {
            index,
            category: category.clone(),
            excerpt: truncate_description(&category.description, config.truncate_at),
            expanded: false,
            target,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Whether the description was cut and the toggle controls are shown.
    pub fn is_expandable(&self) -> bool {
        self.excerpt.is_some()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// The description text the card currently shows.
    pub fn visible_text(&self) -> &str {
        match &self.excerpt {
            Some(excerpt) if !self.expanded => excerpt,
            _ => &self.category.description,
        }
    }

    pub fn target(&self) -> Option<&NavTarget> {
        self.target.as_ref()
    }

    /// Show the full description. Returns whether anything changed.
    pub fn read_more(&mut self) -> bool {
        if !self.is_expandable() || self.expanded {
            return false;
        }
        self.expanded = true;
        true
    }

    /// Return to the excerpt. Returns whether anything changed.
    pub fn show_less(&mut self) -> bool {
        if !self.expanded {
            return false;
        }
        self.expanded = false;
        true
    }

    pub fn render(&self, guard: &FallbackImageGuard) -> Markup {
        let href = self.target.as_ref().map(NavTarget::href);
        html! {
            div.category-card data-category-index=(self.index) data-href=[href] {
                div.category-image {
                    (guard.img(&ImageId::category(self.index), &self.category.image, &self.category.title, "category-img"))
                }
                div.category-content {
                    h3 { (self.category.title) }
                    @if let Some(excerpt) = &self.excerpt {
                        p.card-desc data-excerpt=(excerpt) data-full=(self.category.description) {
                            (self.visible_text())
                        }
                    } @else {
                        p.card-desc { (self.visible_text()) }
                    }
                    @if self.is_expandable() {
                        button.read-more-btn type="button" hidden[self.expanded] { "Read More" }
                        button.show-less-btn type="button" hidden[!self.expanded] { "Show Less" }
                    }
                }
            }
        }
    }
}

/// All category cards of the page, in document order.
#[derive(Debug, Clone, Default)]
pub struct CategoryBoard {
    cards: Vec<CategoryCard>,
}

impl CategoryBoard {
    pub fn new(categories: &[Category], config: &CategoriesConfig) -> Self {
        let mut board = Self::default();
        board.rebuild(categories, config);
        board
    }

    /// Replace every card. Toggle state of the previous cards is dropped.
    pub fn rebuild(&mut self, categories: &[Category], config: &CategoriesConfig) {
        self.cards = categories
            .iter()
            .enumerate()
            .map(|(index, category)| CategoryCard::new(index, category, config))
            .collect();
    }

    pub fn cards(&self) -> &[CategoryCard] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&CategoryCard> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Dispatch a click on card `index`.
    ///
    /// Only a body click yields a navigation target; toggle clicks stop at the
    /// toggle.
    pub fn click(&mut self, index: usize, click: CardClick) -> Option<NavTarget> {
        let card = self.cards.get_mut(index)?;
        match click {
            CardClick::Body => card.target().cloned(),
            CardClick::ReadMore => {
                card.read_more();
                None
            }
            CardClick::ShowLess => {
                card.show_less();
                None
            }
        }
    }

    /// Image elements the board inserts, for fallback registration.
    pub fn images(&self) -> impl Iterator<Item = (ImageId, &str)> + '_ {
        self.cards
            .iter()
            .map(|card| (ImageId::category(card.index), card.category.image.as_str()))
    }

    pub fn render(&self, guard: &FallbackImageGuard) -> Markup {
        html! {
            div.categories-container id="categories-container" {
                @for card in &self.cards {
                    (card.render(guard))
                }
            }
        }
    }
}

/// Resolve the category addressed by a detail-page query string such as
/// `?category=2`.
pub fn resolve_category_query<'a>(
    categories: &'a [Category],
    query: &str,
) -> Option<(usize, &'a Category)> {
    let index = query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "category")
        .and_then(|(_, value)| value.parse::<usize>().ok())?;
    categories.get(index).map(|category| (index, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{category, opening_tag};
    use proptest::prelude::*;

    fn guard() -> FallbackImageGuard {
        FallbackImageGuard::new(None)
    }

    fn detail_config() -> CategoriesConfig {
        CategoriesConfig {
            navigation: NavigationMode::DetailPage,
            ..Default::default()
        }
    }

    #[test]
    fn short_description_is_not_truncated() {
        assert_eq!(truncate_description("Short", 200), None);
        assert_eq!(truncate_description(&"x".repeat(200), 200), None);
    }

    #[test]
    fn long_description_keeps_first_200_chars() {
        let text = "A".repeat(250);
        let excerpt = truncate_description(&text, 200).unwrap();
        assert_eq!(excerpt, format!("{}...", "A".repeat(200)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(201);
        let excerpt = truncate_description(&text, 200).unwrap();
        assert_eq!(excerpt.chars().count(), 203);
    }

    #[test]
    fn weddings_card_end_to_end() {
        let categories = vec![category("Weddings", &"A".repeat(250), "w.jpg", Some("/weddings"))];
        let mut board = CategoryBoard::new(&categories, &CategoriesConfig::default());
        assert_eq!(board.len(), 1);

        let card = board.card(0).unwrap();
        assert_eq!(card.visible_text(), format!("{}...", "A".repeat(200)));

        let html = board.render(&guard()).into_string();
        assert!(!opening_tag(&html, "Read More").contains("hidden"));
        assert!(opening_tag(&html, "Show Less").contains("hidden"));

        assert_eq!(
            board.click(0, CardClick::Body),
            Some(NavTarget::Url("/weddings".to_string()))
        );
    }

    #[test]
    fn short_card_renders_no_controls() {
        let categories = vec![category("Portraits", "Faces.", "p.jpg", None)];
        let board = CategoryBoard::new(&categories, &CategoriesConfig::default());
        let html = board.render(&guard()).into_string();
        assert!(html.contains("Faces."));
        assert!(!html.contains("read-more-btn"));
        assert!(!html.contains("show-less-btn"));
    }

    #[test]
    fn toggle_clicks_never_navigate() {
        let categories = vec![category("Weddings", &"A".repeat(250), "w.jpg", Some("/weddings"))];
        let mut board = CategoryBoard::new(&categories, &CategoriesConfig::default());

        assert_eq!(board.click(0, CardClick::ReadMore), None);
        assert!(board.card(0).unwrap().is_expanded());
        assert_eq!(board.card(0).unwrap().visible_text(), "A".repeat(250));

        assert_eq!(board.click(0, CardClick::ShowLess), None);
        assert!(!board.card(0).unwrap().is_expanded());
    }

    #[test]
    fn expanded_card_swaps_control_visibility() {
        let categories = vec![category("Weddings", &"A".repeat(250), "w.jpg", None)];
        let mut board = CategoryBoard::new(&categories, &CategoriesConfig::default());
        board.click(0, CardClick::ReadMore);
        let html = board.render(&guard()).into_string();
        assert!(opening_tag(&html, "Read More").contains("hidden"));
        assert!(!opening_tag(&html, "Show Less").contains("hidden"));
    }

    #[test]
    fn toggle_state_is_per_card() {
        let long = "B".repeat(300);
        let categories = vec![
            category("One", &long, "1.jpg", None),
            category("Two", &long, "2.jpg", None),
        ];
        let mut board = CategoryBoard::new(&categories, &CategoriesConfig::default());
        board.click(1, CardClick::ReadMore);
        assert!(!board.card(0).unwrap().is_expanded());
        assert!(board.card(1).unwrap().is_expanded());
    }

    #[test]
    fn read_more_on_short_card_is_a_no_op() {
        let categories = vec![category("Short", "tiny", "s.jpg", None)];
        let mut board = CategoryBoard::new(&categories, &CategoriesConfig::default());
        board.click(0, CardClick::ReadMore);
        assert!(!board.card(0).unwrap().is_expanded());
        assert_eq!(board.card(0).unwrap().visible_text(), "tiny");
    }

    #[test]
    fn direct_mode_without_url_does_not_navigate() {
        let categories = vec![category("Street", "Walks", "s.jpg", None)];
        let mut board = CategoryBoard::new(&categories, &CategoriesConfig::default());
        assert_eq!(board.click(0, CardClick::Body), None);
    }

    #[test]
    fn detail_mode_navigates_by_position() {
        let categories = vec![
            category("One", "a", "1.jpg", Some("/one")),
            category("Two", "b", "2.jpg", Some("/two")),
        ];
        let mut board = CategoryBoard::new(&categories, &detail_config());
        let target = board.click(1, CardClick::Body).unwrap();
        assert_eq!(target.href(), "category.html?category=1");
    }

    #[test]
    fn click_on_missing_card_is_ignored() {
        let mut board = CategoryBoard::new(&[], &CategoriesConfig::default());
        assert_eq!(board.click(4, CardClick::Body), None);
    }

    #[test]
    fn rebuild_replaces_cards() {
        let first = vec![category("One", "a", "1.jpg", None)];
        let second = vec![
            category("Two", "b", "2.jpg", None),
            category("Three", "c", "3.jpg", None),
        ];
        let mut board = CategoryBoard::new(&first, &CategoriesConfig::default());
        board.rebuild(&second, &CategoriesConfig::default());
        board.rebuild(&second, &CategoriesConfig::default());
        assert_eq!(board.len(), 2);
        let html = board.render(&guard()).into_string();
        assert_eq!(html.matches("category-card").count(), 2);
        assert!(!html.contains("One"));
    }

    #[test]
    fn render_escapes_record_text() {
        let categories = vec![category("<b>Bold</b>", "x", "i.jpg", None)];
        let board = CategoryBoard::new(&categories, &CategoriesConfig::default());
        let html = board.render(&guard()).into_string();
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
    }

    #[test]
    fn resolve_query_finds_category() {
        let categories = vec![
            category("One", "a", "1.jpg", None),
            category("Two", "b", "2.jpg", None),
        ];
        let (index, found) = resolve_category_query(&categories, "?category=1").unwrap();
        assert_eq!(index, 1);
        assert_eq!(found.title, "Two");
        assert!(resolve_category_query(&categories, "?lang=en&category=0").is_some());
        assert!(resolve_category_query(&categories, "?category=9").is_none());
        assert!(resolve_category_query(&categories, "?category=x").is_none());
        assert!(resolve_category_query(&categories, "").is_none());
    }

    proptest! {
        #[test]
        fn read_more_then_show_less_restores_excerpt(text in ".{0,400}") {
            let categories = vec![category("T", &text, "t.jpg", None)];
            let mut board = CategoryBoard::new(&categories, &CategoriesConfig::default());
            let before = board.card(0).unwrap().visible_text().to_string();
            board.click(0, CardClick::ReadMore);
            board.click(0, CardClick::ShowLess);
            prop_assert_eq!(board.card(0).unwrap().visible_text(), before.as_str());

            let expandable = text.chars().count() > 200;
            prop_assert_eq!(board.card(0).unwrap().is_expandable(), expandable);
            if expandable {
                prop_assert_eq!(before.chars().count(), 200 + ELLIPSIS.len());
            } else {
                prop_assert_eq!(before, text);
            }
        }
    }
}
