//! CSS selectors for category pages and product cards.
//!
//! Every selector the extractor depends on is declared here. When the store
//! changes its markup, update the selector and add the new card shape to the
//! rule tests.

use scraper::Selector;
use std::sync::LazyLock;

macro_rules! parse_selector {
    ($s:expr) => {
        LazyLock::new(|| Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s)))
    };
}

/// Links of the category-listing page.
pub static ANCHOR: LazyLock<Selector> = parse_selector!("a");

/// One product card inside the bestseller container.
pub static PRODUCT_CARD: LazyLock<Selector> = parse_selector!("li.productListItem");

/// Heading-like elements; the first one holds the title.
pub static HEADING: LazyLock<Selector> = parse_selector!("h1, h2, h3, h4, h5, h6");

/// Bulleted lists; the first one carries title, series and credits.
pub static LIST: LazyLock<Selector> = parse_selector!("ul");

pub static LIST_ITEM: LazyLock<Selector> = parse_selector!("li");

/// Star rating labels: overall, performance, story.
pub static RATING_LABEL: LazyLock<Selector> = parse_selector!(".ratingsLabel");

/// Review count containers, same order as the rating labels.
pub static REVIEW_COUNT: LazyLock<Selector> = parse_selector!(".ratingsCount");

/// Label paragraph directly followed by the summary paragraph.
pub static SUMMARY_LABEL: LazyLock<Selector> = parse_selector!("p.summaryLabel");

pub static IMAGE: LazyLock<Selector> = parse_selector!("img");

/// Impression-tracking element carrying the catalog identifier and product path.
pub static IMPRESSION: LazyLock<Selector> = parse_selector!(".adbl-impression-container");

/// Attributes on the impression-tracking element.
pub const ASIN_ATTR: &str = "data-asin";
pub const URL_ATTR: &str = "data-url";

/// Markers of the credit list items.
pub const AUTHOR_MARKER: &str = "By:";
pub const NARRATOR_MARKER: &str = "Narrated by:";
pub const LENGTH_MARKER: &str = "Length:";
pub const SERIES_MARKER: &str = "Series:";
