//! Field rules for product cards
//!
//! Each rule reads one field from a card and returns `None` when the markup
//! it relies on is missing. Rules share nothing, so a layout change breaks
//! exactly the rule that depends on it.

use crate::extract::selectors::{
    ASIN_ATTR, AUTHOR_MARKER, HEADING, IMAGE, IMPRESSION, LENGTH_MARKER, LIST, LIST_ITEM,
    NARRATOR_MARKER, RATING_LABEL, REVIEW_COUNT, SERIES_MARKER, SUMMARY_LABEL, URL_ATTR,
};
use crate::extract::{clean_text, duration_minutes, AudiobookRecord, RatingAspect};
use crate::url::join_origin;
use scraper::ElementRef;
use std::collections::BTreeMap;
use url::Url;

/// Builds records from product cards of one site
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    origin: Url,
}

impl RecordExtractor {
    /// `origin` is the site root product paths are appended to
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    /// Extracts every field of `card`; never fails
    pub fn extract(&self, card: ElementRef) -> AudiobookRecord {
        extract_record(card, &self.origin)
    }
}

/// Extracts every field of `card`; never fails
///
/// Missing fields stay absent, an unreadable length yields 0 minutes, and a
/// malformed review count empties the whole review-count map.
pub fn extract_record(card: ElementRef, origin: &Url) -> AudiobookRecord {
    let length = length(card);
    let minutes = length.as_deref().map(duration_minutes).unwrap_or(0);
    let (asin, url) = match impression(card) {
        Some(element) => (catalog_id(element), product_url(element, origin)),
        None => (None, None),
    };

    AudiobookRecord {
        title: title(card),
        series: series(card),
        author: author(card),
        narrated_by: narrated_by(card),
        length,
        minutes,
        ratings: ratings(card),
        review_counts: review_counts(card).unwrap_or_default(),
        description: description(card),
        cover_image: cover_image(card),
        asin,
        url,
    }
}

/// Text of the first heading
pub fn title(card: ElementRef) -> Option<String> {
    card.select(&HEADING).next().and_then(|h| non_empty(clean_text(h.text())))
}

/// Second item of the first bulleted list
pub fn series(card: ElementRef) -> Option<String> {
    let list = card.select(&LIST).next()?;
    let item = list.select(&LIST_ITEM).nth(1)?;
    let text = clean_text(item.text());
    let text = text.strip_prefix(SERIES_MARKER).unwrap_or(&text);
    non_empty(text.trim().to_string())
}

/// Credit after `By:`
pub fn author(card: ElementRef) -> Option<String> {
    marked_item(card, AUTHOR_MARKER)
}

/// Credit after `Narrated by:`
pub fn narrated_by(card: ElementRef) -> Option<String> {
    marked_item(card, NARRATOR_MARKER)
}

/// Display length after `Length:`
pub fn length(card: ElementRef) -> Option<String> {
    marked_item(card, LENGTH_MARKER)
}

/// Rating labels mapped by position; positions without a label are omitted
pub fn ratings(card: ElementRef) -> BTreeMap<RatingAspect, String> {
    card.select(&RATING_LABEL)
        .zip(RatingAspect::ALL)
        .filter_map(|(label, aspect)| non_empty(clean_text(label.text())).map(|t| (aspect, t)))
        .collect()
}

/// Review counts of the first three count containers
///
/// Each container ends in a number such as `1,234`. Returns `None` if any of
/// them does not, so one bad entry discards the group.
pub fn review_counts(card: ElementRef) -> Option<BTreeMap<RatingAspect, u64>> {
    card.select(&REVIEW_COUNT)
        .zip(RatingAspect::ALL)
        .map(|(container, aspect)| {
            let text = clean_text(container.text());
            let token = text.split_whitespace().last()?;
            let count = token.replace(',', "").parse::<u64>().ok()?;
            Some((aspect, count))
        })
        .collect()
}

/// Paragraph immediately following the summary label
pub fn description(card: ElementRef) -> Option<String> {
    let label = card.select(&SUMMARY_LABEL).next()?;
    let next = label.next_siblings().find_map(ElementRef::wrap)?;
    if next.value().name() != "p" {
        return None;
    }
    non_empty(clean_text(next.text()))
}

/// Source of the first image
pub fn cover_image(card: ElementRef) -> Option<String> {
    card.select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| non_empty(src.trim().to_string()))
}

/// Impression-tracking element of the card
pub fn impression(card: ElementRef) -> Option<ElementRef> {
    card.select(&IMPRESSION).next()
}

/// Catalog identifier from the impression element
pub fn catalog_id(impression: ElementRef) -> Option<String> {
    impression
        .value()
        .attr(ASIN_ATTR)
        .and_then(|asin| non_empty(asin.trim().to_string()))
}

/// Product URL from the impression element: origin followed by its path
pub fn product_url(impression: ElementRef, origin: &Url) -> Option<String> {
    let path = impression.value().attr(URL_ATTR)?;
    if path.trim().is_empty() {
        return None;
    }
    Some(join_origin(origin, path))
}

/// First list item containing `marker`, with the marker removed
fn marked_item(card: ElementRef, marker: &str) -> Option<String> {
    card.select(&LIST_ITEM)
        .map(|item| clean_text(item.text()))
        .find(|text| text.contains(marker))
        .and_then(|text| non_empty(clean_text([text.replace(marker, "").as_str()])))
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
