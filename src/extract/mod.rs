//! Audiobook record extraction from product cards
//!
//! A product card is the markup subtree for one listed audiobook. Third-party
//! markup drifts, so every field is read by its own rule in [`rules`] and
//! degrades to its absent value on its own; a card always yields a record.

mod duration;
pub mod rules;
pub mod selectors;

pub use duration::{duration_minutes, parse_duration};
pub use rules::{extract_record, RecordExtractor};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rating dimensions, in the order the card lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingAspect {
    Overall,
    Performance,
    Story,
}

impl RatingAspect {
    pub const ALL: [RatingAspect; 3] = [
        RatingAspect::Overall,
        RatingAspect::Performance,
        RatingAspect::Story,
    ];
}

/// Metadata of one bestselling audiobook
///
/// Every field may be absent. `minutes` is 0 when the length is missing or
/// could not be read; `ratings` and `review_counts` omit what is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudiobookRecord {
    pub title: Option<String>,
    pub series: Option<String>,
    pub author: Option<String>,
    pub narrated_by: Option<String>,

    /// Length as displayed, e.g. `3 hrs and 20 mins`
    pub length: Option<String>,
    pub minutes: u32,

    /// Star ratings as displayed, e.g. `4.5 out of 5 stars`
    pub ratings: BTreeMap<RatingAspect, String>,
    pub review_counts: BTreeMap<RatingAspect, u64>,

    pub description: Option<String>,
    pub cover_image: Option<String>,

    /// Catalog identifier
    pub asin: Option<String>,

    /// Absolute product page URL
    pub url: Option<String>,
}

/// Joins text nodes, collapses whitespace runs to single spaces and trims
pub fn clean_text<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts
        .into_iter()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
