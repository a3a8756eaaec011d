//! Category catalog built from the category-listing snapshot
//!
//! The listing page links every top-level category and sub-category of the
//! store. Its anchors carry a marker class that tells the two apart; this
//! module turns them into descriptors the crawler can visit.

mod builder;

pub use builder::{build_catalog, load_catalog};

use serde::{Deserialize, Serialize};

/// Marker class of top-level category anchors
pub const CATEGORY_LINK_CLASS: &str = "categoryLink";

/// Marker class of sub-category anchors
pub const SUB_CATEGORY_LINK_CLASS: &str = "subCategoryLink";

/// One browsable catalog section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    /// Visible link text
    pub title: String,

    /// Site-relative link target without its query string
    pub href: String,
}

/// Every category and sub-category found on the listing page, in page order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    pub categories: Vec<CategoryDescriptor>,
    pub sub_categories: Vec<CategoryDescriptor>,
}

impl CategoryCatalog {
    /// Descriptors to crawl: categories, then sub-categories when requested
    pub fn crawl_targets(&self, include_sub_categories: bool) -> Vec<CategoryDescriptor> {
        let mut targets = self.categories.clone();
        if include_sub_categories {
            targets.extend(self.sub_categories.iter().cloned());
        }
        targets
    }
}
