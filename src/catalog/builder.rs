use crate::cache::{CacheKey, CacheStore};
use crate::catalog::{
    CategoryCatalog, CategoryDescriptor, CATEGORY_LINK_CLASS, SUB_CATEGORY_LINK_CLASS,
};
use crate::extract::clean_text;
use crate::extract::selectors::ANCHOR;
use crate::url::strip_query;
use crate::BestsellerError;
use scraper::{ElementRef, Html};
use std::path::Path;

/// Parses a category-listing document into a catalog
///
/// Anchors are partitioned by marker class. Both lists keep document order;
/// duplicates are kept. Anchors without an `href` carry no category and are
/// skipped.
///
/// # Example
///
/// ```
/// use audiobook_bestsellers::catalog::build_catalog;
///
/// let html = r#"<a class="categoryLink" href="/cat/Mystery?ref=x">Mystery</a>"#;
/// let catalog = build_catalog(html);
/// assert_eq!(catalog.categories[0].href, "/cat/Mystery");
/// ```
pub fn build_catalog(html: &str) -> CategoryCatalog {
    let document = Html::parse_document(html);
    let mut catalog = CategoryCatalog::default();

    for anchor in document.select(&ANCHOR) {
        let is_category = has_class(&anchor, CATEGORY_LINK_CLASS);
        let is_sub_category = has_class(&anchor, SUB_CATEGORY_LINK_CLASS);
        if !is_category && !is_sub_category {
            continue;
        }

        let Some(descriptor) = describe(&anchor) else {
            tracing::debug!("Skipping category anchor without href");
            continue;
        };

        if is_category {
            catalog.categories.push(descriptor.clone());
        }
        if is_sub_category {
            catalog.sub_categories.push(descriptor);
        }
    }

    catalog
}

/// Loads the catalog from the cache, building it from the snapshot on a miss
///
/// The snapshot is only read when no catalog is cached yet; a missing
/// snapshot at that point is fatal.
pub fn load_catalog(
    cache: &CacheStore,
    catalog_path: &Path,
    snapshot_path: &Path,
) -> Result<CategoryCatalog, BestsellerError> {
    let key = CacheKey::fixed(catalog_path);
    let cached = cache.contains(&key);

    let catalog = cache.get_or_compute(&key, || {
        if !snapshot_path.is_file() {
            return Err(BestsellerError::MissingSnapshot {
                path: snapshot_path.display().to_string(),
            });
        }

        let html = std::fs::read_to_string(snapshot_path)?;
        Ok(build_catalog(&html))
    })?;

    if !cached {
        tracing::info!(
            "Saved: {} ({} categories, {} sub_categories)",
            catalog_path.display(),
            catalog.categories.len(),
            catalog.sub_categories.len()
        );
    }

    Ok(catalog)
}

fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn describe(anchor: &ElementRef) -> Option<CategoryDescriptor> {
    let href = anchor.value().attr("href")?;
    Some(CategoryDescriptor {
        title: clean_text(anchor.text()),
        href: strip_query(href.trim()).to_string(),
    })
}
