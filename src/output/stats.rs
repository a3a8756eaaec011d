//! Duration statistics per category
//!
//! This module reduces crawled category results to the numbers the report
//! shows: mean, longest and shortest audiobook length in minutes.

use crate::crawler::CategoryPageResult;

/// Duration summary of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStatistics {
    /// Category title
    pub category: String,

    /// Number of bestsellers the figures are computed from
    pub count: usize,

    /// Integer-floor mean of the parsed minutes
    pub average_minutes: u32,

    pub max_minutes: u32,

    pub min_minutes: u32,
}

/// Summarizes one category
///
/// Records whose length could not be read count as 0 minutes.
///
/// # Returns
///
/// * `Some(CategoryStatistics)` - The category has at least one bestseller
/// * `None` - No bestsellers, so no mean exists
pub fn summarize(result: &CategoryPageResult) -> Option<CategoryStatistics> {
    let minutes: Vec<u32> = result.bestsellers.iter().map(|r| r.minutes).collect();

    let max_minutes = *minutes.iter().max()?;
    let min_minutes = *minutes.iter().min()?;
    let total: u64 = minutes.iter().map(|&m| u64::from(m)).sum();
    let average_minutes = (total / minutes.len() as u64) as u32;

    Some(CategoryStatistics {
        category: result.category.title.clone(),
        count: minutes.len(),
        average_minutes,
        max_minutes,
        min_minutes,
    })
}

/// Builds report rows sorted ascending by average
///
/// Ties keep crawl order. Categories without bestsellers are logged and left
/// out.
pub fn build_report(results: &[CategoryPageResult]) -> Vec<CategoryStatistics> {
    let mut rows: Vec<CategoryStatistics> = results
        .iter()
        .filter_map(|result| {
            let stats = summarize(result);
            if stats.is_none() {
                tracing::warn!(
                    "No bestsellers found for {}, leaving it out of the report",
                    result.category.title
                );
            }
            stats
        })
        .collect();

    rows.sort_by_key(|row| row.average_minutes);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryDescriptor;
    use crate::extract::AudiobookRecord;

    fn result(title: &str, minutes: &[u32]) -> CategoryPageResult {
        CategoryPageResult {
            category: CategoryDescriptor {
                title: title.to_string(),
                href: format!("/cat/{}", title),
            },
            bestsellers: minutes
                .iter()
                .map(|&m| AudiobookRecord {
                    minutes: m,
                    ..AudiobookRecord::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_summarize_floors_the_mean() {
        let stats = summarize(&result("Poetry", &[10, 20, 25])).unwrap();
        assert_eq!(stats.average_minutes, 18);
        assert_eq!(stats.max_minutes, 25);
        assert_eq!(stats.min_minutes, 10);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_unknown_lengths_count_as_zero() {
        let stats = summarize(&result("Mixed", &[0, 100])).unwrap();
        assert_eq!(stats.average_minutes, 50);
        assert_eq!(stats.min_minutes, 0);
    }

    #[test]
    fn test_empty_category_has_no_statistics() {
        assert_eq!(summarize(&result("Empty", &[])), None);
    }

    #[test]
    fn test_report_is_sorted_ascending_and_skips_empty() {
        let results = vec![
            result("Long", &[600, 700]),
            result("Empty", &[]),
            result("Short", &[30, 45]),
            result("Medium", &[300]),
        ];

        let rows = build_report(&results);
        let order: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(order, vec!["Short", "Medium", "Long"]);
    }

    #[test]
    fn test_ties_keep_crawl_order() {
        let results = vec![result("First", &[60]), result("Second", &[60])];
        let rows = build_report(&results);
        assert_eq!(rows[0].category, "First");
        assert_eq!(rows[1].category, "Second");
    }

    #[test]
    fn test_large_totals_do_not_overflow() {
        let stats = summarize(&result("Huge", &[u32::MAX, u32::MAX])).unwrap();
        assert_eq!(stats.average_minutes, u32::MAX);
    }
}
