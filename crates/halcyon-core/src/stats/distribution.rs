//! Category distribution with rounded percentages.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One category's share of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: u64,
    /// Percentage of the total, rounded to the nearest integer.
    pub percentage: u32,
}

/// Group records by category and compute each category's count and share.
///
/// Sorted by count descending; ties break on category name ascending so the
/// ordering is deterministic regardless of input order.
pub fn distribution<T>(
    records: &[T],
    category_of: impl Fn(&T) -> String,
) -> Vec<CategoryShare> {
    let total = records.len() as u64;
    if total == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in records {
        *counts.entry(category_of(record)).or_insert(0) += 1;
    }

    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category,
            count,
            percentage: (count as f64 / total as f64 * 100.0).round() as u32,
        })
        .collect();

    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    shares
}
