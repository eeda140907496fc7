//! Category rollup of stocktake line values.
//!
//! A read-only projection: never stored, always recomputed from the
//! current line state, so it agrees with the lines whether the
//! stocktake is DRAFT or APPROVED.

use std::collections::HashMap;

use bartally_shared::types::CategoryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bucket name for lines whose item has no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The per-line values the rollup consumes.
#[derive(Debug, Clone)]
pub struct LineValue {
    /// The item's category, if any.
    pub category_id: Option<CategoryId>,
    /// Category display name; ignored when `category_id` is `None`.
    pub category_name: Option<String>,
    /// Category report position; ignored when `category_id` is `None`.
    pub category_sort_order: Option<i32>,
    /// The line's expected value.
    pub expected_value: Decimal,
    /// The line's counted value.
    pub counted_value: Decimal,
    /// The line's variance value.
    pub variance_value: Decimal,
}

/// Value totals for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category, or `None` for the uncategorized bucket.
    pub category_id: Option<CategoryId>,
    /// Display name for the bucket.
    pub category_name: String,
    /// Number of lines in the bucket.
    pub line_count: u64,
    /// Sum of expected values.
    pub expected_value: Decimal,
    /// Sum of counted values.
    pub counted_value: Decimal,
    /// Sum of variance values.
    pub variance_value: Decimal,
}

/// Grand-total values across every line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupTotals {
    /// Sum of expected values.
    pub expected_value: Decimal,
    /// Sum of counted values.
    pub counted_value: Decimal,
    /// Sum of variance values.
    pub variance_value: Decimal,
}

/// Per-category totals plus the grand total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRollup {
    /// One row per category with at least one line, in report order
    /// (sort order, then name), with the uncategorized bucket last.
    pub categories: Vec<CategoryTotal>,
    /// Grand total across all lines.
    pub total: RollupTotals,
}

/// Groups line values by category and sums them.
#[must_use]
pub fn rollup(lines: Vec<LineValue>) -> CategoryRollup {
    let mut buckets: HashMap<Option<CategoryId>, (Option<i32>, CategoryTotal)> = HashMap::new();
    let mut total = RollupTotals::default();

    for line in lines {
        total.expected_value += line.expected_value;
        total.counted_value += line.counted_value;
        total.variance_value += line.variance_value;

        let name = match line.category_id {
            Some(_) => line.category_name.unwrap_or_else(|| UNCATEGORIZED.to_string()),
            None => UNCATEGORIZED.to_string(),
        };
        let sort_order = line.category_id.and(line.category_sort_order);

        let (_, bucket) = buckets
            .entry(line.category_id)
            .or_insert_with(|| {
                (
                    sort_order,
                    CategoryTotal {
                        category_id: line.category_id,
                        category_name: name,
                        line_count: 0,
                        expected_value: Decimal::ZERO,
                        counted_value: Decimal::ZERO,
                        variance_value: Decimal::ZERO,
                    },
                )
            });
        bucket.line_count += 1;
        bucket.expected_value += line.expected_value;
        bucket.counted_value += line.counted_value;
        bucket.variance_value += line.variance_value;
    }

    let mut categories: Vec<(Option<i32>, CategoryTotal)> = buckets.into_values().collect();
    categories.sort_by(|(a_order, a), (b_order, b)| {
        // Uncategorized sorts last, then sort order, then name.
        a.category_id
            .is_none()
            .cmp(&b.category_id.is_none())
            .then_with(|| a_order.unwrap_or(i32::MAX).cmp(&b_order.unwrap_or(i32::MAX)))
            .then_with(|| a.category_name.cmp(&b.category_name))
    });

    CategoryRollup {
        categories: categories.into_iter().map(|(_, total)| total).collect(),
        total,
    }
}
