use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Department, InventoryItem};

use super::time_range::DateRange;

/// Budget-vs-spend figures for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BudgetMonth {
    /// Human-readable label, e.g. "March 2025".
    pub month: String,
    pub budget: Decimal,
    pub spent: Decimal,
}

/// Monthly budget-vs-spend series over the purchase history of `items`.
///
/// Purchase records are bucketed by the calendar month of the record's own
/// date (not the item's timestamps). An item contributes its budget figure
/// once per purchase line encountered in a month (a straight accumulation,
/// not a dedup), and `spent` accumulates `quantity * unit_price` per line.
/// Output is sorted by calendar time, never by label text. Items with no
/// in-window purchases contribute nothing; an empty input yields an empty
/// series.
pub fn budget_series(
    items: &[InventoryItem],
    window: &DateRange,
    department: Option<Department>,
) -> Vec<BudgetMonth> {
    let mut months: BTreeMap<(i32, u32), BudgetMonth> = BTreeMap::new();

    for item in items.iter().filter(|i| i.department.matches(department)) {
        for record in item
            .purchase_history
            .iter()
            .filter(|r| window.contains(r.date))
        {
            let bucket = months
                .entry((record.date.year(), record.date.month()))
                .or_insert_with(|| BudgetMonth {
                    month: record.date.format("%B %Y").to_string(),
                    budget: Decimal::ZERO,
                    spent: Decimal::ZERO,
                });
            bucket.budget += item.budget;
            bucket.spent += record.line_total();
        }
    }

    months.into_values().collect()
}
