use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{WasteCategory, WasteLogEntry, WasteReason, WasteUnit};

use super::math::safe_ratio;

/// Default lookback when no explicit bounds are supplied.
pub const DEFAULT_WASTE_WINDOW_DAYS: i64 = 30;

/// Default cap on the most-discarded view.
pub const DEFAULT_TOP_DISCARDED: usize = 5;

/// Waste quantity totals partitioned by recording unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UnitTotals {
    pub kg: f64,
    pub liters: f64,
    pub count: f64,
}

impl UnitTotals {
    fn add(&mut self, unit: WasteUnit, quantity: f64) {
        match unit {
            WasteUnit::Kg => self.kg += quantity,
            WasteUnit::Liters => self.liters += quantity,
            WasteUnit::Count => self.count += quantity,
        }
    }

    /// Grand total across all units.
    pub fn total(&self) -> f64 {
        self.kg + self.liters + self.count
    }
}

/// One row of the most-discarded ranking, grouped by (item, unit, category).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiscardedItem {
    pub item_name: String,
    pub unit: WasteUnit,
    pub category: WasteCategory,
    pub quantity: f64,
}

/// Share of the discarded total attributed to one reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReasonShare {
    pub reason: WasteReason,
    pub quantity: f64,
    /// 100 * reason total / grand total; 0 when the grand total is 0.
    pub percentage: f64,
}

/// Quantity discarded per category, in the unit of the first record observed
/// for that category (categories are expected, not enforced, to be
/// unit-homogeneous).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryTotal {
    pub category: WasteCategory,
    pub quantity: f64,
    pub unit: WasteUnit,
}

/// The four waste views over one filtered record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WasteSummary {
    pub totals_by_unit: UnitTotals,
    pub most_discarded: Vec<DiscardedItem>,
    pub by_reason: Vec<ReasonShare>,
    pub by_category: Vec<CategoryTotal>,
}

/// Fold the filtered waste records into all four summary views.
///
/// A single pass feeds every view, so grand totals agree across views for
/// the same filter by construction. Rankings sort descending by quantity
/// with stable ties (first-encounter order); percentages go through
/// [`safe_ratio`], so an empty or zero-quantity record set produces all-zero
/// shares rather than `NaN`.
pub fn summarize_waste(entries: &[WasteLogEntry], top_limit: usize) -> WasteSummary {
    let mut totals_by_unit = UnitTotals::default();
    let mut grand_total = 0.0;

    let mut discarded: Vec<DiscardedItem> = Vec::new();
    let mut discarded_index: HashMap<(&str, WasteUnit, WasteCategory), usize> = HashMap::new();

    let mut reasons: Vec<ReasonShare> = Vec::new();
    let mut reason_index: HashMap<WasteReason, usize> = HashMap::new();

    let mut categories: Vec<CategoryTotal> = Vec::new();
    let mut category_index: HashMap<WasteCategory, usize> = HashMap::new();

    for entry in entries {
        totals_by_unit.add(entry.unit, entry.quantity);
        grand_total += entry.quantity;

        let discard_key = (entry.item_name.as_str(), entry.unit, entry.category);
        match discarded_index.get(&discard_key) {
            Some(&slot) => discarded[slot].quantity += entry.quantity,
            None => {
                discarded_index.insert(discard_key, discarded.len());
                discarded.push(DiscardedItem {
                    item_name: entry.item_name.clone(),
                    unit: entry.unit,
                    category: entry.category,
                    quantity: entry.quantity,
                });
            }
        }

        match reason_index.get(&entry.reason) {
            Some(&slot) => reasons[slot].quantity += entry.quantity,
            None => {
                reason_index.insert(entry.reason, reasons.len());
                reasons.push(ReasonShare {
                    reason: entry.reason,
                    quantity: entry.quantity,
                    percentage: 0.0,
                });
            }
        }

        match category_index.get(&entry.category) {
            Some(&slot) => categories[slot].quantity += entry.quantity,
            None => {
                category_index.insert(entry.category, categories.len());
                // The category keeps the unit of its first record.
                categories.push(CategoryTotal {
                    category: entry.category,
                    quantity: entry.quantity,
                    unit: entry.unit,
                });
            }
        }
    }

    for share in &mut reasons {
        share.percentage = safe_ratio(share.quantity, grand_total, 0.0) * 100.0;
    }

    discarded.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
    discarded.truncate(top_limit);
    reasons.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
    categories.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));

    WasteSummary {
        totals_by_unit,
        most_discarded: discarded,
        by_reason: reasons,
        by_category: categories,
    }
}
