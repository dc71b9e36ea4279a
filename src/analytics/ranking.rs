use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Department, InventoryItem};

use super::time_range::DateRange;

/// Contract cap on ranking length, regardless of the requested limit.
pub const MAX_RANKING_ENTRIES: usize = 10;

/// One row of the most-purchased ranking. `count` is the number of purchase
/// events in the window, not the quantity bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PurchaseRanking {
    pub name: String,
    pub count: u64,
}

/// Most-purchased items within the window.
///
/// Purchase events are grouped by item name before zero-count groups are
/// discarded, so an item stocked under two records still ranks once. The
/// sort is stable descending by count (ties keep first-encounter order),
/// and the result never exceeds `min(limit, 10)` rows or repeats a name.
pub fn top_purchased(
    items: &[InventoryItem],
    window: &DateRange,
    department: Option<Department>,
    limit: usize,
) -> Vec<PurchaseRanking> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<PurchaseRanking> = Vec::new();

    for item in items.iter().filter(|i| i.department.matches(department)) {
        let count = item
            .purchase_history
            .iter()
            .filter(|r| window.contains(r.date))
            .count() as u64;

        match index.get(item.name.as_str()) {
            Some(&slot) => ranked[slot].count += count,
            None => {
                index.insert(item.name.as_str(), ranked.len());
                ranked.push(PurchaseRanking {
                    name: item.name.clone(),
                    count,
                });
            }
        }
    }

    ranked.retain(|r| r.count > 0);
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit.min(MAX_RANKING_ENTRIES));
    ranked
}
