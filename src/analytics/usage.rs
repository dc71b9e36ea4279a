use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Department, InventoryItem};

use super::math::safe_ratio;

/// Average usage score for one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DepartmentUsage {
    pub department: Department,
    pub average_usage_percent: f64,
}

/// Heuristic scarcity score for a single item:
/// `clamp(((threshold * 2 - quantity) / (threshold * 2)) * 100, 1, 100)`.
///
/// This is a proxy derived from stock level vs. reorder threshold, not
/// measured consumption; the formula is kept verbatim for output parity
/// with the historical dashboards. A zero threshold resolves to the clamp's
/// upper bound (100) instead of dividing by zero.
pub fn usage_percent(quantity: i64, threshold: i64) -> f64 {
    let capacity = threshold as f64 * 2.0;
    let ratio = safe_ratio(capacity - quantity as f64, capacity, 1.0);
    (ratio * 100.0).clamp(1.0, 100.0)
}

/// Mean usage score per department over the given items.
pub fn department_usage(
    items: &[InventoryItem],
    department: Option<Department>,
) -> Vec<DepartmentUsage> {
    let mut sums: BTreeMap<Department, (f64, u64)> = BTreeMap::new();

    for item in items.iter().filter(|i| i.department.matches(department)) {
        let entry = sums.entry(item.department).or_insert((0.0, 0));
        entry.0 += usage_percent(item.quantity, item.reorder_point);
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(dept, (total, count))| DepartmentUsage {
            department: dept,
            average_usage_percent: safe_ratio(total, count as f64, 0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn item(department: Department, quantity: i64, threshold: i64) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            name: "Bleach".into(),
            category: "cleaning".into(),
            department,
            quantity,
            unit_type: "liters".into(),
            price: dec!(2),
            budget: dec!(30),
            reorder_point: threshold,
            purchase_history: vec![],
            expiry_date: None,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn half_empty_stock_scores_fifty() {
        // quantity equal to threshold: (2t - t) / 2t = 50%.
        assert_eq!(usage_percent(10, 10), 50.0);
    }

    #[test]
    fn zero_threshold_pins_to_upper_bound() {
        assert_eq!(usage_percent(0, 0), 100.0);
        assert_eq!(usage_percent(25, 0), 100.0);
    }

    #[test]
    fn overstocked_items_clamp_to_lower_bound() {
        // quantity far above 2t drives the raw score negative; clamp to 1.
        assert_eq!(usage_percent(100, 10), 1.0);
    }

    #[test]
    fn empty_stock_scores_one_hundred() {
        assert_eq!(usage_percent(0, 10), 100.0);
    }

    #[test]
    fn averages_are_grouped_by_department() {
        let items = vec![
            item(Department::Kitchen, 10, 10),
            item(Department::Kitchen, 0, 10),
            item(Department::Maintenance, 0, 0),
        ];
        let usage = department_usage(&items, None);
        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].department, Department::Kitchen);
        assert_eq!(usage[0].average_usage_percent, 75.0);
        assert_eq!(usage[1].department, Department::Maintenance);
        assert_eq!(usage[1].average_usage_percent, 100.0);
    }

    #[test]
    fn department_filter_narrows_the_result() {
        let items = vec![
            item(Department::Kitchen, 5, 10),
            item(Department::Housekeeping, 5, 10),
        ];
        let usage = department_usage(&items, Some(Department::Housekeeping));
        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].department, Department::Housekeeping);
    }
}
