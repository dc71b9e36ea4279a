use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Department, InventoryItem, ShoppingListEntry};

/// An item below its restock threshold, joined with the display fields the
/// dashboard needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LowStockItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub department: Department,
    pub quantity: i64,
    pub threshold: i64,
}

/// Items whose `quantity < threshold` (strict; at-threshold is in stock).
/// A pure predicate over the snapshot; no ordering beyond input order.
pub fn low_stock(items: &[InventoryItem]) -> Vec<LowStockItem> {
    items
        .iter()
        .filter(|item| item.is_low_stock())
        .map(|item| LowStockItem {
            id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            department: item.department,
            quantity: item.quantity,
            threshold: item.reorder_point,
        })
        .collect()
}

/// Restock shopping list derived from the snapshot, one entry per item with
/// the `below_threshold` flag precomputed.
pub fn shopping_list(items: &[InventoryItem]) -> Vec<ShoppingListEntry> {
    items.iter().map(ShoppingListEntry::from_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn item(name: &str, quantity: i64, threshold: i64) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            name: name.into(),
            category: "misc".into(),
            department: Department::Kitchen,
            quantity,
            unit_type: "count".into(),
            price: dec!(1),
            budget: dec!(10),
            reorder_point: threshold,
            purchase_history: vec![],
            expiry_date: None,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn membership_is_exactly_quantity_below_threshold() {
        let items = vec![item("a", 4, 5), item("b", 5, 5), item("c", 6, 5)];
        let low = low_stock(&items);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "a");
    }

    #[test]
    fn shopping_list_derives_shortfall_and_flag() {
        let entries = shopping_list(&[item("a", 3, 5), item("b", 12, 5)]);
        assert_eq!(entries[0].quantity, 7);
        assert!(entries[0].below_threshold);
        // Already above 2x threshold: nothing to order.
        assert_eq!(entries[1].quantity, 0);
        assert!(!entries[1].below_threshold);
    }
}
