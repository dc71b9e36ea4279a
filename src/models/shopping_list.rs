use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::InventoryItem;

/// One line of the restock shopping list.
///
/// `quantity` is the suggested order quantity: the shortfall against twice the
/// reorder threshold (the same capacity proxy the usage heuristic is built
/// on), floored at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingListEntry {
    pub name: String,
    pub quantity: i64,
    pub threshold: i64,
    pub current_stock: i64,
    pub below_threshold: bool,
}

impl ShoppingListEntry {
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: (item.reorder_point * 2 - item.quantity).max(0),
            threshold: item.reorder_point,
            current_stock: item.quantity,
            below_threshold: item.quantity < item.reorder_point,
        }
    }
}
