pub mod inventory;
pub mod shopping_list;
pub mod waste;

pub use inventory::{Department, InventoryItem, PurchaseRecord};
pub use shopping_list::ShoppingListEntry;
pub use waste::{WasteCategory, WasteLogEntry, WasteReason, WasteUnit};
