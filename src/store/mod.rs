//! Record store boundary.
//!
//! The engine consumes read capabilities over the three raw record streams;
//! persistence itself lives behind [`RecordStore`]. The in-memory
//! implementation backs the binary and the test suites. Aggregations built
//! on these reads are point-in-time views: the store may be mutated
//! concurrently with a read, and no isolation beyond call-time visibility is
//! promised.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::{
    analytics::time_range::DateRange,
    errors::ServiceError,
    models::{Department, InventoryItem, PurchaseRecord, WasteCategory, WasteLogEntry},
};

/// Filter for waste-log reads. The optional window is the same half-open
/// [`DateRange`] the engine uses, so date inclusivity cannot diverge between
/// the store and the aggregations.
#[derive(Debug, Clone, Default)]
pub struct WasteLogFilter {
    pub window: Option<DateRange>,
    pub category: Option<WasteCategory>,
    /// Case-insensitive substring match on the item name.
    pub search: Option<String>,
}

/// Read capability over the raw record streams.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inventory snapshot, purchase history embedded, ordered by
    /// `(created_at, id)` so downstream tie-breaking is deterministic.
    async fn fetch_inventory(
        &self,
        department: Option<Department>,
    ) -> Result<Vec<InventoryItem>, ServiceError>;

    /// Waste log entries matching the filter, ordered by `(date, id)`.
    async fn fetch_waste_logs(
        &self,
        filter: &WasteLogFilter,
    ) -> Result<Vec<WasteLogEntry>, ServiceError>;
}

/// Concurrent in-process record store.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    items: DashMap<Uuid, InventoryItem>,
    waste_logs: DashMap<Uuid, WasteLogEntry>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item, bumping `last_updated`.
    pub fn upsert_item(&self, mut item: InventoryItem) {
        item.last_updated = Utc::now();
        self.items.insert(item.id, item);
    }

    /// Append a purchase line to an item's history and restock its quantity.
    pub fn record_purchase(
        &self,
        item_id: Uuid,
        record: PurchaseRecord,
    ) -> Result<(), ServiceError> {
        let mut item = self
            .items
            .get_mut(&item_id)
            .ok_or_else(|| ServiceError::NotFound(format!("inventory item {item_id}")))?;
        item.quantity += record.quantity;
        item.purchase_history.push(record);
        item.last_updated = Utc::now();
        Ok(())
    }

    pub fn record_waste(&self, entry: WasteLogEntry) {
        self.waste_logs.insert(entry.id, entry);
    }

    /// Remove an item. Historical waste and purchase records referencing it
    /// are left in place (accepted data-integrity gap).
    pub fn remove_item(&self, item_id: Uuid) -> Option<InventoryItem> {
        self.items.remove(&item_id).map(|(_, item)| item)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch_inventory(
        &self,
        department: Option<Department>,
    ) -> Result<Vec<InventoryItem>, ServiceError> {
        let mut items: Vec<InventoryItem> = self
            .items
            .iter()
            .filter(|entry| entry.value().department.matches(department))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(items)
    }

    async fn fetch_waste_logs(
        &self,
        filter: &WasteLogFilter,
    ) -> Result<Vec<WasteLogEntry>, ServiceError> {
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut logs: Vec<WasteLogEntry> = self
            .waste_logs
            .iter()
            .filter(|entry| {
                let log = entry.value();
                if let Some(window) = &filter.window {
                    if !window.contains(log.date) {
                        return false;
                    }
                }
                if let Some(category) = filter.category {
                    if log.category != category {
                        return false;
                    }
                }
                if let Some(needle) = &search {
                    if !log.item_name.to_lowercase().contains(needle) {
                        return false;
                    }
                }
                true
            })
            .map(|entry| entry.value().clone())
            .collect();
        logs.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WasteReason, WasteUnit};
    use chrono::{DateTime, TimeZone};
    use rust_decimal_macros::dec;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap()
    }

    fn item(name: &str, department: Department) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            name: name.into(),
            category: "misc".into(),
            department,
            quantity: 10,
            unit_type: "count".into(),
            price: dec!(1),
            budget: dec!(10),
            reorder_point: 3,
            purchase_history: vec![],
            expiry_date: None,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    fn waste(name: &str, date: DateTime<Utc>) -> WasteLogEntry {
        WasteLogEntry {
            id: Uuid::new_v4(),
            item_name: name.into(),
            category: WasteCategory::Food,
            quantity: 1.0,
            unit: WasteUnit::Kg,
            date,
            reason: WasteReason::Expired,
            recorded_by: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn department_filter_applies_on_fetch() {
        let store = InMemoryRecordStore::new();
        store.upsert_item(item("a", Department::Kitchen));
        store.upsert_item(item("b", Department::Maintenance));

        let kitchen = store
            .fetch_inventory(Some(Department::Kitchen))
            .await
            .unwrap();
        assert_eq!(kitchen.len(), 1);
        assert_eq!(kitchen[0].name, "a");
        assert_eq!(store.fetch_inventory(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn record_purchase_appends_history_and_bumps_quantity() {
        let store = InMemoryRecordStore::new();
        let it = item("a", Department::Kitchen);
        let id = it.id;
        let before = it.last_updated;
        store.upsert_item(it);

        store
            .record_purchase(
                id,
                PurchaseRecord {
                    date: at(3, 9),
                    quantity: 5,
                    unit_price: dec!(2),
                    supplier_id: None,
                },
            )
            .unwrap();

        let fetched = store.fetch_inventory(None).await.unwrap();
        assert_eq!(fetched[0].quantity, 15);
        assert_eq!(fetched[0].purchase_history.len(), 1);
        assert!(fetched[0].last_updated >= before);
    }

    #[tokio::test]
    async fn record_purchase_on_unknown_item_is_not_found() {
        let store = InMemoryRecordStore::new();
        let err = store
            .record_purchase(
                Uuid::new_v4(),
                PurchaseRecord {
                    date: at(3, 9),
                    quantity: 1,
                    unit_price: dec!(1),
                    supplier_id: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn waste_window_includes_start_and_excludes_end() {
        let store = InMemoryRecordStore::new();
        store.record_waste(waste("start", at(10, 0)));
        store.record_waste(waste("inside", at(12, 0)));
        store.record_waste(waste("end", at(14, 0)));

        let filter = WasteLogFilter {
            window: Some(DateRange::new(at(10, 0), at(14, 0))),
            ..Default::default()
        };
        let logs = store.fetch_waste_logs(&filter).await.unwrap();
        let names: Vec<&str> = logs.iter().map(|l| l.item_name.as_str()).collect();
        assert_eq!(names, vec!["start", "inside"]);
    }

    #[tokio::test]
    async fn waste_search_is_case_insensitive() {
        let store = InMemoryRecordStore::new();
        store.record_waste(waste("Chicken Breast", at(12, 0)));
        store.record_waste(waste("Juice", at(12, 1)));

        let filter = WasteLogFilter {
            search: Some("chicken".into()),
            ..Default::default()
        };
        let logs = store.fetch_waste_logs(&filter).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].item_name, "Chicken Breast");
    }

    #[tokio::test]
    async fn waste_logs_come_back_in_date_order() {
        let store = InMemoryRecordStore::new();
        store.record_waste(waste("later", at(20, 0)));
        store.record_waste(waste("earlier", at(5, 0)));
        store.record_waste(waste("middle", at(12, 0)));

        let logs = store
            .fetch_waste_logs(&WasteLogFilter::default())
            .await
            .unwrap();
        let names: Vec<&str> = logs.iter().map(|l| l.item_name.as_str()).collect();
        assert_eq!(names, vec!["earlier", "middle", "later"]);
    }

    #[tokio::test]
    async fn removing_an_item_leaves_waste_history_behind() {
        let store = InMemoryRecordStore::new();
        let it = item("Chicken", Department::Kitchen);
        let id = it.id;
        store.upsert_item(it);
        store.record_waste(waste("Chicken", at(12, 0)));

        store.remove_item(id);
        assert!(store.fetch_inventory(None).await.unwrap().is_empty());
        assert_eq!(
            store
                .fetch_waste_logs(&WasteLogFilter::default())
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn date_ordering_tie_breaks_by_id() {
        let store = InMemoryRecordStore::new();
        let shared = at(12, 0);
        let mut a = waste("a", shared);
        let mut b = waste("b", shared);
        a.id = Uuid::from_u128(1);
        b.id = Uuid::from_u128(2);
        store.record_waste(b);
        store.record_waste(a);

        let logs = store
            .fetch_waste_logs(&WasteLogFilter::default())
            .await
            .unwrap();
        assert_eq!(logs[0].id, Uuid::from_u128(1));
    }
}
