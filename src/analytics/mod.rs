//! Analytics aggregation engine.
//!
//! Pure, synchronous folds over point-in-time record snapshots: the monthly
//! budget-vs-spend series, the most-purchased ranking, department usage
//! scores, the waste summary and the low-stock set. The engine performs no
//! I/O, keeps no state between calls and is safe to invoke concurrently
//! against independent snapshots. Numeric edge cases (empty input, zero
//! denominators) resolve to documented defaults instead of errors, since
//! these figures feed dashboards that must render something on sparse data.
//!
//! Every interval in the engine is half-open `[start, end)`; see
//! [`time_range::DateRange`].

pub mod budget;
pub mod low_stock;
pub mod math;
pub mod ranking;
pub mod time_range;
pub mod usage;
pub mod waste;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::{
    errors::ServiceError,
    models::{Department, ShoppingListEntry, WasteCategory},
    store::{RecordStore, WasteLogFilter},
};

pub use budget::BudgetMonth;
pub use low_stock::LowStockItem;
pub use ranking::{PurchaseRanking, MAX_RANKING_ENTRIES};
pub use time_range::{DateRange, RangeToken};
pub use usage::DepartmentUsage;
pub use waste::{
    CategoryTotal, DiscardedItem, ReasonShare, UnitTotals, WasteSummary, DEFAULT_TOP_DISCARDED,
    DEFAULT_WASTE_WINDOW_DAYS,
};

/// Immutable query for the inventory-backed aggregations.
///
/// The dashboard's range/department selector state is captured per call in
/// this value instead of living as ambient shared state, so the same query
/// against the same snapshot always produces the same result.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsQuery {
    pub range: RangeToken,
    pub department: Option<Department>,
    /// Explicit window override; takes precedence over `range`.
    pub window: Option<DateRange>,
}

impl AnalyticsQuery {
    pub fn resolve_window(&self, now: DateTime<Utc>) -> DateRange {
        self.window
            .unwrap_or_else(|| time_range::resolve(self.range, now))
    }
}

/// Immutable query for the waste summary.
#[derive(Debug, Clone)]
pub struct WasteQuery {
    pub date_start: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,
    pub category: Option<WasteCategory>,
    pub search: Option<String>,
    /// Cap on the most-discarded view.
    pub limit: usize,
}

impl Default for WasteQuery {
    fn default() -> Self {
        Self {
            date_start: None,
            date_end: None,
            category: None,
            search: None,
            limit: DEFAULT_TOP_DISCARDED,
        }
    }
}

impl WasteQuery {
    /// Resolve the effective window: explicit bounds win, otherwise the
    /// trailing 30 days ending at `now`. Half-open like every other
    /// interval in the engine.
    pub fn resolve_window(&self, now: DateTime<Utc>) -> DateRange {
        let end = self.date_end.unwrap_or(now);
        match self.date_start {
            Some(start) => DateRange::new(start, end),
            None => DateRange::trailing_days(end, DEFAULT_WASTE_WINDOW_DAYS),
        }
    }
}

/// Facade joining the read capabilities to the pure aggregation functions.
///
/// Every caller (HTTP handlers today, export jobs or client previews
/// tomorrow) goes through this one implementation of each figure, so the
/// numbers cannot drift between call sites.
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn RecordStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Monthly budget-vs-spend series (§ budget series contract).
    #[instrument(skip(self))]
    pub async fn budget_series(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<BudgetMonth>, ServiceError> {
        let items = self.store.fetch_inventory(query.department).await?;
        let window = query.resolve_window(Utc::now());
        Ok(budget::budget_series(&items, &window, query.department))
    }

    /// Most-purchased ranking, capped at `min(limit, 10)` rows.
    #[instrument(skip(self))]
    pub async fn top_purchased(
        &self,
        query: &AnalyticsQuery,
        limit: usize,
    ) -> Result<Vec<PurchaseRanking>, ServiceError> {
        let items = self.store.fetch_inventory(query.department).await?;
        let window = query.resolve_window(Utc::now());
        Ok(ranking::top_purchased(
            &items,
            &window,
            query.department,
            limit,
        ))
    }

    /// Average usage score per department.
    #[instrument(skip(self))]
    pub async fn department_usage(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<DepartmentUsage>, ServiceError> {
        let items = self.store.fetch_inventory(query.department).await?;
        Ok(usage::department_usage(&items, query.department))
    }

    /// The four waste views over one filtered record set.
    #[instrument(skip(self))]
    pub async fn waste_summary(&self, query: &WasteQuery) -> Result<WasteSummary, ServiceError> {
        let filter = WasteLogFilter {
            window: Some(query.resolve_window(Utc::now())),
            category: query.category,
            search: query.search.clone(),
        };
        let entries = self.store.fetch_waste_logs(&filter).await?;
        Ok(waste::summarize_waste(&entries, query.limit))
    }

    /// Items strictly below their restock threshold.
    #[instrument(skip(self))]
    pub async fn low_stock(
        &self,
        department: Option<Department>,
    ) -> Result<Vec<LowStockItem>, ServiceError> {
        let items = self.store.fetch_inventory(department).await?;
        Ok(low_stock::low_stock(&items))
    }

    /// Restock shopping list over the full snapshot.
    #[instrument(skip(self))]
    pub async fn shopping_list(&self) -> Result<Vec<ShoppingListEntry>, ServiceError> {
        let items = self.store.fetch_inventory(None).await?;
        Ok(low_stock::shopping_list(&items))
    }
}
