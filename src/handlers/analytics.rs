use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;
use utoipa::IntoParams;

use crate::{
    analytics::{
        AnalyticsQuery, BudgetMonth, DateRange, DepartmentUsage, LowStockItem, PurchaseRanking,
        RangeToken, WasteQuery, WasteSummary, DEFAULT_TOP_DISCARDED, MAX_RANKING_ENTRIES,
    },
    models::{Department, ShoppingListEntry, WasteCategory},
    ApiResponse, ApiResult, AppState,
};

/// Build the analytics Router scoped under `/api/v1/analytics`.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/budget", get(get_budget_series))
        .route("/top-purchased", get(get_top_purchased))
        .route("/department-usage", get(get_department_usage))
        .route("/waste-summary", get(get_waste_summary))
        .route("/low-stock", get(get_low_stock))
        .route("/shopping-list", get(get_shopping_list))
}

/// Shared query parameters for the inventory-backed aggregations.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AnalyticsParams {
    /// Reporting period: week|month|quarter|year (default: month)
    pub range: Option<String>,
    /// Department filter: kitchen|housekeeping|maintenance|all
    pub department: Option<String>,
    /// Explicit window start (RFC 3339); overrides `range`
    pub date_start: Option<DateTime<Utc>>,
    /// Explicit window end (RFC 3339, exclusive); defaults to now
    pub date_end: Option<DateTime<Utc>>,
}

impl AnalyticsParams {
    /// Build the immutable engine query. Bad tokens fall back to documented
    /// defaults rather than failing the request.
    fn to_query(&self) -> AnalyticsQuery {
        let window = self
            .date_start
            .map(|start| DateRange::new(start, self.date_end.unwrap_or_else(Utc::now)));
        AnalyticsQuery {
            range: RangeToken::parse_lenient(self.range.as_deref()),
            department: Department::parse_filter(self.department.as_deref()),
            window,
        }
    }
}

/// Query parameters for the most-purchased ranking.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TopPurchasedParams {
    pub range: Option<String>,
    pub department: Option<String>,
    pub date_start: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,
    /// Maximum rows to return (default and cap: 10)
    pub limit: Option<i64>,
}

/// Query parameters for the waste summary.
#[derive(Debug, Deserialize, IntoParams)]
pub struct WasteSummaryParams {
    /// Window start (RFC 3339); default: 30 days before the window end
    pub date_start: Option<DateTime<Utc>>,
    /// Window end (RFC 3339, exclusive); default: now
    pub date_end: Option<DateTime<Utc>>,
    /// Category filter: food|beverages|supplies
    pub category: Option<String>,
    /// Case-insensitive item name search
    pub search: Option<String>,
    /// Cap on the most-discarded view (default: 5)
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LowStockParams {
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ShoppingListParams {
    /// Only entries currently below threshold (default: true)
    pub only_below: Option<bool>,
}

fn effective_limit(raw: Option<i64>, default: usize) -> usize {
    match raw {
        Some(limit) if limit > 0 => limit as usize,
        Some(limit) => {
            warn!(limit, "non-positive limit, using default");
            default
        }
        None => default,
    }
}

/// Monthly budget vs. spend series
#[utoipa::path(
    get,
    path = "/api/v1/analytics/budget",
    params(AnalyticsParams),
    responses(
        (status = 200, description = "Budget series retrieved successfully", body = ApiResponse<Vec<BudgetMonth>>),
        (status = 401, description = "Missing or invalid token", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_budget_series(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Vec<BudgetMonth>> {
    let query = params.to_query();
    let series = state.analytics.budget_series(&query).await?;
    Ok(Json(ApiResponse::success(series)))
}

/// Most-purchased items within the window
#[utoipa::path(
    get,
    path = "/api/v1/analytics/top-purchased",
    params(TopPurchasedParams),
    responses(
        (status = 200, description = "Purchase ranking retrieved successfully", body = ApiResponse<Vec<PurchaseRanking>>)
    ),
    tag = "Analytics"
)]
pub async fn get_top_purchased(
    State(state): State<AppState>,
    Query(params): Query<TopPurchasedParams>,
) -> ApiResult<Vec<PurchaseRanking>> {
    let query = AnalyticsParams {
        range: params.range,
        department: params.department,
        date_start: params.date_start,
        date_end: params.date_end,
    }
    .to_query();
    let limit = effective_limit(params.limit, MAX_RANKING_ENTRIES);

    let ranking = state.analytics.top_purchased(&query, limit).await?;
    Ok(Json(ApiResponse::success(ranking)))
}

/// Average usage score per department
#[utoipa::path(
    get,
    path = "/api/v1/analytics/department-usage",
    params(AnalyticsParams),
    responses(
        (status = 200, description = "Department usage retrieved successfully", body = ApiResponse<Vec<DepartmentUsage>>)
    ),
    tag = "Analytics"
)]
pub async fn get_department_usage(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> ApiResult<Vec<DepartmentUsage>> {
    let query = params.to_query();
    let usage = state.analytics.department_usage(&query).await?;
    Ok(Json(ApiResponse::success(usage)))
}

/// Waste breakdowns by unit, item, reason and category
#[utoipa::path(
    get,
    path = "/api/v1/analytics/waste-summary",
    params(WasteSummaryParams),
    responses(
        (status = 200, description = "Waste summary retrieved successfully", body = ApiResponse<WasteSummary>)
    ),
    tag = "Analytics"
)]
pub async fn get_waste_summary(
    State(state): State<AppState>,
    Query(params): Query<WasteSummaryParams>,
) -> ApiResult<WasteSummary> {
    let query = WasteQuery {
        date_start: params.date_start,
        date_end: params.date_end,
        category: WasteCategory::parse_filter(params.category.as_deref()),
        search: params.search,
        limit: effective_limit(params.limit, DEFAULT_TOP_DISCARDED),
    };

    let summary = state.analytics.waste_summary(&query).await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// Items strictly below their restock threshold
#[utoipa::path(
    get,
    path = "/api/v1/analytics/low-stock",
    params(LowStockParams),
    responses(
        (status = 200, description = "Low-stock items retrieved successfully", body = ApiResponse<Vec<LowStockItem>>)
    ),
    tag = "Analytics"
)]
pub async fn get_low_stock(
    State(state): State<AppState>,
    Query(params): Query<LowStockParams>,
) -> ApiResult<Vec<LowStockItem>> {
    let department = Department::parse_filter(params.department.as_deref());
    let items = state.analytics.low_stock(department).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// Restock shopping list derived from current stock levels
#[utoipa::path(
    get,
    path = "/api/v1/analytics/shopping-list",
    params(ShoppingListParams),
    responses(
        (status = 200, description = "Shopping list retrieved successfully", body = ApiResponse<Vec<ShoppingListEntry>>)
    ),
    tag = "Analytics"
)]
pub async fn get_shopping_list(
    State(state): State<AppState>,
    Query(params): Query<ShoppingListParams>,
) -> ApiResult<Vec<ShoppingListEntry>> {
    let mut entries = state.analytics.shopping_list().await?;
    if params.only_below.unwrap_or(true) {
        entries.retain(|entry| entry.below_threshold);
    }
    Ok(Json(ApiResponse::success(entries)))
}
