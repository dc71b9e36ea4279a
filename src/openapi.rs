use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Backhouse API",
        version = "0.3.1",
        description = r#"
# Backhouse Inventory Analytics API

Back-of-house inventory tracking and analytics for hotel operations: stock
levels, purchase history, restock shopping lists and waste logging.

## Authentication

Analytics endpoints require a JWT bearer token issued by the upstream
identity service:

```
Authorization: Bearer <your-jwt-token>
```

## Error Handling

Errors use a consistent response format with appropriate HTTP status codes:

```json
{
  "error": "Bad Request",
  "message": "Validation failed",
  "request_id": "req-abc123",
  "timestamp": "2025-01-01T00:00:00Z"
}
```

## Windows

Every date window is half-open `[start, end)`: a record stamped exactly at
`start` is included, one stamped exactly at `end` is not.
        "#,
        contact(
            name = "Backhouse Team",
            email = "dev@backhouse.io"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Analytics", description = "Inventory and waste analytics endpoints"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::analytics::get_budget_series,
        crate::handlers::analytics::get_top_purchased,
        crate::handlers::analytics::get_department_usage,
        crate::handlers::analytics::get_waste_summary,
        crate::handlers::analytics::get_low_stock,
        crate::handlers::analytics::get_shopping_list,
    ),
    components(
        schemas(
            // Common types
            crate::ApiResponse<serde_json::Value>,

            // Domain types
            crate::models::InventoryItem,
            crate::models::PurchaseRecord,
            crate::models::Department,
            crate::models::WasteLogEntry,
            crate::models::WasteCategory,
            crate::models::WasteUnit,
            crate::models::WasteReason,
            crate::models::ShoppingListEntry,

            // Engine output types
            crate::analytics::BudgetMonth,
            crate::analytics::PurchaseRanking,
            crate::analytics::DepartmentUsage,
            crate::analytics::WasteSummary,
            crate::analytics::UnitTotals,
            crate::analytics::DiscardedItem,
            crate::analytics::ReasonShare,
            crate::analytics::CategoryTotal,
            crate::analytics::LowStockItem,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_includes_analytics_paths() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Backhouse API"));
        assert!(json.contains("/api/v1/analytics/budget"));
        assert!(json.contains("/api/v1/analytics/waste-summary"));
    }
}
