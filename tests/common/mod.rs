//! Shared fixtures for the integration test suites.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use backhouse_api::{
    analytics::AnalyticsService,
    auth::AuthService,
    config::AppConfig,
    models::{
        Department, InventoryItem, PurchaseRecord, WasteCategory, WasteLogEntry, WasteReason,
        WasteUnit,
    },
    store::InMemoryRecordStore,
    AppState,
};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-key-0123456789-abcdefghij";

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        environment: "test".into(),
        log_level: "warn".into(),
        log_json: false,
        jwt_secret: TEST_JWT_SECRET.into(),
        jwt_expiration: 600,
        auth_issuer: "backhouse-auth".into(),
        auth_audience: "backhouse-api".into(),
        cors_allowed_origins: None,
        cors_allow_any_origin: false,
        cors_allow_credentials: false,
    }
}

/// App state over a fresh in-memory store; the store handle is returned for
/// seeding.
pub fn test_state() -> (AppState, Arc<InMemoryRecordStore>) {
    let config = test_config();
    let store = Arc::new(InMemoryRecordStore::new());
    let analytics = AnalyticsService::new(store.clone());
    let auth = Arc::new(AuthService::new(config.auth_config()));

    let state = AppState {
        config,
        store: store.clone(),
        analytics,
        auth,
    };
    (state, store)
}

pub fn bearer_token(state: &AppState, roles: &[&str]) -> String {
    state
        .auth
        .issue_token("test-user", Some("Test User"), roles)
        .expect("token issuance should succeed in tests")
}

pub fn item(name: &str, department: Department, quantity: i64, threshold: i64) -> InventoryItem {
    InventoryItem {
        id: Uuid::new_v4(),
        name: name.into(),
        category: "misc".into(),
        department,
        quantity,
        unit_type: "count".into(),
        price: Decimal::ONE,
        budget: Decimal::new(100, 0),
        reorder_point: threshold,
        purchase_history: vec![],
        expiry_date: None,
        created_at: Utc::now() - Duration::days(90),
        last_updated: Utc::now(),
    }
}

pub fn purchase(date: DateTime<Utc>, quantity: i64, unit_price: Decimal) -> PurchaseRecord {
    PurchaseRecord {
        date,
        quantity,
        unit_price,
        supplier_id: Some(Uuid::new_v4()),
    }
}

pub fn waste(
    name: &str,
    category: WasteCategory,
    quantity: f64,
    unit: WasteUnit,
    reason: WasteReason,
    date: DateTime<Utc>,
) -> WasteLogEntry {
    WasteLogEntry {
        id: Uuid::new_v4(),
        item_name: name.into(),
        category,
        quantity,
        unit,
        date,
        reason,
        recorded_by: Uuid::new_v4(),
    }
}
