use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumString;
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Broad waste category used for reporting.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WasteCategory {
    Food,
    Beverages,
    Supplies,
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasteCategory::Food => write!(f, "food"),
            WasteCategory::Beverages => write!(f, "beverages"),
            WasteCategory::Supplies => write!(f, "supplies"),
        }
    }
}

impl WasteCategory {
    /// Lenient filter parsing; unrecognized tokens are absorbed as "no filter".
    pub fn parse_filter(raw: Option<&str>) -> Option<WasteCategory> {
        match raw {
            None => None,
            Some(token) => match token.parse::<WasteCategory>() {
                Ok(category) => Some(category),
                Err(_) => {
                    warn!(token = %token, "unknown waste category filter, ignoring");
                    None
                }
            },
        }
    }
}

/// Measurement unit a waste quantity is recorded in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WasteUnit {
    Kg,
    Liters,
    Count,
}

impl fmt::Display for WasteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasteUnit::Kg => write!(f, "kg"),
            WasteUnit::Liters => write!(f, "liters"),
            WasteUnit::Count => write!(f, "count"),
        }
    }
}

/// Why stock was discarded.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WasteReason {
    Expired,
    Spoiled,
    Damaged,
    Other,
}

impl fmt::Display for WasteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasteReason::Expired => write!(f, "expired"),
            WasteReason::Spoiled => write!(f, "spoiled"),
            WasteReason::Damaged => write!(f, "damaged"),
            WasteReason::Other => write!(f, "other"),
        }
    }
}

/// A single discard event. Immutable once created except by explicit edit;
/// deletion is restricted to privileged roles at the API layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct WasteLogEntry {
    pub id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub item_name: String,
    pub category: WasteCategory,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    pub unit: WasteUnit,
    pub date: DateTime<Utc>,
    pub reason: WasteReason,
    /// Staff member who recorded the entry.
    pub recorded_by: Uuid,
}
