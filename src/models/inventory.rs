use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumString;
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Operational department an item belongs to.
///
/// `All` is only meaningful at query positions, where it (like an absent
/// filter) means "no department filter".
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
pub enum Department {
    Kitchen,
    Housekeeping,
    Maintenance,
    All,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Department::Kitchen => write!(f, "kitchen"),
            Department::Housekeeping => write!(f, "housekeeping"),
            Department::Maintenance => write!(f, "maintenance"),
            Department::All => write!(f, "all"),
        }
    }
}

impl Department {
    /// Lenient filter parsing: absent, `all` and unrecognized tokens all mean
    /// "no filter". Unrecognized tokens are logged and absorbed rather than
    /// failing the request.
    pub fn parse_filter(raw: Option<&str>) -> Option<Department> {
        match raw {
            None => None,
            Some(token) => match token.parse::<Department>() {
                Ok(Department::All) => None,
                Ok(dept) => Some(dept),
                Err(_) => {
                    warn!(token = %token, "unknown department filter, ignoring");
                    None
                }
            },
        }
    }

    /// Whether an item in this department matches the given filter.
    pub fn matches(&self, filter: Option<Department>) -> bool {
        match filter {
            None | Some(Department::All) => true,
            Some(dept) => *self == dept || *self == Department::All,
        }
    }
}

/// A single purchase line recorded against an inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct PurchaseRecord {
    pub date: DateTime<Utc>,
    #[validate(range(min = 0))]
    pub quantity: i64,
    #[validate(custom = "validate_non_negative_money")]
    pub unit_price: Decimal,
    pub supplier_id: Option<Uuid>,
}

impl PurchaseRecord {
    /// Total cost of this purchase line.
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// A stocked item with its embedded purchase history.
///
/// `quantity`, `price`, `budget` and `reorder_point` are never negative;
/// `last_updated` is bumped on every mutation. `purchase_history` is
/// append-only and ordered by purchase date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct InventoryItem {
    pub id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub department: Department,
    #[validate(range(min = 0))]
    pub quantity: i64,
    pub unit_type: String,
    #[validate(custom = "validate_non_negative_money")]
    pub price: Decimal,
    #[validate(custom = "validate_non_negative_money")]
    pub budget: Decimal,
    /// Restock threshold: the item is low-stock when `quantity < reorder_point`.
    #[validate(range(min = 0))]
    pub reorder_point: i64,
    #[serde(default)]
    pub purchase_history: Vec<PurchaseRecord>,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl InventoryItem {
    /// Strict low-stock predicate: `quantity < reorder_point`.
    /// An item sitting exactly at its threshold is in stock.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.reorder_point
    }
}

fn validate_non_negative_money(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: i64, reorder_point: i64) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            name: "Flour".into(),
            category: "dry goods".into(),
            department: Department::Kitchen,
            quantity,
            unit_type: "kg".into(),
            price: dec!(1.20),
            budget: dec!(100),
            reorder_point,
            purchase_history: vec![],
            expiry_date: None,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn low_stock_is_strict() {
        assert!(item(4, 5).is_low_stock());
        assert!(!item(5, 5).is_low_stock());
        assert!(!item(6, 5).is_low_stock());
    }

    #[test]
    fn department_filter_parsing_is_lenient() {
        assert_eq!(
            Department::parse_filter(Some("kitchen")),
            Some(Department::Kitchen)
        );
        assert_eq!(Department::parse_filter(Some("ALL")), None);
        assert_eq!(Department::parse_filter(Some("spa")), None);
        assert_eq!(Department::parse_filter(None), None);
    }

    #[test]
    fn all_department_matches_any_filter() {
        let mut it = item(1, 5);
        it.department = Department::All;
        assert!(it.department.matches(Some(Department::Kitchen)));
        assert!(Department::Kitchen.matches(None));
        assert!(!Department::Kitchen.matches(Some(Department::Maintenance)));
    }

    #[test]
    fn line_total_multiplies_quantity_and_unit_price() {
        let record = PurchaseRecord {
            date: Utc::now(),
            quantity: 3,
            unit_price: dec!(2.50),
            supplier_id: None,
        };
        assert_eq!(record.line_total(), dec!(7.50));
    }

    #[test]
    fn negative_price_fails_validation() {
        let mut it = item(1, 5);
        it.price = dec!(-1);
        assert!(it.validate().is_err());
    }
}
