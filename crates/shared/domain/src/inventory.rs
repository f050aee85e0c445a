//! Inventory registers and stock value rules.
//!
//! A register's `value` is always `quantity * buy_price` of its product at the
//! moment of the last write. It is recomputed from scratch on every write,
//! never adjusted incrementally and never taken from client input.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Current on-hand stock for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRegister {
    pub id: i32,
    pub product_id: i32,
    pub quantity: f64,
    pub value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A register joined with its product and category, as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterLine {
    /// 1-based display position in the listing
    pub n: usize,
    pub register_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub category_name: String,
    pub quantity: f64,
    pub value: f64,
}

/// Per-category stock totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category_name: String,
    pub total_quantity: f64,
    pub total_value: f64,
    pub products: usize,
}

/// Check that a quantity or price is a finite number `>= 0`.
pub fn validate_amount(field: &str, amount: f64) -> DomainResult<()> {
    if !amount.is_finite() {
        return Err(DomainError::validation(format!("{} must be a finite number", field)));
    }
    if amount < 0.0 {
        return Err(DomainError::validation(format!("{} cannot be negative", field)));
    }
    Ok(())
}

/// Derived stock value for a validated quantity and unit cost.
pub fn stock_value(quantity: f64, unit_price: f64) -> DomainResult<f64> {
    validate_amount("quantity", quantity)?;
    validate_amount("buy_price", unit_price)?;
    Ok(quantity * unit_price)
}

/// Sum quantity and value per category name, ordered by name.
///
/// Category names are unique, so grouping by name is equivalent to grouping
/// by category id.
pub fn summarize_by_category(lines: &[RegisterLine]) -> Vec<CategorySummary> {
    let mut totals: BTreeMap<&str, CategorySummary> = BTreeMap::new();

    for line in lines {
        let entry = totals
            .entry(line.category_name.as_str())
            .or_insert_with(|| CategorySummary {
                category_name: line.category_name.clone(),
                total_quantity: 0.0,
                total_value: 0.0,
                products: 0,
            });
        entry.total_quantity += line.quantity;
        entry.total_value += line.value;
        entry.products += 1;
    }

    totals.into_values().collect()
}
