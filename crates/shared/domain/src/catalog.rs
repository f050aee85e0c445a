//! Product catalog entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::inventory::validate_amount;

/// Named product grouping; names are globally unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog item; `bar_code` and `product_name` are globally unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub bar_code: String,
    pub product_name: String,
    pub description: Option<String>,
    pub buy_price: f64,
    pub sell_price: f64,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Data needed to persist a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub bar_code: String,
    pub product_name: String,
    pub description: Option<String>,
    pub buy_price: f64,
    pub sell_price: f64,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub created_by: Option<i32>,
}

impl NewProduct {
    /// Reject blank identifiers and negative or non-finite prices.
    pub fn validate(&self) -> DomainResult<()> {
        if self.bar_code.trim().is_empty() {
            return Err(DomainError::validation("Bar code is required"));
        }
        if self.product_name.trim().is_empty() {
            return Err(DomainError::validation("Product name is required"));
        }
        validate_amount("buy_price", self.buy_price)?;
        validate_amount("sell_price", self.sell_price)?;
        Ok(())
    }
}

/// Partial product update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductUpdate {
    pub bar_code: Option<String>,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub image_url: Option<String>,
    pub category_id: Option<i32>,
}

impl ProductUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        if matches!(&self.bar_code, Some(code) if code.trim().is_empty()) {
            return Err(DomainError::validation("Bar code cannot be empty"));
        }
        if matches!(&self.product_name, Some(name) if name.trim().is_empty()) {
            return Err(DomainError::validation("Product name cannot be empty"));
        }
        if let Some(price) = self.buy_price {
            validate_amount("buy_price", price)?;
        }
        if let Some(price) = self.sell_price {
            validate_amount("sell_price", price)?;
        }
        Ok(())
    }

    /// Whether applying this update changes the unit cost used for stock value.
    pub fn changes_buy_price(&self, current: &Product) -> bool {
        matches!(self.buy_price, Some(price) if price != current.buy_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            bar_code: "123".to_string(),
            product_name: "Widget".to_string(),
            description: None,
            buy_price: 10.0,
            sell_price: 15.0,
            image_url: None,
            category_id: 1,
            created_by: Some(1),
        }
    }

    #[test]
    fn test_valid_new_product() {
        assert!(widget().validate().is_ok());
    }

    #[test]
    fn test_blank_bar_code_rejected() {
        let product = NewProduct {
            bar_code: "  ".to_string(),
            ..widget()
        };
        assert!(matches!(product.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_negative_price_rejected() {
        let product = NewProduct {
            buy_price: -1.0,
            ..widget()
        };
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_update_rejects_nan_price() {
        let update = ProductUpdate {
            sell_price: Some(f64::NAN),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_changes_buy_price() {
        let now = Utc::now();
        let product = Product {
            id: 1,
            bar_code: "123".to_string(),
            product_name: "Widget".to_string(),
            description: None,
            buy_price: 10.0,
            sell_price: 15.0,
            image_url: None,
            category_id: 1,
            created_by: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let same = ProductUpdate {
            buy_price: Some(10.0),
            ..Default::default()
        };
        let changed = ProductUpdate {
            buy_price: Some(12.5),
            ..Default::default()
        };

        assert!(!same.changes_buy_price(&product));
        assert!(changed.changes_buy_price(&product));
        assert!(!ProductUpdate::default().changes_buy_price(&product));
    }
}
