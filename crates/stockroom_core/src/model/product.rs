//! Product domain model.
//!
//! # Invariants
//! - `NewProduct::validate()` must pass before an insert reaches storage.
//! - `ProductRecord` always carries the name of an existing category.

use crate::model::category::CategoryId;
use crate::model::validation::{
    check_initial_quantity, check_price, validate_description, validate_name, ValidationError,
};

/// Store-assigned product identifier.
pub type ProductId = i64;

/// Write model for inserting a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    /// Initial stock, must be > 0.
    pub quantity: i64,
    /// Whole currency units, must be >= 0.
    pub price: i64,
    pub category_id: CategoryId,
}

impl NewProduct {
    /// Checks every field and normalizes text fields in place.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.name = validate_name(&self.name)?;
        self.description = validate_description(&self.description)?;
        check_initial_quantity(self.quantity)?;
        check_price(self.price)?;
        Ok(())
    }
}

/// Read model: a product joined with its category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub price: i64,
    pub category_name: String,
}
