//! Field-level validation for raw console input.
//!
//! # Responsibility
//! - Turn trimmed user input into typed values or a closed set of errors.
//! - Stay independent of any terminal concern so callers own retry loops.
//!
//! # Invariants
//! - Input is trimmed before any check; whitespace-only text is empty.
//! - Quantity must be > 0 on creation and >= 0 on later edits.
//! - Price and report thresholds must be >= 0.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required name left blank.
    EmptyName,
    /// Required description left blank.
    EmptyDescription,
    /// Numeric field failed to parse. Carries the trimmed input.
    NotANumber(String),
    /// Initial stock must be strictly positive.
    NonPositiveQuantity(i64),
    /// Edited stock must not be negative.
    NegativeQuantity(i64),
    NegativePrice(i64),
    /// Low-stock threshold must not be negative.
    NegativeLimit(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::NotANumber(input) => write!(f, "`{input}` is not a whole number"),
            Self::NonPositiveQuantity(value) => {
                write!(f, "quantity must be greater than zero, got {value}")
            }
            Self::NegativeQuantity(value) => {
                write!(f, "quantity must not be negative, got {value}")
            }
            Self::NegativePrice(value) => write!(f, "price must not be negative, got {value}"),
            Self::NegativeLimit(value) => write!(f, "limit must not be negative, got {value}"),
        }
    }
}

impl Error for ValidationError {}

/// Validates a category or product name.
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    non_empty(raw).ok_or(ValidationError::EmptyName)
}

/// Validates a product description.
pub fn validate_description(raw: &str) -> Result<String, ValidationError> {
    non_empty(raw).ok_or(ValidationError::EmptyDescription)
}

/// Parses a whole number, ignoring surrounding whitespace.
pub fn parse_integer(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))
}

/// Parses the stock quantity of a new product.
pub fn parse_initial_quantity(raw: &str) -> Result<i64, ValidationError> {
    let value = parse_integer(raw)?;
    check_initial_quantity(value)?;
    Ok(value)
}

/// Parses a replacement stock quantity for an existing product.
pub fn parse_edit_quantity(raw: &str) -> Result<i64, ValidationError> {
    let value = parse_integer(raw)?;
    check_edit_quantity(value)?;
    Ok(value)
}

pub fn parse_price(raw: &str) -> Result<i64, ValidationError> {
    let value = parse_integer(raw)?;
    check_price(value)?;
    Ok(value)
}

/// Parses a low-stock report threshold.
pub fn parse_limit(raw: &str) -> Result<i64, ValidationError> {
    let value = parse_integer(raw)?;
    if value < 0 {
        return Err(ValidationError::NegativeLimit(value));
    }
    Ok(value)
}

pub fn check_initial_quantity(value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveQuantity(value));
    }
    Ok(())
}

pub fn check_edit_quantity(value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeQuantity(value));
    }
    Ok(())
}

pub fn check_price(value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativePrice(value));
    }
    Ok(())
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
