//! Inventory domain model.
//!
//! # Responsibility
//! - Define the category/product records shared by repositories and services.
//! - Own field-level validation of raw user input.
//!
//! # Invariants
//! - Ids are assigned by the store and never reused by callers.
//! - Validation functions are pure and never touch storage.

pub mod category;
pub mod product;
pub mod validation;
