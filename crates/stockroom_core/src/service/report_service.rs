//! Low-stock report service.
//!
//! # Invariants
//! - Thresholds are non-negative.
//! - An empty report is `Listing::Empty`, never an error.

use crate::model::product::ProductRecord;
use crate::model::validation::{parse_limit, ValidationError};
use crate::repo::product_repo::ProductRepository;
use crate::service::{Listing, ServiceResult};
use log::info;

/// Products at or below a stock threshold, lowest stock first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockReport {
    pub limit: i64,
    pub rows: Listing<ProductRecord>,
}

/// Read-only reporting over product stock levels.
pub struct ReportService<P: ProductRepository> {
    repo: P,
}

impl<P: ProductRepository> ReportService<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Parses a threshold. Fails with `NegativeLimit` or `NotANumber`.
    pub fn parse_threshold(&self, raw: &str) -> ServiceResult<i64> {
        Ok(parse_limit(raw)?)
    }

    /// Lists products whose quantity is `<= limit`.
    pub fn low_stock(&self, limit: i64) -> ServiceResult<LowStockReport> {
        if limit < 0 {
            return Err(ValidationError::NegativeLimit(limit).into());
        }
        let rows: Listing<ProductRecord> = self.repo.list_by_max_quantity(limit)?.into();
        info!(
            "event=low_stock_report module=service status=ok limit={limit} rows={}",
            rows.len()
        );
        Ok(LowStockReport { limit, rows })
    }
}
