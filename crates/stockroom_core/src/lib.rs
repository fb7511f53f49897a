//! Core domain logic for Stockroom.
//! This crate is the single source of truth for inventory invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryId};
pub use model::product::{NewProduct, ProductId, ProductRecord};
pub use model::validation::{
    parse_edit_quantity, parse_initial_quantity, parse_price, validate_description, validate_name,
    ValidationError,
};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::product_repo::{
    FieldValue, ProductField, ProductRepository, ProductUpdate, SqliteProductRepository,
};
pub use repo::{RepoError, RepoResult};
pub use service::category_service::CategoryService;
pub use service::product_service::{
    CategoryChoices, CategorySelection, DeleteTarget, EditChoice, ProductService,
    CANCEL_SENTINEL,
};
pub use service::report_service::{LowStockReport, ReportService};
pub use service::{Listing, ServiceError, ServiceResult, MAX_CATEGORIES};
