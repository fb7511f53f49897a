//! Interactive menus.
//!
//! # Responsibility
//! - Dispatch menu choices to core services.
//! - Own every re-prompt loop; validation itself stays in the core crate.
//!
//! # Invariants
//! - Recoverable service errors never leave a menu.
//! - Store failures propagate as `CliError::Service`.

mod categories;
mod products;
mod report;

use std::io::{BufRead, Write};
use stockroom_core::{
    CategoryService, ProductService, ReportService, SqliteCategoryRepository,
    SqliteProductRepository, Store,
};

use crate::error::CliResult;
use crate::ui::Console;

const MAIN_MENU: [&str; 4] = [
    "Manage products",
    "Manage categories",
    "Low-stock report",
    "Exit",
];

/// Services wired to one store.
pub struct App {
    pub(crate) categories: CategoryService<SqliteCategoryRepository>,
    pub(crate) products: ProductService<SqliteProductRepository, SqliteCategoryRepository>,
    pub(crate) reports: ReportService<SqliteProductRepository>,
}

impl App {
    pub fn new(store: &Store) -> Self {
        Self {
            categories: CategoryService::new(SqliteCategoryRepository::new(store.clone())),
            products: ProductService::new(
                SqliteProductRepository::new(store.clone()),
                SqliteCategoryRepository::new(store.clone()),
            ),
            reports: ReportService::new(SqliteProductRepository::new(store.clone())),
        }
    }
}

/// Runs the top-level menu until the user exits.
pub fn main_menu<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> CliResult<()> {
    loop {
        console.menu("INVENTORY MANAGEMENT", &MAIN_MENU)?;
        match console.prompt("Select an option: ")?.as_str() {
            "1" => products::menu(app, console)?,
            "2" => categories::menu(app, console)?,
            "3" => report::low_stock(app, console)?,
            "4" => {
                console.info("Goodbye.")?;
                return Ok(());
            }
            _ => console.error("Invalid option.")?,
        }
    }
}
