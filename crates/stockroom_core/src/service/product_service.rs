//! Product use-case service.
//!
//! # Responsibility
//! - Validate product fields and orchestrate add/edit/delete/search flows.
//! - Offer the "existing category or create new" selection used by both
//!   add and edit.
//!
//! # Invariants
//! - New products carry quantity > 0 and price >= 0; edits allow quantity 0.
//! - Inline category creation obeys the same cap and uniqueness as the
//!   category menu.
//! - Edits persist exactly one field per call.

use crate::model::category::{Category, CategoryId};
use crate::model::product::{NewProduct, ProductId, ProductRecord};
use crate::model::validation::{
    check_edit_quantity, check_price, parse_integer, validate_description, validate_name,
};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::product_repo::{ProductRepository, ProductUpdate};
use crate::repo::RepoError;
use crate::service::category_service::CategoryService;
use crate::service::{resolve_listed_id, Listing, ServiceError, ServiceResult};
use log::{info, warn};

/// Input that cancels a product delete.
pub const CANCEL_SENTINEL: &str = "q";

/// Numbered category menu with a trailing "create new" entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChoices {
    /// Entries `1..=len`, in listing order.
    pub categories: Vec<Category>,
}

impl CategoryChoices {
    /// Index of the synthetic "create new category" entry.
    pub fn create_new_index(&self) -> usize {
        self.categories.len() + 1
    }
}

/// Outcome of picking from `CategoryChoices`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelection {
    Existing(CategoryId),
    CreateNew,
}

/// Product edit menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditChoice {
    Name,
    Description,
    Quantity,
    Price,
    Category,
    Finish,
}

impl EditChoice {
    /// Maps menu input `1..=6` to an entry.
    pub fn parse(raw: &str) -> ServiceResult<Self> {
        match raw.trim() {
            "1" => Ok(Self::Name),
            "2" => Ok(Self::Description),
            "3" => Ok(Self::Quantity),
            "4" => Ok(Self::Price),
            "5" => Ok(Self::Category),
            "6" => Ok(Self::Finish),
            other => Err(ServiceError::InvalidOption(other.to_string())),
        }
    }
}

/// Parsed input of the delete prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Cancel,
    Product(ProductId),
}

/// Use-case service for product management.
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    repo: P,
    categories: CategoryService<C>,
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    /// Creates a service over product and category repositories.
    pub fn new(repo: P, category_repo: C) -> Self {
        Self {
            repo,
            categories: CategoryService::new(category_repo),
        }
    }

    /// Returns the current categories as a numbered selection.
    pub fn category_choices(&self) -> ServiceResult<CategoryChoices> {
        Ok(CategoryChoices {
            categories: self.categories.list_categories()?.into_vec(),
        })
    }

    /// Maps a 1-based menu number onto `choices`.
    pub fn select_category(
        &self,
        choices: &CategoryChoices,
        raw: &str,
    ) -> ServiceResult<CategorySelection> {
        let choice = parse_integer(raw)?;
        if choice >= 1 {
            if let Some(category) = usize::try_from(choice - 1)
                .ok()
                .and_then(|index| choices.categories.get(index))
            {
                return Ok(CategorySelection::Existing(category.id));
            }
        }

        let create_new = choices.create_new_index();
        if usize::try_from(choice).ok() == Some(create_new) {
            return Ok(CategorySelection::CreateNew);
        }

        Err(ServiceError::OutOfRange {
            choice,
            max: create_new,
        })
    }

    /// Creates a category from the product flows and returns its id.
    pub fn create_category_inline(&self, raw_name: &str) -> ServiceResult<CategoryId> {
        self.categories.add_category(raw_name)
    }

    /// Validates and inserts a product.
    pub fn add_product(&self, mut product: NewProduct) -> ServiceResult<ProductId> {
        product.validate()?;
        let category_id = product.category_id;
        let id = self
            .repo
            .insert_product(&product)
            .map_err(|err| missing_category(err, category_id))?;
        info!(
            "event=product_add module=service status=ok product_id={id} category_id={category_id}"
        );
        Ok(id)
    }

    /// Lists products ordered by name.
    pub fn list_products(&self) -> ServiceResult<Listing<ProductRecord>> {
        Ok(self.repo.list_products()?.into())
    }

    /// Maps raw input onto an id from `products`.
    pub fn resolve_product_id(
        &self,
        raw: &str,
        products: &[ProductRecord],
    ) -> ServiceResult<ProductId> {
        resolve_listed_id(raw, products.iter().map(|product| product.id))
    }

    /// Validates and persists one field of an existing product.
    pub fn update_product(&self, id: ProductId, update: ProductUpdate) -> ServiceResult<()> {
        let update = match update {
            ProductUpdate::Name(raw) => ProductUpdate::Name(validate_name(&raw)?),
            ProductUpdate::Description(raw) => {
                ProductUpdate::Description(validate_description(&raw)?)
            }
            ProductUpdate::Quantity(value) => {
                check_edit_quantity(value)?;
                ProductUpdate::Quantity(value)
            }
            ProductUpdate::Price(value) => {
                check_price(value)?;
                ProductUpdate::Price(value)
            }
            ProductUpdate::Category(category_id) => ProductUpdate::Category(category_id),
        };

        let field = update.field();
        let result: ServiceResult<()> = match &update {
            ProductUpdate::Category(category_id) => self
                .repo
                .update_field(id, &update)
                .map_err(|err| missing_category(err, *category_id)),
            _ => self.repo.update_field(id, &update).map_err(Into::into),
        };
        if let Err(err) = &result {
            warn!(
                "event=product_update module=service status=error product_id={id} field={field} error={err}"
            );
        }
        result
    }

    /// Parses the delete prompt: the cancel sentinel or a listed id.
    pub fn parse_delete_target(
        &self,
        raw: &str,
        products: &[ProductRecord],
    ) -> ServiceResult<DeleteTarget> {
        if raw.trim().eq_ignore_ascii_case(CANCEL_SENTINEL) {
            return Ok(DeleteTarget::Cancel);
        }
        self.resolve_product_id(raw, products).map(DeleteTarget::Product)
    }

    /// Deletes a product. Products carry no dependents.
    pub fn delete_product(&self, id: ProductId) -> ServiceResult<()> {
        self.repo.delete_product(id)?;
        info!("event=product_delete module=service status=ok product_id={id}");
        Ok(())
    }

    /// Looks up one product by raw id input.
    pub fn find_product(&self, raw: &str) -> ServiceResult<ProductRecord> {
        let id = parse_integer(raw)?;
        self.repo.get_product(id)?.ok_or(ServiceError::NotFound(id))
    }
}

fn missing_category(err: RepoError, category_id: CategoryId) -> ServiceError {
    match err {
        RepoError::ForeignKeyViolation => ServiceError::NotFound(category_id),
        other => other.into(),
    }
}
