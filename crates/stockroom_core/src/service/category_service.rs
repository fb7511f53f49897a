//! Category use-case service.
//!
//! # Responsibility
//! - Enforce the category cap and required names above the repository.
//! - Refuse deletes while products still reference the category.
//!
//! # Invariants
//! - Live category count never exceeds `MAX_CATEGORIES`.
//! - `delete_category` never reaches the repository when references exist.
//! - A delete refused by the store's RESTRICT constraint is `HasDependents`.

use crate::model::category::{Category, CategoryId};
use crate::model::validation::validate_name;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::RepoError;
use crate::service::{resolve_listed_id, Listing, ServiceError, ServiceResult, MAX_CATEGORIES};
use log::{info, warn};

/// Use-case service for category management.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Fails with `LimitExceeded` when no more categories may be added.
    ///
    /// Callers check this before prompting for a name.
    pub fn ensure_capacity(&self) -> ServiceResult<()> {
        let count = self.repo.count_categories()?;
        if count >= MAX_CATEGORIES {
            warn!(
                "event=category_add module=service status=rejected error_code=limit_exceeded count={count}"
            );
            return Err(ServiceError::LimitExceeded {
                max: MAX_CATEGORIES,
            });
        }
        Ok(())
    }

    /// Adds a category after checking the cap and the name.
    ///
    /// `DuplicateName` is returned as-is; retrying is up to the caller.
    pub fn add_category(&self, raw_name: &str) -> ServiceResult<CategoryId> {
        self.ensure_capacity()?;
        let name = validate_name(raw_name)?;
        let id = self.repo.insert_category(&name)?;
        info!("event=category_add module=service status=ok category_id={id}");
        Ok(id)
    }

    /// Lists categories ordered by id.
    pub fn list_categories(&self) -> ServiceResult<Listing<Category>> {
        Ok(self.repo.list_categories()?.into())
    }

    /// Maps raw input onto an id from `categories`.
    ///
    /// Fails with `NotANumber` or `InvalidId`.
    pub fn resolve_category_id(
        &self,
        raw: &str,
        categories: &[Category],
    ) -> ServiceResult<CategoryId> {
        resolve_listed_id(raw, categories.iter().map(|category| category.id))
    }

    /// Renames an existing category.
    pub fn rename_category(&self, id: CategoryId, raw_name: &str) -> ServiceResult<()> {
        let name = validate_name(raw_name)?;
        self.repo.rename_category(id, &name)?;
        info!("event=category_rename module=service status=ok category_id={id}");
        Ok(())
    }

    /// Deletes a category that no product references.
    pub fn delete_category(&self, id: CategoryId) -> ServiceResult<()> {
        let product_count = self.repo.count_products_referencing(id)?;
        if product_count > 0 {
            warn!(
                "event=category_delete module=service status=rejected error_code=has_dependents category_id={id} products={product_count}"
            );
            return Err(ServiceError::HasDependents {
                category_id: id,
                product_count,
            });
        }

        match self.repo.delete_category(id) {
            Ok(()) => {}
            // A product may reference the row after the count; the RESTRICT
            // constraint still refuses the delete.
            Err(RepoError::ForeignKeyViolation) => {
                let product_count = self.repo.count_products_referencing(id)?;
                warn!(
                    "event=category_delete module=service status=rejected error_code=foreign_key_violation category_id={id} products={product_count}"
                );
                return Err(ServiceError::HasDependents {
                    category_id: id,
                    product_count,
                });
            }
            Err(err) => return Err(err.into()),
        }
        info!("event=category_delete module=service status=ok category_id={id}");
        Ok(())
    }
}
