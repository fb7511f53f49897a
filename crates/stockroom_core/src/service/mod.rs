//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Map raw console input onto typed ids and menu choices.
//! - Keep the CLI decoupled from storage details.
//!
//! # Invariants
//! - Repository `DuplicateName` never escapes as a storage error.
//! - Every user-facing error is recoverable; only storage failures and
//!   programming errors (`InvalidField`) are fatal.

use crate::model::validation::{parse_integer, ValidationError};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_service;
pub mod product_service;
pub mod report_service;

/// Maximum number of live categories.
pub const MAX_CATEGORIES: usize = 10;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned by inventory services.
#[derive(Debug)]
pub enum ServiceError {
    /// Field input rejected before reaching storage.
    Validation(ValidationError),
    /// Id does not belong to the listing the user picked from.
    InvalidId(i64),
    /// Id resolved to no record.
    NotFound(i64),
    /// Category name already used by another category.
    DuplicateName(String),
    /// Category still referenced by products.
    HasDependents {
        category_id: i64,
        product_count: usize,
    },
    /// Category cap reached.
    LimitExceeded { max: usize },
    /// Unknown product field name. Unreachable from the menus.
    InvalidField(String),
    /// Numbered selection outside `1..=max`.
    OutOfRange { choice: i64, max: usize },
    /// Menu input that matches no option.
    InvalidOption(String),
    /// Storage failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Returns whether the caller should re-prompt or report and continue.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Repo(_) | Self::InvalidField(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidId(id) => write!(f, "id {id} is not in the list"),
            Self::NotFound(id) => write!(f, "no record found with id {id}"),
            Self::DuplicateName(name) => write!(f, "category `{name}` already exists"),
            Self::HasDependents {
                category_id,
                product_count,
            } => write!(
                f,
                "category {category_id} still has {product_count} product(s) assigned"
            ),
            Self::LimitExceeded { max } => {
                write!(f, "the limit of {max} categories has been reached")
            }
            Self::InvalidField(field) => write!(f, "field is not updatable: `{field}`"),
            Self::OutOfRange { choice, max } => {
                write!(f, "option {choice} is out of range (1-{max})")
            }
            Self::InvalidOption(input) => write!(f, "invalid option: `{input}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateName(name) => Self::DuplicateName(name),
            RepoError::InvalidField(field) => Self::InvalidField(field),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Query result that distinguishes "no rows" from "some rows".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<T> {
    Empty,
    Items(Vec<T>),
}

impl<T> Listing<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Empty => &[],
            Self::Items(items) => items,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Empty => Vec::new(),
            Self::Items(items) => items,
        }
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Items(items)
        }
    }
}

/// Parses `raw` as an id and checks it against the ids the user was shown.
pub(crate) fn resolve_listed_id(
    raw: &str,
    listed: impl IntoIterator<Item = i64>,
) -> ServiceResult<i64> {
    let id = parse_integer(raw)?;
    if listed.into_iter().any(|listed_id| listed_id == id) {
        Ok(id)
    } else {
        Err(ServiceError::InvalidId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_from_vec_signals_empty() {
        let empty: Listing<i64> = Vec::new().into();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let items: Listing<i64> = vec![1, 2].into();
        assert_eq!(items, Listing::Items(vec![1, 2]));
        assert_eq!(items.as_slice(), &[1, 2]);
    }

    #[test]
    fn resolve_listed_id_distinguishes_parse_and_membership() {
        assert_eq!(resolve_listed_id(" 2 ", [1, 2, 3]).unwrap(), 2);
        assert!(matches!(
            resolve_listed_id("7", [1, 2, 3]),
            Err(ServiceError::InvalidId(7))
        ));
        assert!(matches!(
            resolve_listed_id("two", [1, 2, 3]),
            Err(ServiceError::Validation(ValidationError::NotANumber(_)))
        ));
    }

    #[test]
    fn only_storage_and_field_errors_are_fatal() {
        assert!(ServiceError::DuplicateName("A".into()).is_recoverable());
        assert!(ServiceError::LimitExceeded { max: 10 }.is_recoverable());
        assert!(!ServiceError::InvalidField("stock".into()).is_recoverable());
        assert!(!ServiceError::Repo(RepoError::ForeignKeyViolation).is_recoverable());
    }

    #[test]
    fn repo_duplicate_name_maps_to_service_kind() {
        let err: ServiceError = RepoError::DuplicateName("Tools".into()).into();
        assert!(matches!(err, ServiceError::DuplicateName(name) if name == "Tools"));
    }
}
