//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//! - Translate store constraint violations into semantic errors.
//!
//! # Invariants
//! - Every repository call opens its own connection and drops it on return.
//! - Uniqueness and foreign-key violations never surface as bare SQLite errors.

use crate::db::DbError;
use crate::repo::product_repo::ProductField;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod product_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for inventory persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// `categories.name` UNIQUE constraint rejected the value.
    DuplicateName(String),
    /// A RESTRICT or FOREIGN KEY constraint rejected the write.
    ForeignKeyViolation,
    /// Field name outside the updatable product columns.
    InvalidField(String),
    /// Updatable column given a value of the wrong kind.
    FieldTypeMismatch(ProductField),
    /// No row matched the given id.
    NotFound(i64),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "category name already exists: `{name}`"),
            Self::ForeignKeyViolation => write!(f, "foreign key constraint failed"),
            Self::InvalidField(field) => write!(f, "field is not updatable: `{field}`"),
            Self::FieldTypeMismatch(field) => write!(f, "wrong value type for field `{field}`"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl RepoError {
    /// Stable machine-readable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "db_error",
            Self::DuplicateName(_) => "duplicate_name",
            Self::ForeignKeyViolation => "foreign_key_violation",
            Self::InvalidField(_) => "invalid_field",
            Self::FieldTypeMismatch(_) => "field_type_mismatch",
            Self::NotFound(_) => "not_found",
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

const FOREIGN_KEY_FAILED: &str = "FOREIGN KEY constraint failed";

/// Classifies a failed write, mapping UNIQUE on the given name and
/// FOREIGN KEY violations to their semantic variants.
///
/// SQLite reports an `ON DELETE RESTRICT` refusal as a trigger constraint
/// carrying the foreign key message, so both codes are checked.
pub(crate) fn classify_write_error(err: rusqlite::Error, name: Option<&str>) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, message) = &err {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation {
            match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE => {
                    if let Some(name) = name {
                        return RepoError::DuplicateName(name.to_string());
                    }
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return RepoError::ForeignKeyViolation,
                ffi::SQLITE_CONSTRAINT_TRIGGER
                    if message
                        .as_deref()
                        .is_some_and(|text| text.contains(FOREIGN_KEY_FAILED)) =>
                {
                    return RepoError::ForeignKeyViolation
                }
                _ => {}
            }
        }
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::{classify_write_error, RepoError};
    use rusqlite::ffi;

    fn constraint_failure(extended_code: i32, message: &str) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            ffi::Error::new(extended_code),
            Some(message.to_string()),
        )
    }

    #[test]
    fn restrict_trigger_failure_maps_to_foreign_key_violation() {
        let err = constraint_failure(
            ffi::SQLITE_CONSTRAINT_TRIGGER,
            "FOREIGN KEY constraint failed",
        );
        assert!(matches!(
            classify_write_error(err, None),
            RepoError::ForeignKeyViolation
        ));
    }

    #[test]
    fn unrelated_trigger_failure_stays_a_db_error() {
        let err = constraint_failure(ffi::SQLITE_CONSTRAINT_TRIGGER, "custom trigger abort");
        assert!(matches!(classify_write_error(err, None), RepoError::Db(_)));
    }

    #[test]
    fn unique_failure_needs_a_name_to_be_a_duplicate() {
        let err = constraint_failure(
            ffi::SQLITE_CONSTRAINT_UNIQUE,
            "UNIQUE constraint failed: categories.name",
        );
        assert!(matches!(
            classify_write_error(err, Some("Tools")),
            RepoError::DuplicateName(name) if name == "Tools"
        ));
    }
}
