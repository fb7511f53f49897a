//! Category domain model.

/// Store-assigned category identifier.
pub type CategoryId = i64;

/// Named grouping that products belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    /// Unique across all categories (case-sensitive).
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
