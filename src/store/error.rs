// Store error types

use thiserror::Error;

/// Errors surfaced by store operations.
///
/// Constraint violations get their own variants so the request handlers
/// can map them onto specific HTTP statuses; anything else is wrapped as
/// `Sqlite` and treated as an internal error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("category name already exists")]
    DuplicateName,

    #[error("category does not exist")]
    CategoryNotFound,

    #[error("link does not exist")]
    LinkNotFound,

    #[error("the last remaining category cannot be deleted")]
    LastCategory,

    #[error("category is still referenced by links")]
    CategoryInUse,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
