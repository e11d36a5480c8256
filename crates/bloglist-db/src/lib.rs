pub mod pool;
pub mod repos;

// Re-export commonly used items
pub use pool::{create_pool, run_migrations};
pub use repos::blog::{BlogRepo, BlogRow, BlogWithOwner};
pub use repos::user::{UserRepo, UserRow};

/// True when an error chain bottoms out in a unique-constraint violation.
///
/// Repos wrap driver errors in `anyhow` context, so callers that care about
/// duplicate keys (user registration) go through this instead of matching on
/// the driver error themselves.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation))
}
