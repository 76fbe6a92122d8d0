//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.
//! Every mutating call runs inside its own transaction.

pub mod rating_repository;
pub mod repository_provider;
pub mod skill_repository;
pub mod swap_request_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Map a unique-constraint violation to `Conflict(message)`, anything else
/// to a storage error.
pub(crate) fn unique_or_db_err(e: DbErr, message: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(message.to_string()),
        _ => db_err(e),
    }
}
