use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Machine-readable error kind surfaced to API callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation_error",
            Self::Conflict(_) => "conflict",
            Self::Forbidden(_) => "forbidden",
            Self::Storage(_) => "storage_error",
        }
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { entity, .. } => format!("{} not found", entity),
            Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Forbidden(msg)
            | Self::Storage(msg) => msg.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(DomainError::Validation("x".into()).kind(), "validation_error");
        assert_eq!(DomainError::Conflict("x".into()).kind(), "conflict");
        assert_eq!(DomainError::Forbidden("x".into()).kind(), "forbidden");
        assert_eq!(DomainError::not_found("User", "id", 7).kind(), "not_found");
        assert_eq!(DomainError::Storage("x".into()).kind(), "storage_error");
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let err = DomainError::not_found("SwapRequest", "id", 42);
        assert_eq!(err.to_string(), "Not found: SwapRequest with id=42");
    }

    #[test]
    fn message_drops_the_kind_prefix() {
        assert_eq!(
            DomainError::Validation("Name is required".into()).message(),
            "Name is required"
        );
        assert_eq!(
            DomainError::not_found("User", "id", 3).message(),
            "User not found"
        );
    }
}
