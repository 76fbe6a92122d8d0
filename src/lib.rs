//! # Skill Swap Directory
//!
//! Users list skills they offer and skills they want, find each other by
//! offered skill, and negotiate one-to-one swaps through a
//! `pending -> accepted | rejected` request lifecycle, optionally closed out
//! with a rating.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities, lifecycle rules and repository traits
//! - **application**: `DirectoryService` use cases over a `RepositoryProvider`
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Process lifecycle (database, HTTP server, graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::create_api_router;

pub use application::{DirectoryPolicy, DirectoryService};
pub use shared::{AppError, DomainError, InfraError};
