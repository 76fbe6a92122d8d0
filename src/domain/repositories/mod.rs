//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::rating::RatingRepository;
use super::skill::SkillRepository;
use super::swap_request::SwapRequestRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// The storage handle behind it is opened at process start and passed in;
/// consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let skill = repos.skills().resolve("cooking").await?;
///     let offerers = repos.users().find_public_offerers(skill.id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn skills(&self) -> &dyn SkillRepository;
    fn users(&self) -> &dyn UserRepository;
    fn swap_requests(&self) -> &dyn SwapRequestRepository;
    fn ratings(&self) -> &dyn RatingRepository;
}
