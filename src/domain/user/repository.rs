//! User repository interface

use async_trait::async_trait;

use super::model::{NewUser, User, UserId, UserProfile};
use crate::domain::skill::SkillId;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user, resolve every skill name and attach the offered and
    /// wanted associations, all in one transaction.
    async fn create(&self, user: NewUser) -> DomainResult<UserId>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// User with skill names read from the association tables
    async fn find_profile(&self, id: UserId) -> DomainResult<Option<UserProfile>>;

    /// Public users offering the skill, ordered by ascending id
    async fn find_public_offerers(&self, skill_id: SkillId) -> DomainResult<Vec<UserProfile>>;
}
