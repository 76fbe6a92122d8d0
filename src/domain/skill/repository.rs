//! Skill repository interface

use async_trait::async_trait;

use super::model::Skill;
use crate::domain::DomainResult;

#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Return the skill with this (already normalized) name, inserting it
    /// first if it does not exist. Safe under concurrent callers.
    async fn resolve(&self, name: &str) -> DomainResult<Skill>;

    /// Find a skill by its normalized name
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Skill>>;

    /// All known skills, ordered by name
    async fn list(&self) -> DomainResult<Vec<Skill>>;
}
