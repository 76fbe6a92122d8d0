//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::rating::RatingRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::skill::SkillRepository;
use crate::domain::swap_request::SwapRequestRepository;
use crate::domain::user::UserRepository;

use super::rating_repository::SeaOrmRatingRepository;
use super::skill_repository::SeaOrmSkillRepository;
use super::swap_request_repository::SeaOrmSwapRequestRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let skill = repos.skills().resolve("cooking").await?;
/// let swaps = repos.swap_requests().list_for_user(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    skills: SeaOrmSkillRepository,
    users: SeaOrmUserRepository,
    swap_requests: SeaOrmSwapRequestRepository,
    ratings: SeaOrmRatingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            skills: SeaOrmSkillRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            swap_requests: SeaOrmSwapRequestRepository::new(db.clone()),
            ratings: SeaOrmRatingRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn skills(&self) -> &dyn SkillRepository {
        &self.skills
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn swap_requests(&self) -> &dyn SwapRequestRepository {
        &self.swap_requests
    }

    fn ratings(&self) -> &dyn RatingRepository {
        &self.ratings
    }
}
