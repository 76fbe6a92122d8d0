//! SeaORM implementation of UserRepository

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::db_err;
use super::skill_repository::resolve_in;
use crate::domain::skill::SkillId;
use crate::domain::user::{NewUser, User, UserId, UserProfile, UserRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{skill, user, user_skill_offered, user_skill_wanted};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        location: model.location,
        profile_photo: model.profile_photo,
        availability: model.availability,
        is_public: model.is_public,
    }
}

/// Attach offered/wanted skill names to each user with three batched reads.
/// Skill names come back sorted alphabetically.
async fn load_profiles<C: ConnectionTrait>(
    conn: &C,
    users: Vec<user::Model>,
) -> DomainResult<Vec<UserProfile>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids: Vec<i32> = users.iter().map(|u| u.id).collect();

    let offered = user_skill_offered::Entity::find()
        .filter(user_skill_offered::Column::UserId.is_in(user_ids.clone()))
        .all(conn)
        .await
        .map_err(db_err)?;
    let wanted = user_skill_wanted::Entity::find()
        .filter(user_skill_wanted::Column::UserId.is_in(user_ids))
        .all(conn)
        .await
        .map_err(db_err)?;

    let skill_ids: HashSet<i32> = offered
        .iter()
        .map(|row| row.skill_id)
        .chain(wanted.iter().map(|row| row.skill_id))
        .collect();

    let names: HashMap<i32, String> = if skill_ids.is_empty() {
        HashMap::new()
    } else {
        skill::Entity::find()
            .filter(skill::Column::Id.is_in(skill_ids))
            .all(conn)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect()
    };

    let mut offered_by_user: HashMap<i32, Vec<String>> = HashMap::new();
    for row in offered {
        if let Some(name) = names.get(&row.skill_id) {
            offered_by_user.entry(row.user_id).or_default().push(name.clone());
        }
    }
    let mut wanted_by_user: HashMap<i32, Vec<String>> = HashMap::new();
    for row in wanted {
        if let Some(name) = names.get(&row.skill_id) {
            wanted_by_user.entry(row.user_id).or_default().push(name.clone());
        }
    }

    Ok(users
        .into_iter()
        .map(|model| {
            let mut skills_offered = offered_by_user.remove(&model.id).unwrap_or_default();
            let mut skills_wanted = wanted_by_user.remove(&model.id).unwrap_or_default();
            skills_offered.sort();
            skills_wanted.sort();
            UserProfile {
                user: model_to_domain(model),
                skills_offered,
                skills_wanted,
            }
        })
        .collect())
}

// ── UserRepository impl ─────────────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser) -> DomainResult<UserId> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let created = user::ActiveModel {
            name: Set(new_user.name),
            location: Set(new_user.location),
            profile_photo: Set(new_user.profile_photo),
            availability: Set(new_user.availability),
            is_public: Set(new_user.is_public),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let mut offered = Vec::with_capacity(new_user.skills_offered.len());
        for name in &new_user.skills_offered {
            let skill = resolve_in(&txn, name).await?;
            offered.push(user_skill_offered::ActiveModel {
                user_id: Set(created.id),
                skill_id: Set(skill.id),
            });
        }
        if !offered.is_empty() {
            user_skill_offered::Entity::insert_many(offered)
                .exec_without_returning(&txn)
                .await
                .map_err(db_err)?;
        }

        let mut wanted = Vec::with_capacity(new_user.skills_wanted.len());
        for name in &new_user.skills_wanted {
            let skill = resolve_in(&txn, name).await?;
            wanted.push(user_skill_wanted::ActiveModel {
                user_id: Set(created.id),
                skill_id: Set(skill.id),
            });
        }
        if !wanted.is_empty() {
            user_skill_wanted::Entity::insert_many(wanted)
                .exec_without_returning(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        debug!(
            "Created user {} ({} offered, {} wanted)",
            created.id,
            new_user.skills_offered.len(),
            new_user.skills_wanted.len()
        );
        Ok(created.id)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(model_to_domain))
    }

    async fn find_profile(&self, id: UserId) -> DomainResult<Option<UserProfile>> {
        let Some(model) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        Ok(load_profiles(&self.db, vec![model]).await?.pop())
    }

    async fn find_public_offerers(&self, skill_id: SkillId) -> DomainResult<Vec<UserProfile>> {
        let user_ids: Vec<i32> = user_skill_offered::Entity::find()
            .filter(user_skill_offered::Column::SkillId.eq(skill_id))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|row| row.user_id)
            .collect();

        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .filter(user::Column::IsPublic.eq(true))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        load_profiles(&self.db, users).await
    }
}
