//! SeaORM implementation of SkillRepository

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

use super::db_err;
use crate::domain::skill::{Skill, SkillRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::skill;

pub struct SeaOrmSkillRepository {
    db: DatabaseConnection,
}

impl SeaOrmSkillRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: skill::Model) -> Skill {
    Skill {
        id: model.id,
        name: model.name,
    }
}

pub(crate) async fn find_by_name_in<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> DomainResult<Option<Skill>> {
    let found = skill::Entity::find()
        .filter(skill::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(db_err)?;
    Ok(found.map(model_to_domain))
}

/// Get-or-create on an existing connection or transaction.
///
/// The insert is a no-op when the name is already taken, so concurrent
/// callers converge on the same row through the unique index on `name`.
pub(crate) async fn resolve_in<C: ConnectionTrait>(conn: &C, name: &str) -> DomainResult<Skill> {
    let row = skill::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };

    let inserted = skill::Entity::insert(row)
        .on_conflict(OnConflict::column(skill::Column::Name).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await
        .map_err(db_err)?;

    if inserted > 0 {
        debug!("Created skill '{}'", name);
    }

    find_by_name_in(conn, name).await?.ok_or_else(|| {
        DomainError::Storage(format!("Skill '{}' missing after get-or-create", name))
    })
}

#[async_trait]
impl SkillRepository for SeaOrmSkillRepository {
    async fn resolve(&self, name: &str) -> DomainResult<Skill> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let skill = resolve_in(&txn, name).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(skill)
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Skill>> {
        find_by_name_in(&self.db, name).await
    }

    async fn list(&self) -> DomainResult<Vec<Skill>> {
        let skills = skill::Entity::find()
            .order_by_asc(skill::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(skills.into_iter().map(model_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::testing::memory_database;

    #[tokio::test]
    async fn resolve_is_idempotent() {
        let repo = SeaOrmSkillRepository::new(memory_database().await);

        let first = repo.resolve("cooking").await.unwrap();
        let second = repo.resolve("cooking").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_resolves_converge() {
        let repo = SeaOrmSkillRepository::new(memory_database().await);

        let (a, b) = tokio::join!(repo.resolve("guitar"), repo.resolve("guitar"));

        assert_eq!(a.unwrap().id, b.unwrap().id);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let repo = SeaOrmSkillRepository::new(memory_database().await);
        for name in ["welding", "baking", "piano"] {
            repo.resolve(name).await.unwrap();
        }

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["baking", "piano", "welding"]);
    }

    #[tokio::test]
    async fn find_by_name_misses_unknown() {
        let repo = SeaOrmSkillRepository::new(memory_database().await);
        assert!(repo.find_by_name("juggling").await.unwrap().is_none());
    }
}
