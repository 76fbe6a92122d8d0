//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_skills;
mod m20240101_000003_create_user_skills;
mod m20240101_000004_create_swap_requests;
mod m20240101_000005_create_ratings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_skills::Migration),
            Box::new(m20240101_000003_create_user_skills::Migration),
            Box::new(m20240101_000004_create_swap_requests::Migration),
            Box::new(m20240101_000005_create_ratings::Migration),
        ]
    }
}
