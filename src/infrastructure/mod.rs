//! Infrastructure layer: SeaORM storage behind the domain repository traits

pub mod database;

pub use database::init_database;
pub use database::repositories::SeaOrmRepositoryProvider;
