//! Create the offered/wanted association tables between users and skills

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_skills::Skills;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [UserSkills::Offered, UserSkills::Wanted] {
            let name = table.to_string();

            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(ColumnDef::new(UserSkills::UserId).integer().not_null())
                        .col(ColumnDef::new(UserSkills::SkillId).integer().not_null())
                        .primary_key(
                            Index::create()
                                .name(format!("pk_{}", name))
                                .col(UserSkills::UserId)
                                .col(UserSkills::SkillId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("fk_{}_user", name))
                                .from(table, UserSkills::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("fk_{}_skill", name))
                                .from(table, UserSkills::SkillId)
                                .to(Skills::Table, Skills::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Reverse lookup: skill -> users
            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{}_skill_id", name))
                        .table(table)
                        .col(UserSkills::SkillId)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [UserSkills::Offered, UserSkills::Wanted] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden, Clone, Copy)]
enum UserSkills {
    #[iden = "user_skills_offered"]
    Offered,
    #[iden = "user_skills_wanted"]
    Wanted,
    UserId,
    SkillId,
}
