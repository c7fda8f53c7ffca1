//! Create `user` table.
//!
//! Admin accounts; `password` holds an argon2 PHC string and never leaves the
//! repository layer except for the login check.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::Id, 24).primary_key())
                    .col(string_len(User::Name, 50).not_null())
                    .col(string_len(User::Email, 100).not_null())
                    .col(string_len(User::Password, 255).not_null())
                    .col(string_len(User::Role, 16).not_null().default("admin"))
                    .col(integer(User::Version).not_null().default(0))
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(User::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User { Table, Id, Name, Email, Password, Role, Version, CreatedAt, UpdatedAt }
