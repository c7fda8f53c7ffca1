//! Create `service` table (the firm's practice offerings).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(string_len(Service::Id, 24).primary_key())
                    .col(string_len(Service::Name, 100).not_null())
                    .col(string_len(Service::Slug, 120).not_null())
                    .col(string_len(Service::Type, 16).not_null())
                    .col(string_len(Service::Category, 32).not_null())
                    .col(string_len(Service::ShortDescription, 300).not_null())
                    .col(text(Service::FullDescription).not_null())
                    .col(json_binary(Service::Details).not_null())
                    .col(string_len(Service::IconUrl, 32).not_null().default("General"))
                    .col(integer(Service::Version).not_null().default(0))
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    Name,
    Slug,
    Type,
    Category,
    ShortDescription,
    FullDescription,
    Details,
    IconUrl,
    Version,
    CreatedAt,
    UpdatedAt,
}
