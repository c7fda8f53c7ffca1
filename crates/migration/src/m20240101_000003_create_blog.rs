//! Create `blog` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Blog::Table)
                    .if_not_exists()
                    .col(string_len(Blog::Id, 24).primary_key())
                    .col(string_len(Blog::Title, 200).not_null())
                    .col(string_len(Blog::Slug, 220).not_null())
                    .col(string_len(Blog::Category, 32).not_null())
                    .col(
                        ColumnDef::new(Blog::Description)
                            .string_len(500)
                            .null(),
                    )
                    .col(text(Blog::Content).not_null())
                    .col(string_len(Blog::Author, 100).not_null())
                    .col(timestamp_with_time_zone(Blog::PublishedAt).not_null())
                    .col(boolean(Blog::IsPublished).not_null().default(false))
                    .col(big_integer(Blog::ViewsCount).not_null().default(0))
                    .col(integer(Blog::Version).not_null().default(0))
                    .col(timestamp_with_time_zone(Blog::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Blog::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Blog::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Blog {
    Table,
    Id,
    Title,
    Slug,
    Category,
    Description,
    Content,
    Author,
    PublishedAt,
    IsPublished,
    ViewsCount,
    Version,
    CreatedAt,
    UpdatedAt,
}
