use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `(index name, table, column)`; names follow `uniq_<table>_<column>`.
const UNIQUE_INDEXES: &[(&str, &str, &str)] = &[
    ("uniq_user_email", "user", "email"),
    ("uniq_user_name", "user", "name"),
    ("uniq_service_name", "service", "name"),
    ("uniq_service_slug", "service", "slug"),
    ("uniq_blog_title", "blog", "title"),
    ("uniq_blog_slug", "blog", "slug"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in UNIQUE_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(*name)
                        .table(Alias::new(*table))
                        .col(Alias::new(*column))
                        .unique()
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in UNIQUE_INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
