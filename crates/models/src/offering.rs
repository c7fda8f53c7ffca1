//! Practice-area offerings, stored in the `service` table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub category: String,
    pub short_description: String,
    #[sea_orm(column_type = "Text")]
    pub full_description: String,
    /// Ordered list of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub details: Json,
    pub icon_url: String,
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `details` decoded as strings; non-string entries are skipped.
    pub fn detail_lines(&self) -> Vec<String> {
        self.details
            .as_array()
            .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_owned)).collect())
            .unwrap_or_default()
    }
}
