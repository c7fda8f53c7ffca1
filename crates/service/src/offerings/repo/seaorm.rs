use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value;

use crate::errors::{absent_if_not_updated, StoreError};
use crate::offerings::domain::{NewOffering, Offering, OfferingPatch};
use crate::offerings::repository::OfferingRepository;
use models::ids::{is_object_id, new_object_id};
use models::offering;

pub struct SeaOrmOfferingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOfferingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, id: &str) -> Result<Option<offering::Model>, StoreError> {
        if !is_object_id(id) {
            return Err(StoreError::Cast(id.to_string()));
        }
        Ok(offering::Entity::find_by_id(id.to_lowercase()).one(&self.db).await?)
    }
}

fn to_domain(m: offering::Model) -> Offering {
    let details = m.detail_lines();
    Offering {
        id: m.id,
        name: m.name,
        slug: m.slug,
        kind: m.kind,
        category: m.category,
        short_description: m.short_description,
        full_description: m.full_description,
        details,
        icon_url: m.icon_url,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

fn details_json(details: Vec<String>) -> Value {
    Value::Array(details.into_iter().map(Value::String).collect())
}

#[async_trait::async_trait]
impl OfferingRepository for SeaOrmOfferingRepository {
    async fn create(&self, new: NewOffering) -> Result<Offering, StoreError> {
        let now = Utc::now().into();
        let am = offering::ActiveModel {
            id: Set(new_object_id()),
            name: Set(new.name),
            slug: Set(new.slug),
            kind: Set(new.kind),
            category: Set(new.category),
            short_description: Set(new.short_description),
            full_description: Set(new.full_description),
            details: Set(details_json(new.details)),
            icon_url: Set(new.icon_url),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(to_domain(am.insert(&self.db).await?))
    }

    async fn update(&self, id: &str, patch: OfferingPatch) -> Result<Option<Offering>, StoreError> {
        let Some(existing) = self.load(id).await? else { return Ok(None) };
        let version = existing.version;
        let mut am: offering::ActiveModel = existing.into();
        if let Some(v) = patch.name { am.name = Set(v); }
        if let Some(v) = patch.slug { am.slug = Set(v); }
        if let Some(v) = patch.kind { am.kind = Set(v); }
        if let Some(v) = patch.category { am.category = Set(v); }
        if let Some(v) = patch.short_description { am.short_description = Set(v); }
        if let Some(v) = patch.full_description { am.full_description = Set(v); }
        if let Some(v) = patch.details { am.details = Set(details_json(v)); }
        if let Some(v) = patch.icon_url { am.icon_url = Set(v); }
        am.version = Set(version + 1);
        am.updated_at = Set(Utc::now().into());
        Ok(absent_if_not_updated(am.update(&self.db).await)?.map(to_domain))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        if !is_object_id(id) {
            return Err(StoreError::Cast(id.to_string()));
        }
        let res = offering::Entity::delete_by_id(id.to_lowercase()).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Offering>, StoreError> {
        Ok(self.load(id).await?.map(to_domain))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Offering>, StoreError> {
        let res = offering::Entity::find()
            .filter(offering::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        Ok(res.map(to_domain))
    }

    async fn list(&self) -> Result<Vec<Offering>, StoreError> {
        let rows = offering::Entity::find()
            .order_by_asc(offering::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(to_domain).collect())
    }
}
