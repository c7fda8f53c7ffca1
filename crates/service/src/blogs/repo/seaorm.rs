use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::blogs::domain::{Blog, BlogPatch, NewBlog};
use crate::blogs::repository::BlogRepository;
use crate::errors::{absent_if_not_updated, StoreError};
use models::blog;
use models::ids::{is_object_id, new_object_id};

pub struct SeaOrmBlogRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBlogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn cast_check(id: &str) -> Result<String, StoreError> {
    if is_object_id(id) {
        Ok(id.to_lowercase())
    } else {
        Err(StoreError::Cast(id.to_string()))
    }
}

fn to_domain(m: blog::Model) -> Blog {
    Blog {
        id: m.id,
        title: m.title,
        slug: m.slug,
        category: m.category,
        description: m.description,
        content: m.content,
        author: m.author,
        published_at: m.published_at.with_timezone(&Utc),
        is_published: m.is_published,
        views_count: m.views_count,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

#[async_trait::async_trait]
impl BlogRepository for SeaOrmBlogRepository {
    async fn create(&self, new: NewBlog) -> Result<Blog, StoreError> {
        let now = Utc::now().into();
        let am = blog::ActiveModel {
            id: Set(new_object_id()),
            title: Set(new.title),
            slug: Set(new.slug),
            category: Set(new.category),
            description: Set(new.description),
            content: Set(new.content),
            author: Set(new.author),
            published_at: Set(new.published_at.into()),
            is_published: Set(new.is_published),
            views_count: Set(new.views_count),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(to_domain(am.insert(&self.db).await?))
    }

    async fn update(&self, id: &str, patch: BlogPatch) -> Result<Option<Blog>, StoreError> {
        let id = cast_check(id)?;
        let Some(existing) = blog::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let version = existing.version;
        let mut am: blog::ActiveModel = existing.into();
        if let Some(v) = patch.title { am.title = Set(v); }
        if let Some(v) = patch.slug { am.slug = Set(v); }
        if let Some(v) = patch.category { am.category = Set(v); }
        if let Some(v) = patch.description { am.description = Set(Some(v)); }
        if let Some(v) = patch.content { am.content = Set(v); }
        if let Some(v) = patch.author { am.author = Set(v); }
        if let Some(v) = patch.published_at { am.published_at = Set(v.into()); }
        if let Some(v) = patch.is_published { am.is_published = Set(v); }
        if let Some(v) = patch.views_count { am.views_count = Set(v); }
        am.version = Set(version + 1);
        am.updated_at = Set(Utc::now().into());
        Ok(absent_if_not_updated(am.update(&self.db).await)?.map(to_domain))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let id = cast_check(id)?;
        let res = blog::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Blog>, StoreError> {
        let id = cast_check(id)?;
        Ok(blog::Entity::find_by_id(id).one(&self.db).await?.map(to_domain))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Blog>, StoreError> {
        let res = blog::Entity::find().filter(blog::Column::Slug.eq(slug)).one(&self.db).await?;
        Ok(res.map(to_domain))
    }

    async fn list(&self) -> Result<Vec<Blog>, StoreError> {
        let rows = blog::Entity::find().order_by_asc(blog::Column::Title).all(&self.db).await?;
        Ok(rows.into_iter().map(to_domain).collect())
    }
}
