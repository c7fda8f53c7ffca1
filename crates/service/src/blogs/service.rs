use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use super::domain::{Blog, BlogInput, BlogPatch, NewBlog};
use super::repository::BlogRepository;
use crate::auth::{AdminGuard, AuthContext};
use crate::errors::AppError;
use crate::resource::{absent_on_cast, derive_slug};
use crate::validation::schemas::BLOG_SLUG_MAX;
use crate::validation::{filter_update_as, SchemaRegistry};

const ENTITY: &str = "Blog";
pub const NOT_FOUND: &str = "Blog not found";
pub const NONE_FOUND: &str = "No blog found";

pub struct BlogService<R: ?Sized> {
    repo: Arc<R>,
    guard: AdminGuard,
    schemas: Arc<SchemaRegistry>,
}

impl<R: BlogRepository + ?Sized> BlogService<R> {
    pub fn new(repo: Arc<R>, guard: AdminGuard, schemas: Arc<SchemaRegistry>) -> Self {
        Self { repo, guard, schemas }
    }

    #[instrument(skip(self, ctx, raw), fields(caller = %ctx.user_id))]
    pub async fn create(&self, ctx: &AuthContext, raw: &Value) -> Result<Blog, AppError> {
        let input: BlogInput = self.schemas.blog().parse(raw)?;
        self.guard.ensure_admin(&ctx.user_id).await?;

        let slug = derive_slug("title", &input.title, input.slug, BLOG_SLUG_MAX)?;
        let new = NewBlog {
            title: input.title,
            slug,
            category: input.category,
            description: input.description,
            content: input.content,
            author: input.author,
            published_at: input.published_at,
            is_published: input.is_published,
            views_count: input.views_count,
        };
        let created = self.repo.create(new).await.map_err(|e| e.into_app_error(ENTITY))?;
        info!(blog_id = %created.id, slug = %created.slug, "blog_created");
        Ok(created)
    }

    /// Partial update; a new title re-derives the slug.
    #[instrument(skip(self, ctx, raw), fields(caller = %ctx.user_id))]
    pub async fn update(&self, ctx: &AuthContext, id: &str, raw: &Value) -> Result<Blog, AppError> {
        let mut patch: BlogPatch = filter_update_as(raw, self.schemas.blog())?;
        self.guard.ensure_admin(&ctx.user_id).await?;

        if let Some(title) = &patch.title {
            patch.slug = Some(derive_slug("title", title, patch.slug.take(), BLOG_SLUG_MAX)?);
        }
        let updated = self
            .repo
            .update(id, patch)
            .await
            .map_err(|e| absent_on_cast(e, ENTITY, NOT_FOUND))?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
        info!(blog_id = %updated.id, "blog_updated");
        Ok(updated)
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.user_id))]
    pub async fn delete(&self, ctx: &AuthContext, id: &str) -> Result<(), AppError> {
        self.guard.ensure_admin(&ctx.user_id).await?;
        let deleted = self.repo.delete(id).await.map_err(|e| absent_on_cast(e, ENTITY, NOT_FOUND))?;
        if !deleted {
            return Err(AppError::not_found(NOT_FOUND));
        }
        info!(blog_id = %id, "blog_deleted");
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Blog, AppError> {
        self.schemas.validate_id(id)?;
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| e.into_app_error(ENTITY))?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Blog, AppError> {
        self.repo
            .find_by_slug(slug)
            .await
            .map_err(|e| e.into_app_error(ENTITY))?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    pub async fn list(&self) -> Result<Vec<Blog>, AppError> {
        let all = self.repo.list().await.map_err(|e| e.into_app_error(ENTITY))?;
        if all.is_empty() {
            return Err(AppError::not_found(NONE_FOUND));
        }
        Ok(all)
    }
}
