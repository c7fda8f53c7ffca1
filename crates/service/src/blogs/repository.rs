use async_trait::async_trait;

use super::domain::{Blog, BlogPatch, NewBlog};
use crate::errors::StoreError;

/// Persistence for blog posts. `title` and `slug` are unique.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, new: NewBlog) -> Result<Blog, StoreError>;
    async fn update(&self, id: &str, patch: BlogPatch) -> Result<Option<Blog>, StoreError>;
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Blog>, StoreError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Blog>, StoreError>;
    /// Ordered by title ascending.
    async fn list(&self) -> Result<Vec<Blog>, StoreError>;
}

pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;
    use models::ids::{is_object_id, new_object_id};

    /// Rows kept in insertion order.
    #[derive(Default)]
    pub struct MockBlogRepository {
        rows: Mutex<Vec<Blog>>,
    }

    impl MockBlogRepository {
        fn rows(&self) -> Result<MutexGuard<'_, Vec<Blog>>, StoreError> {
            self.rows.lock().map_err(|_| StoreError::Backend("blog store lock poisoned".into()))
        }
    }

    fn check_unique(rows: &[Blog], candidate: &Blog) -> Result<(), StoreError> {
        for other in rows.iter().filter(|b| b.id != candidate.id) {
            if other.title == candidate.title {
                return Err(StoreError::Duplicate { field: "title".into() });
            }
            if other.slug == candidate.slug {
                return Err(StoreError::Duplicate { field: "slug".into() });
            }
        }
        Ok(())
    }

    fn cast_check(id: &str) -> Result<String, StoreError> {
        if is_object_id(id) {
            Ok(id.to_lowercase())
        } else {
            Err(StoreError::Cast(id.to_string()))
        }
    }

    #[async_trait]
    impl BlogRepository for MockBlogRepository {
        async fn create(&self, new: NewBlog) -> Result<Blog, StoreError> {
            let now = Utc::now();
            let blog = Blog {
                id: new_object_id(),
                title: new.title,
                slug: new.slug,
                category: new.category,
                description: new.description,
                content: new.content,
                author: new.author,
                published_at: new.published_at,
                is_published: new.is_published,
                views_count: new.views_count,
                created_at: now,
                updated_at: now,
            };
            let mut rows = self.rows()?;
            check_unique(&rows, &blog)?;
            rows.push(blog.clone());
            Ok(blog)
        }

        async fn update(&self, id: &str, patch: BlogPatch) -> Result<Option<Blog>, StoreError> {
            let id = cast_check(id)?;
            let mut rows = self.rows()?;
            let Some(pos) = rows.iter().position(|b| b.id == id) else { return Ok(None) };
            let mut next = rows[pos].clone();
            patch.apply(&mut next);
            next.updated_at = Utc::now();
            check_unique(&rows, &next)?;
            rows[pos] = next.clone();
            Ok(Some(next))
        }

        async fn delete(&self, id: &str) -> Result<bool, StoreError> {
            let id = cast_check(id)?;
            let mut rows = self.rows()?;
            let before = rows.len();
            rows.retain(|b| b.id != id);
            Ok(rows.len() < before)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Blog>, StoreError> {
            let id = cast_check(id)?;
            Ok(self.rows()?.iter().find(|b| b.id == id).cloned())
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<Blog>, StoreError> {
            Ok(self.rows()?.iter().find(|b| b.slug == slug).cloned())
        }

        async fn list(&self) -> Result<Vec<Blog>, StoreError> {
            let mut all = self.rows()?.clone();
            all.sort_by(|a, b| a.title.cmp(&b.title));
            Ok(all)
        }
    }
}
