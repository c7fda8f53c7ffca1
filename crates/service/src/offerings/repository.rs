use async_trait::async_trait;

use super::domain::{NewOffering, Offering, OfferingPatch};
use crate::errors::StoreError;

/// Persistence for offerings. `name` and `slug` are unique; malformed ids
/// yield [`StoreError::Cast`].
#[async_trait]
pub trait OfferingRepository: Send + Sync {
    async fn create(&self, new: NewOffering) -> Result<Offering, StoreError>;
    /// Returns the updated record, or `None` when the id is unknown.
    async fn update(&self, id: &str, patch: OfferingPatch) -> Result<Option<Offering>, StoreError>;
    /// `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Offering>, StoreError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Offering>, StoreError>;
    /// All offerings ordered by name ascending.
    async fn list(&self) -> Result<Vec<Offering>, StoreError>;
}

pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;
    use models::ids::{is_object_id, new_object_id};

    #[derive(Default)]
    pub struct MockOfferingRepository {
        rows: Mutex<HashMap<String, Offering>>,
    }

    impl MockOfferingRepository {
        fn rows(&self) -> Result<MutexGuard<'_, HashMap<String, Offering>>, StoreError> {
            self.rows.lock().map_err(|_| StoreError::Backend("offering store lock poisoned".into()))
        }
    }

    fn check_unique(rows: &HashMap<String, Offering>, candidate: &Offering) -> Result<(), StoreError> {
        for other in rows.values().filter(|o| o.id != candidate.id) {
            if other.name == candidate.name {
                return Err(StoreError::Duplicate { field: "name".into() });
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
    impl OfferingRepository for MockOfferingRepository {
        async fn create(&self, new: NewOffering) -> Result<Offering, StoreError> {
            let now = Utc::now();
            let offering = Offering {
                id: new_object_id(),
                name: new.name,
                slug: new.slug,
                kind: new.kind,
                category: new.category,
                short_description: new.short_description,
                full_description: new.full_description,
                details: new.details,
                icon_url: new.icon_url,
                created_at: now,
                updated_at: now,
            };
            let mut rows = self.rows()?;
            check_unique(&rows, &offering)?;
            rows.insert(offering.id.clone(), offering.clone());
            Ok(offering)
        }

        async fn update(&self, id: &str, patch: OfferingPatch) -> Result<Option<Offering>, StoreError> {
            let id = cast_check(id)?;
            let mut rows = self.rows()?;
            let Some(mut next) = rows.get(&id).cloned() else { return Ok(None) };
            patch.apply(&mut next);
            next.updated_at = Utc::now();
            check_unique(&rows, &next)?;
            rows.insert(id, next.clone());
            Ok(Some(next))
        }

        async fn delete(&self, id: &str) -> Result<bool, StoreError> {
            let id = cast_check(id)?;
            Ok(self.rows()?.remove(&id).is_some())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Offering>, StoreError> {
            let id = cast_check(id)?;
            Ok(self.rows()?.get(&id).cloned())
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<Offering>, StoreError> {
            Ok(self.rows()?.values().find(|o| o.slug == slug).cloned())
        }

        async fn list(&self) -> Result<Vec<Offering>, StoreError> {
            let mut all: Vec<Offering> = self.rows()?.values().cloned().collect();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(all)
        }
    }

    /// Every call fails as if the database were down.
    pub struct UnavailableOfferingRepository;

    fn unavailable<T>() -> Result<T, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    #[async_trait]
    impl OfferingRepository for UnavailableOfferingRepository {
        async fn create(&self, _new: NewOffering) -> Result<Offering, StoreError> {
            unavailable()
        }

        async fn update(&self, _id: &str, _patch: OfferingPatch) -> Result<Option<Offering>, StoreError> {
            unavailable()
        }

        async fn delete(&self, _id: &str) -> Result<bool, StoreError> {
            unavailable()
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<Offering>, StoreError> {
            unavailable()
        }

        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Offering>, StoreError> {
            unavailable()
        }

        async fn list(&self) -> Result<Vec<Offering>, StoreError> {
            unavailable()
        }
    }
}
