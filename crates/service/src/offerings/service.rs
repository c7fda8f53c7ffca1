use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use super::domain::{NewOffering, Offering, OfferingInput, OfferingPatch};
use super::repository::OfferingRepository;
use crate::auth::{AdminGuard, AuthContext};
use crate::errors::AppError;
use crate::resource::{absent_on_cast, derive_slug};
use crate::validation::schemas::SERVICE_SLUG_MAX;
use crate::validation::{filter_update_as, SchemaRegistry};

const ENTITY: &str = "Service";
pub const NOT_FOUND: &str = "Service not found";
pub const NONE_FOUND: &str = "No service found";

pub struct OfferingService<R: ?Sized> {
    repo: Arc<R>,
    guard: AdminGuard,
    schemas: Arc<SchemaRegistry>,
}

impl<R: OfferingRepository + ?Sized> OfferingService<R> {
    pub fn new(repo: Arc<R>, guard: AdminGuard, schemas: Arc<SchemaRegistry>) -> Self {
        Self { repo, guard, schemas }
    }

    /// Create an offering; the slug always follows the name.
    #[instrument(skip(self, ctx, raw), fields(caller = %ctx.user_id))]
    pub async fn create(&self, ctx: &AuthContext, raw: &Value) -> Result<Offering, AppError> {
        let input: OfferingInput = self.schemas.service().parse(raw)?;
        self.guard.ensure_admin(&ctx.user_id).await?;

        let slug = derive_slug("name", &input.name, input.slug, SERVICE_SLUG_MAX)?;
        let new = NewOffering {
            name: input.name,
            slug,
            kind: input.kind,
            category: input.category,
            short_description: input.short_description,
            full_description: input.full_description,
            details: input.details,
            icon_url: input.icon_url,
        };
        let created = self.repo.create(new).await.map_err(|e| e.into_app_error(ENTITY))?;
        info!(service_id = %created.id, slug = %created.slug, "service_created");
        Ok(created)
    }

    #[instrument(skip(self, ctx, raw), fields(caller = %ctx.user_id))]
    pub async fn update(&self, ctx: &AuthContext, id: &str, raw: &Value) -> Result<Offering, AppError> {
        let mut patch: OfferingPatch = filter_update_as(raw, self.schemas.service())?;
        self.guard.ensure_admin(&ctx.user_id).await?;

        if let Some(name) = &patch.name {
            patch.slug = Some(derive_slug("name", name, patch.slug.take(), SERVICE_SLUG_MAX)?);
        }
        let updated = self
            .repo
            .update(id, patch)
            .await
            .map_err(|e| absent_on_cast(e, ENTITY, NOT_FOUND))?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
        info!(service_id = %updated.id, "service_updated");
        Ok(updated)
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.user_id))]
    pub async fn delete(&self, ctx: &AuthContext, id: &str) -> Result<(), AppError> {
        self.guard.ensure_admin(&ctx.user_id).await?;
        let deleted = self.repo.delete(id).await.map_err(|e| absent_on_cast(e, ENTITY, NOT_FOUND))?;
        if !deleted {
            return Err(AppError::not_found(NOT_FOUND));
        }
        info!(service_id = %id, "service_deleted");
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Offering, AppError> {
        self.schemas.validate_id(id)?;
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| e.into_app_error(ENTITY))?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Offering, AppError> {
        self.repo
            .find_by_slug(slug)
            .await
            .map_err(|e| e.into_app_error(ENTITY))?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    /// Every offering by name; an empty catalogue is reported as not found.
    pub async fn list(&self) -> Result<Vec<Offering>, AppError> {
        let all = self.repo.list().await.map_err(|e| e.into_app_error(ENTITY))?;
        if all.is_empty() {
            return Err(AppError::not_found(NONE_FOUND));
        }
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::{NewUser, Role};
    use crate::auth::repository::{mock::MockUserRepository, UserRepository};
    use crate::errors::ErrorKind;
    use crate::offerings::repository::mock::MockOfferingRepository;
    use serde_json::json;

    struct Fixture {
        svc: OfferingService<MockOfferingRepository>,
        admin: AuthContext,
        editor: AuthContext,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(MockUserRepository::default());
        let mut ids = Vec::new();
        for (name, role) in [("admin", Role::Admin), ("editor", Role::Editor)] {
            let u = users
                .create(NewUser {
                    name: name.into(),
                    email: format!("{name}@firm.io"),
                    password_hash: "h".into(),
                    role,
                })
                .await
                .unwrap();
            ids.push(AuthContext { user_id: u.id, user_role: role });
        }
        let schemas = Arc::new(SchemaRegistry::new());
        let guard = AdminGuard::new(users, schemas.clone());
        let editor = ids.pop().unwrap();
        let admin = ids.pop().unwrap();
        Fixture { svc: OfferingService::new(Arc::new(MockOfferingRepository::default()), guard, schemas), admin, editor }
    }

    fn payload(name: &str) -> Value {
        json!({
            "name": name,
            "type": "legal",
            "category": "corporate",
            "shortDescription": "Company formation and governance.",
            "fullDescription": "From incorporation to dissolution.",
            "details": ["Incorporation", "Shareholder agreements"]
        })
    }

    #[tokio::test]
    async fn create_derives_slug_and_defaults_icon() {
        let f = fixture().await;
        let o = f.svc.create(&f.admin, &payload("Corporate & Commercial Law")).await.unwrap();
        assert_eq!(o.slug, "corporate-and-commercial-law");
        assert_eq!(o.icon_url, "General");
        assert_eq!(o.details.len(), 2);
    }

    #[tokio::test]
    async fn second_create_with_same_name_is_duplicate() {
        let f = fixture().await;
        let first = f.svc.create(&f.admin, &payload("Tax Planning")).await.unwrap();
        let err = f.svc.create(&f.admin, &payload("Tax Planning")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(err.details(), Some(json!({"field": "name"})));
        assert_eq!(f.svc.get(&first.id).await.unwrap(), first);
    }

    #[tokio::test]
    async fn validation_is_reported_before_authorization() {
        let f = fixture().await;
        let err = f.svc.create(&f.editor, &json!({"name": "x"})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = f.svc.create(&f.editor, &payload("Audit")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn rename_regenerates_slug() {
        let f = fixture().await;
        let o = f.svc.create(&f.admin, &payload("Payroll")).await.unwrap();
        let renamed = f.svc.update(&f.admin, &o.id, &json!({"name": "Payroll Services", "slug": "ignored"})).await.unwrap();
        assert_eq!(renamed.slug, "payroll-services");
        let reslugged = f.svc.update(&f.admin, &o.id, &json!({"slug": "payroll"})).await.unwrap();
        assert_eq!(reslugged.slug, "payroll");
        assert_eq!(reslugged.name, "Payroll Services");
    }

    #[tokio::test]
    async fn update_and_delete_of_unknown_ids_are_not_found() {
        let f = fixture().await;
        for id in ["507f1f77bcf86cd799439011", "definitely-not-hex"] {
            let err = f.svc.update(&f.admin, id, &json!({"category": "tax"})).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound);
            let err = f.svc.delete(&f.admin, id).await.unwrap_err();
            assert_eq!(err.message(), NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn list_is_sorted_and_empty_is_not_found() {
        let f = fixture().await;
        assert_eq!(f.svc.list().await.unwrap_err().message(), NONE_FOUND);
        for name in ["Litigation", "Bookkeeping", "Immigration"] {
            f.svc.create(&f.admin, &payload(name)).await.unwrap();
        }
        let names: Vec<String> = f.svc.list().await.unwrap().into_iter().map(|o| o.name).collect();
        assert_eq!(names, ["Bookkeeping", "Immigration", "Litigation"]);

        let listed = serde_json::to_value(f.svc.list().await.unwrap()).unwrap();
        assert!(listed[0].get("id").is_some());
        assert!(listed[0].get("version").is_none());
        assert!(listed[0].get("_id").is_none());
    }

    #[tokio::test]
    async fn get_by_slug() {
        let f = fixture().await;
        let o = f.svc.create(&f.admin, &payload("Family Law")).await.unwrap();
        assert_eq!(f.svc.get_by_slug("family-law").await.unwrap().id, o.id);
        assert_eq!(f.svc.get_by_slug("nope").await.unwrap_err().kind(), ErrorKind::NotFound);
    }
}
