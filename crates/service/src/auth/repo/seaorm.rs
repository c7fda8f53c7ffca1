use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::auth::domain::{NewUser, Role, StoredUser, User, UserChanges};
use crate::auth::repository::UserRepository;
use crate::errors::{absent_if_not_updated, StoreError};
use models::ids::{is_object_id, new_object_id};
use models::user;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(m: user::Model) -> Result<StoredUser, StoreError> {
    let role = m.role.parse::<Role>().map_err(StoreError::Backend)?;
    Ok(StoredUser {
        user: User {
            id: m.id,
            name: m.name,
            email: m.email,
            role,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        },
        password_hash: m.password,
    })
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        if !is_object_id(id) {
            return Err(StoreError::Cast(id.to_string()));
        }
        let res = user::Entity::find_by_id(id.to_lowercase()).one(&self.db).await?;
        res.map(|m| to_domain(m).map(|s| s.user)).transpose()
    }

    async fn find_credentials_by_name(&self, name: &str) -> Result<Option<StoredUser>, StoreError> {
        let res = user::Entity::find()
            .filter(user::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        res.map(to_domain).transpose()
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let res = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(res.is_some())
    }

    async fn create(&self, new: NewUser) -> Result<User, StoreError> {
        let now = Utc::now().into();
        let am = user::ActiveModel {
            id: Set(new_object_id()),
            name: Set(new.name),
            email: Set(new.email),
            password: Set(new.password_hash),
            role: Set(new.role.as_str().to_string()),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = am.insert(&self.db).await?;
        Ok(to_domain(created)?.user)
    }

    async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, StoreError> {
        if !is_object_id(id) {
            return Err(StoreError::Cast(id.to_string()));
        }
        let Some(existing) = user::Entity::find_by_id(id.to_lowercase()).one(&self.db).await? else {
            return Ok(None);
        };
        let version = existing.version;
        let mut am: user::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            am.name = Set(name);
        }
        if let Some(email) = changes.email {
            am.email = Set(email);
        }
        if let Some(hash) = changes.password_hash {
            am.password = Set(hash);
        }
        am.version = Set(version + 1);
        am.updated_at = Set(Utc::now().into());
        match absent_if_not_updated(am.update(&self.db).await)? {
            Some(updated) => Ok(Some(to_domain(updated)?.user)),
            None => Ok(None),
        }
    }
}
