use async_trait::async_trait;

use super::domain::{NewUser, StoredUser, User, UserChanges};
use crate::errors::StoreError;

/// Repository abstraction for user persistence.
///
/// Ids that are not 24-hex strings yield [`StoreError::Cast`]. Unique
/// `name`/`email` collisions yield [`StoreError::Duplicate`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
    /// Lookup including the password hash.
    async fn find_credentials_by_name(&self, name: &str) -> Result<Option<StoredUser>, StoreError>;
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;
    async fn create(&self, new: NewUser) -> Result<User, StoreError>;
    /// `Ok(None)` when no user has this id.
    async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, StoreError>;
}

/// Simple in-memory mock repository for tests and benches
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;
    use models::ids::{is_object_id, new_object_id};

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<HashMap<String, StoredUser>>, // key: id
    }

    impl MockUserRepository {
        fn users(&self) -> Result<MutexGuard<'_, HashMap<String, StoredUser>>, StoreError> {
            self.users.lock().map_err(|_| StoreError::Backend("user store lock poisoned".into()))
        }
    }

    fn check_unique(
        users: &HashMap<String, StoredUser>,
        skip_id: Option<&str>,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), StoreError> {
        for stored in users.values().filter(|s| Some(s.user.id.as_str()) != skip_id) {
            if name == Some(stored.user.name.as_str()) {
                return Err(StoreError::Duplicate { field: "name".into() });
            }
            if email == Some(stored.user.email.as_str()) {
                return Err(StoreError::Duplicate { field: "email".into() });
            }
        }
        Ok(())
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
            if !is_object_id(id) {
                return Err(StoreError::Cast(id.to_string()));
            }
            Ok(self.users()?.get(&id.to_lowercase()).map(|s| s.user.clone()))
        }

        async fn find_credentials_by_name(&self, name: &str) -> Result<Option<StoredUser>, StoreError> {
            Ok(self.users()?.values().find(|s| s.user.name == name).cloned())
        }

        async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
            Ok(self.users()?.values().any(|s| s.user.email == email))
        }

        async fn create(&self, new: NewUser) -> Result<User, StoreError> {
            let mut users = self.users()?;
            check_unique(&users, None, Some(&new.name), Some(&new.email))?;
            let now = Utc::now();
            let user = User {
                id: new_object_id(),
                name: new.name,
                email: new.email,
                role: new.role,
                created_at: now,
                updated_at: now,
            };
            users.insert(user.id.clone(), StoredUser { user: user.clone(), password_hash: new.password_hash });
            Ok(user)
        }

        async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, StoreError> {
            if !is_object_id(id) {
                return Err(StoreError::Cast(id.to_string()));
            }
            let id = id.to_lowercase();
            let mut users = self.users()?;
            if !users.contains_key(&id) {
                return Ok(None);
            }
            check_unique(&users, Some(&id), changes.name.as_deref(), changes.email.as_deref())?;
            let Some(stored) = users.get_mut(&id) else { return Ok(None) };
            if let Some(name) = changes.name {
                stored.user.name = name;
            }
            if let Some(email) = changes.email {
                stored.user.email = email;
            }
            if let Some(hash) = changes.password_hash {
                stored.password_hash = hash;
            }
            stored.user.updated_at = Utc::now();
            Ok(Some(stored.user.clone()))
        }
    }

    /// Every call fails as if the database were down.
    pub struct UnavailableUserRepository;

    #[async_trait]
    impl UserRepository for UnavailableUserRepository {
        async fn find_by_id(&self, _id: &str) -> Result<Option<User>, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }

        async fn find_credentials_by_name(&self, _name: &str) -> Result<Option<StoredUser>, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }

        async fn email_exists(&self, _email: &str) -> Result<bool, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }

        async fn create(&self, _new: NewUser) -> Result<User, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }

        async fn update(&self, _id: &str, _changes: UserChanges) -> Result<Option<User>, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
    }
}
