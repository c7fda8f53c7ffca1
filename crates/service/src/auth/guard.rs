use std::sync::Arc;

use tracing::{instrument, warn};

use super::domain::{Role, User};
use super::repository::UserRepository;
use crate::errors::{AppError, INSUFFICIENT_PERMISSIONS};
use crate::validation::SchemaRegistry;

/// Admin check run by every mutating resource operation, after input
/// validation and before the write.
#[derive(Clone)]
pub struct AdminGuard {
    users: Arc<dyn UserRepository>,
    schemas: Arc<SchemaRegistry>,
}

impl AdminGuard {
    pub fn new(users: Arc<dyn UserRepository>, schemas: Arc<SchemaRegistry>) -> Self {
        Self { users, schemas }
    }

    /// A missing user and a non-admin user fail identically.
    #[instrument(skip(self))]
    pub async fn ensure_admin(&self, user_id: &str) -> Result<User, AppError> {
        self.schemas.validate_id(user_id)?;
        match self.users.find_by_id(user_id).await {
            Ok(Some(user)) if user.role == Role::Admin => Ok(user),
            Ok(found) => {
                warn!(found = found.is_some(), "admin_check_denied");
                Err(AppError::authorization(INSUFFICIENT_PERMISSIONS))
            }
            Err(e) => Err(AppError::system(format!("admin lookup failed: {e}"))),
        }
    }
}
