use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use super::domain::{AuthContext, AuthSession, LoginInput, NewUser, ProfilePatch, RegisterInput, Role, SessionUser, User, UserChanges};
use super::password::{hash_password, verify_password};
use super::repository::UserRepository;
use super::token::SessionTokens;
use crate::errors::{AppError, StoreError};
use crate::validation::{filter_update_as, SchemaRegistry};

pub const EMAIL_IN_USE: &str = "Email already in use";
pub const USER_NOT_FOUND: &str = "User not found";
pub const BAD_CREDENTIALS: &str = "Invalid email or password";
pub const NOT_YOUR_PROFILE: &str = "You can only update your own profile";

/// Auth business service independent of web framework
pub struct AuthService<R: ?Sized> {
    repo: Arc<R>,
    schemas: Arc<SchemaRegistry>,
    tokens: Arc<SessionTokens>,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, schemas: Arc<SchemaRegistry>, tokens: Arc<SessionTokens>) -> Self {
        Self { repo, schemas, tokens }
    }

    /// Register a new admin with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, SessionTokens, repository::mock::MockUserRepository};
    /// use service::validation::SchemaRegistry;
    /// let svc = AuthService::new(
    ///     Arc::new(MockUserRepository::default()),
    ///     Arc::new(SchemaRegistry::new()),
    ///     Arc::new(SessionTokens::new("secret", 3600)),
    /// );
    /// let body = serde_json::json!({"name": "Jane", "email": "jane@firm.io", "password": "Secret123"});
    /// let user = tokio_test::block_on(svc.register(&body)).unwrap();
    /// assert_eq!(user.name, "jane");
    /// ```
    #[instrument(skip_all)]
    pub async fn register(&self, raw: &Value) -> Result<User, AppError> {
        let input: RegisterInput = self.schemas.user_register().parse(raw)?;
        if self.repo.email_exists(&input.email).await.map_err(|e| e.into_app_error("User"))? {
            debug!(email = %input.email, "email already registered");
            return Err(AppError::duplicate(EMAIL_IN_USE, Some("email")));
        }

        let password_hash = hash_password(input.password).await?;
        let user = self
            .repo
            .create(NewUser { name: input.name, email: input.email, password_hash, role: Role::default() })
            .await
            .map_err(|e| e.into_app_error("User"))?;
        info!(user_id = %user.id, name = %user.name, "user_registered");
        Ok(user)
    }

    /// Authenticate by name and issue a session token.
    #[instrument(skip_all)]
    pub async fn login(&self, raw: &Value) -> Result<AuthSession, AppError> {
        let input: LoginInput = self.schemas.user_login().parse(raw)?;
        let stored = self
            .repo
            .find_credentials_by_name(&input.name)
            .await
            .map_err(|e| e.into_app_error("User"))?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        if !verify_password(input.password, stored.password_hash).await? {
            debug!(user_id = %stored.user.id, "password mismatch");
            return Err(AppError::credentials(BAD_CREDENTIALS));
        }

        let token = self.tokens.issue(&stored.user.id, stored.user.role)?;
        info!(user_id = %stored.user.id, "user_logged_in");
        Ok(AuthSession { user: SessionUser::from(&stored.user), token })
    }

    pub fn verify_session(&self, token: Option<&str>) -> Result<AuthContext, AppError> {
        self.tokens.verify(token)
    }

    /// Partial update of the caller's own profile.
    #[instrument(skip(self, ctx, raw), fields(caller = %ctx.user_id))]
    pub async fn update_profile(&self, ctx: &AuthContext, id: &str, raw: &Value) -> Result<User, AppError> {
        self.schemas.validate_id(id)?;
        let patch: ProfilePatch = filter_update_as(raw, self.schemas.user_update())?;
        if !ctx.user_id.eq_ignore_ascii_case(id) {
            return Err(AppError::ownership(NOT_YOUR_PROFILE));
        }

        let password_hash = match patch.password {
            Some(plain) => Some(hash_password(plain).await?),
            None => None,
        };
        let changes = UserChanges { name: patch.name, email: patch.email, password_hash };
        let user = match self.repo.update(id, changes).await {
            Ok(Some(user)) => user,
            Ok(None) | Err(StoreError::Cast(_)) => return Err(AppError::not_found(USER_NOT_FOUND)),
            Err(e) => return Err(e.into_app_error("User")),
        };
        info!(user_id = %user.id, "user_updated");
        Ok(user)
    }
}
