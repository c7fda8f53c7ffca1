use std::sync::Arc;

use configs::AuthConfig;
use service::auth::repository::UserRepository;
use service::auth::{AdminGuard, AuthService, SessionTokens};
use service::blogs::repository::BlogRepository;
use service::blogs::BlogService;
use service::contact::ContactService;
use service::offerings::repository::OfferingRepository;
use service::offerings::OfferingService;
use service::validation::SchemaRegistry;

/// Session cookie attributes.
#[derive(Clone, Debug)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
    pub max_age_secs: i64,
}

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<dyn UserRepository>>,
    pub services: Arc<OfferingService<dyn OfferingRepository>>,
    pub blogs: Arc<BlogService<dyn BlogRepository>>,
    pub contact: Arc<ContactService>,
    pub cookie: CookieSettings,
}

impl ServerState {
    /// Wire every business service over the given repositories. The schema
    /// registry is built here, once.
    pub fn new(
        users: Arc<dyn UserRepository>,
        offerings: Arc<dyn OfferingRepository>,
        blogs: Arc<dyn BlogRepository>,
        auth_cfg: &AuthConfig,
    ) -> Self {
        let schemas = Arc::new(SchemaRegistry::new());
        let tokens = Arc::new(SessionTokens::new(&auth_cfg.jwt_secret, auth_cfg.token_ttl_secs));
        let guard = AdminGuard::new(users.clone(), schemas.clone());
        let cookie = CookieSettings {
            name: auth_cfg.cookie_name.clone(),
            secure: auth_cfg.production,
            max_age_secs: tokens.ttl_secs(),
        };
        Self {
            auth: Arc::new(AuthService::new(users, schemas.clone(), tokens)),
            services: Arc::new(OfferingService::new(offerings, guard.clone(), schemas.clone())),
            blogs: Arc::new(BlogService::new(blogs, guard, schemas.clone())),
            contact: Arc::new(ContactService::new(schemas)),
            cookie,
        }
    }
}
