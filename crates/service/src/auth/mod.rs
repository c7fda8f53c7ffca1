//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and profile updates live in [`AuthService`]; session
//! tokens in [`token`]; the admin check shared by every mutating resource
//! operation in [`guard`].

pub mod domain;
pub mod guard;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use domain::{AuthContext, Role, User};
pub use guard::AdminGuard;
pub use service::AuthService;
pub use token::SessionTokens;
