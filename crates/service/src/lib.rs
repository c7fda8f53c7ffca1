//! Service layer for the firm website: validation, authentication and the
//! admin-only content operations on services and blog posts.
//! - Business operations take untyped JSON and an explicit [`auth::AuthContext`].
//! - Every failure leaving this crate is an [`errors::AppError`].
//! - Each resource has a repository trait with an in-memory mock and a sea-orm
//!   implementation.

pub mod auth;
pub mod blogs;
pub mod contact;
pub mod errors;
pub mod offerings;
mod resource;
pub mod validation;

pub use errors::{AppError, ErrorKind, FieldIssue, StoreError};

#[cfg(test)]
mod test_support;
