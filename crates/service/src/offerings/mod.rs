//! Practice-area offerings, exposed as "services" over HTTP.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{NewOffering, Offering, OfferingPatch};
pub use service::OfferingService;
