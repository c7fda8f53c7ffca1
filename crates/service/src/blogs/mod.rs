pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{Blog, BlogPatch, NewBlog};
pub use service::BlogService;
