//! Shared building blocks for the firm site: logging setup and small wire types.

pub mod types;
pub mod utils;
