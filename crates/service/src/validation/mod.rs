pub mod schema;
pub mod schemas;
pub mod update_filter;

pub use schema::{Field, Schema};
pub use schemas::SchemaRegistry;
pub use update_filter::{filter_update, filter_update_as};
