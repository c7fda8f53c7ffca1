//! Persistence entities and helpers shared by the repositories.

pub mod db;
pub mod ids;
pub mod slug;
pub mod user;
pub mod offering;
pub mod blog;

#[cfg(test)]
mod tests;
