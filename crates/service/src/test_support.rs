#![cfg(test)]
//! Database fixtures for the sea-orm repository tests.

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Migrations run at most once per test process.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// `None` when `SKIP_DB_TESTS` is set or no database is reachable.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let migrated = MIGRATED
        .get_or_init(|| async {
            let db = match models::db::connect().await {
                Ok(db) => db,
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {e}");
                    return false;
                }
            };
            match migration::Migrator::up(&db, None).await {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("skip: migrate up failed: {e}");
                    false
                }
            }
        })
        .await;
    if !*migrated {
        return None;
    }
    // fresh connection for the current test's runtime
    models::db::connect().await.ok()
}
