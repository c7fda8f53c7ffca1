//! Database-backed entity tests. Skipped unless `DATABASE_URL` is reachable
//! and `SKIP_DB_TESTS` is unset.

use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::{blog, db, ids, offering, slug::slugify, user};

async fn test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

#[tokio::test]
async fn offering_roundtrip_through_postgres() -> anyhow::Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let id = ids::new_object_id();
    let name = format!("Entity Test {}", id);
    let now = Utc::now().into();
    let am = offering::ActiveModel {
        id: Set(id.clone()),
        name: Set(name.clone()),
        slug: Set(slugify(&name)),
        kind: Set("legal".into()),
        category: Set("corporate".into()),
        short_description: Set("short".into()),
        full_description: Set("full".into()),
        details: Set(serde_json::json!(["one", "two"])),
        icon_url: Set("General".into()),
        version: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = am.insert(&db).await?;
    assert_eq!(created.detail_lines(), vec!["one".to_string(), "two".to_string()]);

    let found = offering::Entity::find_by_id(id.clone()).one(&db).await?.expect("row");
    assert_eq!(found.slug, slugify(&name));

    offering::Entity::delete_by_id(id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn duplicate_blog_title_hits_unique_index() -> anyhow::Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let title = format!("Unique title {}", ids::new_object_id());
    let make = |id: String| {
        let now = Utc::now().into();
        blog::ActiveModel {
            id: Set(id.clone()),
            title: Set(title.clone()),
            slug: Set(format!("{}-{}", slugify(&title), id)),
            category: Set("tax".into()),
            description: Set(None),
            content: Set("twenty characters or more".into()),
            author: Set("Someone".into()),
            published_at: Set(now),
            is_published: Set(false),
            views_count: Set(0),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        }
    };
    let first = make(ids::new_object_id()).insert(&db).await?;
    let err = make(ids::new_object_id()).insert(&db).await.expect_err("duplicate title");
    assert!(err.to_string().contains("uniq_blog_title"), "{err}");

    blog::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn users_sort_by_name() -> anyhow::Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let suffix = ids::new_object_id();
    let mut ids_created = Vec::new();
    for name in ["zed", "amy"] {
        let now = Utc::now().into();
        let am = user::ActiveModel {
            id: Set(ids::new_object_id()),
            name: Set(format!("{name}{suffix}")),
            email: Set(format!("{name}{suffix}@example.com")),
            password: Set("$argon2id$placeholder".into()),
            role: Set("admin".into()),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        ids_created.push(am.insert(&db).await?.id);
    }
    let names: Vec<String> = user::Entity::find()
        .order_by_asc(user::Column::Name)
        .all(&db)
        .await?
        .into_iter()
        .map(|u| u.name)
        .filter(|n| n.ends_with(&suffix))
        .collect();
    assert_eq!(names, vec![format!("amy{suffix}"), format!("zed{suffix}")]);
    for id in ids_created {
        user::Entity::delete_by_id(id).exec(&db).await?;
    }
    Ok(())
}
