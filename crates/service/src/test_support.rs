#![cfg(test)]
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use uuid::Uuid;

use models::db::connect;
use models::{client, colorist, hair_service, sheet};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Live database for integration tests; `None` when skipped or unreachable.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let migrated = *MIGRATED
        .get_or_init(|| async {
            match connect().await {
                Ok(db) => match migration::Migrator::up(&db, None).await {
                    Ok(()) => true,
                    Err(e) => {
                        eprintln!("skip: migrate up failed: {}", e);
                        false
                    }
                },
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    false
                }
            }
        })
        .await;
    if !migrated {
        return None;
    }
    // Fresh connection for the current test's runtime
    connect().await.ok()
}

/// Fixture rows for the mock database.
pub fn colorist_row(id: Uuid) -> colorist::Model {
    let now = Utc::now().into();
    colorist::Model {
        id,
        email: "ana@salon.com".into(),
        username: "ana90".into(),
        name: "Ana".into(),
        last_name: "Diaz".into(),
        hair_salon_name: None,
        password_hash: String::new(),
        clients: vec![],
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn client_row(id: Uuid, colorist_id: Uuid) -> client::Model {
    let now = Utc::now().into();
    client::Model {
        id,
        colorist_id,
        name: "Lu".into(),
        last_name: "Paz".into(),
        email: None,
        phone_number: None,
        sheets: vec![],
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn sheet_row(id: Uuid, colorist_id: Uuid, client_id: Uuid) -> sheet::Model {
    let now = Utc::now().into();
    sheet::Model {
        id,
        colorist_id,
        client_id,
        date: "01/02/2024".into(),
        hair_services: vec![],
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn hair_service_row(id: Uuid, colorist_id: Uuid, client_id: Uuid, sheet_id: Uuid) -> hair_service::Model {
    let now = Utc::now().into();
    hair_service::Model {
        id,
        colorist_id,
        client_id,
        sheet_id,
        name: "Balayage".into(),
        observations: None,
        ingredients: hair_service::Ingredients::default(),
        version: 0,
        created_at: now,
        updated_at: now,
    }
}
