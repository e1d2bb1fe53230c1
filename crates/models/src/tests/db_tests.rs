use crate::db::connect;
use crate::{client, colorist};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, EntityTrait};
use uuid::Uuid;

/// Connect and migrate; `None` when no database is reachable.
async fn setup_test_db() -> Option<sea_orm::DatabaseConnection> {
    let db = match connect().await {
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
async fn test_colorist_roundtrip_and_login_lookup() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let tag = Uuid::new_v4().simple().to_string();
    let new = colorist::NewColorist {
        email: format!("Ana{}@salon.com", &tag[..8]),
        username: format!("ana{}", &tag[..8]),
        name: "Ana".into(),
        last_name: "Diaz".into(),
        hair_salon_name: None,
        password: "secret".into(),
    };
    let created = new.clone().into_active_model("hash".into()).insert(&db).await?;
    assert!(created.clients.is_empty());
    assert_eq!(created.version, 0);

    // case-insensitive on both fields
    let by_email = colorist::find_by_login(&db, &new.email.to_uppercase()).await?;
    assert_eq!(by_email.map(|c| c.id), Some(created.id));
    let by_username = colorist::find_by_login(&db, &new.username.to_uppercase()).await?;
    assert_eq!(by_username.map(|c| c.id), Some(created.id));

    let taken = colorist::taken_fields(&db, &new.username, "other@salon.com").await?;
    assert_eq!(taken, vec!["username"]);

    colorist::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_client_uuid_array_column() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let new = client::NewClient { name: "Lu".into(), last_name: "Paz".into(), email: None, phone_number: None };
    let mut am = new.into_active_model(Uuid::new_v4());
    let sheets = vec![Uuid::new_v4(), Uuid::new_v4()];
    am.sheets = sea_orm::Set(sheets.clone());
    let created = am.insert(&db).await?;

    let found = client::Entity::find_by_id(created.id).one(&db).await?.expect("client");
    assert_eq!(found.sheets, sheets);

    client::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}
