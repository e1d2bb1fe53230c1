//! `CrudService` against sea-orm's mock connection.
//!
//! Query results feed SELECTs and INSERT .. RETURNING in order; exec results
//! feed UPDATE/DELETE row counts.

use std::sync::Arc;

use sea_orm::{DatabaseBackend, DatabaseConnection, DbBackend, DbErr, MockDatabase, MockExecResult, QueryTrait, Transaction};

use super::*;
use crate::test_support::{client_row, colorist_row};
use models::{client, colorist};

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult { last_insert_id: 0, rows_affected }
}

/// Statements the mock saw, grouped by transaction. Every service handle
/// sharing `db` must be dropped first.
fn transaction_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
    Arc::try_unwrap(db).ok().expect("connection still shared").into_transaction_log()
}

fn new_client(colorist_id: Uuid) -> client::ActiveModel {
    client::NewClient { name: "Lu".into(), last_name: "Paz".into(), email: None, phone_number: None }
        .into_active_model(colorist_id)
}

#[tokio::test]
async fn create_returns_stored_document() {
    let colorist_id = Uuid::new_v4();
    let row = client_row(Uuid::new_v4(), colorist_id);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .into_connection();
    let svc = CrudService::<client::Entity>::new(db);

    let created = svc.create(new_client(colorist_id), None).await.unwrap();
    assert_eq!(created, row);
}

#[tokio::test]
async fn create_failure_is_internal() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("boom".into())])
        .into_connection();
    let svc = CrudService::<client::Entity>::new(db);

    let err = svc.create(new_client(Uuid::new_v4()), None).await.unwrap_err();
    assert!(matches!(&err, ServiceError::Internal(m) if m == "Could not create a Client"), "{err:?}");
}

#[tokio::test]
async fn delete_one_of_missing_document_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([exec(0)]).into_connection();
    let svc = CrudService::<client::Entity>::new(db);

    let err = svc.delete_one(by_id::<client::Entity>(Uuid::new_v4()), None).await.unwrap_err();
    assert!(matches!(&err, ServiceError::NotFound(m) if m == "Client was not found."), "{err:?}");
}

#[tokio::test]
async fn delete_one_failure_is_internal() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors([DbErr::Custom("boom".into())])
        .into_connection();
    let svc = CrudService::<client::Entity>::new(db);

    let err = svc.delete_one(by_id::<client::Entity>(Uuid::new_v4()), None).await.unwrap_err();
    assert!(matches!(&err, ServiceError::Internal(m) if m == "Could not delete the Client document"), "{err:?}");
}

#[tokio::test]
async fn delete_many_reports_count() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([exec(3)]).into_connection();
    let svc = CrudService::<client::Entity>::new(db);

    let n = svc.delete_many(Condition::all().add(client::Column::ColoristId.eq(Uuid::nil())), None).await.unwrap();
    assert_eq!(n, 3);
}

#[tokio::test]
async fn update_one_of_missing_document_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([exec(0)]).into_connection();
    let svc = CrudService::<client::Entity>::new(db);

    let changes = Changes::new().set(client::Column::Name, "Lucia");
    let err = svc.update_one(by_id::<client::Entity>(Uuid::new_v4()), changes, None).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn update_many_reports_count() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([exec(2)]).into_connection();
    let svc = CrudService::<client::Entity>::new(db);

    let changes = Changes::new().set(client::Column::LastName, "Paz");
    let n = svc.update_many(Condition::all(), changes, None).await.unwrap();
    assert_eq!(n, 2);
}

#[test]
fn updates_bump_version_and_touch_updated_at() {
    let query = CrudService::<client::Entity>::apply(
        client::Entity::update_many(),
        Changes::new().set(client::Column::Name, "Lucia"),
    );
    let sql = query.build(DbBackend::Postgres).to_string();
    assert!(sql.contains(r#""version" = "version" + 1"#), "{sql}");
    assert!(sql.contains(r#""updated_at" = CURRENT_TIMESTAMP"#), "{sql}");
    assert!(sql.contains(r#""name" = 'Lucia'"#), "{sql}");
}

#[test]
fn single_document_ops_limit_the_subquery() {
    let expr = CrudService::<client::Entity>::first_match(by_id::<client::Entity>(Uuid::nil()));
    let sql = client::Entity::delete_many().filter(expr).build(DbBackend::Postgres).to_string();
    assert!(sql.contains(r#""id" IN (SELECT "client"."id" FROM "client""#), "{sql}");
    assert!(sql.contains("LIMIT 1"), "{sql}");
}

#[tokio::test]
async fn find_one_none_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<client::Model>::new()])
        .into_connection();
    let svc = CrudService::<client::Entity>::new(db);

    let err = svc.find_one(by_id::<client::Entity>(Uuid::new_v4())).await.unwrap_err();
    assert!(matches!(&err, ServiceError::NotFound(m) if m == "Client was not found."));
}

#[tokio::test]
async fn exists_reflects_a_match() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![colorist_row(id)], vec![]])
        .into_connection();
    let svc = CrudService::<colorist::Entity>::new(db);

    assert!(svc.exists(by_id::<colorist::Entity>(id)).await.unwrap());
    assert!(!svc.exists(by_id::<colorist::Entity>(id)).await.unwrap());
}

#[tokio::test]
async fn find_by_ids_follows_requested_order() {
    let colorist_id = Uuid::new_v4();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![client_row(a, colorist_id), client_row(b, colorist_id)]])
        .into_connection();
    let svc = CrudService::<client::Entity>::new(db);

    let found = svc.find_by_ids(&[b, a]).await.unwrap();
    assert_eq!(found.iter().map(|c| c.id).collect::<Vec<_>>(), vec![b, a]);
    // no ids, no query
    assert!(svc.find_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_and_link_parent_requires_parent() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<colorist::Model>::new()])
        .into_connection();
    let docs = Collections::new(db);
    let colorist_id = Uuid::new_v4();

    let parent = ParentLink::new(&docs.colorists, colorist_id, colorist::Column::Clients);
    let err = docs.clients.create_and_link_parent(new_client(colorist_id), parent, None).await.unwrap_err();
    assert!(matches!(&err, ServiceError::BadRequest(m) if m == "Parent does not exists."), "{err:?}");
}

#[tokio::test]
async fn create_and_link_parent_links_child() {
    let colorist_id = Uuid::new_v4();
    let row = client_row(Uuid::new_v4(), colorist_id);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![colorist_row(colorist_id)]])
        .append_query_results([vec![row.clone()]])
        .append_exec_results([exec(1)])
        .into_connection();
    let docs = Collections::new(db);

    let parent = ParentLink::new(&docs.colorists, colorist_id, colorist::Column::Clients);
    let created = docs.clients.create_and_link_parent(new_client(colorist_id), parent, None).await.unwrap();
    assert_eq!(created.id, row.id);
}

#[tokio::test]
async fn create_and_link_parent_fails_when_link_fails() {
    let colorist_id = Uuid::new_v4();
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![colorist_row(colorist_id)]])
            .append_query_results([vec![client_row(Uuid::new_v4(), colorist_id)]])
            // parent vanished between the check and the push
            .append_exec_results([exec(0)])
            .into_connection(),
    );
    let docs = Collections::new(db.clone());

    let parent = ParentLink::new(&docs.colorists, colorist_id, colorist::Column::Clients);
    let err = docs.clients.create_and_link_parent(new_client(colorist_id), parent, None).await.unwrap_err();
    assert!(
        matches!(&err, ServiceError::Internal(m) if m == "Something went wrong when creating the Client document"),
        "{err:?}"
    );

    drop(docs);
    let log = format!("{:?}", transaction_log(db));
    assert!(log.contains("ROLLBACK"), "{log}");
    assert!(!log.contains("COMMIT"), "{log}");
}

#[tokio::test]
async fn create_and_link_parent_commits_its_own_transaction() {
    let colorist_id = Uuid::new_v4();
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![colorist_row(colorist_id)]])
            .append_query_results([vec![client_row(Uuid::new_v4(), colorist_id)]])
            .append_exec_results([exec(1)])
            .into_connection(),
    );
    let docs = Collections::new(db.clone());

    let parent = ParentLink::new(&docs.colorists, colorist_id, colorist::Column::Clients);
    docs.clients.create_and_link_parent(new_client(colorist_id), parent, None).await.unwrap();

    drop(docs);
    let log = format!("{:?}", transaction_log(db));
    assert!(log.contains("COMMIT"), "{log}");
    assert!(!log.contains("ROLLBACK"), "{log}");
}

#[tokio::test]
async fn parent_check_runs_inside_the_callers_transaction() {
    let colorist_id = Uuid::new_v4();
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![colorist_row(colorist_id)]])
            .append_query_results([vec![client_row(Uuid::new_v4(), colorist_id)]])
            .append_exec_results([exec(1)])
            .into_connection(),
    );
    let docs = Collections::new(db.clone());

    let txn = docs.clients.begin().await.unwrap();
    let parent = ParentLink::new(&docs.colorists, colorist_id, colorist::Column::Clients);
    docs.clients.create_and_link_parent(new_client(colorist_id), parent, Some(&txn)).await.unwrap();
    txn.commit().await.unwrap();

    drop(docs);
    let log = transaction_log(db);
    // parent SELECT, INSERT and UPDATE all in the one transaction
    assert_eq!(log.len(), 1, "{log:?}");
    let stmts = format!("{:?}", log[0]);
    assert!(stmts.contains("SELECT"), "{stmts}");
    assert!(stmts.contains("COMMIT"), "{stmts}");
}

#[tokio::test]
async fn assert_parent_exists_maps_db_errors() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("down".into())])
        .into_connection();
    let docs = Collections::new(db);

    let err = docs
        .clients
        .assert_parent_exists(by_id::<colorist::Entity>(Uuid::new_v4()), &docs.colorists)
        .await
        .unwrap_err();
    assert!(matches!(&err, ServiceError::Internal(m) if m == "Could not assert parent exists."));
}

#[test]
fn parent_link_scope_is_and_ed_with_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let docs = Collections::new(db);
    let owner = Uuid::nil();
    let link = ParentLink::new(&docs.clients, Uuid::nil(), client::Column::Sheets)
        .scoped(Condition::all().add(client::Column::ColoristId.eq(owner)));
    let sql = client::Entity::find().filter(link.filter()).build(DbBackend::Postgres).to_string();
    assert!(sql.contains(r#""client"."id" = '00000000-0000-0000-0000-000000000000'"#), "{sql}");
    assert!(sql.contains(r#""client"."colorist_id" = '00000000-0000-0000-0000-000000000000'"#), "{sql}");
}

#[test]
fn order_by_ids_drops_unknown_and_duplicates() {
    let colorist_id = Uuid::new_v4();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let docs = vec![client_row(a, colorist_id), client_row(b, colorist_id)];
    let ordered = order_by_ids(&[b, Uuid::new_v4(), a, b], docs);
    assert_eq!(ordered.iter().map(|c| c.id).collect::<Vec<_>>(), vec![b, a]);
}
