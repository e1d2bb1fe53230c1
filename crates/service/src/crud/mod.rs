//! Generic document service shared by every collection.
//!
//! `CrudService<E>` layers create/read/update/delete, parent-child linking
//! and transaction handling on top of a single `sea-orm` entity. Every
//! mutating operation takes an optional transaction (the session). With
//! `None` it runs directly on the pool.
//!
//! ```ignore
//! let docs = Collections::new(db);
//! let client = docs.clients
//!     .create_and_link_parent(data, ParentLink::new(&docs.colorists, colorist_id, colorist::Column::Clients), None)
//!     .await?;
//! ```

mod changes;
mod documents;

pub use changes::Changes;
pub use documents::{Collections, DocumentEntity, DocumentModel};

use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, QueryTrait, SqlErr, TransactionTrait,
};
use tracing::error;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::FindOptions;

/// Run `$body` with `$c` bound to the transaction when there is one, the pool otherwise.
macro_rules! on_conn {
    ($self:ident, $txn:expr, |$c:ident| $body:expr) => {
        match $txn {
            Some($c) => $body,
            None => {
                let $c = &*$self.db;
                $body
            }
        }
    };
}

pub struct CrudService<E> {
    db: Arc<DatabaseConnection>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for CrudService<E> {
    fn clone(&self) -> Self { Self { db: self.db.clone(), _entity: PhantomData } }
}

/// Parent document that receives the id of a newly created child.
pub struct ParentLink<'a, P: DocumentEntity> {
    pub service: &'a CrudService<P>,
    pub id: Uuid,
    /// `uuid[]` column holding the children ids.
    pub column: P::Column,
    /// Extra filter the parent must match, e.g. its owner.
    pub scope: Option<Condition>,
}

impl<'a, P: DocumentEntity> ParentLink<'a, P> {
    pub fn new(service: &'a CrudService<P>, id: Uuid, column: P::Column) -> Self {
        Self { service, id, column, scope: None }
    }

    pub fn scoped(mut self, scope: Condition) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn filter(&self) -> Condition {
        Condition::all().add(P::id_column().eq(self.id)).add_option(self.scope.clone())
    }
}

/// Filter on the document id.
pub fn by_id<E: DocumentEntity>(id: Uuid) -> Condition {
    Condition::all().add(E::id_column().eq(id))
}

/// Commit on success, roll back on failure.
pub async fn finish<T>(txn: DatabaseTransaction, result: Result<T, ServiceError>) -> Result<T, ServiceError> {
    match result {
        Ok(value) => {
            txn.commit().await.map_err(|e| {
                error!(error = %e, "transaction commit failed");
                ServiceError::internal("Could not commit the transaction")
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(e) = txn.rollback().await {
                error!(error = %e, "transaction rollback failed");
            }
            Err(err)
        }
    }
}

impl<E> CrudService<E>
where
    E: DocumentEntity,
    E::Model: DocumentModel + IntoActiveModel<<E as DocumentEntity>::ActiveModel>,
{
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self { Self { db: db.into(), _entity: PhantomData } }

    pub fn connection(&self) -> &DatabaseConnection { &self.db }

    pub async fn begin(&self) -> Result<DatabaseTransaction, ServiceError> {
        self.db.begin().await.map_err(|e| {
            error!(entity = E::NAME, error = %e, "could not start a transaction");
            ServiceError::internal("Could not start a transaction")
        })
    }

    /// Insert a prepared document and return the stored row.
    pub async fn create(
        &self,
        data: <E as DocumentEntity>::ActiveModel,
        txn: Option<&DatabaseTransaction>,
    ) -> Result<E::Model, ServiceError> {
        let logged = format!("{:?}", data);
        on_conn!(self, txn, |c| data.insert(c).await).map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return ServiceError::Duplicate(E::NAME);
            }
            error!(entity = E::NAME, data = %logged, error = %e, "create failed");
            ServiceError::internal(format!("Could not create a {}", E::NAME))
        })
    }

    /// Create a child and push its id onto the parent, atomically.
    ///
    /// Starts (and commits) its own transaction when `txn` is `None`; an
    /// outer transaction is left to its owner to commit or roll back. The
    /// parent check runs on `txn` when given, so a parent created earlier in
    /// the same transaction is visible.
    pub async fn create_and_link_parent<P>(
        &self,
        data: <E as DocumentEntity>::ActiveModel,
        parent: ParentLink<'_, P>,
        txn: Option<&DatabaseTransaction>,
    ) -> Result<E::Model, ServiceError>
    where
        P: DocumentEntity,
        P::Model: DocumentModel + IntoActiveModel<<P as DocumentEntity>::ActiveModel>,
    {
        self.check_parent(parent.filter(), parent.service, txn).await?;

        let local = match txn {
            Some(_) => None,
            None => Some(self.begin().await?),
        };
        let session = txn.or(local.as_ref());

        let linked = async {
            let created = self.create(data, session).await?;
            parent
                .service
                .update_one(parent.filter(), Changes::new().push(parent.column, created.id()), session)
                .await?;
            Ok::<_, ServiceError>(created)
        }
        .await;

        let result = match local {
            Some(local) => finish(local, linked).await,
            None => linked,
        };
        result.map_err(|e| {
            error!(entity = E::NAME, parent = P::NAME, parent_id = %parent.id, error = %e, "create and link parent failed");
            ServiceError::internal(format!("Something went wrong when creating the {} document", E::NAME))
        })
    }

    /// Delete at most one matching document.
    pub async fn delete_one(&self, filter: Condition, txn: Option<&DatabaseTransaction>) -> Result<(), ServiceError> {
        let query = E::delete_many().filter(Self::first_match(filter.clone()));
        let res = on_conn!(self, txn, |c| query.exec(c).await).map_err(|e| {
            error!(entity = E::NAME, filter = ?filter, error = %e, "delete one failed");
            ServiceError::internal(format!("Could not delete the {} document", E::NAME))
        })?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found(E::NAME));
        }
        Ok(())
    }

    /// Delete every match; returns how many went away.
    pub async fn delete_many(&self, filter: Condition, txn: Option<&DatabaseTransaction>) -> Result<u64, ServiceError> {
        let query = E::delete_many().filter(filter.clone());
        let res = on_conn!(self, txn, |c| query.exec(c).await).map_err(|e| {
            error!(entity = E::NAME, filter = ?filter, error = %e, "delete many failed");
            ServiceError::internal(format!("Could not delete many {} documents", E::NAME))
        })?;
        Ok(res.rows_affected)
    }

    pub async fn exists(&self, filter: Condition) -> Result<bool, ServiceError> {
        self.probe(filter.clone(), None).await.map_err(|e| {
            error!(entity = E::NAME, filter = ?filter, error = %e, "exists failed");
            ServiceError::internal(format!("Could not check if {} exists", E::NAME))
        })
    }

    /// Matches ordered by creation time, windowed by `options`.
    pub async fn find(&self, filter: Condition, options: FindOptions) -> Result<Vec<E::Model>, ServiceError> {
        let options = options.normalize();
        E::find()
            .filter(filter.clone())
            .order_by_asc(E::created_at_column())
            .limit(options.limit)
            .offset(options.skip)
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!(entity = E::NAME, filter = ?filter, error = %e, "find failed");
                ServiceError::internal(format!("Could not find the {} documents", E::NAME))
            })
    }

    pub async fn find_one(&self, filter: Condition) -> Result<E::Model, ServiceError> {
        E::find()
            .filter(filter.clone())
            .one(&*self.db)
            .await
            .map_err(|e| {
                error!(entity = E::NAME, filter = ?filter, error = %e, "find one failed");
                ServiceError::internal(format!("Could not find {} document", E::NAME))
            })?
            .ok_or_else(|| ServiceError::not_found(E::NAME))
    }

    /// Documents whose id is in `ids`, in the order of `ids`. Unknown ids are skipped.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<E::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = self
            .find(Condition::all().add(E::id_column().is_in(ids.iter().copied())), FindOptions::default())
            .await?;
        Ok(order_by_ids(ids, found))
    }

    /// Apply `changes` to at most one match, bumping `version`.
    pub async fn update_one(
        &self,
        filter: Condition,
        changes: Changes<E>,
        txn: Option<&DatabaseTransaction>,
    ) -> Result<(), ServiceError> {
        let query = Self::apply(E::update_many(), changes).filter(Self::first_match(filter.clone()));
        let res = on_conn!(self, txn, |c| query.exec(c).await).map_err(|e| {
            error!(entity = E::NAME, filter = ?filter, error = %e, "update one failed");
            ServiceError::internal(format!("Could not update {} document", E::NAME))
        })?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found(E::NAME));
        }
        Ok(())
    }

    pub async fn update_many(
        &self,
        filter: Condition,
        changes: Changes<E>,
        txn: Option<&DatabaseTransaction>,
    ) -> Result<u64, ServiceError> {
        let query = Self::apply(E::update_many(), changes).filter(filter.clone());
        let res = on_conn!(self, txn, |c| query.exec(c).await).map_err(|e| {
            error!(entity = E::NAME, filter = ?filter, error = %e, "update many failed");
            ServiceError::internal(format!("Could not update many {} documents", E::NAME))
        })?;
        Ok(res.rows_affected)
    }

    /// BadRequest unless a `parent` document matches `filter`.
    pub async fn assert_parent_exists<P>(&self, filter: Condition, parent: &CrudService<P>) -> Result<(), ServiceError>
    where
        P: DocumentEntity,
        P::Model: DocumentModel + IntoActiveModel<<P as DocumentEntity>::ActiveModel>,
    {
        self.check_parent(filter, parent, None).await
    }

    async fn check_parent<P>(
        &self,
        filter: Condition,
        parent: &CrudService<P>,
        txn: Option<&DatabaseTransaction>,
    ) -> Result<(), ServiceError>
    where
        P: DocumentEntity,
        P::Model: DocumentModel + IntoActiveModel<<P as DocumentEntity>::ActiveModel>,
    {
        let found = parent.probe(filter.clone(), txn).await.map_err(|e| {
            error!(entity = E::NAME, parent = P::NAME, filter = ?filter, error = %e, "assert parent exists failed");
            ServiceError::internal("Could not assert parent exists.")
        })?;
        if !found {
            return Err(ServiceError::bad_request("Parent does not exists."));
        }
        Ok(())
    }

    async fn probe(&self, filter: Condition, txn: Option<&DatabaseTransaction>) -> Result<bool, DbErr> {
        let query = E::find().filter(filter);
        Ok(on_conn!(self, txn, |c| query.one(c).await)?.is_some())
    }

    /// `id IN (SELECT id ... LIMIT 1)`: single-row semantics for update/delete.
    fn first_match(filter: Condition) -> SimpleExpr {
        E::id_column().in_subquery(
            E::find()
                .select_only()
                .column(E::id_column())
                .filter(filter)
                .limit(1)
                .into_query(),
        )
    }

    fn apply(mut query: sea_orm::UpdateMany<E>, changes: Changes<E>) -> sea_orm::UpdateMany<E> {
        for (col, expr) in changes.into_exprs() {
            query = query.col_expr(col, expr);
        }
        query
            .col_expr(E::version_column(), Expr::col(E::version_column()).add(1))
            .col_expr(E::updated_at_column(), Expr::current_timestamp().into())
    }
}

/// Reorder `docs` to follow `ids`.
pub fn order_by_ids<M: DocumentModel>(ids: &[Uuid], docs: Vec<M>) -> Vec<M> {
    let mut slots: Vec<Option<M>> = docs.into_iter().map(Some).collect();
    ids.iter()
        .filter_map(|id| {
            slots
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|d| d.id() == *id))
                .and_then(Option::take)
        })
        .collect()
}

#[cfg(test)]
mod tests;
