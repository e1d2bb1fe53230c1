use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::Value;
use uuid::Uuid;

use super::DocumentEntity;

/// Column assignments for `update_one`/`update_many`.
///
/// Plain values become `SET col = value`; array ops on `uuid[]` columns
/// become `array_append`, `array_cat` and `array_remove`. A column should
/// appear at most once per update.
#[derive(Debug)]
pub struct Changes<E: DocumentEntity> {
    exprs: Vec<(E::Column, SimpleExpr)>,
}

impl<E: DocumentEntity> Default for Changes<E> {
    fn default() -> Self { Self { exprs: Vec::new() } }
}

impl<E: DocumentEntity> Changes<E> {
    pub fn new() -> Self { Self::default() }

    pub fn set<V: Into<Value>>(mut self, col: E::Column, value: V) -> Self {
        self.exprs.push((col, Expr::value(value.into())));
        self
    }

    /// `set` only when there is a value.
    pub fn set_opt<V: Into<Value>>(self, col: E::Column, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(col, v),
            None => self,
        }
    }

    pub fn push(self, col: E::Column, id: Uuid) -> Self {
        self.array_op("array_append", col, Value::from(id))
    }

    pub fn push_all(self, col: E::Column, ids: Vec<Uuid>) -> Self {
        self.array_op("array_cat", col, Value::from(ids))
    }

    pub fn pull(self, col: E::Column, id: Uuid) -> Self {
        self.array_op("array_remove", col, Value::from(id))
    }

    /// `col = func(col, value)`
    fn array_op(mut self, func: &str, col: E::Column, value: Value) -> Self {
        let call = Func::cust(Alias::new(func)).arg(Expr::col(col)).arg(Expr::val(value));
        self.exprs.push((col, SimpleExpr::FunctionCall(call)));
        self
    }

    pub fn is_empty(&self) -> bool { self.exprs.is_empty() }

    pub(crate) fn into_exprs(self) -> Vec<(E::Column, SimpleExpr)> { self.exprs }
}
