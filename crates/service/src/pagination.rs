//! Limit/skip window for list queries.

use serde::Deserialize;

pub const MAX_LIMIT: u64 = 100;

/// `limit`/`skip` as they arrive from a query string. Both optional.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct FindOptions {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

impl FindOptions {
    pub fn new(limit: u64, skip: u64) -> Self { Self { limit: Some(limit), skip: Some(skip) } }

    /// Clamp `limit` into `1..=MAX_LIMIT`; no limit stays unbounded.
    pub fn normalize(self) -> Self {
        Self {
            limit: self.limit.map(|l| l.clamp(1, MAX_LIMIT)),
            skip: self.skip.filter(|s| *s > 0),
        }
    }
}
