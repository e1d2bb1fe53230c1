use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned by mutations that have nothing else to report.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiResult {
    pub result: bool,
}

impl ApiResult {
    pub fn ok() -> Self { Self { result: true } }
}
