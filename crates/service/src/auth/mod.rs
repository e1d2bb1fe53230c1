//! Auth module: domain, repository and service layers.
//!
//! Signs colorists in with username or email and issues the bearer token the
//! HTTP layer verifies on every private route.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AuthConfig, AuthService};
