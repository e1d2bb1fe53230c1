pub mod errors;
pub mod state;
pub mod auth;
pub mod routes;
pub mod startup;

pub use startup::run;
