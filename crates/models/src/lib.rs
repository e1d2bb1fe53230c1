pub mod errors;
pub mod db;
pub mod validation;
pub mod colorist;
pub mod client;
pub mod sheet;
pub mod hair_service;

pub use errors::ModelError;

#[cfg(test)]
mod tests;
