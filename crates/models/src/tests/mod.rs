
/// Connection and schema tests against a live Postgres
pub mod db_tests;
