//! Environment helpers run once at startup.

/// Load `.env` into the process environment; false when there is none.
///
/// Runs before logging is up, so the caller reports the outcome.
pub fn load_dotenv() -> bool {
    dotenvy::dotenv().is_ok()
}
