//! Field rules shared by every collection.
//!
//! Each check takes an already-trimmed value and returns
//! `ModelError::Validation` with a message naming the field.
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ModelError;

/// Inclusive character bounds.
#[derive(Debug, Clone, Copy)]
pub struct Len {
    pub min: usize,
    pub max: usize,
}

pub const EMAIL_LEN: Len = Len { min: 5, max: 254 };
pub const USERNAME_LEN: Len = Len { min: 3, max: 30 };
pub const PERSON_NAME_LEN: Len = Len { min: 1, max: 50 };
pub const HAIR_SALON_NAME_LEN: Len = Len { min: 3, max: 50 };
pub const PASSWORD_LEN: Len = Len { min: 5, max: 128 };
pub const PHONE_NUMBER_LEN: Len = Len { min: 6, max: 20 };
pub const HAIR_SERVICE_NAME_LEN: Len = Len { min: 2, max: 50 };
pub const OBSERVATIONS_LEN: Len = Len { min: 1, max: 500 };
pub const INGREDIENT_BRAND_LEN: Len = Len { min: 2, max: 50 };
pub const INGREDIENT_HEIGHT_LEN: Len = Len { min: 1, max: 5 };
pub const INGREDIENT_QUANTITY_LEN: Len = Len { min: 1, max: 10 };
pub const INGREDIENT_TONE_LEN: Len = Len { min: 1, max: 30 };

pub const SHEET_MAX_HAIR_SERVICES: usize = 10;
pub const SHEET_DATE_FORMAT: &str = "%d/%m/%Y";

pub const OXIDIZING_ERROR: &str = "Oxidizing must be a number between 0 and 100 with no more than 2 decimals";

static OXIDIZING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}(\.\d{1,2})?|100)$").expect("valid regex"));
static SHEET_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid regex"));

pub fn length(field: &str, value: &str, len: Len) -> Result<(), ModelError> {
    let n = value.chars().count();
    if n < len.min || n > len.max {
        return Err(ModelError::Validation(format!(
            "{field} must be between {} and {} characters",
            len.min, len.max
        )));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), ModelError> {
    length(field, value, EMAIL_LEN)?;
    let invalid = || ModelError::Validation(format!("{field} must be a valid email"));
    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && tld.len() >= 2 => Ok(()),
        _ => Err(invalid()),
    }
}

pub fn username(value: &str) -> Result<(), ModelError> {
    length("username", value, USERNAME_LEN)?;
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ModelError::Validation("username must only contain letters and numbers".into()));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), ModelError> {
    length("password", value, PASSWORD_LEN)
}

/// `dd/MM/yyyy`, and it has to exist on the calendar.
pub fn sheet_date(value: &str) -> Result<NaiveDate, ModelError> {
    let invalid = || ModelError::Validation(format!("date must be a valid date with format dd/MM/yyyy, got `{value}`"));
    if !SHEET_DATE_RE.is_match(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, SHEET_DATE_FORMAT).map_err(|_| invalid())
}

pub fn oxidizing(value: &str) -> Result<(), ModelError> {
    if OXIDIZING_RE.is_match(value) {
        Ok(())
    } else {
        Err(ModelError::Validation(OXIDIZING_ERROR.into()))
    }
}

/// Trim in place; `None` when nothing is left.
pub fn trim_opt(value: &mut Option<String>) {
    if let Some(v) = value.take() {
        let t = v.trim();
        if !t.is_empty() {
            *value = Some(t.to_string());
        }
    }
}

pub fn trim(value: &mut String) {
    let t = value.trim();
    if t.len() != value.len() {
        *value = t.to_string();
    }
}
