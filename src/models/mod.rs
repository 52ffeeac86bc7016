// src/models/mod.rs

pub mod admin_user;
pub mod announcement;
pub mod contact;
pub mod event;
pub mod giving_record;
pub mod member;
pub mod ministry;
pub mod prayer_request;
pub mod sermon;
pub mod small_group;
pub mod visitor;

use url::Url;

/// Validates that a string is a correctly formatted URL.
/// Shared by the media/image URL fields across models.
pub fn validate_url_string(url: &str) -> Result<(), validator::ValidationError> {
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}

/// Deserializer for nullable update fields.
///
/// An absent key deserializes to `None` (leave the column alone); an explicit
/// JSON null becomes `Some(None)` (clear the column). Must be paired with
/// `#[serde(default)]` on the field.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
