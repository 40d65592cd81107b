//! User list (home screen).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::response::scalar_to_string;

/// Message used when the list request fails without a server message.
pub const USERS_FAILED: &str = "Failed to fetch users";

/// Alert fallback for list failures that are not connectivity problems and
/// carry no readable server message. Pass to [`ApiError::alert_message`].
///
/// [`ApiError::alert_message`]: crate::error::ApiError::alert_message
pub const USERS_ERROR: &str = "An error occurred while fetching users.";

/// A registered user as returned by the list endpoint.
///
/// Every attribute is optional; the server omits what it does not have.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    /// Document id used by some backends instead of `id`.
    #[serde(default, rename = "_id", deserialize_with = "string_or_number")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub country: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(&Value::deserialize(deserializer)?).filter(|s| !s.is_empty()))
}

impl User {
    /// Stable key for the record: `id`, else `_id`.
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().or(self.object_id.as_deref())
    }

    /// Full name, else username, else `"N/A"`.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("N/A")
    }

    /// Date of birth formatted like `Jun 15, 2024`.
    ///
    /// `"N/A"` when absent; the raw value when it is not a recognizable date.
    pub fn dob_display(&self) -> String {
        match self.dob.as_deref() {
            None => "N/A".to_string(),
            Some(raw) => parse_date(raw)
                .map(|d| d.format("%b %-d, %Y").to_string())
                .unwrap_or_else(|| raw.to_string()),
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part kept).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Converts list items into users, skipping entries that are not objects.
pub fn users_from_items(items: Vec<Value>) -> Vec<User> {
    items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Skipping malformed user record: {}", e);
                None
            }
        })
        .collect()
}

/// Home screen subtitle for a list of `count` users.
pub fn summary(count: usize) -> String {
    match count {
        0 => "You have successfully logged in!".to_string(),
        1 => "1 user found".to_string(),
        n => format!("{} users found", n),
    }
}
