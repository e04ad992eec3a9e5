//! Authenticated-user snapshot.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::email::Email;
use crate::types::id::UserId;

/// The user object persisted alongside the auth token.
///
/// The backend is free to attach extra fields (avatar, phone, roles);
/// they are preserved in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend user id.
    pub id: UserId,
    /// Account email.
    pub email: Email,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Open extension fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_extension_fields() {
        let raw = r#"{"id": "u-1", "email": "a@b.com", "name": "An", "phone": "555"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.email.as_str(), "a@b.com");

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back.get("phone").and_then(Value::as_str), Some("555"));
    }
}
