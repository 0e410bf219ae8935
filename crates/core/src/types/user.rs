//! The authenticated user.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// A user returned by the remote auth API on successful login.
///
/// The storefront holds at most one of these for the lifetime of a session
/// and caches its JSON serialization locally so a later process can restore
/// it. Extra fields the remote sends are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID assigned by the remote API.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar image URL.
    #[serde(default)]
    pub image: String,
    /// Session token, when the remote API issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl User {
    /// Full display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_wire_shape() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 3,
            "username": "emilys",
            "email": "emily@example.com",
            "firstName": "Emily",
            "lastName": "Johnson",
            "image": "https://cdn.example.com/emily.png",
            "token": "abc123",
            "gender": "female"
        }))
        .unwrap();

        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.first_name, "Emily");
        assert_eq!(user.token.as_deref(), Some("abc123"));
        assert_eq!(user.display_name(), "Emily Johnson");
    }

    #[test]
    fn test_user_tolerates_missing_optionals() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 9,
            "username": "sam",
            "email": "sam@example.com",
            "firstName": "Sam",
            "lastName": "Park"
        }))
        .unwrap();

        assert!(user.image.is_empty());
        assert!(user.token.is_none());
    }
}
