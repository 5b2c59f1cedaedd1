//! Wire types for the archive API
//!
//! Field names follow the backend's JSON (camelCase, Mongo-style `_id`).

use serde::{Deserialize, Serialize};

/// Authenticated user as returned by the login endpoint
///
/// This is also the document persisted in session storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Full name
    pub name: String,
    /// Canonical `TUPT-XX-XXXX` identifier
    pub id_number: String,
    /// ISO `YYYY-MM-DD` birthdate
    pub birthdate: String,
    /// Age computed by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserRecord {
    /// Overlay the fields present in `patch` onto this record
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(id) = patch.id {
            self.id = id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(id_number) = patch.id_number {
            self.id_number = id_number;
        }
        if let Some(birthdate) = patch.birthdate {
            self.birthdate = birthdate;
        }
        if patch.age.is_some() {
            self.age = patch.age;
        }
        if patch.created_at.is_some() {
            self.created_at = patch.created_at;
        }
    }
}

/// Partial user record returned by the profile endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// Backend identifier
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Full name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    /// Birthdate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    /// Age
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// `POST /auth/register` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Full name
    pub name: String,
    /// Identifier
    pub id_number: String,
    /// ISO birthdate
    pub birthdate: String,
    /// Password
    pub password: String,
}

/// `POST /auth/login` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Identifier
    pub id_number: String,
    /// Password
    pub password: String,
}

/// `POST /auth/login` success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// The authenticated user
    pub user: UserRecord,
}

/// Generic `{message}` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

/// `PUT /user/profile` body
///
/// Password fields are sent as empty strings when the password is not
/// being changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    /// Backend identifier of the user
    pub user_id: String,
    /// New name (trimmed)
    pub name: String,
    /// New birthdate
    pub birthdate: String,
    /// Current password, required when changing the password
    pub current_password: String,
    /// New password or empty
    pub new_password: String,
}

/// `PUT /user/profile` success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdateResponse {
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Payload
    pub data: ProfileUpdateData,
}

/// Payload of a profile update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdateData {
    /// Updated fields of the user
    pub user: UserPatch,
}
